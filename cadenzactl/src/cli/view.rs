use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use cadenza_core::{FilePreferenceStore, PreferenceStore};
use cadenza_model::ViewKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    Set(ViewKind),
    Get,
    Clear,
    Path,
}

/// `--store` when given, otherwise the per-user preferences file.
pub fn open_store(path: Option<PathBuf>) -> Result<FilePreferenceStore> {
    match path {
        Some(path) => Ok(FilePreferenceStore::new(path)),
        None => Ok(FilePreferenceStore::default_location()?),
    }
}

pub fn run<S, W>(store: &mut S, action: &ViewAction, out: &mut W) -> Result<()>
where
    S: PreferenceStore,
    W: Write,
{
    match action {
        ViewAction::Set(view) => {
            store.save_view(*view)?;
            writeln!(out, "{view}")?;
        }
        ViewAction::Get => match store.load_view()? {
            Some(view) => writeln!(out, "{view}")?,
            None => writeln!(out, "{} (default)", ViewKind::default())?,
        },
        ViewAction::Clear => {
            store.clear()?;
            writeln!(out, "cleared")?;
        }
        // Needs the concrete store; handled by the caller.
        ViewAction::Path => {}
    }
    Ok(())
}
