//! Persistence for the preferred view.
//!
//! One key, `preferred_view`, read at load and written on each explicit
//! toggle. The file store mirrors how the desktop player keeps its
//! `config.json` under the platform config dir.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use cadenza_model::ViewKind;
use serde::{Deserialize, Serialize};

use crate::constants::storage;
use crate::error::{CadenzaError, Result};

pub trait PreferenceStore {
    fn load_view(&self) -> Result<Option<ViewKind>>;
    fn save_view(&mut self, view: ViewKind) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// In-process store. Cloned handles share one slot, the way two page loads
/// read the same browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    slot: Rc<Cell<Option<ViewKind>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(view: ViewKind) -> Self {
        let store = Self::new();
        store.slot.set(Some(view));
        store
    }

    pub fn get(&self) -> Option<ViewKind> {
        self.slot.get()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_view(&self) -> Result<Option<ViewKind>> {
        Ok(self.slot.get())
    }

    fn save_view(&mut self, view: ViewKind) -> Result<()> {
        self.slot.set(Some(view));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.slot.set(None);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    preferred_view: Option<ViewKind>,
}

/// JSON file store, `{"preferred_view": "grid"}`.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/cadenza/preferences.json`.
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or(CadenzaError::NoConfigDir)?;
        Ok(Self::new(
            config_dir
                .join(storage::APP_DIR)
                .join(storage::PREFERENCES_FILE),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CadenzaError {
        CadenzaError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> CadenzaError {
        CadenzaError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_view(&self) -> Result<Option<ViewKind>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| self.io_error(e))?;
        let stored: StoredPreferences =
            serde_json::from_str(&content).map_err(|e| self.json_error(e))?;
        Ok(stored.preferred_view)
    }

    fn save_view(&mut self, view: ViewKind) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let stored = StoredPreferences {
            preferred_view: Some(view),
        };
        let content = serde_json::to_string_pretty(&stored)
            .map_err(|e| self.json_error(e))?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))?;
        log::debug!("Saved preferred view '{view}' to {}", self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_handles_share_storage() {
        let mut first = MemoryPreferenceStore::new();
        let second = first.clone();
        first.save_view(ViewKind::Grid).unwrap();
        assert_eq!(second.load_view().unwrap(), Some(ViewKind::Grid));
        first.clear().unwrap();
        assert_eq!(second.get(), None);
    }
}
