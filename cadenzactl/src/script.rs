//! Input files for `cadenzactl simulate`.
//!
//! Items are a JSON array of `{"id": ..., "payload": {"width": ..}}`
//! entries. A script is a JSON array of steps keyed by the frame they run
//! before:
//!
//! ```json
//! [
//!   {"frame": 10, "kind": "input", "event": {"type": "pointer_enter"}},
//!   {"frame": 40, "kind": "show", "view": "grid"},
//!   {"frame": 60, "kind": "resize", "viewport": 1920.0}
//! ]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use cadenza_core::InputEvent;
use cadenza_model::{Item, ItemSet, ViewKind};
use serde::{Deserialize, Serialize};

/// Per-card data the simulator needs to lay out a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPayload {
    #[serde(default)]
    pub name: Option<String>,
    pub width: f32,
}

pub fn card_width(item: &Item<CardPayload>) -> f32 {
    item.payload.width
}

pub fn load_items(path: &Path) -> Result<ItemSet<CardPayload>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading items from {}", path.display()))?;
    let items: ItemSet<CardPayload> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing items in {}", path.display()))?;
    if items.duplicates_dropped() > 0 {
        log::warn!(
            "Dropped {} duplicate item id(s) from {}",
            items.duplicates_dropped(),
            path.display()
        );
    }
    Ok(items)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptStep {
    Input { event: InputEvent },
    Show { view: ViewKind },
    Toggle,
    Resize { viewport: f32 },
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedStep {
    pub frame: u64,
    #[serde(flatten)]
    pub step: ScriptStep,
}

/// Steps ordered by frame; steps sharing a frame keep file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    steps: Vec<ScriptedStep>,
}

impl Script {
    pub fn new(mut steps: Vec<ScriptedStep>) -> Self {
        steps.sort_by_key(|s| s.frame);
        Self { steps }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Self::parse(&raw)
            .with_context(|| format!("parsing script {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let steps: Vec<ScriptedStep> = serde_json::from_str(raw)?;
        Ok(Self::new(steps))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps scheduled for `frame`.
    pub fn at(&self, frame: u64) -> impl Iterator<Item = &ScriptStep> {
        let start = self.steps.partition_point(|s| s.frame < frame);
        self.steps[start..]
            .iter()
            .take_while(move |s| s.frame == frame)
            .map(|s| &s.step)
    }
}
