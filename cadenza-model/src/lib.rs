//! Core data model definitions shared across Cadenza crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod item;
pub mod view;

pub use error::{ModelError, Result as ModelResult};
pub use ids::ItemId;
pub use item::{Item, ItemSet};
pub use view::ViewKind;
