//! # Cadenza Core
//!
//! Infinite-scrolling carousel engine behind the Cadenza composer showcase.
//!
//! ## Overview
//!
//! - **Track layout**: the unique item set followed by verbatim replicas,
//!   sized so the loop never shows a seam ([`track`])
//! - **Scroll engine**: fixed-step autoplay with exact modulo wraparound and
//!   explicit pause/manual/resume transitions ([`engine`])
//! - **Input**: pointer/touch drag with release momentum, hover and tab
//!   visibility arbitration ([`input`])
//! - **View toggle**: carousel ⇄ grid with a persisted preference and a
//!   grid populated once on first show ([`view`], [`preferences`])
//! - **Showcase**: the host-facing bundle wiring all of the above
//!   ([`showcase`])
//!
//! The engine is single-threaded and frame driven. Hosts pass the frame
//! timestamp in, which keeps deferred resumes deterministic.
//!
//! ## Examples
//!
//! ```
//! use std::time::Instant;
//!
//! use cadenza_core::{
//!     CarouselConfig, Frame, MemoryPreferenceStore, Showcase, UniformWidth,
//!     ViewOptions,
//! };
//! use cadenza_model::{Item, ItemId, ItemSet};
//!
//! let items: ItemSet<&str> = ["ada", "ben", "cleo"]
//!     .into_iter()
//!     .map(|slug| Item::new(ItemId::parse(slug).unwrap(), slug))
//!     .collect();
//!
//! let mut showcase = Showcase::new(
//!     items,
//!     1280.0,
//!     &UniformWidth(240.0),
//!     CarouselConfig::default(),
//!     MemoryPreferenceStore::new(),
//!     ViewOptions::default(),
//! );
//!
//! assert_eq!(showcase.frame(Instant::now()), Frame::Advanced(-1.0));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod carousel;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod input;
pub mod preferences;
pub mod showcase;
pub mod track;
pub mod view;

pub use cadenza_model;

pub use carousel::Carousel;
pub use config::{CarouselConfig, RuntimeConfig, ViewOptions};
pub use engine::{EngineMode, Frame, ScrollEngine, ScrollState, wrap_position};
pub use error::{CadenzaError, Result};
pub use input::{
    DragSource, InputController, InputEvent, InputOutcome, PointerButton,
    Visibility,
};
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
};
pub use showcase::Showcase;
pub use track::{
    MeasureItem, Placement, PlacementKey, ReplicateFactor, TrackLayout,
    UniformWidth,
};
pub use view::{GridCell, SurfaceState, ViewChanged, ViewCoordinator};
