//! Carousel ⇄ grid view toggle.
//!
//! Both presentations render the same `ItemSet`. The grid is populated
//! lazily, at most once for the coordinator's lifetime, and the hidden
//! presentation is reported as non-interactive so the host can detach it
//! from focus and stop animating it.

use std::time::Duration;

use cadenza_model::{ItemId, ItemSet, ViewKind};

use crate::config::ViewOptions;
use crate::preferences::PreferenceStore;

/// One grid entry.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub id: ItemId,
    pub source_index: usize,
    /// Staggered entrance delay for the cell's reveal animation.
    pub reveal_delay: Duration,
}

/// Presentation flags for one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceState {
    pub visible: bool,
    pub interactive: bool,
}

impl SurfaceState {
    const SHOWN: Self = Self {
        visible: true,
        interactive: true,
    };
    const HIDDEN: Self = Self {
        visible: false,
        interactive: false,
    };
}

/// Notification sent to listeners when the visible view changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewChanged {
    pub previous: ViewKind,
    pub current: ViewKind,
}

type ViewListener = Box<dyn FnMut(&ViewChanged)>;

pub struct ViewCoordinator<S> {
    store: S,
    options: ViewOptions,
    current: ViewKind,
    grid: Vec<GridCell>,
    listeners: Vec<ViewListener>,
}

impl<S> std::fmt::Debug for ViewCoordinator<S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewCoordinator")
            .field("store", &self.store)
            .field("options", &self.options)
            .field("current", &self.current)
            .field("grid_cells", &self.grid.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<S: PreferenceStore> ViewCoordinator<S> {
    /// Derive the initial view. With `restore_preference_on_load` the stored
    /// preference wins; otherwise the carousel is always shown first. A
    /// failed read degrades to the carousel.
    pub fn load(store: S, options: ViewOptions) -> Self {
        let current = if options.restore_preference_on_load {
            match store.load_view() {
                Ok(view) => view.unwrap_or_default(),
                Err(err) => {
                    log::warn!(
                        "Failed to read preferred view, defaulting to carousel: {err}"
                    );
                    ViewKind::Carousel
                }
            }
        } else {
            ViewKind::Carousel
        };
        log::debug!("Initial view: {current}");
        Self {
            store,
            options,
            current,
            grid: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn current(&self) -> ViewKind {
        self.current
    }

    /// The toggle control that should be highlighted.
    pub fn active_toggle(&self) -> ViewKind {
        self.current
    }

    pub fn surface(&self, view: ViewKind) -> SurfaceState {
        if view == self.current {
            SurfaceState::SHOWN
        } else {
            SurfaceState::HIDDEN
        }
    }

    pub fn grid_cells(&self) -> &[GridCell] {
        &self.grid
    }

    pub fn is_grid_populated(&self) -> bool {
        !self.grid.is_empty()
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn on_view_change<F>(&mut self, listener: F)
    where
        F: FnMut(&ViewChanged) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Populate the grid for an initial Grid view. Does not write the
    /// preference.
    pub fn apply_initial<P>(&mut self, items: &ItemSet<P>) {
        if self.current == ViewKind::Grid {
            self.populate_grid(items);
        }
    }

    /// Explicit user toggle to the carousel.
    pub fn show_carousel(&mut self) -> Option<ViewChanged> {
        self.select(ViewKind::Carousel)
    }

    /// Explicit user toggle to the grid. Populates it on first show only.
    pub fn show_grid<P>(&mut self, items: &ItemSet<P>) -> Option<ViewChanged> {
        self.populate_grid(items);
        self.select(ViewKind::Grid)
    }

    fn select(&mut self, view: ViewKind) -> Option<ViewChanged> {
        if let Err(err) = self.store.save_view(view) {
            log::warn!("Failed to persist preferred view '{view}': {err}");
        }
        if view == self.current {
            return None;
        }
        let change = ViewChanged {
            previous: self.current,
            current: view,
        };
        self.current = view;
        for listener in &mut self.listeners {
            listener(&change);
        }
        log::debug!("View changed: {} -> {}", change.previous, change.current);
        Some(change)
    }

    fn populate_grid<P>(&mut self, items: &ItemSet<P>) {
        if !self.grid.is_empty() || items.is_empty() {
            return;
        }
        let stagger = self.options.reveal_stagger;
        let cap = self.options.reveal_max_delay;
        self.grid = items
            .iter()
            .enumerate()
            .map(|(index, item)| GridCell {
                id: item.id.clone(),
                source_index: index,
                reveal_delay: stagger
                    .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
                    .min(cap),
            })
            .collect();
        log::debug!("Grid populated with {} cells", self.grid.len());
    }
}
