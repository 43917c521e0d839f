//! Host-facing bundle: one item set shown either as an autoplaying
//! carousel or as a lazily populated grid.
//!
//! Switching to the grid suspends the carousel engine so no frames are
//! spent animating a hidden track; switching back unsuspends it.

use std::time::Instant;

use cadenza_model::{ItemSet, ViewKind};

use crate::carousel::Carousel;
use crate::config::{CarouselConfig, ViewOptions};
use crate::engine::Frame;
use crate::input::{InputEvent, InputOutcome};
use crate::preferences::PreferenceStore;
use crate::track::MeasureItem;
use crate::view::{SurfaceState, ViewChanged, ViewCoordinator};

#[derive(Debug)]
pub struct Showcase<P, S> {
    items: ItemSet<P>,
    carousel: Carousel,
    views: ViewCoordinator<S>,
}

impl<P, S: PreferenceStore> Showcase<P, S> {
    pub fn new<M>(
        items: ItemSet<P>,
        viewport_width_px: f32,
        measure: &M,
        config: CarouselConfig,
        store: S,
        options: ViewOptions,
    ) -> Self
    where
        M: MeasureItem<P> + ?Sized,
    {
        let mut carousel = Carousel::new(config);
        carousel.load(&items, viewport_width_px, measure);

        let mut views = ViewCoordinator::load(store, options);
        views.apply_initial(&items);
        if views.current() == ViewKind::Grid {
            carousel.suspend();
        }

        Self {
            items,
            carousel,
            views,
        }
    }

    /// Run one animation frame for the carousel.
    pub fn frame(&mut self, now: Instant) -> Frame {
        self.carousel.frame(now)
    }

    /// Route input to the carousel. Ignored while the grid is showing, since
    /// the hidden carousel is non-interactive.
    pub fn handle_input(
        &mut self,
        event: InputEvent,
        now: Instant,
    ) -> InputOutcome {
        if !self.views.surface(ViewKind::Carousel).interactive {
            return InputOutcome::Ignored;
        }
        self.carousel.handle_input(event, now)
    }

    pub fn show_carousel(&mut self) -> Option<ViewChanged> {
        let change = self.views.show_carousel();
        self.carousel.unsuspend();
        change
    }

    pub fn show_grid(&mut self) -> Option<ViewChanged> {
        let change = self.views.show_grid(&self.items);
        self.carousel.suspend();
        change
    }

    pub fn show(&mut self, view: ViewKind) -> Option<ViewChanged> {
        match view {
            ViewKind::Carousel => self.show_carousel(),
            ViewKind::Grid => self.show_grid(),
        }
    }

    pub fn toggle(&mut self) -> Option<ViewChanged> {
        self.show(self.views.current().other())
    }

    /// New content: rebuild the track. The grid keeps its first population.
    pub fn replace_items<M>(&mut self, items: ItemSet<P>, measure: &M)
    where
        M: MeasureItem<P> + ?Sized,
    {
        self.items = items;
        let viewport = self.carousel.viewport_width();
        self.carousel.load(&self.items, viewport, measure);
    }

    pub fn resize(&mut self, viewport_width_px: f32) {
        self.carousel.resize(viewport_width_px);
    }

    pub fn teardown(&mut self) {
        self.carousel.teardown();
    }

    pub fn on_view_change<F>(&mut self, listener: F)
    where
        F: FnMut(&ViewChanged) + 'static,
    {
        self.views.on_view_change(listener);
    }

    pub fn current_view(&self) -> ViewKind {
        self.views.current()
    }

    pub fn surface(&self, view: ViewKind) -> SurfaceState {
        self.views.surface(view)
    }

    pub fn items(&self) -> &ItemSet<P> {
        &self.items
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn views(&self) -> &ViewCoordinator<S> {
        &self.views
    }

    pub fn into_store(self) -> S {
        self.views.into_store()
    }
}
