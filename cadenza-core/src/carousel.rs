//! One carousel: its track layout, its scroll engine and its input
//! controller. Each carousel owns its own engine; nothing is shared or
//! indexed globally.

use std::time::Instant;

use cadenza_model::ItemSet;

use crate::config::CarouselConfig;
use crate::engine::{EngineMode, Frame, ScrollEngine, ScrollState};
use crate::input::{InputController, InputEvent, InputOutcome};
use crate::track::{MeasureItem, TrackLayout};

#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    layout: TrackLayout,
    viewport_width_px: f32,
    engine: ScrollEngine,
    input: InputController,
}

impl Carousel {
    pub fn new(config: CarouselConfig) -> Self {
        Self {
            engine: ScrollEngine::new(config.speed_px_per_frame),
            input: InputController::new(&config),
            layout: TrackLayout::empty(),
            viewport_width_px: 0.0,
            config,
        }
    }

    /// Lay out `items` for the given viewport and hand the unit width to the
    /// engine. Call again whenever the item set changes.
    pub fn load<P, M>(
        &mut self,
        items: &ItemSet<P>,
        viewport_width_px: f32,
        measure: &M,
    ) where
        M: MeasureItem<P> + ?Sized,
    {
        self.viewport_width_px = viewport_width_px;
        self.layout = TrackLayout::build_for_viewport(
            items,
            self.config.replicate,
            viewport_width_px,
            self.config.speed_px_per_frame,
            measure,
        );
        self.engine.set_unit_width(self.layout.unit_width_px());
        log::debug!(
            "Carousel track built: {} unique, {} replicas, unit {:.1}px",
            self.layout.unique_count(),
            self.layout.replica_count(),
            self.layout.unit_width_px()
        );
    }

    /// Viewport changed: re-resolve the replicate factor against the
    /// existing measurements.
    pub fn resize(&mut self, viewport_width_px: f32) {
        self.viewport_width_px = viewport_width_px;
        if self.layout.is_empty() {
            return;
        }
        let copies = self.config.replicate.resolve(
            self.layout.unit_width_px(),
            viewport_width_px,
            self.config.speed_px_per_frame,
        );
        if copies != self.layout.replicate_factor() {
            self.layout = self.layout.with_replicas(copies);
            log::debug!(
                "Carousel resized to {viewport_width_px:.1}px: {copies} replicas"
            );
        }
    }

    /// Run one animation frame.
    pub fn frame(&mut self, now: Instant) -> Frame {
        self.engine.tick(now)
    }

    pub fn handle_input(
        &mut self,
        event: InputEvent,
        now: Instant,
    ) -> InputOutcome {
        self.input.handle(&mut self.engine, event, now)
    }

    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn engine(&self) -> &ScrollEngine {
        &self.engine
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn state(&self) -> ScrollState {
        self.engine.state()
    }

    pub fn mode(&self) -> EngineMode {
        self.engine.mode()
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width_px
    }

    pub fn wants_frame(&self) -> bool {
        self.engine.wants_frame()
    }

    pub fn suspend(&mut self) {
        self.engine.suspend();
    }

    pub fn unsuspend(&mut self) {
        self.engine.unsuspend();
    }

    pub fn teardown(&mut self) {
        self.engine.teardown();
        log::debug!("Carousel torn down");
    }
}
