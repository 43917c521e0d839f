//! Pointer, touch, hover and visibility handling for a carousel.
//!
//! The controller turns raw input into `ScrollEngine` transitions. Drag
//! always takes precedence: while a drag is active, hover and visibility
//! changes are recorded but never resume autoplay, and only the drag's own
//! release schedules the resume.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::CarouselConfig;
use crate::engine::ScrollEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Auxiliary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Input delivered by the host. `PointerUp` must come from a global
/// (document-level) listener so releases outside the element still end
/// the drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerEnter,
    PointerLeave,
    PointerDown {
        x: f32,
        #[serde(default)]
        button: PointerButton,
    },
    PointerMove {
        x: f32,
    },
    PointerUp,
    /// First touch point only; multi-touch is not tracked.
    TouchStart {
        x: f32,
    },
    TouchMove {
        x: f32,
    },
    TouchEnd,
    /// Pointer capture lost; end the drag without momentum.
    Cancel,
    VisibilityChanged {
        visibility: Visibility,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Pointer,
    Touch,
}

/// What an event did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    Ignored,
    Paused,
    Resumed,
    /// Hover or visibility recorded with no engine transition.
    Recorded,
    DragStarted { origin_px: f32 },
    DragMoved { manual_px: f32 },
    DragReleased { baseline_px: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    source: DragSource,
    start_x: f32,
    origin_px: f32,
    manual_px: f32,
    /// Change of the manual position between the last two moves.
    velocity_px: f32,
    last_input_at: Instant,
}

#[derive(Debug, Clone)]
pub struct InputController {
    drag_sensitivity: f32,
    momentum_multiplier: f32,
    momentum_window: Duration,
    drag_resume_delay: Duration,
    touch_resume_delay: Duration,
    hovering: bool,
    hidden: bool,
    drag: Option<DragSession>,
}

impl InputController {
    pub fn new(config: &CarouselConfig) -> Self {
        Self {
            drag_sensitivity: config.drag_sensitivity,
            momentum_multiplier: config.momentum_multiplier,
            momentum_window: config.momentum_window,
            drag_resume_delay: config.drag_resume_delay,
            touch_resume_delay: config.touch_resume_delay,
            hovering: false,
            hidden: false,
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn drag_source(&self) -> Option<DragSource> {
        self.drag.map(|d| d.source)
    }

    pub fn momentum_multiplier(&self) -> f32 {
        self.momentum_multiplier
    }

    /// A drag that has seen no move or release for at least `limit`.
    pub fn is_drag_stuck(&self, now: Instant, limit: Duration) -> bool {
        self.drag.is_some_and(|d| {
            now.saturating_duration_since(d.last_input_at) >= limit
        })
    }

    pub fn handle(
        &mut self,
        engine: &mut ScrollEngine,
        event: InputEvent,
        now: Instant,
    ) -> InputOutcome {
        if engine.is_torn_down() {
            return InputOutcome::Ignored;
        }
        match event {
            InputEvent::PointerEnter => self.on_enter(engine),
            InputEvent::PointerLeave => self.on_leave(engine),
            InputEvent::PointerDown { x, button } => {
                if button != PointerButton::Primary {
                    return InputOutcome::Ignored;
                }
                self.start_drag(engine, DragSource::Pointer, x, now)
            }
            InputEvent::PointerMove { x } => {
                self.move_drag(engine, DragSource::Pointer, x, now)
            }
            InputEvent::PointerUp => {
                self.release(engine, DragSource::Pointer, now, true)
            }
            InputEvent::TouchStart { x } => {
                engine.pause();
                self.start_drag(engine, DragSource::Touch, x, now)
            }
            InputEvent::TouchMove { x } => {
                self.move_drag(engine, DragSource::Touch, x, now)
            }
            InputEvent::TouchEnd => {
                self.release(engine, DragSource::Touch, now, true)
            }
            InputEvent::Cancel => match self.drag {
                Some(drag) => self.release(engine, drag.source, now, false),
                None => InputOutcome::Ignored,
            },
            InputEvent::VisibilityChanged { visibility } => {
                self.on_visibility(engine, visibility)
            }
        }
    }

    fn on_enter(&mut self, engine: &mut ScrollEngine) -> InputOutcome {
        self.hovering = true;
        if self.drag.is_some() {
            return InputOutcome::Recorded;
        }
        engine.pause();
        InputOutcome::Paused
    }

    fn on_leave(&mut self, engine: &mut ScrollEngine) -> InputOutcome {
        self.hovering = false;
        if self.drag.is_some() || self.hidden {
            return InputOutcome::Recorded;
        }
        if engine.resume() {
            InputOutcome::Resumed
        } else {
            InputOutcome::Recorded
        }
    }

    fn on_visibility(
        &mut self,
        engine: &mut ScrollEngine,
        visibility: Visibility,
    ) -> InputOutcome {
        match visibility {
            Visibility::Hidden => {
                self.hidden = true;
                engine.pause();
                InputOutcome::Paused
            }
            Visibility::Visible => {
                self.hidden = false;
                if self.drag.is_some() || self.hovering {
                    return InputOutcome::Recorded;
                }
                if engine.resume() {
                    InputOutcome::Resumed
                } else {
                    InputOutcome::Recorded
                }
            }
        }
    }

    fn start_drag(
        &mut self,
        engine: &mut ScrollEngine,
        source: DragSource,
        x: f32,
        now: Instant,
    ) -> InputOutcome {
        if self.drag.is_some() {
            return InputOutcome::Ignored;
        }
        let origin_px = engine.begin_manual();
        self.drag = Some(DragSession {
            source,
            start_x: x,
            origin_px,
            manual_px: origin_px,
            velocity_px: 0.0,
            last_input_at: now,
        });
        log::trace!("Drag started ({source:?}) at x={x:.1} from {origin_px:.2}px");
        InputOutcome::DragStarted { origin_px }
    }

    fn move_drag(
        &mut self,
        engine: &mut ScrollEngine,
        source: DragSource,
        x: f32,
        now: Instant,
    ) -> InputOutcome {
        let sensitivity = self.drag_sensitivity;
        let Some(drag) = self.drag.as_mut().filter(|d| d.source == source)
        else {
            return InputOutcome::Ignored;
        };
        let manual_px = drag.origin_px + (x - drag.start_x) * sensitivity;
        drag.velocity_px = manual_px - drag.manual_px;
        drag.manual_px = manual_px;
        drag.last_input_at = now;
        engine.update_manual(manual_px);
        InputOutcome::DragMoved { manual_px }
    }

    fn release(
        &mut self,
        engine: &mut ScrollEngine,
        source: DragSource,
        now: Instant,
        with_momentum: bool,
    ) -> InputOutcome {
        let Some(drag) = self.drag.filter(|d| d.source == source) else {
            return InputOutcome::Ignored;
        };
        self.drag = None;

        // Velocity is only live while the pointer is still moving.
        let at_rest = now.saturating_duration_since(drag.last_input_at)
            > self.momentum_window;
        let baseline_px = if with_momentum && !at_rest {
            drag.manual_px + drag.velocity_px * self.momentum_multiplier
        } else {
            drag.manual_px
        };
        engine.end_manual(baseline_px);

        // A mouse still over the carousel keeps it paused until it leaves.
        let keep_paused = self.hidden
            || (source == DragSource::Pointer && self.hovering);
        if !keep_paused {
            let delay = match source {
                DragSource::Pointer => self.drag_resume_delay,
                DragSource::Touch => self.touch_resume_delay,
            };
            engine.schedule_resume(now + delay);
        }
        log::trace!(
            "Drag released ({source:?}): manual {:.2}px, velocity {:.2}px, baseline {baseline_px:.2}px",
            drag.manual_px,
            drag.velocity_px
        );
        InputOutcome::DragReleased { baseline_px }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineMode;

    fn setup() -> (ScrollEngine, InputController) {
        let config = CarouselConfig::default();
        let mut engine = ScrollEngine::new(config.speed_px_per_frame);
        engine.set_unit_width(1000.0);
        (engine, InputController::new(&config))
    }

    #[test]
    fn only_primary_button_starts_a_drag() {
        let (mut engine, mut input) = setup();
        let now = Instant::now();
        for button in [PointerButton::Secondary, PointerButton::Auxiliary] {
            let outcome = input.handle(
                &mut engine,
                InputEvent::PointerDown { x: 10.0, button },
                now,
            );
            assert_eq!(outcome, InputOutcome::Ignored);
        }
        assert!(!input.is_dragging());
        assert_eq!(engine.mode(), EngineMode::Running);
    }

    #[test]
    fn sensitivity_scales_pointer_travel() {
        let config = CarouselConfig {
            drag_sensitivity: 2.0,
            ..CarouselConfig::default()
        };
        let mut engine = ScrollEngine::new(1.0);
        engine.set_unit_width(1000.0);
        engine.set_position(-100.0);
        let mut input = InputController::new(&config);
        let now = Instant::now();

        input.handle(
            &mut engine,
            InputEvent::PointerDown { x: 50.0, button: PointerButton::Primary },
            now,
        );
        let outcome =
            input.handle(&mut engine, InputEvent::PointerMove { x: 40.0 }, now);
        assert_eq!(outcome, InputOutcome::DragMoved { manual_px: -120.0 });
        assert_eq!(engine.rendered_offset(), -120.0);
    }

    #[test]
    fn moves_without_a_drag_are_ignored() {
        let (mut engine, mut input) = setup();
        let now = Instant::now();
        let outcome =
            input.handle(&mut engine, InputEvent::PointerMove { x: 40.0 }, now);
        assert_eq!(outcome, InputOutcome::Ignored);
        let outcome =
            input.handle(&mut engine, InputEvent::TouchMove { x: 40.0 }, now);
        assert_eq!(outcome, InputOutcome::Ignored);
    }

    #[test]
    fn touch_end_schedules_the_long_resume() {
        let (mut engine, mut input) = setup();
        let t0 = Instant::now();
        input.handle(&mut engine, InputEvent::TouchStart { x: 100.0 }, t0);
        assert_eq!(engine.mode(), EngineMode::ManualOverride);
        input.handle(&mut engine, InputEvent::TouchEnd, t0);

        assert_eq!(engine.mode(), EngineMode::Paused);
        assert_eq!(
            engine.pending_resume(),
            Some(t0 + Duration::from_millis(1000))
        );
    }

    #[test]
    fn release_after_holding_still_has_no_momentum() {
        let (mut engine, mut input) = setup();
        let t0 = Instant::now();
        input.handle(
            &mut engine,
            InputEvent::PointerDown { x: 200.0, button: PointerButton::Primary },
            t0,
        );
        input.handle(&mut engine, InputEvent::PointerMove { x: 190.0 }, t0);

        let outcome = input.handle(
            &mut engine,
            InputEvent::PointerUp,
            t0 + Duration::from_secs(2),
        );
        assert_eq!(outcome, InputOutcome::DragReleased { baseline_px: -10.0 });
    }

    #[test]
    fn release_within_window_keeps_momentum() {
        let (mut engine, mut input) = setup();
        let t0 = Instant::now();
        input.handle(
            &mut engine,
            InputEvent::PointerDown { x: 200.0, button: PointerButton::Primary },
            t0,
        );
        input.handle(&mut engine, InputEvent::PointerMove { x: 190.0 }, t0);

        let outcome = input.handle(
            &mut engine,
            InputEvent::PointerUp,
            t0 + Duration::from_millis(16),
        );
        assert_eq!(outcome, InputOutcome::DragReleased { baseline_px: -210.0 });
    }

    #[test]
    fn release_while_hovering_stays_paused_until_leave() {
        let (mut engine, mut input) = setup();
        let t0 = Instant::now();
        input.handle(&mut engine, InputEvent::PointerEnter, t0);
        input.handle(
            &mut engine,
            InputEvent::PointerDown { x: 10.0, button: PointerButton::Primary },
            t0,
        );
        input.handle(&mut engine, InputEvent::PointerUp, t0);

        assert!(engine.pending_resume().is_none());
        engine.tick(t0 + Duration::from_secs(2));
        assert_eq!(engine.mode(), EngineMode::Paused);

        assert_eq!(
            input.handle(&mut engine, InputEvent::PointerLeave, t0),
            InputOutcome::Resumed
        );
        assert_eq!(engine.mode(), EngineMode::Running);
    }

    #[test]
    fn cancel_ends_drag_without_momentum() {
        let (mut engine, mut input) = setup();
        let now = Instant::now();
        input.handle(&mut engine, InputEvent::TouchStart { x: 100.0 }, now);
        input.handle(&mut engine, InputEvent::TouchMove { x: 90.0 }, now);
        input.handle(&mut engine, InputEvent::TouchMove { x: 80.0 }, now);
        let outcome = input.handle(&mut engine, InputEvent::Cancel, now);

        assert_eq!(outcome, InputOutcome::DragReleased { baseline_px: -20.0 });
        assert!(!input.is_dragging());
    }

    #[test]
    fn hidden_tab_pauses_and_visible_resumes() {
        let (mut engine, mut input) = setup();
        let now = Instant::now();
        let hidden = InputEvent::VisibilityChanged {
            visibility: Visibility::Hidden,
        };
        let visible = InputEvent::VisibilityChanged {
            visibility: Visibility::Visible,
        };

        assert_eq!(input.handle(&mut engine, hidden, now), InputOutcome::Paused);
        assert_eq!(engine.mode(), EngineMode::Paused);
        assert_eq!(input.handle(&mut engine, visible, now), InputOutcome::Resumed);
        assert_eq!(engine.mode(), EngineMode::Running);
    }

    #[test]
    fn hiding_the_tab_drops_a_pending_resume() {
        let (mut engine, mut input) = setup();
        let t0 = Instant::now();
        input.handle(&mut engine, InputEvent::TouchStart { x: 0.0 }, t0);
        input.handle(&mut engine, InputEvent::TouchEnd, t0);
        assert!(engine.pending_resume().is_some());

        input.handle(
            &mut engine,
            InputEvent::VisibilityChanged { visibility: Visibility::Hidden },
            t0,
        );
        assert!(engine.pending_resume().is_none());
        engine.tick(t0 + Duration::from_secs(5));
        assert_eq!(engine.mode(), EngineMode::Paused);
    }

    #[test]
    fn stuck_drag_is_detected() {
        let (mut engine, mut input) = setup();
        let t0 = Instant::now();
        input.handle(
            &mut engine,
            InputEvent::PointerDown { x: 10.0, button: PointerButton::Primary },
            t0,
        );
        let limit = Duration::from_secs(10);
        assert!(!input.is_drag_stuck(t0 + Duration::from_secs(1), limit));
        assert!(input.is_drag_stuck(t0 + Duration::from_secs(11), limit));
    }

    #[test]
    fn events_after_teardown_are_ignored() {
        let (mut engine, mut input) = setup();
        engine.teardown();
        let outcome = input.handle(
            &mut engine,
            InputEvent::PointerDown { x: 1.0, button: PointerButton::Primary },
            Instant::now(),
        );
        assert_eq!(outcome, InputOutcome::Ignored);
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let event: InputEvent =
            serde_json::from_str(r#"{"type": "pointer_down", "x": 12.5}"#)
                .expect("valid event");
        assert_eq!(
            event,
            InputEvent::PointerDown { x: 12.5, button: PointerButton::Primary }
        );
        let event: InputEvent = serde_json::from_str(
            r#"{"type": "visibility_changed", "visibility": "hidden"}"#,
        )
        .expect("valid event");
        assert_eq!(
            event,
            InputEvent::VisibilityChanged { visibility: Visibility::Hidden }
        );
    }
}
