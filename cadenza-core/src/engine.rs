//! Autoplay scroll engine.
//!
//! Owns the carousel's position and advances it by a fixed step once per
//! animation frame. Manual drags, hover, touch and visibility never touch
//! the position directly; they go through the transition functions here,
//! which keep exactly one of {autoplay, manual} authoritative at any time.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Position and control flags for one carousel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Autoplay position. After each autoplay step it lies in
    /// `(-unit_width, 0]`.
    pub position_px: f32,
    pub is_paused: bool,
    pub is_dragging: bool,
    /// Authoritative offset while `is_dragging`.
    pub manual_position_px: Option<f32>,
}

impl ScrollState {
    /// The offset a renderer should apply this frame.
    pub fn rendered_offset(&self) -> f32 {
        if self.is_dragging {
            self.manual_position_px.unwrap_or(self.position_px)
        } else {
            self.position_px
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineMode {
    Running,
    Paused,
    ManualOverride,
}

/// Result of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Autoplay moved the track to this offset.
    Advanced(f32),
    /// Paused or dragging; render this offset unchanged.
    Held(f32),
    /// Unit width is zero (not laid out yet). Position untouched; the host
    /// should re-measure and try again on a later frame.
    Unmeasured(f32),
    /// The carousel view is hidden; nothing to render.
    Suspended,
    /// Torn down; stop scheduling frames.
    Stopped,
}

impl Frame {
    pub fn offset(&self) -> Option<f32> {
        match *self {
            Frame::Advanced(px) | Frame::Held(px) | Frame::Unmeasured(px) => {
                Some(px)
            }
            Frame::Suspended | Frame::Stopped => None,
        }
    }

    pub fn wants_next_frame(&self) -> bool {
        !matches!(self, Frame::Stopped | Frame::Suspended)
    }
}

#[derive(Debug, Clone)]
pub struct ScrollEngine {
    speed_px_per_frame: f32,
    unit_width_px: f32,
    state: ScrollState,
    /// Deferred `Paused -> Running` transition.
    pending_resume: Option<Instant>,
    suspended: bool,
    torn_down: bool,
    frames_advanced: u64,
}

impl ScrollEngine {
    pub fn new(speed_px_per_frame: f32) -> Self {
        Self {
            speed_px_per_frame,
            unit_width_px: 0.0,
            state: ScrollState::default(),
            pending_resume: None,
            suspended: false,
            torn_down: false,
            frames_advanced: 0,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn mode(&self) -> EngineMode {
        if self.state.is_dragging {
            EngineMode::ManualOverride
        } else if self.state.is_paused {
            EngineMode::Paused
        } else {
            EngineMode::Running
        }
    }

    pub fn position(&self) -> f32 {
        self.state.position_px
    }

    pub fn rendered_offset(&self) -> f32 {
        self.state.rendered_offset()
    }

    pub fn unit_width(&self) -> f32 {
        self.unit_width_px
    }

    pub fn speed(&self) -> f32 {
        self.speed_px_per_frame
    }

    pub fn pending_resume(&self) -> Option<Instant> {
        self.pending_resume
    }

    pub fn frames_advanced(&self) -> u64 {
        self.frames_advanced
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Whether the host should schedule another animation frame.
    pub fn wants_frame(&self) -> bool {
        !self.torn_down && !self.suspended
    }

    pub fn set_speed(&mut self, speed_px_per_frame: f32) {
        self.speed_px_per_frame = speed_px_per_frame;
    }

    /// Adopt a new unit width (track rebuilt or re-measured). The position
    /// is re-normalised against it.
    pub fn set_unit_width(&mut self, unit_width_px: f32) {
        self.unit_width_px = if unit_width_px.is_finite() && unit_width_px > 0.0
        {
            unit_width_px
        } else {
            0.0
        };
        if !self.state.is_dragging {
            self.state.position_px =
                wrap_position(self.state.position_px, self.unit_width_px);
        }
    }

    /// Overwrite the autoplay position without normalising it.
    pub fn set_position(&mut self, position_px: f32) {
        self.state.position_px = position_px;
    }

    /// `Running -> Paused`. Cancels any pending resume (last writer wins).
    pub fn pause(&mut self) {
        self.state.is_paused = true;
        self.pending_resume = None;
    }

    /// `Paused -> Running`. Ignored while dragging: only the drag's own
    /// release governs resumption.
    pub fn resume(&mut self) -> bool {
        if self.state.is_dragging || self.torn_down {
            return false;
        }
        self.state.is_paused = false;
        self.pending_resume = None;
        true
    }

    /// Resume on the first frame at or after `at`, unless something pauses
    /// or drags before then.
    pub fn schedule_resume(&mut self, at: Instant) {
        if self.torn_down {
            return;
        }
        self.pending_resume = Some(at);
    }

    pub fn cancel_pending_resume(&mut self) {
        self.pending_resume = None;
    }

    /// `Running|Paused -> ManualOverride`. Returns the position the drag
    /// starts from.
    pub fn begin_manual(&mut self) -> f32 {
        let origin = self.state.position_px;
        self.state.is_dragging = true;
        self.state.manual_position_px = Some(origin);
        self.pending_resume = None;
        origin
    }

    pub fn update_manual(&mut self, manual_position_px: f32) {
        if self.state.is_dragging {
            self.state.manual_position_px = Some(manual_position_px);
        }
    }

    /// `ManualOverride -> Paused`. `baseline_px` becomes the new autoplay
    /// position as given; normalisation happens on the next step.
    pub fn end_manual(&mut self, baseline_px: f32) {
        self.state.is_dragging = false;
        self.state.manual_position_px = None;
        self.state.position_px = baseline_px;
        self.state.is_paused = true;
    }

    /// Hide the carousel: no position updates until `unsuspend`.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn unsuspend(&mut self) {
        self.suspended = false;
    }

    /// Stop for good. Later ticks report `Frame::Stopped`.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.pending_resume = None;
        self.state.is_dragging = false;
        self.state.manual_position_px = None;
    }

    /// Run one animation frame.
    ///
    /// Control flags are read before deciding which position is
    /// authoritative, every frame.
    pub fn tick(&mut self, now: Instant) -> Frame {
        if self.torn_down {
            return Frame::Stopped;
        }

        if let Some(at) = self.pending_resume
            && now >= at
        {
            self.pending_resume = None;
            if !self.state.is_dragging {
                self.state.is_paused = false;
                log::trace!("Deferred resume fired");
            }
        }

        if self.suspended {
            return Frame::Suspended;
        }
        if self.state.is_dragging || self.state.is_paused {
            return Frame::Held(self.state.rendered_offset());
        }
        if self.unit_width_px <= 0.0 {
            return Frame::Unmeasured(self.state.position_px);
        }

        let next = self.state.position_px - self.speed_px_per_frame;
        self.state.position_px = wrap_position(next, self.unit_width_px);
        self.frames_advanced += 1;
        Frame::Advanced(self.state.position_px)
    }
}

/// Bring `position_px` into `(-unit_width_px, 0]` by an exact multiple of
/// the unit width. Uses `%` so non-integer speeds never accumulate drift.
pub fn wrap_position(position_px: f32, unit_width_px: f32) -> f32 {
    if unit_width_px <= 0.0 || !unit_width_px.is_finite() {
        return position_px;
    }
    let mut wrapped = position_px;
    if wrapped.abs() >= unit_width_px {
        wrapped %= unit_width_px;
    }
    if wrapped > 0.0 {
        wrapped -= unit_width_px;
        // Sub-ulp positives round to exactly -unit; that is the seam at 0.
        if wrapped <= -unit_width_px {
            wrapped = 0.0;
        }
    }
    wrapped
}
