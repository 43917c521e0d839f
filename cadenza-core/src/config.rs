//! Runtime configuration for the carousel and view toggle.
//!
//! `CarouselConfig` and `ViewOptions` are the resolved, plain-value configs
//! the engine consumes. `RuntimeConfig` carries optional overrides (usually
//! read from a TOML file) whose accessors fall back to the compiled
//! constants.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{grid, input, motion, storage, track};
use crate::error::{CadenzaError, Result};
use crate::track::ReplicateFactor;

/// Static configuration for one carousel instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Autoplay step in pixels per frame.
    pub speed_px_per_frame: f32,
    /// Manual offset change per pixel of pointer travel.
    pub drag_sensitivity: f32,
    /// Multiplier applied to the release velocity.
    pub momentum_multiplier: f32,
    /// Maximum gap between the last move and the release for the release
    /// velocity to count.
    pub momentum_window: Duration,
    /// Delay before autoplay resumes after a mouse drag.
    pub drag_resume_delay: Duration,
    /// Delay before autoplay resumes after a touch ends.
    pub touch_resume_delay: Duration,
    /// How many extra copies of the unique set the track appends.
    pub replicate: ReplicateFactor,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            speed_px_per_frame: motion::SPEED_PX_PER_FRAME,
            drag_sensitivity: input::DRAG_SENSITIVITY,
            momentum_multiplier: input::MOMENTUM_MULTIPLIER,
            momentum_window: Duration::from_millis(input::MOMENTUM_WINDOW_MS),
            drag_resume_delay: Duration::from_millis(
                input::DRAG_RESUME_DELAY_MS,
            ),
            touch_resume_delay: Duration::from_millis(
                input::TOUCH_RESUME_DELAY_MS,
            ),
            replicate: ReplicateFactor::Auto {
                minimum: track::MIN_AUTO_REPLICATE_FACTOR,
            },
        }
    }
}

impl CarouselConfig {
    /// Resolve a config from runtime overrides.
    pub fn from_runtime_config(rc: &RuntimeConfig) -> Self {
        Self {
            speed_px_per_frame: rc.speed_px_per_frame(),
            drag_sensitivity: rc.drag_sensitivity(),
            momentum_multiplier: rc.momentum_multiplier(),
            momentum_window: Duration::from_millis(rc.momentum_window_ms()),
            drag_resume_delay: Duration::from_millis(rc.drag_resume_delay_ms()),
            touch_resume_delay: Duration::from_millis(
                rc.touch_resume_delay_ms(),
            ),
            replicate: rc.replicate_factor(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.speed_px_per_frame.is_finite() {
            return Err(CadenzaError::InvalidConfig(
                "speed_px_per_frame must be finite".into(),
            ));
        }
        if !self.drag_sensitivity.is_finite() {
            return Err(CadenzaError::InvalidConfig(
                "drag_sensitivity must be finite".into(),
            ));
        }
        if !self.momentum_multiplier.is_finite()
            || self.momentum_multiplier < 0.0
        {
            return Err(CadenzaError::InvalidConfig(
                "momentum_multiplier must be a non-negative number".into(),
            ));
        }
        if let ReplicateFactor::Fixed(n) = self.replicate
            && !(1..=track::MAX_REPLICATE_FACTOR).contains(&n)
        {
            return Err(CadenzaError::InvalidConfig(format!(
                "replicate_factor must be between 1 and {}",
                track::MAX_REPLICATE_FACTOR
            )));
        }
        Ok(())
    }
}

/// Options for the carousel/grid toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Restore the stored view on load. When false the carousel is always
    /// shown first regardless of the stored preference.
    pub restore_preference_on_load: bool,
    /// Reveal delay added per grid cell.
    pub reveal_stagger: Duration,
    /// Cap on any grid cell's reveal delay.
    pub reveal_max_delay: Duration,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            restore_preference_on_load: true,
            reveal_stagger: Duration::from_millis(grid::REVEAL_STAGGER_MS),
            reveal_max_delay: Duration::from_millis(grid::REVEAL_MAX_DELAY_MS),
        }
    }
}

impl ViewOptions {
    pub fn from_runtime_config(rc: &RuntimeConfig) -> Self {
        Self {
            restore_preference_on_load: rc.restore_preference_on_load(),
            reveal_stagger: Duration::from_millis(rc.grid_reveal_stagger_ms()),
            reveal_max_delay: Duration::from_millis(
                rc.grid_reveal_max_delay_ms(),
            ),
        }
    }
}

/// Runtime configuration with optional overrides for constants.
/// Fields are None by default, falling back to compiled constants.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    // ========== AUTOPLAY ==========
    pub speed_px_per_frame: Option<f32>,
    pub frame_interval_ns: Option<u64>,

    // ========== INPUT ==========
    pub drag_sensitivity: Option<f32>,
    pub momentum_multiplier: Option<f32>,
    pub momentum_window_ms: Option<u64>,
    pub drag_resume_delay_ms: Option<u64>,
    pub touch_resume_delay_ms: Option<u64>,

    // ========== TRACK ==========
    /// Fixed replicate factor. When unset the factor is derived from the
    /// measured widths and the viewport.
    pub replicate_factor: Option<usize>,
    /// Lower bound for the derived replicate factor.
    pub replicate_minimum: Option<usize>,

    // ========== VIEW ==========
    pub restore_preference_on_load: Option<bool>,
    pub grid_reveal_stagger_ms: Option<u64>,
    pub grid_reveal_max_delay_ms: Option<u64>,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        CarouselConfig::from_runtime_config(&config).validate()?;
        Ok(config)
    }

    /// Read overrides from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            CadenzaError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let config = Self::from_toml_str(&raw)?;
        log::debug!("Loaded runtime config from {}", path.display());
        Ok(config)
    }

    /// Read overrides from the file named by `CADENZA_CONFIG`, if set.
    pub fn load_from_env() -> Result<Option<Self>> {
        match std::env::var_os(storage::CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)).map(Some),
            None => Ok(None),
        }
    }

    // ========== AUTOPLAY ACCESSORS ==========

    pub fn speed_px_per_frame(&self) -> f32 {
        self.speed_px_per_frame.unwrap_or(motion::SPEED_PX_PER_FRAME)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(
            self.frame_interval_ns.unwrap_or(motion::FRAME_INTERVAL_NS),
        )
    }

    // ========== INPUT ACCESSORS ==========

    pub fn drag_sensitivity(&self) -> f32 {
        self.drag_sensitivity.unwrap_or(input::DRAG_SENSITIVITY)
    }

    pub fn momentum_multiplier(&self) -> f32 {
        self.momentum_multiplier
            .unwrap_or(input::MOMENTUM_MULTIPLIER)
    }

    pub fn momentum_window_ms(&self) -> u64 {
        self.momentum_window_ms.unwrap_or(input::MOMENTUM_WINDOW_MS)
    }

    pub fn drag_resume_delay_ms(&self) -> u64 {
        self.drag_resume_delay_ms
            .unwrap_or(input::DRAG_RESUME_DELAY_MS)
    }

    pub fn touch_resume_delay_ms(&self) -> u64 {
        self.touch_resume_delay_ms
            .unwrap_or(input::TOUCH_RESUME_DELAY_MS)
    }

    // ========== TRACK ACCESSORS ==========

    pub fn replicate_factor(&self) -> ReplicateFactor {
        match self.replicate_factor {
            Some(n) => ReplicateFactor::Fixed(n),
            None => ReplicateFactor::Auto {
                minimum: self
                    .replicate_minimum
                    .unwrap_or(track::MIN_AUTO_REPLICATE_FACTOR),
            },
        }
    }

    // ========== VIEW ACCESSORS ==========

    pub fn restore_preference_on_load(&self) -> bool {
        self.restore_preference_on_load.unwrap_or(true)
    }

    pub fn grid_reveal_stagger_ms(&self) -> u64 {
        self.grid_reveal_stagger_ms
            .unwrap_or(grid::REVEAL_STAGGER_MS)
    }

    pub fn grid_reveal_max_delay_ms(&self) -> u64 {
        self.grid_reveal_max_delay_ms
            .unwrap_or(grid::REVEAL_MAX_DELAY_MS)
    }
}
