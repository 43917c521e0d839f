//! Carousel constants
//!
//! Compiled defaults for autoplay, drag input, track replication and the
//! grid reveal. `RuntimeConfig` overrides fall back to these, so tuning
//! should happen here so every carousel updates consistently.

/// Autoplay defaults.
pub mod motion {
    /// Pixels the track moves left per animation frame. Not delta-time
    /// corrected: visual speed follows the display refresh rate.
    pub const SPEED_PX_PER_FRAME: f32 = 1.0;
    /// Frame interval (ns) used by headless drivers that synthesise
    /// timestamps (~60 FPS).
    pub const FRAME_INTERVAL_NS: u64 = 16_666_667;
}

/// Pointer and touch interaction defaults.
pub mod input {
    /// Manual offset change per pixel of pointer travel.
    pub const DRAG_SENSITIVITY: f32 = 1.0;
    /// Multiplier applied once to the last per-move velocity on release.
    pub const MOMENTUM_MULTIPLIER: f32 = 20.0;
    /// A release later than this (ms) after the last move carries no
    /// momentum: the pointer had come to rest. About three 60 Hz frames.
    pub const MOMENTUM_WINDOW_MS: u64 = 50;
    /// Delay (ms) after a mouse drag ends before autoplay resumes.
    pub const DRAG_RESUME_DELAY_MS: u64 = 100;
    /// Delay (ms) after a touch ends before autoplay resumes.
    pub const TOUCH_RESUME_DELAY_MS: u64 = 1000;
}

/// Track replication defaults.
pub mod track {
    /// Lower bound for the automatic replicate factor. Showcase pages
    /// append the unique set between 3 and 8 times.
    pub const MIN_AUTO_REPLICATE_FACTOR: usize = 3;
    /// Upper bound for any replicate factor, fixed or derived. Sub-pixel
    /// units or absurd viewports would otherwise ask for unbounded copies.
    pub const MAX_REPLICATE_FACTOR: usize = 64;
}

/// Grid presentation defaults.
pub mod grid {
    /// Reveal delay added per cell (ms).
    pub const REVEAL_STAGGER_MS: u64 = 30;
    /// Upper bound on any cell's reveal delay (ms).
    pub const REVEAL_MAX_DELAY_MS: u64 = 500;
}

/// Persistence and configuration file locations.
pub mod storage {
    /// Directory under the platform config dir.
    pub const APP_DIR: &str = "cadenza";
    /// Preferred-view file name inside `APP_DIR`.
    pub const PREFERENCES_FILE: &str = "preferences.json";
    /// Environment variable naming a TOML runtime config file.
    pub const CONFIG_ENV: &str = "CADENZA_CONFIG";
}
