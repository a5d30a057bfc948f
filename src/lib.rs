//! Brain Surfing - ride a recorded EEG trace
//!
//! Core modules:
//! - `signal`: Ring buffer and amplitude normalization
//! - `sampler`: Smoothed terrain samples (with a synthetic fallback)
//! - `stages`: Sleep-stage annotations and the monotonic stage cursor
//! - `sim`: Player physics, terrain collision and the frame driver
//! - `session`: World context populated by the two data loads
//! - `renderer`: Drawing surface abstraction and frame painter
//! - `settings`: Persisted tunables

pub mod data;
pub mod error;
pub mod hud;
pub mod renderer;
pub mod sampler;
pub mod session;
pub mod settings;
pub mod signal;
pub mod sim;
pub mod stages;

pub use error::LoadError;
pub use session::{LoadStatus, Session};
pub use settings::{GameVariant, Settings};

/// Game configuration constants
pub mod consts {
    /// Default playfield size used by the headless runner and tests
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 450.0;

    /// Brainwave player square (px)
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 2600.0;
    /// Upward launch speed (px/s)
    pub const JUMP_VELOCITY: f32 = -1200.0;
    /// Distance from canvas bottom to the ground line
    pub const GROUND_MARGIN: f32 = 10.0;
    /// Terrain never rises above this
    pub const TOP_MARGIN: f32 = 20.0;
    /// Extra headroom between the terrain ceiling and the player ceiling
    pub const CEILING_GAP: f32 = 10.0;

    /// Signal time advances this many times faster than wall time
    pub const SCROLL_SPEED: f64 = 3.0;
    /// Moving-average half window (25 -> 51 samples)
    pub const SMOOTH_WINDOW: usize = 25;
    /// Samples per horizontal pixel (<1 stretches the wave)
    pub const HORIZONTAL_SAMPLE_STEP: f64 = 0.3;
    /// Amplitude boost after mapping to [0, 1]
    pub const AMP_SCALE: f32 = 1.5;

    /// Sample rate assumed when the payload omits one, and for the fake sine
    pub const DEFAULT_SAMPLE_RATE: f64 = 50.0;
    /// Fallback sine frequency (Hz)
    pub const FALLBACK_SINE_HZ: f64 = 0.5;

    /// Columns either side of the player used for the slope estimate
    pub const SLOPE_SPAN: usize = 2;
    /// Per-frame blend toward the target rotation
    pub const ROTATION_BLEND: f32 = 0.25;
    /// Terrain dropping this far below the feet counts as leaving it
    pub const CONTACT_TOLERANCE: f32 = 1.0;

    /// Default frame delta cap (seconds)
    pub const MAX_FRAME_DT: f32 = 1.0 / 15.0;
}

/// Round to the nearest integer, halves toward +∞ (browser `Math.round`)
#[inline]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
