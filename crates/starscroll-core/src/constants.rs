//! Star field constants and tuning parameters.
//!
//! These are the defaults baked into `StarFieldConfig`; every value can be
//! overridden from a config file.

/// Nominal frame rate of the driver loop (Hz).
pub const FRAME_RATE: u32 = 60;

/// Seconds added to the elapsed clock per frame, regardless of wall time.
pub const FRAME_STEP_SECS: f64 = 1.0 / FRAME_RATE as f64;

/// Default RNG seed for population generation.
pub const DEFAULT_SEED: u64 = 42;

// --- Population ---

/// Number of stars created at mount.
pub const STAR_COUNT: usize = 900;

/// Height of the virtual world in viewport heights.
pub const VIRTUAL_HEIGHT_MULTIPLIER: f64 = 6.0;

/// Star radius range in pixels.
pub const STAR_SIZE_MIN: f64 = 0.2;
pub const STAR_SIZE_MAX: f64 = 1.6;

/// Base opacity range.
pub const STAR_OPACITY_MIN: f64 = 0.15;
pub const STAR_OPACITY_MAX: f64 = 0.85;

/// Twinkle speed range (dimensionless, scaled by `TWINKLE_RATE`).
pub const TWINKLE_SPEED_MIN: f64 = 0.3;
pub const TWINKLE_SPEED_MAX: f64 = 1.1;

// --- Scroll velocity ---

/// Gain from raw scroll delta (px) to target velocity.
pub const K_SCROLL: f64 = 0.3;

/// Exponential smoothing factor applied once per frame.
pub const K_LERP: f64 = 0.15;

/// Per-frame decay of the target velocity.
pub const K_DECAY: f64 = 0.85;

// --- Viewport ---

/// Overscan margin in world units above and below the visible window.
pub const OVERSCAN: f64 = 0.05;

// --- Rendering ---

/// Angular rate multiplier for the twinkle oscillation.
pub const TWINKLE_RATE: f64 = 3.0;

/// Streak length in pixels per unit of speed.
pub const STREAK_GAIN: f64 = 4.0;

/// Upper bound on streak length (pixels).
pub const STREAK_MAX_PX: f64 = 40.0;

/// Streaks are drawn only when longer than this (pixels); shorter means a dot.
pub const STREAK_THRESHOLD_PX: f64 = 2.0;

/// Position of the lavender mid-tone along a streak (0 = head, 1 = tail).
pub const STREAK_MID_STOP: f32 = 0.5;

/// Alpha of the streak mid-tone relative to the star's opacity.
pub const STREAK_MID_ALPHA: f64 = 0.6;

/// Stars larger than this radius get a glow pass.
pub const GLOW_SIZE_THRESHOLD: f64 = 1.1;

/// Glow radius as a multiple of star size.
pub const GLOW_RADIUS_FACTOR: f64 = 3.0;

/// Glow center alpha relative to the star's opacity.
pub const GLOW_ALPHA: f64 = 0.4;

// --- Colors ---

/// Star core color.
pub const STAR_RGB: (u8, u8, u8) = (255, 255, 255);

/// Lavender tint used by streak mid-tones and glows.
pub const LAVENDER_RGB: (u8, u8, u8) = (167, 139, 250);
