//! Fundamental star field types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::FRAME_STEP_SECS;

/// One particle of the star field.
///
/// `x` is a fraction of viewport width and `y` is in virtual-world units.
/// Both are fixed at creation; apparent motion comes from the viewport
/// window sliding over the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Radius in pixels. Always > 0.
    pub size: f64,
    /// Base opacity in (0, 1].
    pub opacity: f64,
    pub twinkle_speed: f64,
    /// Phase offset in [0, TAU).
    pub twinkle_offset: f64,
}

impl Star {
    /// Whether this star gets the glow pass.
    pub fn is_glow_eligible(&self, threshold: f64) -> bool {
        self.size > threshold
    }

    /// Twinkled opacity at `elapsed_secs`, in [0, opacity].
    pub fn twinkle_opacity(&self, elapsed_secs: f64, rate: f64) -> f64 {
        let twinkle = (elapsed_secs * self.twinkle_speed * rate + self.twinkle_offset).sin();
        self.opacity * (0.5 + 0.5 * twinkle)
    }
}

/// Straight (non-premultiplied) RGBA color with alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn from_rgb(rgb: (u8, u8, u8), a: f64) -> Self {
        Self::new(rgb.0, rgb.1, rgb.2, a as f32)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0.0)
    }
}

/// One color stop of a gradient, `offset` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Viewport (and rendering surface) size in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area viewport draws nothing.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Scroll state of the host document, read once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    /// Absolute vertical scroll offset (px).
    pub scroll_y: f64,
    /// Total scrollable document height (px).
    pub document_height: f64,
}

impl PageMetrics {
    pub fn new(scroll_y: f64, document_height: f64) -> Self {
        Self {
            scroll_y,
            document_height,
        }
    }
}

/// Frame clock. Advances by a fixed step per frame, not by wall time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Frames rendered since create.
    pub frame: u64,
    /// Elapsed animation time in seconds.
    pub elapsed_secs: f64,
    /// Seconds added per frame.
    pub step_secs: f64,
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::with_step(FRAME_STEP_SECS)
    }
}

impl FrameTime {
    pub fn with_step(step_secs: f64) -> Self {
        Self {
            frame: 0,
            elapsed_secs: 0.0,
            step_secs,
        }
    }

    /// Advance by one frame.
    pub fn advance(&mut self) {
        self.frame += 1;
        self.elapsed_secs += self.step_secs;
    }
}
