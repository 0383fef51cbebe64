//! Per-frame summary published by the driver loop.

use serde::{Deserialize, Serialize};

use crate::types::FrameTime;

/// What a single frame did. Cheap to clone and serialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub frame: u64,
    pub elapsed_secs: f64,
    /// Smoothed scroll speed, |scroll_velocity|.
    pub speed: f64,
    /// Streak length in pixels derived from `speed` (before the threshold test).
    pub streak_length: f64,
    /// Visible window in world units.
    pub view_top: f64,
    pub view_bottom: f64,
    /// Stars that passed culling.
    pub visible: u32,
    pub dots: u32,
    pub streaks: u32,
    pub glows: u32,
    /// True when nothing was drawn (no surface or zero-sized viewport).
    pub skipped: bool,
}

impl FrameStats {
    /// Stats for a frame that was skipped without drawing.
    pub fn skipped(time: &FrameTime, speed: f64) -> Self {
        Self {
            frame: time.frame,
            elapsed_secs: time.elapsed_secs,
            speed,
            skipped: true,
            ..Default::default()
        }
    }

    /// Total draw operations issued, excluding the clear.
    pub fn draw_calls(&self) -> u32 {
        self.dots + self.streaks + self.glows
    }
}
