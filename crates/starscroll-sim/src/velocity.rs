//! Scroll velocity estimator.
//!
//! Scroll events set a raw target velocity; each frame tick pulls the
//! smoothed velocity toward the target and decays the target toward zero.
//! The smoothed value is never assigned from raw input, so it stays
//! continuous from frame to frame.

use serde::{Deserialize, Serialize};

use starscroll_core::config::VelocityParams;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollVelocityState {
    /// Last observed absolute scroll offset (px).
    pub last_scroll_y: f64,
    /// Raw estimate from the latest scroll event, decaying per frame.
    pub target_velocity: f64,
    /// Smoothed output.
    pub scroll_velocity: f64,
}

impl ScrollVelocityState {
    /// Start at rest, anchored to the current scroll offset.
    pub fn new(initial_scroll_y: f64) -> Self {
        Self {
            last_scroll_y: initial_scroll_y,
            ..Default::default()
        }
    }

    /// Scroll event: may fire any number of times between ticks.
    pub fn on_scroll(&mut self, scroll_y: f64, params: &VelocityParams) {
        self.target_velocity = (scroll_y - self.last_scroll_y) * params.k_scroll;
        self.last_scroll_y = scroll_y;
    }

    /// Frame tick: smooth toward the target, then decay the target.
    pub fn tick(&mut self, params: &VelocityParams) {
        self.scroll_velocity += (self.target_velocity - self.scroll_velocity) * params.k_lerp;
        self.target_velocity *= params.k_decay;
    }

    /// Magnitude of the smoothed velocity.
    pub fn speed(&self) -> f64 {
        self.scroll_velocity.abs()
    }
}
