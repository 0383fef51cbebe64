//! Viewport mapping: scroll position to a window over the virtual world.
//!
//! Pure functions. Stars never move in world space; only the window does.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use starscroll_core::types::{PageMetrics, Star, Viewport};

/// A unit-height slice of the virtual world currently mapped to the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportWindow {
    pub view_top: f64,
    pub view_bottom: f64,
}

/// Fraction of the scrollable range the page has travelled, in [0, 1].
pub fn scroll_fraction(page: &PageMetrics, viewport_height: f64) -> f64 {
    let scrollable = (page.document_height - viewport_height).max(1.0);
    (page.scroll_y / scrollable).clamp(0.0, 1.0)
}

impl ViewportWindow {
    /// Window for a scroll fraction in a world `world_height` units tall.
    pub fn from_fraction(fraction: f64, world_height: f64) -> Self {
        let view_top = fraction * (world_height - 1.0);
        Self {
            view_top,
            view_bottom: view_top + 1.0,
        }
    }

    /// Window for the page's current scroll position.
    pub fn for_page(page: &PageMetrics, viewport: &Viewport, world_height: f64) -> Self {
        Self::from_fraction(scroll_fraction(page, viewport.height as f64), world_height)
    }

    /// Inclusive visibility test with an overscan margin.
    pub fn contains(&self, y: f64, overscan: f64) -> bool {
        y >= self.view_top - overscan && y <= self.view_bottom + overscan
    }

    /// Screen position of a star in pixels.
    pub fn project(&self, star: &Star, viewport: &Viewport) -> Vec2 {
        let screen_x = star.x * viewport.width as f64;
        let screen_y = (star.y - self.view_top) * viewport.height as f64;
        Vec2::new(screen_x as f32, screen_y as f32)
    }
}
