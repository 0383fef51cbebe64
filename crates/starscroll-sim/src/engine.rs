//! Star field context: the driver loop's state machine.
//!
//! `StarField` owns the population, the scroll velocity state and the frame
//! clock. The host calls `on_scroll`/`on_resize` from its event handlers and
//! `frame` once per display refresh; only `frame` draws. After `destroy`
//! every entry point is a no-op.

use log::{debug, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starscroll_core::config::{ConfigError, StarFieldConfig};
use starscroll_core::state::FrameStats;
use starscroll_core::types::{FrameTime, PageMetrics, Star, Viewport};

use crate::population;
use crate::render::{self, FrameInput};
use crate::surface::Surface;
use crate::velocity::ScrollVelocityState;
use crate::viewport::ViewportWindow;

/// An explicitly owned star field simulation.
pub struct StarField {
    config: StarFieldConfig,
    stars: Vec<Star>,
    velocity: ScrollVelocityState,
    viewport: Viewport,
    time: FrameTime,
    destroyed: bool,
}

impl StarField {
    /// Validate `config` and generate the population.
    pub fn create(
        config: StarFieldConfig,
        viewport: Viewport,
        initial_scroll_y: f64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let stars = population::generate(
            config.star_count,
            config.virtual_height_multiplier,
            &config.population,
            &mut rng,
        );
        debug!(
            "star field created: {} stars, world height {}, viewport {}x{}",
            stars.len(),
            config.virtual_height_multiplier,
            viewport.width,
            viewport.height
        );

        Ok(Self {
            time: FrameTime::with_step(config.frame_step_secs),
            velocity: ScrollVelocityState::new(initial_scroll_y),
            config,
            stars,
            viewport,
            destroyed: false,
        })
    }

    /// Scroll event handler. Updates velocity state only.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        if self.destroyed {
            return;
        }
        self.velocity.on_scroll(scroll_y, &self.config.velocity);
    }

    /// Resize handler. Stars are positioned in normalized/world units and
    /// need no change.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if self.destroyed {
            return;
        }
        if viewport != self.viewport {
            debug!(
                "star field resized: {}x{} -> {}x{}",
                self.viewport.width, self.viewport.height, viewport.width, viewport.height
            );
            self.viewport = viewport;
        }
    }

    /// Advance one frame and repaint `surface`.
    ///
    /// Returns `None` after `destroy`. A missing or zero-sized surface still
    /// advances the clock and the velocity filter but draws nothing.
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        page: &PageMetrics,
        surface: Option<&mut S>,
    ) -> Option<FrameStats> {
        if self.destroyed {
            return None;
        }

        self.time.advance();
        self.velocity.tick(&self.config.velocity);
        let speed = self.velocity.speed();

        let Some(surface) = surface else {
            debug!("frame {} skipped: no surface", self.time.frame);
            return Some(FrameStats::skipped(&self.time, speed));
        };

        let input = FrameInput {
            time: &self.time,
            speed,
            window: self.window(page),
            viewport: self.viewport,
            overscan: self.config.overscan,
            params: &self.config.render,
        };
        let stats = render::render(&self.stars, &input, surface);
        if stats.skipped {
            debug!("frame {} skipped: empty viewport", stats.frame);
        } else {
            trace!(
                "frame {}: visible={} dots={} streaks={} glows={} speed={:.3}",
                stats.frame,
                stats.visible,
                stats.dots,
                stats.streaks,
                stats.glows,
                stats.speed
            );
        }
        Some(stats)
    }

    /// Tear down. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.stars = Vec::new();
        self.velocity = ScrollVelocityState::default();
        debug!("star field destroyed after {} frames", self.time.frame);
    }

    /// Whether the context still accepts events and frames.
    pub fn is_active(&self) -> bool {
        !self.destroyed
    }

    /// Visible window for the page's current scroll position.
    pub fn window(&self, page: &PageMetrics) -> ViewportWindow {
        ViewportWindow::for_page(page, &self.viewport, self.config.virtual_height_multiplier)
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn velocity(&self) -> &ScrollVelocityState {
        &self.velocity
    }

    pub fn speed(&self) -> f64 {
        self.velocity.speed()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn time(&self) -> FrameTime {
        self.time
    }

    pub fn config(&self) -> &StarFieldConfig {
        &self.config
    }
}
