//! Drawing surface abstraction.
//!
//! The renderer only speaks this trait, so the same frame can land in a
//! raster pixmap or in a draw-command log.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use starscroll_core::types::{ColorStop, Rgba, Viewport};

/// A raster target that is fully repainted every frame.
pub trait Surface {
    /// Current pixel dimensions.
    fn viewport(&self) -> Viewport;

    /// Erase the whole surface to transparent.
    fn clear(&mut self);

    /// Filled circle.
    fn fill_dot(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Line from `head` to `tail` with a linear gradient along its length.
    fn stroke_streak(&mut self, head: Vec2, tail: Vec2, width: f32, stops: &[ColorStop]);

    /// Radial gradient disc centered on `center`.
    fn fill_glow(&mut self, center: Vec2, radius: f32, stops: &[ColorStop]);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawCommand {
    Clear,
    Dot {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Streak {
        head: Vec2,
        tail: Vec2,
        width: f32,
        stops: Vec<ColorStop>,
    },
    Glow {
        center: Vec2,
        radius: f32,
        stops: Vec<ColorStop>,
    },
}

/// Surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordingSurface {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Draw calls since the most recent clear.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    pub fn dots(&self) -> impl Iterator<Item = &DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Dot { .. }))
    }

    pub fn streaks(&self) -> impl Iterator<Item = &DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Streak { .. }))
    }

    pub fn glows(&self) -> impl Iterator<Item = &DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Glow { .. }))
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_dot(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Dot {
            center,
            radius,
            color,
        });
    }

    fn stroke_streak(&mut self, head: Vec2, tail: Vec2, width: f32, stops: &[ColorStop]) {
        self.commands.push(DrawCommand::Streak {
            head,
            tail,
            width,
            stops: stops.to_vec(),
        });
    }

    fn fill_glow(&mut self, center: Vec2, radius: f32, stops: &[ColorStop]) {
        self.commands.push(DrawCommand::Glow {
            center,
            radius,
            stops: stops.to_vec(),
        });
    }
}
