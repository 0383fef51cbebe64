//! Raster surface backed by a tiny-skia pixmap.

use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use tiny_skia::{
    Color, FillRule, GradientStop, LineCap, LinearGradient, Paint, PathBuilder, Pixmap, Point,
    RadialGradient, Shader, SpreadMode, Stroke, Transform,
};

use starscroll_core::types::{ColorStop, Rgba, Viewport};
use starscroll_sim::surface::Surface;

/// Anti-aliased RGBA surface, transparent where no star is drawn.
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Allocate a surface for `viewport`. Returns `None` for zero dimensions.
    pub fn new(viewport: Viewport) -> Option<Self> {
        Pixmap::new(viewport.width, viewport.height).map(|pixmap| Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Alpha of one pixel, or `None` outside the surface.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.pixmap.pixel(x, y).map(|p| p.alpha())
    }

    /// Number of pixels with any coverage.
    pub fn lit_pixels(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    pub fn save_png(&self, path: &Path) -> anyhow::Result<()> {
        self.pixmap
            .save_png(path)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, shader: Shader<'_>) {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Default::default()
        };
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn to_color(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, (c.a * 255.0).round() as u8)
}

fn to_stops(stops: &[ColorStop]) -> Vec<GradientStop> {
    stops
        .iter()
        .map(|s| GradientStop::new(s.offset, to_color(s.color)))
        .collect()
}

fn point(v: Vec2) -> Point {
    Point::from_xy(v.x, v.y)
}

impl Surface for PixmapSurface {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn fill_dot(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.fill_circle(center, radius, Shader::SolidColor(to_color(color)));
    }

    fn stroke_streak(&mut self, head: Vec2, tail: Vec2, width: f32, stops: &[ColorStop]) {
        let mut pb = PathBuilder::new();
        pb.move_to(head.x, head.y);
        pb.line_to(tail.x, tail.y);
        let Some(path) = pb.finish() else {
            return;
        };
        let Some(shader) = LinearGradient::new(
            point(head),
            point(tail),
            to_stops(stops),
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            return;
        };
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Default::default()
        };
        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn fill_glow(&mut self, center: Vec2, radius: f32, stops: &[ColorStop]) {
        let Some(shader) = RadialGradient::new(
            point(center),
            point(center),
            radius,
            to_stops(stops),
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            return;
        };
        self.fill_circle(center, radius, shader);
    }
}
