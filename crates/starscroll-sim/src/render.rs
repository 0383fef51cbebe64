//! Frame renderer.
//!
//! A stateless pass over the population: cull against the window, project,
//! then draw each visible star as a twinkling dot or a velocity streak,
//! with a glow on top for large stars.

use starscroll_core::config::RenderParams;
use starscroll_core::constants::{LAVENDER_RGB, STAR_RGB};
use starscroll_core::state::FrameStats;
use starscroll_core::types::{ColorStop, FrameTime, Rgba, Star, Viewport};

use crate::surface::Surface;
use crate::viewport::ViewportWindow;

/// Everything a frame needs besides the population and the surface.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub time: &'a FrameTime,
    pub speed: f64,
    pub window: ViewportWindow,
    pub viewport: Viewport,
    pub overscan: f64,
    pub params: &'a RenderParams,
}

/// How a star is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StarMode {
    Dot,
    Streak { length: f64 },
}

/// Pick the render mode for a given streak length.
pub fn star_mode(streak_length: f64, params: &RenderParams) -> StarMode {
    if streak_length > params.streak_threshold_px {
        StarMode::Streak {
            length: streak_length,
        }
    } else {
        StarMode::Dot
    }
}

/// Streak gradient: white at the head, lavender mid-tone, transparent tail.
pub fn streak_stops(opacity: f64, params: &RenderParams) -> [ColorStop; 3] {
    [
        ColorStop::new(0.0, Rgba::from_rgb(STAR_RGB, opacity)),
        ColorStop::new(
            params.streak_mid_stop,
            Rgba::from_rgb(LAVENDER_RGB, opacity * params.streak_mid_alpha),
        ),
        ColorStop::new(1.0, Rgba::from_rgb(LAVENDER_RGB, 0.0)),
    ]
}

/// Glow gradient: lavender center fading to transparent at the rim.
pub fn glow_stops(opacity: f64, params: &RenderParams) -> [ColorStop; 2] {
    [
        ColorStop::new(0.0, Rgba::from_rgb(LAVENDER_RGB, opacity * params.glow_alpha)),
        ColorStop::new(1.0, Rgba::from_rgb(LAVENDER_RGB, 0.0)),
    ]
}

/// Repaint `surface` with one frame of the star field.
///
/// A zero-sized viewport or surface skips the frame without drawing.
pub fn render<S: Surface + ?Sized>(
    stars: &[Star],
    input: &FrameInput<'_>,
    surface: &mut S,
) -> FrameStats {
    let viewport = input.viewport;
    if viewport.is_empty() || surface.viewport().is_empty() {
        return FrameStats::skipped(input.time, input.speed);
    }

    let params = input.params;
    let streak_length = params.streak_length(input.speed);
    let mode = star_mode(streak_length, params);

    let mut stats = FrameStats {
        frame: input.time.frame,
        elapsed_secs: input.time.elapsed_secs,
        speed: input.speed,
        streak_length,
        view_top: input.window.view_top,
        view_bottom: input.window.view_bottom,
        ..Default::default()
    };

    surface.clear();

    for star in stars {
        if !input.window.contains(star.y, input.overscan) {
            continue;
        }
        stats.visible += 1;

        let center = input.window.project(star, &viewport);
        let opacity = star.twinkle_opacity(input.time.elapsed_secs, params.twinkle_rate);

        match mode {
            StarMode::Streak { length } => {
                let tail = center - glam::Vec2::new(0.0, length as f32);
                let stops = streak_stops(opacity, params);
                surface.stroke_streak(center, tail, star.size as f32, &stops);
                stats.streaks += 1;
            }
            StarMode::Dot => {
                surface.fill_dot(center, star.size as f32, Rgba::from_rgb(STAR_RGB, opacity));
                stats.dots += 1;
            }
        }

        if star.is_glow_eligible(params.glow_size_threshold) {
            let radius = (star.size * params.glow_radius_factor) as f32;
            surface.fill_glow(center, radius, &glow_stops(opacity, params));
            stats.glows += 1;
        }
    }

    stats
}
