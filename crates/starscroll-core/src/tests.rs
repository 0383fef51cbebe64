//! Tests for core types, frame clock, and configuration.

use approx::assert_relative_eq;

use crate::config::{ConfigError, Range, StarFieldConfig};
use crate::constants::*;
use crate::state::FrameStats;
use crate::types::{FrameTime, Rgba, Star, Viewport};

fn star(size: f64, opacity: f64, twinkle_speed: f64, twinkle_offset: f64) -> Star {
    Star {
        x: 0.5,
        y: 1.0,
        size,
        opacity,
        twinkle_speed,
        twinkle_offset,
    }
}

// ---- Star ----

#[test]
fn test_glow_eligibility_is_strict() {
    assert!(!star(1.1, 0.5, 1.0, 0.0).is_glow_eligible(GLOW_SIZE_THRESHOLD));
    assert!(star(1.1001, 0.5, 1.0, 0.0).is_glow_eligible(GLOW_SIZE_THRESHOLD));
    assert!(!star(0.2, 0.5, 1.0, 0.0).is_glow_eligible(GLOW_SIZE_THRESHOLD));
}

#[test]
fn test_twinkle_opacity_bounds() {
    let s = star(1.0, 0.8, 0.7, 1.3);
    for frame in 0..600 {
        let t = frame as f64 * FRAME_STEP_SECS;
        let o = s.twinkle_opacity(t, TWINKLE_RATE);
        assert!((0.0..=0.8).contains(&o), "opacity {o} out of range at frame {frame}");
    }
}

#[test]
fn test_twinkle_opacity_extremes() {
    // sin(pi/2) = 1 gives full base opacity; sin(3pi/2) = -1 gives zero.
    let peak = star(1.0, 0.6, 1.0, std::f64::consts::FRAC_PI_2);
    assert_relative_eq!(peak.twinkle_opacity(0.0, TWINKLE_RATE), 0.6, epsilon = 1e-12);

    let trough = star(1.0, 0.6, 1.0, 3.0 * std::f64::consts::FRAC_PI_2);
    assert_relative_eq!(trough.twinkle_opacity(0.0, TWINKLE_RATE), 0.0, epsilon = 1e-12);
}

// ---- Types ----

#[test]
fn test_rgba_clamps_alpha() {
    assert_eq!(Rgba::new(1, 2, 3, 1.7).a, 1.0);
    assert_eq!(Rgba::new(1, 2, 3, -0.2).a, 0.0);
    assert_eq!(Rgba::transparent().a, 0.0);
}

#[test]
fn test_viewport_is_empty() {
    assert!(Viewport::new(0, 600).is_empty());
    assert!(Viewport::new(800, 0).is_empty());
    assert!(!Viewport::new(800, 600).is_empty());
}

#[test]
fn test_frame_time_fixed_step() {
    let mut time = FrameTime::default();
    for _ in 0..60 {
        time.advance();
    }
    assert_eq!(time.frame, 60);
    assert_relative_eq!(time.elapsed_secs, 1.0, epsilon = 1e-9);
}

#[test]
fn test_skipped_stats_have_no_draws() {
    let mut time = FrameTime::default();
    time.advance();
    let stats = FrameStats::skipped(&time, 3.0);
    assert!(stats.skipped);
    assert_eq!(stats.frame, 1);
    assert_eq!(stats.draw_calls(), 0);
}

// ---- Config ----

#[test]
fn test_default_config_is_valid() {
    let config = StarFieldConfig::default();
    config.validate().unwrap();
    assert_eq!(config.star_count, 900);
    assert_eq!(config.virtual_height_multiplier, 6.0);
}

#[test]
fn test_partial_json_uses_defaults() {
    let json = r#"{ "star_count": 50, "velocity": { "k_scroll": 0.5 } }"#;
    let config = StarFieldConfig::from_json_str(json).unwrap();
    assert_eq!(config.star_count, 50);
    assert_eq!(config.velocity.k_scroll, 0.5);
    assert_eq!(config.velocity.k_lerp, K_LERP);
    assert_eq!(config.render.streak_max_px, STREAK_MAX_PX);
}

#[test]
fn test_config_serde_round_trip() {
    let config = StarFieldConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back = StarFieldConfig::from_json_str(&json).unwrap();
    assert_eq!(config, back);
}

#[test]
fn test_rejects_zero_stars() {
    let config = StarFieldConfig {
        star_count: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid { field: "star_count", .. })
    ));
}

#[test]
fn test_rejects_short_world() {
    let config = StarFieldConfig {
        virtual_height_multiplier: 0.5,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_inverted_range() {
    let mut config = StarFieldConfig::default();
    config.population.size = Range::new(1.6, 0.2);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid { field: "population.size", .. })
    ));
}

#[test]
fn test_rejects_non_decaying_target() {
    let mut config = StarFieldConfig::default();
    config.velocity.k_decay = 1.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_opacity_above_one() {
    let mut config = StarFieldConfig::default();
    config.population.opacity = Range::new(0.5, 1.5);
    assert!(config.validate().is_err());
}

#[test]
fn test_parse_error_is_reported() {
    assert!(matches!(
        StarFieldConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_streak_length_clamps() {
    let render = StarFieldConfig::default().render;
    assert_eq!(render.streak_length(0.0), 0.0);
    assert_eq!(render.streak_length(5.0), 20.0);
    assert_eq!(render.streak_length(10.5), 40.0);
}

#[test]
fn test_demo_config_parses() {
    let config = StarFieldConfig::from_json_str(include_str!("../../../demos/sparse-sky.json"))
        .unwrap();
    assert_eq!(config.star_count, 400);
    assert_eq!(config.render.streak_max_px, 60.0);
    assert_eq!(config.render.streak_gain, STREAK_GAIN);
}
