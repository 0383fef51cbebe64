//! Star population generation.
//!
//! Every star is an independent uniform draw. The population never changes
//! after generation.

use rand::Rng;

use starscroll_core::config::PopulationParams;
use starscroll_core::types::Star;

/// Generate `count` stars spread over a world `world_height` units tall.
pub fn generate<R: Rng>(
    count: usize,
    world_height: f64,
    params: &PopulationParams,
    rng: &mut R,
) -> Vec<Star> {
    (0..count)
        .map(|_| spawn_star(world_height, params, rng))
        .collect()
}

/// Draw a single star.
pub fn spawn_star<R: Rng>(world_height: f64, params: &PopulationParams, rng: &mut R) -> Star {
    Star {
        x: rng.gen_range(0.0..1.0),
        y: rng.gen_range(0.0..world_height),
        size: rng.gen_range(params.size.min..params.size.max),
        opacity: rng.gen_range(params.opacity.min..params.opacity.max),
        twinkle_speed: rng.gen_range(params.twinkle_speed.min..params.twinkle_speed.max),
        twinkle_offset: rng.gen_range(0.0..std::f64::consts::TAU),
    }
}
