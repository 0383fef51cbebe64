//! Star field simulation for STARSCROLL.
//!
//! Owns the star population and scroll velocity state, maps scroll position
//! to a window over the virtual world, and renders each frame through the
//! `Surface` trait. Headless and deterministic for a given seed.

pub mod engine;
pub mod population;
pub mod render;
pub mod surface;
pub mod velocity;
pub mod viewport;

pub use engine::StarField;
pub use starscroll_core as core;
pub use surface::Surface;
