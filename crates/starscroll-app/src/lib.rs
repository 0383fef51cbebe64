//! STARSCROLL host application.
//!
//! Wires the star field simulation to a raster surface, a modelled host
//! page, and a threaded frame loop, and exposes them through the
//! `starscroll` command line.

pub mod cli;
pub mod frame_loop;
pub mod page;
pub mod raster;
pub mod state;

pub use starscroll_core as core;
