//! Core types and definitions for the STARSCROLL star field.
//!
//! This crate defines the vocabulary shared across the other crates:
//! star records, viewport and page metrics, frame statistics, constants,
//! and the tunable configuration. It has no dependency on any renderer.

pub mod config;
pub mod constants;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
