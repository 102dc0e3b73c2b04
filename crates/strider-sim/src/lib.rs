//! Simulation engine for STRIDER.
//!
//! Streams ground tiles around the anchor, runs the projectile pool and the
//! pursuit enemies once per host frame, and produces `SimSnapshot`s.

pub mod engine;
pub mod hit_event;
pub mod score;
pub mod systems;

pub use engine::SimulationEngine;
pub use strider_core as core;

#[cfg(test)]
mod tests;
