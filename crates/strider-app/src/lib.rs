//! Headless STRIDER host.
//!
//! Wires the simulation engine to a fixed-rate game loop thread and exposes
//! session handlers for the collaborators (controller, camera, sensors,
//! renderer).

pub mod config;
pub mod demo;
pub mod game_loop;
pub mod session;
pub mod state;

pub use strider_core as core;
