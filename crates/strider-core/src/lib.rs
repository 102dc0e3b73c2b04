//! Core types and definitions for the STRIDER simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! tunables, frame input, events, snapshot views and the slot pool.
//! It has no dependency on any renderer or runtime framework.

pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod pool;
pub mod state;
pub mod types;
