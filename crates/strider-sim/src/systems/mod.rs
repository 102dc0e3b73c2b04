//! Subsystems advanced by the engine each tick.
//!
//! Each subsystem owns its entities outright. The engine passes values
//! between them; nothing here holds a reference into another subsystem.

pub mod ground;
pub mod projectiles;
pub mod pursuit;
pub mod snapshot;
