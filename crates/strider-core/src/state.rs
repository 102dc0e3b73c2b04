//! Simulation snapshot: the complete visible state handed to the host each tick.
//!
//! The host maps each view onto engine objects: a static collider and tile
//! per `TileView`, a dynamic sensor body per `ProjectileView`, a dynamic
//! body per `EnemyView`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::EnemyColor;
use crate::events::SimEvent;
use crate::types::{Cell, SimTime};

/// Complete simulation state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    /// Active ground tiles, sorted by cell.
    pub tiles: Vec<TileView>,
    /// Live projectiles, sorted by id.
    pub projectiles: Vec<ProjectileView>,
    /// Live enemies, sorted by id.
    pub enemies: Vec<EnemyView>,
    /// World position of the projectile hit reported this tick. Present in
    /// exactly one snapshot per hit.
    pub hit_event: Option<Vec3>,
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

/// One ground tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub cell: Cell,
    /// Center of the tile box.
    pub position: Vec3,
    /// Full box extents (x, y, z).
    pub size: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub position: Vec3,
    pub direction: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub position: Vec3,
    pub color: EnemyColor,
    pub radius: f32,
}

/// Running counters for score/HUD collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub projectiles_fired: u32,
    pub projectile_hits: u32,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
    pub enemies_caught: u32,
    pub enemies_despawned: u32,
}
