//! Events emitted by the simulation for UI, audio and score collaborators.
//!
//! Events are collected during a tick and handed out once, in the snapshot
//! of the tick that produced them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The active tile set was replaced.
    GroundRegenerated { cell_count: usize },
    /// A projectile left the muzzle.
    ProjectileFired { id: u64 },
    /// A projectile sensor touched another body and the projectile was removed.
    ProjectileHit { id: u64, position: Vec3 },
    /// A projectile expired without hitting anything.
    ProjectileExpired { id: u64, cause: ExpiryCause },
    /// A new enemy entered the field.
    EnemySpawned { id: u64, color: EnemyColor },
    /// An enemy was removed.
    EnemyRemoved { id: u64, reason: EnemyRemoval },
}
