//! Running score kept by the engine.
//!
//! The core only removes entities; turning those removals into points or
//! damage is up to the host. These counters give it something to read.

use strider_core::enums::EnemyRemoval;
use strider_core::events::SimEvent;
use strider_core::state::ScoreView;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub projectiles_fired: u32,
    pub projectile_hits: u32,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
    pub enemies_caught: u32,
    pub enemies_despawned: u32,
}

impl ScoreState {
    /// Fold one tick event into the counters.
    pub fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::ProjectileFired { .. } => self.projectiles_fired += 1,
            SimEvent::ProjectileHit { .. } => self.projectile_hits += 1,
            SimEvent::EnemySpawned { .. } => self.enemies_spawned += 1,
            SimEvent::EnemyRemoved { reason, .. } => match reason {
                EnemyRemoval::Destroyed => self.enemies_destroyed += 1,
                EnemyRemoval::CaughtAnchor => self.enemies_caught += 1,
                EnemyRemoval::Despawned => self.enemies_despawned += 1,
            },
            SimEvent::GroundRegenerated { .. } | SimEvent::ProjectileExpired { .. } => {}
        }
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            projectiles_fired: self.projectiles_fired,
            projectile_hits: self.projectile_hits,
            enemies_spawned: self.enemies_spawned,
            enemies_destroyed: self.enemies_destroyed,
            enemies_caught: self.enemies_caught,
            enemies_despawned: self.enemies_despawned,
        }
    }
}
