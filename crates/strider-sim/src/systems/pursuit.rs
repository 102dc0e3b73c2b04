//! Pursuit enemies: timed spawning ahead of the view, straight-line chase
//! and distance-based culling.
//!
//! Culling here is a plain distance check on top of whatever the physics
//! collaborator does with the enemy bodies.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use strider_core::config::EnemyTuning;
use strider_core::enums::{EnemyColor, EnemyRemoval};
use strider_core::events::SimEvent;
use strider_core::pool::SlotPool;
use strider_core::types::{horizontal, ViewFrame};

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u64,
    pub position: Vec3,
    pub color: EnemyColor,
}

#[derive(Debug, Clone)]
pub struct PursuitSpawner {
    tuning: EnemyTuning,
    pool: SlotPool<Enemy>,
    next_id: u64,
    last_spawn_ms: Option<u64>,
    cull_buffer: Vec<(usize, EnemyRemoval)>,
}

impl PursuitSpawner {
    pub fn new(tuning: EnemyTuning) -> Self {
        Self {
            tuning,
            pool: SlotPool::new(),
            next_id: 0,
            last_spawn_ms: None,
            cull_buffer: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &EnemyTuning {
        &self.tuning
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.pool.values()
    }

    pub fn get(&self, id: u64) -> Option<&Enemy> {
        self.iter().find(|e| e.id == id)
    }

    /// Spawn one enemy ahead of the view if the spawn interval has elapsed.
    pub fn try_spawn(
        &mut self,
        view: &ViewFrame,
        now_ms: u64,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<SimEvent>,
    ) -> Option<u64> {
        if let Some(last) = self.last_spawn_ms {
            if now_ms.saturating_sub(last) < self.tuning.spawn_interval_ms {
                return None;
            }
        }

        let offset = Vec3::new(
            jitter(rng, self.tuning.spawn_jitter),
            0.0,
            jitter(rng, self.tuning.spawn_jitter),
        );
        let mut position = view.position
            + view.forward.normalize_or_zero() * self.tuning.spawn_distance
            + offset;
        position.y = self.tuning.spawn_height;

        let color = EnemyColor::ALL[rng.gen_range(0..EnemyColor::ALL.len())];

        let id = self.insert(position, color);
        self.last_spawn_ms = Some(now_ms);

        debug!(id, ?position, ?color, "enemy spawned");
        events.push(SimEvent::EnemySpawned { id, color });
        Some(id)
    }

    fn insert(&mut self, position: Vec3, color: EnemyColor) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.pool.insert(Enemy {
            id,
            position,
            color,
        });
        id
    }

    /// Place an enemy directly, bypassing the spawn timer.
    #[cfg(test)]
    pub(crate) fn insert_at(&mut self, position: Vec3, color: EnemyColor) -> u64 {
        self.insert(position, color)
    }

    /// Move every enemy toward the anchor's horizontal position by one fixed
    /// step, then drop those that caught the anchor or fell too far behind.
    /// Both distances are measured in the XZ plane, like the heading.
    pub fn steer_and_cull(&mut self, anchor_position: Vec3, events: &mut Vec<SimEvent>) {
        let step = self.tuning.speed * self.tuning.fixed_dt;

        self.cull_buffer.clear();
        for (slot, enemy) in self.pool.iter_mut() {
            let heading = horizontal(anchor_position - enemy.position).normalize_or_zero();
            enemy.position += heading * step;

            let distance = horizontal(anchor_position - enemy.position).length();
            if distance > self.tuning.despawn_distance {
                self.cull_buffer.push((slot, EnemyRemoval::Despawned));
            } else if distance < self.tuning.collision_distance {
                self.cull_buffer.push((slot, EnemyRemoval::CaughtAnchor));
            }
        }

        self.remove_buffered(events);
    }

    /// Destroy every enemy closer than `radius + hit_margin` to `hit_position`.
    /// Returns how many were removed.
    pub fn apply_hit(&mut self, hit_position: Vec3, events: &mut Vec<SimEvent>) -> usize {
        let hit_radius = self.tuning.hit_radius();

        self.cull_buffer.clear();
        for (slot, enemy) in self.pool.iter() {
            if enemy.position.distance(hit_position) < hit_radius {
                self.cull_buffer.push((slot, EnemyRemoval::Destroyed));
            }
        }

        let destroyed = self.cull_buffer.len();
        self.remove_buffered(events);
        destroyed
    }

    fn remove_buffered(&mut self, events: &mut Vec<SimEvent>) {
        for (slot, reason) in self.cull_buffer.drain(..) {
            if let Some(enemy) = self.pool.remove(slot) {
                debug!(id = enemy.id, ?reason, "enemy removed");
                events.push(SimEvent::EnemyRemoved {
                    id: enemy.id,
                    reason,
                });
            }
        }
    }

    /// Trim trailing tombstones. Called once at tick end.
    pub fn compact(&mut self) {
        self.pool.compact();
    }
}

/// Uniform offset in `[-extent / 2, extent / 2)`.
fn jitter(rng: &mut ChaCha8Rng, extent: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * extent
}
