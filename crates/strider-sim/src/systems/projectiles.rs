//! Projectile pool: rate-limited firing, straight-line flight, expiry and hits.
//!
//! The pool never holds more than `max_count` projectiles; firing into a
//! full pool evicts the oldest one. A projectile expires once it is `range`
//! away from where it was fired or `max_age_ms` old, whichever comes first.

use glam::Vec3;
use tracing::{debug, warn};

use strider_core::config::ProjectileTuning;
use strider_core::enums::ExpiryCause;
use strider_core::events::SimEvent;
use strider_core::pool::SlotPool;
use strider_core::types::AnchorState;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Monotonic; also the creation order.
    pub id: u64,
    pub position: Vec3,
    /// Unit length.
    pub direction: Vec3,
    pub created_at_ms: u64,
    pub start_position: Vec3,
}

impl Projectile {
    pub fn distance_travelled(&self) -> f32 {
        self.position.distance(self.start_position)
    }

    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at_ms)
    }

    fn expiry(&self, now_ms: u64, tuning: &ProjectileTuning) -> Option<ExpiryCause> {
        if self.distance_travelled() >= tuning.range {
            Some(ExpiryCause::Range)
        } else if self.age_ms(now_ms) >= tuning.max_age_ms {
            Some(ExpiryCause::Age)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectileManager {
    tuning: ProjectileTuning,
    pool: SlotPool<Projectile>,
    next_id: u64,
    last_spawn_ms: Option<u64>,
    /// Reused every tick to avoid per-tick allocation.
    expired_buffer: Vec<(usize, ExpiryCause)>,
}

impl ProjectileManager {
    pub fn new(tuning: ProjectileTuning) -> Self {
        let capacity = tuning.max_count;
        Self {
            tuning,
            pool: SlotPool::with_capacity(capacity),
            next_id: 0,
            last_spawn_ms: None,
            expired_buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn tuning(&self) -> &ProjectileTuning {
        &self.tuning
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.pool.values()
    }

    pub fn get(&self, id: u64) -> Option<&Projectile> {
        self.iter().find(|p| p.id == id)
    }

    /// Fire from the anchor's muzzle if the rate limit allows.
    ///
    /// Returns the new projectile id, or `None` when the last shot was less
    /// than `spawn_interval_ms` ago.
    pub fn try_spawn(
        &mut self,
        anchor: &AnchorState,
        now_ms: u64,
        events: &mut Vec<SimEvent>,
    ) -> Option<u64> {
        if let Some(last) = self.last_spawn_ms {
            if now_ms.saturating_sub(last) < self.tuning.spawn_interval_ms {
                return None;
            }
        }

        let direction = anchor.forward();
        let start_position = anchor.position + Vec3::Y * self.tuning.muzzle_height;
        let position = start_position + direction * self.tuning.muzzle_offset;

        if self.pool.len() >= self.tuning.max_count {
            self.evict_oldest(events);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.pool.insert(Projectile {
            id,
            position,
            direction,
            created_at_ms: now_ms,
            start_position,
        });
        self.last_spawn_ms = Some(now_ms);

        debug!(id, ?position, ?direction, "projectile fired");
        events.push(SimEvent::ProjectileFired { id });
        Some(id)
    }

    /// Smallest id is the oldest projectile.
    fn evict_oldest(&mut self, events: &mut Vec<SimEvent>) {
        let oldest = self
            .pool
            .iter()
            .min_by_key(|(_, p)| p.id)
            .map(|(slot, _)| slot);
        if let Some(projectile) = oldest.and_then(|slot| self.pool.remove(slot)) {
            debug!(id = projectile.id, "projectile evicted");
            events.push(SimEvent::ProjectileExpired {
                id: projectile.id,
                cause: ExpiryCause::Evicted,
            });
        }
    }

    /// Remove every projectile whose sensor reported a contact.
    ///
    /// Pushes the position of each removed projectile onto `hits`, in
    /// contact order. Unknown ids are ignored.
    pub fn apply_contacts(
        &mut self,
        contacts: &[u64],
        hits: &mut Vec<Vec3>,
        events: &mut Vec<SimEvent>,
    ) {
        for &id in contacts {
            let Some(slot) = self.pool.position(|p| p.id == id) else {
                warn!(id, "sensor contact for unknown projectile ignored");
                continue;
            };
            if let Some(projectile) = self.pool.remove(slot) {
                debug!(id, position = ?projectile.position, "projectile hit");
                events.push(SimEvent::ProjectileHit {
                    id,
                    position: projectile.position,
                });
                hits.push(projectile.position);
            }
        }
    }

    /// Move every projectile by `speed * dt_secs` and drop the expired ones.
    pub fn advance(&mut self, dt_secs: f32, now_ms: u64, events: &mut Vec<SimEvent>) {
        let step = self.tuning.speed * dt_secs;

        self.expired_buffer.clear();
        for (slot, projectile) in self.pool.iter_mut() {
            projectile.position += projectile.direction * step;
            if let Some(cause) = projectile.expiry(now_ms, &self.tuning) {
                self.expired_buffer.push((slot, cause));
            }
        }

        for (slot, cause) in self.expired_buffer.drain(..) {
            if let Some(projectile) = self.pool.remove(slot) {
                events.push(SimEvent::ProjectileExpired {
                    id: projectile.id,
                    cause,
                });
            }
        }
    }

    /// Trim trailing tombstones. Called once at tick end.
    pub fn compact(&mut self) {
        self.pool.compact();
    }
}
