//! Simulation engine: the per-frame driver.
//!
//! `SimulationEngine` owns the ground streamer, the projectile pool and the
//! pursuit enemies, advances them in a fixed order once per host frame, and
//! produces `SimSnapshot`s. Completely headless, enabling deterministic
//! testing.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use strider_core::config::ConfigError;
pub use strider_core::config::SimConfig;
use strider_core::events::SimEvent;
use strider_core::state::SimSnapshot;
use strider_core::types::{FrameInput, SimTime};

use crate::hit_event::HitEventSlot;
use crate::score::ScoreState;
use crate::systems;
use crate::systems::ground::GroundStreamer;
use crate::systems::projectiles::ProjectileManager;
use crate::systems::pursuit::PursuitSpawner;

/// The simulation engine. Owns every subsystem and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    ground: GroundStreamer,
    projectiles: ProjectileManager,
    pursuit: PursuitSpawner,
    hit_event: HitEventSlot,
    /// Hit positions reported this tick, in contact order.
    hits: Vec<Vec3>,
    events: Vec<SimEvent>,
    score: ScoreState,
}

impl SimulationEngine {
    /// Validate `config` and build a fresh engine from it.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(seed = config.seed, "simulation engine created");

        Ok(Self {
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ground: GroundStreamer::new(config.ground.clone()),
            projectiles: ProjectileManager::new(config.projectile.clone()),
            pursuit: PursuitSpawner::new(config.enemy.clone()),
            hit_event: HitEventSlot::new(),
            hits: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
            config,
        })
    }

    /// Advance the simulation by one frame and return the resulting snapshot.
    ///
    /// Order is fixed: ground, projectiles, hit relay, enemies. Subsystems
    /// that need the anchor (or the view) skip their work when it is absent.
    pub fn tick(&mut self, input: &FrameInput) -> SimSnapshot {
        let now_ms = input.now_ms;
        let anchor = input.anchor.as_ref();

        // 1. Ground streaming
        if let Some(anchor) = anchor {
            if self.ground.update(anchor.position) {
                self.events.push(SimEvent::GroundRegenerated {
                    cell_count: self.ground.cells().len(),
                });
            }
        }

        // 2. Projectiles: fire, resolve sensor contacts, advance and expire
        if input.trigger_held {
            if let Some(anchor) = anchor {
                self.projectiles.try_spawn(anchor, now_ms, &mut self.events);
            }
        }
        self.projectiles
            .apply_contacts(&input.sensor_contacts, &mut self.hits, &mut self.events);
        self.projectiles
            .advance(input.dt_secs, now_ms, &mut self.events);

        // 3. Relay every hit to the enemies; the last one is the tick's hit event
        for hit in self.hits.drain(..) {
            let destroyed = self.pursuit.apply_hit(hit, &mut self.events);
            debug!(?hit, destroyed, "hit relayed to pursuit");
            self.hit_event.publish(hit);
        }

        // 4. Enemies: spawn ahead of the view, chase and cull
        if let Some(anchor) = anchor {
            if let Some(view) = input.view.as_ref() {
                self.pursuit
                    .try_spawn(view, now_ms, &mut self.rng, &mut self.events);
            }
            self.pursuit
                .steer_and_cull(anchor.position, &mut self.events);
        }

        // 5. Close the tick: drain the hit slot, fold events, compact pools
        let hit_event = self.hit_event.drain();
        for event in &self.events {
            self.score.record(event);
        }
        self.projectiles.compact();
        self.pursuit.compact();
        self.time.advance(now_ms);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.time,
            &self.ground,
            &self.projectiles,
            &self.pursuit,
            hit_event,
            events,
            &self.score,
        )
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn ground(&self) -> &GroundStreamer {
        &self.ground
    }

    pub fn projectiles(&self) -> &ProjectileManager {
        &self.projectiles
    }

    pub fn pursuit(&self) -> &PursuitSpawner {
        &self.pursuit
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Hit waiting to be relayed. Always `None` between ticks.
    pub fn pending_hit(&self) -> Option<Vec3> {
        self.hit_event.peek()
    }

    /// Mutable access to the enemies, for tests that place them by hand.
    #[cfg(test)]
    pub(crate) fn pursuit_mut(&mut self) -> &mut PursuitSpawner {
        &mut self.pursuit
    }
}
