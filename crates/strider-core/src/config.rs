//! Start-up configuration: the named tunables of every subsystem.
//!
//! Every struct is `#[serde(default)]`, so a config file only needs the
//! fields it overrides. Values are checked once by [`SimConfig::validate`]
//! and never change while the simulation runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid tunable '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ground streaming tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTuning {
    pub cell_size: f32,
    /// Odd side length of the square neighborhood, in cells.
    pub grid_size: u32,
    pub generation_threshold: f32,
    pub ground_offset_y: f32,
    pub tile_thickness: f32,
    pub tile_gap: f32,
}

impl Default for GroundTuning {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            grid_size: GRID_SIZE,
            generation_threshold: GENERATION_THRESHOLD,
            ground_offset_y: GROUND_OFFSET_Y,
            tile_thickness: TILE_THICKNESS,
            tile_gap: TILE_GAP,
        }
    }
}

impl GroundTuning {
    /// Half-width of the neighborhood in cells (`floor(grid_size / 2)`).
    pub fn offset(&self) -> i32 {
        (self.grid_size / 2) as i32
    }
}

/// Projectile pool tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub radius: f32,
    pub spawn_interval_ms: u64,
    pub range: f32,
    pub max_count: usize,
    pub max_age_ms: u64,
    pub muzzle_height: f32,
    pub muzzle_offset: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            spawn_interval_ms: PROJECTILE_SPAWN_INTERVAL_MS,
            range: PROJECTILE_RANGE,
            max_count: MAX_PROJECTILES,
            max_age_ms: PROJECTILE_MAX_AGE_MS,
            muzzle_height: MUZZLE_HEIGHT,
            muzzle_offset: MUZZLE_OFFSET,
        }
    }
}

/// Pursuit enemy tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub spawn_interval_ms: u64,
    pub spawn_distance: f32,
    pub spawn_jitter: f32,
    pub spawn_height: f32,
    pub radius: f32,
    pub speed: f32,
    pub fixed_dt: f32,
    pub despawn_distance: f32,
    pub collision_distance: f32,
    pub hit_margin: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            spawn_distance: ENEMY_SPAWN_DISTANCE,
            spawn_jitter: ENEMY_SPAWN_JITTER,
            spawn_height: ENEMY_SPAWN_HEIGHT,
            radius: ENEMY_RADIUS,
            speed: ENEMY_SPEED,
            fixed_dt: ENEMY_FIXED_DT,
            despawn_distance: ENEMY_DESPAWN_DISTANCE,
            collision_distance: ENEMY_COLLISION_DISTANCE,
            hit_margin: HIT_MARGIN,
        }
    }
}

impl EnemyTuning {
    /// Enemies closer than this to a hit position are destroyed.
    pub fn hit_radius(&self) -> f32 {
        self.radius + self.hit_margin
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub ground: GroundTuning,
    pub projectile: ProjectileTuning,
    pub enemy: EnemyTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            ground: GroundTuning::default(),
            projectile: ProjectileTuning::default(),
            enemy: EnemyTuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every tunable. The first violation wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.ground;
        positive("ground.cell_size", g.cell_size)?;
        if g.grid_size == 0 || g.grid_size % 2 == 0 {
            return Err(invalid("ground.grid_size", "must be odd and non-zero"));
        }
        non_negative("ground.generation_threshold", g.generation_threshold)?;
        non_negative("ground.tile_thickness", g.tile_thickness)?;
        if !(0.0..g.cell_size).contains(&g.tile_gap) {
            return Err(invalid("ground.tile_gap", "must be in [0, cell_size)"));
        }

        let p = &self.projectile;
        positive("projectile.speed", p.speed)?;
        positive("projectile.radius", p.radius)?;
        positive("projectile.range", p.range)?;
        if p.spawn_interval_ms == 0 {
            return Err(invalid("projectile.spawn_interval_ms", "must be positive"));
        }
        if p.max_count == 0 {
            return Err(invalid("projectile.max_count", "must be positive"));
        }
        if p.max_age_ms == 0 {
            return Err(invalid("projectile.max_age_ms", "must be positive"));
        }
        non_negative("projectile.muzzle_offset", p.muzzle_offset)?;

        let e = &self.enemy;
        if e.spawn_interval_ms == 0 {
            return Err(invalid("enemy.spawn_interval_ms", "must be positive"));
        }
        non_negative("enemy.spawn_distance", e.spawn_distance)?;
        non_negative("enemy.spawn_jitter", e.spawn_jitter)?;
        positive("enemy.radius", e.radius)?;
        positive("enemy.speed", e.speed)?;
        positive("enemy.fixed_dt", e.fixed_dt)?;
        non_negative("enemy.hit_margin", e.hit_margin)?;
        positive("enemy.collision_distance", e.collision_distance)?;
        if e.collision_distance >= e.despawn_distance {
            return Err(invalid(
                "enemy.collision_distance",
                "must be below enemy.despawn_distance",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be non-negative"))
    }
}
