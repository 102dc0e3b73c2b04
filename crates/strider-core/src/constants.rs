//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind `SimConfig`. A config file may override
//! any of them at start-up; nothing changes them while the simulation runs.

/// Nominal host frame rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Default RNG seed. Same seed + same inputs = same simulation.
pub const DEFAULT_SEED: u64 = 42;

// --- Ground streaming ---

/// Edge length of one ground tile (world units).
pub const CELL_SIZE: f32 = 20.0;

/// Side length of the streamed neighborhood, in cells (7x7).
pub const GRID_SIZE: u32 = 7;

/// Horizontal distance the anchor must cover before the tile set is rebuilt.
pub const GENERATION_THRESHOLD: f32 = CELL_SIZE * 0.7;

/// Distance of the predicted anchor position ahead of the anchor, in cells.
pub const FORWARD_PREDICTION_CELLS: f32 = 2.0;

/// Height of the tile centers. Slightly below zero so the top face sits at y = 0.
pub const GROUND_OFFSET_Y: f32 = -0.1;

/// Tile thickness.
pub const TILE_THICKNESS: f32 = 0.2;

/// Gap left between neighbouring tiles.
pub const TILE_GAP: f32 = 0.1;

// --- Projectiles ---

/// Projectile speed (units/s).
pub const PROJECTILE_SPEED: f32 = 30.0;

/// Projectile sensor/visual radius.
pub const PROJECTILE_RADIUS: f32 = 0.2;

/// Minimum time between two shots (ms).
pub const PROJECTILE_SPAWN_INTERVAL_MS: u64 = 100;

/// Distance from its start position at which a projectile expires.
pub const PROJECTILE_RANGE: f32 = 20.0;

/// Pool capacity. The oldest projectile is evicted beyond this.
pub const MAX_PROJECTILES: usize = 20;

/// Age at which a projectile expires regardless of distance (ms).
pub const PROJECTILE_MAX_AGE_MS: u64 = 3000;

/// Height of the muzzle above the anchor origin.
pub const MUZZLE_HEIGHT: f32 = 0.5;

/// Distance along the firing direction at which a projectile appears.
pub const MUZZLE_OFFSET: f32 = 2.0;

// --- Pursuit enemies ---

/// Minimum time between two enemy spawns (ms).
pub const ENEMY_SPAWN_INTERVAL_MS: u64 = 2000;

/// Distance ahead of the view at which enemies appear.
pub const ENEMY_SPAWN_DISTANCE: f32 = 30.0;

/// Full width of the uniform horizontal spawn jitter, per axis.
pub const ENEMY_SPAWN_JITTER: f32 = 10.0;

/// Enemy collider/visual radius.
pub const ENEMY_RADIUS: f32 = 1.0;

/// Height enemies are pinned to on spawn.
pub const ENEMY_SPAWN_HEIGHT: f32 = ENEMY_RADIUS;

/// Pursuit speed (units/s).
pub const ENEMY_SPEED: f32 = 5.0;

/// Nominal step used for pursuit steering, independent of frame jitter (s).
pub const ENEMY_FIXED_DT: f32 = 0.016;

/// Enemies further than this from the anchor are dropped.
pub const ENEMY_DESPAWN_DISTANCE: f32 = 50.0;

/// Enemies closer than this to the anchor have caught it and are removed.
pub const ENEMY_COLLISION_DISTANCE: f32 = 2.0;

/// Extra radius added to `ENEMY_RADIUS` when culling around a hit position.
pub const HIT_MARGIN: f32 = 1.0;
