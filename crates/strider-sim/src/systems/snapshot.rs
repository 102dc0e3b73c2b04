//! Snapshot system: reads the subsystems and builds a complete `SimSnapshot`.
//!
//! Read-only: it never modifies simulation state.

use glam::Vec3;

use strider_core::config::GroundTuning;
use strider_core::events::SimEvent;
use strider_core::state::*;
use strider_core::types::{Cell, SimTime};

use crate::score::ScoreState;
use crate::systems::ground::GroundStreamer;
use crate::systems::projectiles::ProjectileManager;
use crate::systems::pursuit::PursuitSpawner;

/// Build a complete `SimSnapshot` from the current subsystem state.
pub fn build_snapshot(
    time: &SimTime,
    ground: &GroundStreamer,
    projectiles: &ProjectileManager,
    pursuit: &PursuitSpawner,
    hit_event: Option<Vec3>,
    events: Vec<SimEvent>,
    score: &ScoreState,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        tiles: build_tiles(ground),
        projectiles: build_projectiles(projectiles),
        enemies: build_enemies(pursuit),
        hit_event,
        events,
        score: score.view(),
    }
}

/// One tile per active cell, in cell order.
fn build_tiles(ground: &GroundStreamer) -> Vec<TileView> {
    let tuning = ground.tuning();
    ground
        .sorted_cells()
        .into_iter()
        .map(|cell| tile_view(cell, tuning))
        .collect()
}

/// Box placed for `cell`: centered on the cell origin, inset by the tile gap.
pub fn tile_view(cell: Cell, tuning: &GroundTuning) -> TileView {
    let footprint = tuning.cell_size - tuning.tile_gap;
    TileView {
        cell,
        position: cell.world_position(tuning.cell_size, tuning.ground_offset_y),
        size: Vec3::new(footprint, tuning.tile_thickness, footprint),
    }
}

fn build_projectiles(projectiles: &ProjectileManager) -> Vec<ProjectileView> {
    let radius = projectiles.tuning().radius;
    let mut views: Vec<ProjectileView> = projectiles
        .iter()
        .map(|p| ProjectileView {
            id: p.id,
            position: p.position,
            direction: p.direction,
            radius,
        })
        .collect();

    views.sort_by_key(|p| p.id);
    views
}

fn build_enemies(pursuit: &PursuitSpawner) -> Vec<EnemyView> {
    let radius = pursuit.tuning().radius;
    let mut views: Vec<EnemyView> = pursuit
        .iter()
        .map(|e| EnemyView {
            id: e.id,
            position: e.position,
            color: e.color,
            radius,
        })
        .collect();

    views.sort_by_key(|e| e.id);
    views
}
