//! Ground streaming: keeps a square window of tiles around the anchor.
//!
//! The tile set is rebuilt only after the anchor has moved more than the
//! generation threshold since the last rebuild. A rebuild covers the
//! anchor's neighborhood plus the neighborhood of a point predicted a
//! couple of cells ahead along the direction of travel.

use std::collections::HashSet;

use glam::Vec3;
use tracing::{debug, info};

use strider_core::config::GroundTuning;
use strider_core::constants::FORWARD_PREDICTION_CELLS;
use strider_core::types::{horizontal, Cell};

/// Active tile set and the position it was last built around.
#[derive(Debug, Clone)]
pub struct GroundStreamer {
    tuning: GroundTuning,
    cells: HashSet<Cell>,
    /// Horizontal anchor position of the last rebuild. `None` until seeded.
    last_position: Option<Vec3>,
    generations: u64,
}

impl GroundStreamer {
    pub fn new(tuning: GroundTuning) -> Self {
        Self {
            tuning,
            cells: HashSet::new(),
            last_position: None,
            generations: 0,
        }
    }

    pub fn tuning(&self) -> &GroundTuning {
        &self.tuning
    }

    pub fn cells(&self) -> &HashSet<Cell> {
        &self.cells
    }

    /// Active cells in `(x, z)` order.
    pub fn sorted_cells(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    pub fn last_position(&self) -> Option<Vec3> {
        self.last_position
    }

    /// Number of times the tile set has been (re)built, seeding included.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Feed the current anchor position. Returns `true` when the tile set was replaced.
    pub fn update(&mut self, anchor_position: Vec3) -> bool {
        let current = horizontal(anchor_position);
        let cell_size = self.tuning.cell_size;
        let offset = self.tuning.offset();

        let Some(last) = self.last_position else {
            self.cells = neighborhood(current, cell_size, offset).collect();
            self.last_position = Some(current);
            self.generations += 1;
            debug!(cells = self.cells.len(), "ground seeded");
            return true;
        };

        if current.distance(last) <= self.tuning.generation_threshold {
            return false;
        }

        let predicted = predict_forward(current, last, cell_size);
        self.cells = merge(
            neighborhood(current, cell_size, offset),
            neighborhood(predicted, cell_size, offset),
        );
        self.last_position = Some(current);
        self.generations += 1;
        info!(
            cells = self.cells.len(),
            x = current.x,
            z = current.z,
            "ground regenerated"
        );
        true
    }
}

/// All cells within `offset` cells of the cell containing `center`, on both axes.
pub fn neighborhood(center: Vec3, cell_size: f32, offset: i32) -> impl Iterator<Item = Cell> {
    let origin = Cell::containing(center, cell_size);
    (-offset..=offset).flat_map(move |i| {
        (-offset..=offset).map(move |j| Cell::new(origin.x + i, origin.z + j))
    })
}

/// Point `FORWARD_PREDICTION_CELLS` cells ahead of `current` along the
/// horizontal travel direction from `last`. Equals `current` when there was
/// no movement.
pub fn predict_forward(current: Vec3, last: Vec3, cell_size: f32) -> Vec3 {
    let direction = horizontal(current - last).normalize_or_zero();
    current + direction * (cell_size * FORWARD_PREDICTION_CELLS)
}

/// Union of two cell collections, one entry per coordinate.
pub fn merge(
    a: impl IntoIterator<Item = Cell>,
    b: impl IntoIterator<Item = Cell>,
) -> HashSet<Cell> {
    a.into_iter().chain(b).collect()
}
