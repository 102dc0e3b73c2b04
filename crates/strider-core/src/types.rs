//! Fundamental geometric and simulation types.
//!
//! World space is Y-up. The ground plane is XZ; "horizontal" always means
//! the X and Z components.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Grid coordinate of one ground tile. World position is `coordinate * cell_size`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The cell whose tile covers the horizontal position of `position`.
    pub fn containing(position: Vec3, cell_size: f32) -> Self {
        Self {
            x: (position.x / cell_size).floor() as i32,
            z: (position.z / cell_size).floor() as i32,
        }
    }

    /// World-space center of this tile at height `y`.
    pub fn world_position(&self, cell_size: f32, y: f32) -> Vec3 {
        Vec3::new(self.x as f32 * cell_size, y, self.z as f32 * cell_size)
    }
}

/// Transform of the player-controlled entity, as reported by the character controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorState {
    pub position: Vec3,
    /// Unit quaternion.
    pub orientation: Quat,
}

impl AnchorState {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Anchor at `position` facing +Z.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Canonical forward (+Z) rotated by the anchor orientation.
    pub fn forward(&self) -> Vec3 {
        (self.orientation * Vec3::Z).normalize_or_zero()
    }
}

/// Camera position and viewing direction for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewFrame {
    pub position: Vec3,
    pub forward: Vec3,
}

impl ViewFrame {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}

/// Everything the host supplies for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Host wall clock in milliseconds. Drives every rate limit and age check.
    pub now_ms: u64,
    /// Variable frame delta in seconds. Drives projectile motion.
    pub dt_secs: f32,
    /// `None` while the character controller is not initialized.
    pub anchor: Option<AnchorState>,
    pub view: Option<ViewFrame>,
    /// Continuous fire while held.
    pub trigger_held: bool,
    /// Projectile ids whose sensor touched another body since the last tick.
    #[serde(default)]
    pub sensor_contacts: Vec<u64>,
}

impl FrameInput {
    pub fn new(now_ms: u64, dt_secs: f32) -> Self {
        Self {
            now_ms,
            dt_secs,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: AnchorState) -> Self {
        self.anchor = Some(anchor);
        self
    }

    #[must_use]
    pub fn with_view(mut self, view: ViewFrame) -> Self {
        self.view = Some(view);
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, held: bool) -> Self {
        self.trigger_held = held;
        self
    }

    #[must_use]
    pub fn with_contacts(mut self, contacts: impl IntoIterator<Item = u64>) -> Self {
        self.sensor_contacts.extend(contacts);
        self
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed ticks.
    pub tick: u64,
    /// Host clock of the most recent tick (ms).
    pub now_ms: u64,
}

impl SimTime {
    /// Advance by one tick, recording the host clock it ran at.
    pub fn advance(&mut self, now_ms: u64) {
        self.tick += 1;
        self.now_ms = now_ms;
    }
}

/// Horizontal projection of a position (y dropped to zero).
pub fn horizontal(position: Vec3) -> Vec3 {
    Vec3::new(position.x, 0.0, position.z)
}
