//! Scripted stand-in for the external engine collaborators.
//!
//! The pilot walks the anchor around a circle with the trigger held, keeps a
//! chase camera behind it, and plays the physics engine's part by reporting
//! a sensor contact for every projectile that overlaps an enemy in the
//! latest snapshot.

use glam::{Quat, Vec3};

use strider_core::state::SimSnapshot;
use strider_core::types::{AnchorState, ViewFrame};

use crate::state::GameLoopCommand;

#[derive(Debug, Clone)]
pub struct DemoPilot {
    /// Radius of the walk around the origin.
    pub radius: f32,
    /// Radians per second.
    pub angular_speed: f32,
    pub camera_distance: f32,
    pub camera_height: f32,
    /// Tick of the last snapshot contacts were reported from.
    last_contact_tick: Option<u64>,
}

impl Default for DemoPilot {
    fn default() -> Self {
        Self {
            radius: 40.0,
            angular_speed: 0.15,
            camera_distance: 6.0,
            camera_height: 3.0,
            last_contact_tick: None,
        }
    }
}

impl DemoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor on the circle at `t_secs`, facing along the direction of travel.
    pub fn anchor_at(&self, t_secs: f32) -> AnchorState {
        let angle = t_secs * self.angular_speed;
        let (sin, cos) = angle.sin_cos();
        let position = Vec3::new(self.radius * cos, 0.0, self.radius * sin);
        let tangent = Vec3::new(-sin, 0.0, cos);
        AnchorState::new(position, Quat::from_rotation_arc(Vec3::Z, tangent))
    }

    /// Chase camera behind and above the anchor, looking at it.
    pub fn view_for(&self, anchor: &AnchorState) -> ViewFrame {
        let position = anchor.position - anchor.forward() * self.camera_distance
            + Vec3::Y * self.camera_height;
        ViewFrame::new(position, (anchor.position - position).normalize_or_zero())
    }

    /// Everything the collaborators report for one frame.
    ///
    /// Contacts are reported once per snapshot tick; polling the same
    /// snapshot again adds none.
    pub fn commands(&mut self, t_secs: f32, latest: Option<&SimSnapshot>) -> Vec<GameLoopCommand> {
        let anchor = self.anchor_at(t_secs);
        let mut commands = vec![
            GameLoopCommand::UpdateAnchor(Some(anchor)),
            GameLoopCommand::UpdateView(Some(self.view_for(&anchor))),
            GameLoopCommand::SetTrigger(true),
        ];
        if let Some(snapshot) = latest.filter(|s| self.last_contact_tick != Some(s.time.tick)) {
            self.last_contact_tick = Some(snapshot.time.tick);
            commands.extend(
                sensor_contacts(snapshot)
                    .into_iter()
                    .map(GameLoopCommand::SensorContact),
            );
        }
        commands
    }
}

/// Ids of projectiles whose sphere overlaps any enemy sphere.
pub fn sensor_contacts(snapshot: &SimSnapshot) -> Vec<u64> {
    snapshot
        .projectiles
        .iter()
        .filter(|p| {
            snapshot
                .enemies
                .iter()
                .any(|e| p.position.distance(e.position) < p.radius + e.radius)
        })
        .map(|p| p.id)
        .collect()
}
