//! Depth-one slot holding the tick's hit event for the snapshot.
//!
//! Every hit is relayed to pursuit as it is reported; the slot keeps only the
//! last one. The engine drains it before the tick returns, so a hit never
//! survives into the next tick.

use glam::Vec3;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct HitEventSlot {
    pending: Option<Vec3>,
}

impl HitEventSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a hit. A later hit in the same tick replaces an earlier one.
    pub fn publish(&mut self, position: Vec3) {
        if let Some(previous) = self.pending.replace(position) {
            debug!(?previous, ?position, "hit event replaced within tick");
        }
    }

    pub fn peek(&self) -> Option<Vec3> {
        self.pending
    }

    /// Empty the slot, returning what it held.
    pub fn drain(&mut self) -> Option<Vec3> {
        self.pending.take()
    }
}
