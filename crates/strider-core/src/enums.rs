//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Visual tag assigned to an enemy at spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyColor {
    #[default]
    Coral,
    Turquoise,
    Sky,
    Sage,
    Cream,
    DustyRose,
    Amethyst,
    Carrot,
    Emerald,
    Sunflower,
}

impl EnemyColor {
    /// The full palette, in draw order.
    pub const ALL: [EnemyColor; 10] = [
        EnemyColor::Coral,
        EnemyColor::Turquoise,
        EnemyColor::Sky,
        EnemyColor::Sage,
        EnemyColor::Cream,
        EnemyColor::DustyRose,
        EnemyColor::Amethyst,
        EnemyColor::Carrot,
        EnemyColor::Emerald,
        EnemyColor::Sunflower,
    ];

    /// CSS hex color for the renderer.
    pub fn hex(self) -> &'static str {
        match self {
            EnemyColor::Coral => "#FF6B6B",
            EnemyColor::Turquoise => "#4ECDC4",
            EnemyColor::Sky => "#45B7D1",
            EnemyColor::Sage => "#96CEB4",
            EnemyColor::Cream => "#FFEEAD",
            EnemyColor::DustyRose => "#D4A5A5",
            EnemyColor::Amethyst => "#9B59B6",
            EnemyColor::Carrot => "#E67E22",
            EnemyColor::Emerald => "#2ECC71",
            EnemyColor::Sunflower => "#F1C40F",
        }
    }
}

/// Why a projectile left the pool without hitting anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryCause {
    /// Travelled at least the weapon range from its start position.
    Range,
    /// Lived at least the maximum age.
    Age,
    /// Pushed out by a newer projectile while the pool was full.
    Evicted,
}

/// Why an enemy was removed by the pursuit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyRemoval {
    /// Reached the anchor.
    CaughtAnchor,
    /// Fell too far behind to matter.
    Despawned,
    /// Inside the radius of a projectile hit.
    Destroyed,
}
