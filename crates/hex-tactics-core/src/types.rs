//! Small shared types used throughout the crate.

use serde::{Deserialize, Serialize};

/// Identifier of an external unit (player pawn, NPC, summoned minion).
///
/// The grid only records these; it never owns the units themselves.
pub type UnitId = u64;

/// A point on the ground plane in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    /// Create a new world position.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to another point.
    pub fn distance_squared(&self, other: &WorldPos) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &WorldPos) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

/// Who controls a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileOwner {
    #[default]
    Neutral,
    Player,
    Faction,
}

impl TileOwner {
    /// Get all owner variants.
    pub const fn all() -> &'static [TileOwner] {
        &[TileOwner::Neutral, TileOwner::Player, TileOwner::Faction]
    }
}
