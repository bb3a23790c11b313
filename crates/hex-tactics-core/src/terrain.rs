//! Terrain types for grid tiles.

use serde::{Deserialize, Serialize};

/// Movement cost value marking a tile that cannot be entered.
pub const IMPASSABLE: i32 = -1;

/// Base terrain type for a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Grassland,
    Mountain,
    Water,
    Desert,
}

impl Terrain {
    /// Movement cost to enter a tile of this terrain.
    ///
    /// Returns [`IMPASSABLE`] for water.
    pub const fn movement_cost(&self) -> i32 {
        match self {
            Terrain::Grassland => 1,
            Terrain::Mountain | Terrain::Desert => 2,
            Terrain::Water => IMPASSABLE,
        }
    }

    /// Check if units can enter this terrain at all.
    pub const fn is_passable(&self) -> bool {
        self.movement_cost() != IMPASSABLE
    }

    /// Check if this is a water terrain type.
    pub const fn is_water(&self) -> bool {
        matches!(self, Terrain::Water)
    }

    /// Get all terrain variants.
    pub const fn all() -> &'static [Terrain] {
        &[
            Terrain::Grassland,
            Terrain::Mountain,
            Terrain::Water,
            Terrain::Desert,
        ]
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Terrain::Grassland => "Grassland",
            Terrain::Mountain => "Mountain",
            Terrain::Water => "Water",
            Terrain::Desert => "Desert",
        };
        write!(f, "{}", name)
    }
}
