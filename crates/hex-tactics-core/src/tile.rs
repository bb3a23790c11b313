//! A single cell of the tactical grid.
//!
//! Tiles carry terrain, ownership, fog-of-war state and a list of neighbor
//! coordinates. The grid owns every tile; neighbors are stored by coordinate
//! so a tile never keeps another tile alive.
//!
//! Fog of war is one-directional: a tile starts hidden and [`HexTile::reveal`]
//! is the only transition. There is no way to hide a tile again.

use crate::hex::HexCoord;
use crate::terrain::Terrain;
use crate::types::{TileOwner, UnitId, WorldPos};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What the rendering layer should currently draw for a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Appearance {
    /// Not yet revealed; terrain is hidden.
    Fog,
    /// Revealed; draw the terrain.
    Terrain(Terrain),
    /// Part of the currently shown movement range.
    Highlighted,
}

/// A single tile on the grid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HexTile {
    coord: HexCoord,
    world_pos: WorldPos,
    terrain: Terrain,
    owner: TileOwner,
    revealed: bool,
    highlighted: bool,
    neighbors: Vec<HexCoord>,
    occupants: BTreeSet<UnitId>,
}

impl HexTile {
    /// Create a hidden, neutral tile with its world position derived from
    /// `coord` and `hex_size`.
    pub fn new(coord: HexCoord, terrain: Terrain, hex_size: f32) -> Self {
        Self {
            coord,
            world_pos: coord.to_world(hex_size),
            terrain,
            owner: TileOwner::Neutral,
            revealed: false,
            highlighted: false,
            neighbors: Vec::with_capacity(6),
            occupants: BTreeSet::new(),
        }
    }

    /// Position on the grid.
    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    /// Cached world-space center.
    pub fn world_pos(&self) -> WorldPos {
        self.world_pos
    }

    /// Recompute the cached world position for a new hex size.
    pub fn recalculate_world_pos(&mut self, hex_size: f32) {
        self.world_pos = self.coord.to_world(hex_size);
    }

    /// Terrain type.
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Movement cost to enter this tile; always derived from the terrain.
    pub fn movement_cost(&self) -> i32 {
        self.terrain.movement_cost()
    }

    /// Check if units can enter this tile.
    pub fn is_passable(&self) -> bool {
        self.terrain.is_passable()
    }

    /// Current owner.
    pub fn owner(&self) -> TileOwner {
        self.owner
    }

    /// Has fog of war been lifted from this tile?
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Is this tile part of the displayed movement range?
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Coordinates of adjacent tiles present in the grid.
    pub fn neighbors(&self) -> &[HexCoord] {
        &self.neighbors
    }

    /// Check if `coord` is linked as a neighbor of this tile.
    pub fn is_neighbor(&self, coord: &HexCoord) -> bool {
        self.neighbors.contains(coord)
    }

    /// Units currently standing on this tile.
    pub fn occupants(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.occupants.iter().copied()
    }

    /// Check if any unit stands on this tile.
    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// What the renderer should show right now.
    pub fn appearance(&self) -> Appearance {
        if self.highlighted {
            Appearance::Highlighted
        } else if !self.revealed {
            Appearance::Fog
        } else {
            Appearance::Terrain(self.terrain)
        }
    }

    /// Change the terrain (and with it the movement cost).
    ///
    /// Returns the appearance to re-apply; an unrevealed tile stays fogged.
    pub fn set_terrain(&mut self, terrain: Terrain) -> Appearance {
        self.terrain = terrain;
        self.appearance()
    }

    /// Lift fog of war. Returns `true` only on the hidden -> revealed transition.
    pub fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    /// Toggle the movement-range highlight.
    ///
    /// Returns the new appearance, or `None` if nothing changed.
    pub fn set_highlighted(&mut self, highlighted: bool) -> Option<Appearance> {
        if self.highlighted == highlighted {
            return None;
        }
        self.highlighted = highlighted;
        Some(self.appearance())
    }

    pub(crate) fn set_owner(&mut self, owner: TileOwner) {
        self.owner = owner;
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: Vec<HexCoord>) {
        self.neighbors = neighbors;
    }

    pub(crate) fn add_occupant(&mut self, unit: UnitId) -> bool {
        self.occupants.insert(unit)
    }

    pub(crate) fn remove_occupant(&mut self, unit: UnitId) -> bool {
        self.occupants.remove(&unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(terrain: Terrain) -> HexTile {
        HexTile::new(HexCoord::new(1, -1), terrain, 100.0)
    }

    #[test]
    fn test_new_tile_is_hidden_and_neutral() {
        let t = tile(Terrain::Grassland);
        assert!(!t.is_revealed());
        assert!(!t.is_highlighted());
        assert_eq!(t.owner(), TileOwner::Neutral);
        assert_eq!(t.appearance(), Appearance::Fog);
        assert!(t.neighbors().is_empty());
        assert_eq!(t.world_pos(), HexCoord::new(1, -1).to_world(100.0));
    }

    #[test]
    fn test_movement_cost_follows_terrain() {
        let mut t = tile(Terrain::Grassland);
        assert_eq!(t.movement_cost(), 1);
        t.set_terrain(Terrain::Mountain);
        assert_eq!(t.movement_cost(), 2);
        t.set_terrain(Terrain::Water);
        assert_eq!(t.movement_cost(), -1);
        assert!(!t.is_passable());
    }

    #[test]
    fn test_terrain_change_keeps_fog() {
        let mut t = tile(Terrain::Grassland);
        assert_eq!(t.set_terrain(Terrain::Desert), Appearance::Fog);

        t.reveal();
        assert_eq!(t.set_terrain(Terrain::Mountain), Appearance::Terrain(Terrain::Mountain));
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut t = tile(Terrain::Desert);
        assert!(t.reveal());
        assert!(!t.reveal());
        assert!(t.is_revealed());
        assert_eq!(t.appearance(), Appearance::Terrain(Terrain::Desert));
    }

    #[test]
    fn test_highlight_overrides_and_restores() {
        let mut t = tile(Terrain::Grassland);
        t.reveal();
        assert_eq!(t.set_highlighted(true), Some(Appearance::Highlighted));
        assert_eq!(t.set_highlighted(true), None);
        assert_eq!(
            t.set_highlighted(false),
            Some(Appearance::Terrain(Terrain::Grassland))
        );
    }

    #[test]
    fn test_unhighlight_hidden_tile_restores_fog() {
        let mut t = tile(Terrain::Grassland);
        t.set_highlighted(true);
        assert_eq!(t.set_highlighted(false), Some(Appearance::Fog));
    }

    #[test]
    fn test_occupants() {
        let mut t = tile(Terrain::Grassland);
        assert!(!t.is_occupied());
        assert!(t.add_occupant(7));
        assert!(!t.add_occupant(7));
        assert!(t.add_occupant(3));
        assert_eq!(t.occupants().collect::<Vec<_>>(), vec![3, 7]);
        assert!(t.remove_occupant(7));
        assert!(!t.remove_occupant(7));
        assert!(t.is_occupied());
    }
}
