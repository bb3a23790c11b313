//! Fog-of-war propagation.
//!
//! When the player's tile changes, the tile and everything within two steps
//! of it is revealed. Reveals are permanent for the session.

use crate::grid::{GridError, HexGrid};
use crate::hex::HexCoord;
use std::collections::HashSet;

/// How far around the player fog is lifted.
pub const REVEAL_RADIUS: u32 = 2;

impl HexGrid {
    /// Reveal `center`, its neighbors, then their neighbors.
    ///
    /// Returns the coordinates that were hidden before this call, in reveal
    /// order (center first, then ring 1, then ring 2). An unknown center
    /// reveals nothing.
    pub fn reveal_hex_and_neighbors(&mut self, center: HexCoord) -> Vec<HexCoord> {
        let mut newly_revealed = Vec::new();
        if !self.contains(&center) {
            return newly_revealed;
        }

        let mut visited: HashSet<HexCoord> = HashSet::from([center]);
        let mut frontier = vec![center];
        self.reveal_one(center, &mut newly_revealed);

        for _ in 0..REVEAL_RADIUS {
            let mut next = Vec::new();
            for coord in frontier {
                for neighbor in coord.neighbors() {
                    if !self.contains(&neighbor) || !visited.insert(neighbor) {
                        continue;
                    }
                    self.reveal_one(neighbor, &mut newly_revealed);
                    next.push(neighbor);
                }
            }
            frontier = next;
        }

        newly_revealed
    }

    /// Reveal a single tile. Returns `true` if it was hidden.
    pub fn reveal(&mut self, coord: HexCoord) -> Result<bool, GridError> {
        if !self.contains(&coord) {
            return Err(GridError::UnknownTile(coord));
        }
        let mut revealed = Vec::with_capacity(1);
        self.reveal_one(coord, &mut revealed);
        Ok(!revealed.is_empty())
    }

    /// Number of tiles no longer under fog.
    pub fn revealed_count(&self) -> usize {
        self.tiles().filter(|t| t.is_revealed()).count()
    }

    fn reveal_one(&mut self, coord: HexCoord, revealed: &mut Vec<HexCoord>) {
        let Some(tile) = self.get_mut(&coord) else {
            return;
        };
        if !tile.reveal() {
            return;
        }
        let appearance = tile.appearance();
        tracing::debug!(%coord, terrain = %tile.terrain(), "revealed tile");
        self.push_update(coord, appearance);
        revealed.push(coord);
    }
}
