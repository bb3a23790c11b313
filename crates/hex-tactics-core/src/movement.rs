//! Short-range movement reachability and outline extraction.
//!
//! Tactical moves are one or two hexes. Rather than a full cost search, the
//! rules are:
//!
//! - a tile one step away is reachable if it is passable and its movement
//!   cost fits within the range;
//! - a tile two steps away is reachable if it is passable and shares at least
//!   one cost-1 neighbor with the start tile, so the path crosses cheap ground.
//!
//! Tiles further away are never reachable, whatever the range. The start tile
//! itself is never part of the result.

use crate::grid::HexGrid;
use crate::hex::{HexCoord, HexDirection};
use crate::types::{TileOwner, WorldPos};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// One side of a tile that faces outside a tile set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoundaryEdge {
    /// Tile inside the set.
    pub coord: HexCoord,
    /// Side of that tile facing out.
    pub direction: HexDirection,
}

impl BoundaryEdge {
    /// Edge index 0-5, matching the neighbor offset table.
    pub fn edge_index(&self) -> usize {
        self.direction.index()
    }

    /// World-space endpoints of this edge for drawing.
    pub fn endpoints(&self, hex_size: f32) -> (WorldPos, WorldPos) {
        self.coord.edge_endpoints(self.direction, hex_size)
    }
}

/// A computed movement range, as shown to the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementRange {
    /// Tiles the unit may move to.
    pub tiles: HashSet<HexCoord>,
    /// Outline of `tiles`.
    pub boundary: Vec<BoundaryEdge>,
}

impl MovementRange {
    /// Check if no move is possible.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Check if a tile is in range.
    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.tiles.contains(coord)
    }
}

/// Every tile within `range` hex steps of `start`, with its distance.
///
/// Breadth-first over the linked neighbor graph. Each tile is visited once
/// and the start tile is excluded. Returns an empty map for an unknown start
/// or an unlinked grid.
pub fn neighbors_in_range(grid: &HexGrid, start: HexCoord, range: u32) -> HashMap<HexCoord, u32> {
    let mut distances: HashMap<HexCoord, u32> = HashMap::new();

    if !grid.contains(&start) {
        return distances;
    }
    if !grid.is_linked() {
        tracing::warn!(%start, "range query on a grid without neighbors assigned");
        return distances;
    }

    let mut visited: HashSet<HexCoord> = HashSet::from([start]);
    let mut queue: VecDeque<HexCoord> = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let Some(tile) = grid.get(&current) else {
            continue;
        };

        for neighbor in tile.neighbors() {
            if visited.contains(neighbor) {
                continue;
            }
            let distance = start.distance(neighbor);
            if distance > range {
                continue;
            }
            visited.insert(*neighbor);
            distances.insert(*neighbor, distance);
            queue.push_back(*neighbor);
        }
    }

    distances
}

/// Tiles a unit standing on `start` may move to with the given range.
pub fn valid_movement_tiles(grid: &HexGrid, start: HexCoord, range: u32) -> HashSet<HexCoord> {
    let mut valid = HashSet::new();

    let Some(start_tile) = grid.get(&start) else {
        return valid;
    };
    let budget = i32::try_from(range).unwrap_or(i32::MAX);

    for (coord, distance) in neighbors_in_range(grid, start, range) {
        let Some(tile) = grid.get(&coord) else {
            continue;
        };
        if !tile.is_passable() {
            tracing::trace!(%coord, distance, "skipping impassable tile");
            continue;
        }

        let reachable = match distance {
            1 => budget >= tile.movement_cost(),
            2 => tile.neighbors().iter().any(|shared| {
                start_tile.is_neighbor(shared)
                    && grid.get(shared).is_some_and(|t| t.movement_cost() == 1)
            }),
            _ => false,
        };

        if reachable {
            valid.insert(coord);
        }
    }

    valid
}

/// Sides of tiles in `tiles` that face the map edge or a tile outside the set.
///
/// Together they trace the outline of the set with no internal edges.
/// Sorted by tile (row-major) then edge index.
pub fn movement_boundary_edges(grid: &HexGrid, tiles: &HashSet<HexCoord>) -> Vec<BoundaryEdge> {
    let mut coords: Vec<&HexCoord> = tiles.iter().filter(|c| grid.contains(c)).collect();
    coords.sort();

    let mut edges = Vec::new();
    for coord in coords {
        for direction in HexDirection::all() {
            let neighbor = coord.neighbor(direction);
            if !grid.contains(&neighbor) || !tiles.contains(&neighbor) {
                edges.push(BoundaryEdge {
                    coord: *coord,
                    direction,
                });
            }
        }
    }
    edges
}

/// Tiles in `tiles` with at least one linked neighbor outside the set.
///
/// Sides facing the map edge do not count here, only real tiles.
pub fn movement_boundary_tiles(grid: &HexGrid, tiles: &HashSet<HexCoord>) -> Vec<HexCoord> {
    let mut boundary: Vec<HexCoord> = tiles
        .iter()
        .filter(|coord| {
            grid.get(coord)
                .is_some_and(|tile| tile.neighbors().iter().any(|n| !tiles.contains(n)))
        })
        .copied()
        .collect();
    boundary.sort();
    boundary
}

impl HexGrid {
    /// Tiles a unit standing on `start` may move to. See [`valid_movement_tiles`].
    pub fn valid_movement_tiles(&self, start: HexCoord, range: u32) -> HashSet<HexCoord> {
        valid_movement_tiles(self, start, range)
    }

    /// Outline of a tile set. See [`movement_boundary_edges`].
    pub fn movement_boundary_edges(&self, tiles: &HashSet<HexCoord>) -> Vec<BoundaryEdge> {
        movement_boundary_edges(self, tiles)
    }

    /// Outline of all tiles held by `owner`, for territory borders.
    pub fn owner_boundary_edges(&self, owner: TileOwner) -> Vec<BoundaryEdge> {
        let owned: HashSet<HexCoord> = self.owned_tiles(owner).into_iter().collect();
        movement_boundary_edges(self, &owned)
    }

    /// Compute the movement range from `start` and highlight it.
    ///
    /// Any previously shown range is cleared first. An unknown start clears
    /// the highlight and returns an empty range.
    pub fn show_movement_range(&mut self, start: HexCoord, range: u32) -> MovementRange {
        self.clear_movement_range();
        if !self.contains(&start) {
            return MovementRange::default();
        }

        let tiles = valid_movement_tiles(self, start, range);
        let boundary = movement_boundary_edges(self, &tiles);

        let mut coords: Vec<HexCoord> = tiles.iter().copied().collect();
        coords.sort();
        for coord in coords {
            let changed = self
                .get_mut(&coord)
                .and_then(|tile| tile.set_highlighted(true));
            if let Some(appearance) = changed {
                self.push_update(coord, appearance);
            }
        }

        tracing::debug!(%start, range, tiles = tiles.len(), edges = boundary.len(), "showing movement range");
        MovementRange { tiles, boundary }
    }

    /// Remove the movement-range highlight from every tile.
    pub fn clear_movement_range(&mut self) {
        for coord in self.sorted_coords() {
            let changed = self
                .get_mut(&coord)
                .and_then(|tile| tile.set_highlighted(false));
            if let Some(appearance) = changed {
                self.push_update(coord, appearance);
            }
        }
    }
}
