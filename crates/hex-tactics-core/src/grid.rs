//! The hex grid: tile storage, generation, neighbor linking and lookups.
//!
//! A grid is built in two phases. [`HexGrid::generate_hex_grid`] creates every
//! tile of the hexagonal region, then [`HexGrid::assign_neighbors`] links each
//! tile to the adjacent tiles that exist. Linking needs the full index, so it
//! cannot happen while tiles are still being created. [`HexGrid::generate`]
//! runs both phases from [`GridSettings`].
//!
//! Only the grid mutates tiles. Every change that affects what a tile looks
//! like is queued as a [`VisualUpdate`] for the rendering layer to drain.

use crate::hex::{hex_count, HexCoord, HexDirection};
use crate::mapgen::{TerrainGenerator, TerrainSource};
use crate::settings::{GridSettings, SettingsError, MAX_RADIUS};
use crate::terrain::Terrain;
use crate::tile::{Appearance, HexTile};
use crate::types::{TileOwner, UnitId, WorldPos};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors from grid mutations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GridError {
    /// The coordinate is outside the grid.
    #[error("No tile at {0}")]
    UnknownTile(HexCoord),
    /// Settings failed validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// A change in what a tile should look like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualUpdate {
    pub coord: HexCoord,
    pub appearance: Appearance,
}

/// Terrain tallies from one generation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub grassland: usize,
    pub desert: usize,
    pub mountain: usize,
    pub water: usize,
    /// Coordinates produced twice and skipped. Always zero unless the
    /// iteration bounds are broken.
    pub duplicates: usize,
}

impl GenerationReport {
    /// Total tiles created.
    pub fn total(&self) -> usize {
        self.grassland + self.desert + self.mountain + self.water
    }

    fn record(&mut self, terrain: Terrain) {
        match terrain {
            Terrain::Grassland => self.grassland += 1,
            Terrain::Desert => self.desert += 1,
            Terrain::Mountain => self.mountain += 1,
            Terrain::Water => self.water += 1,
        }
    }
}

/// The tactical hex grid.
#[derive(Clone, Debug)]
pub struct HexGrid {
    settings: GridSettings,
    tiles: HashMap<HexCoord, HexTile>,
    linked: bool,
    pending: Vec<VisualUpdate>,
}

impl HexGrid {
    /// Create an empty grid. Call [`generate_hex_grid`](Self::generate_hex_grid)
    /// and [`assign_neighbors`](Self::assign_neighbors) before querying it.
    pub fn new(settings: GridSettings) -> Self {
        Self {
            settings,
            tiles: HashMap::new(),
            linked: false,
            pending: Vec::new(),
        }
    }

    /// Validate settings, generate seeded noise terrain and link neighbors.
    pub fn generate(settings: GridSettings) -> Result<Self, GridError> {
        let mut terrain = TerrainGenerator::new(settings.seed, settings.terrain.clone());
        Self::with_terrain(settings, &mut terrain)
    }

    /// Validate settings, generate with a custom terrain source and link
    /// neighbors.
    pub fn with_terrain(
        settings: GridSettings,
        terrain: &mut impl TerrainSource,
    ) -> Result<Self, GridError> {
        settings.validate()?;
        let mut grid = Self::new(settings);
        grid.generate_hex_grid(terrain);
        grid.assign_neighbors();
        Ok(grid)
    }

    /// Create every tile of the hexagonal region.
    ///
    /// Tiles on the outer ring are always water; inland terrain comes from
    /// `terrain`. Any previous tiles are discarded and the grid is left
    /// unlinked.
    pub fn generate_hex_grid(&mut self, terrain: &mut impl TerrainSource) -> GenerationReport {
        self.tiles.clear();
        self.pending.clear();
        self.linked = false;

        let radius = self.settings.radius;
        let hex_size = self.settings.hex_size;
        let n = radius as i32;
        let mut report = GenerationReport::default();
        let capacity = self.settings.tile_count().min(hex_count(MAX_RADIUS));
        let mut used: HashSet<HexCoord> = HashSet::with_capacity(capacity);

        for q in -n..=n {
            for r in (-n).max(-q - n)..=n.min(-q + n) {
                let coord = HexCoord::new(q, r);
                if !used.insert(coord) {
                    tracing::error!(%coord, "duplicate hex during generation, skipping");
                    report.duplicates += 1;
                    continue;
                }

                let tile_terrain = if coord.is_on_ring(radius) {
                    Terrain::Water
                } else {
                    terrain.determine_land_type(coord.to_world(hex_size))
                };

                report.record(tile_terrain);
                self.tiles
                    .insert(coord, HexTile::new(coord, tile_terrain, hex_size));
            }
        }

        tracing::debug!(
            radius,
            tiles = report.total(),
            grassland = report.grassland,
            desert = report.desert,
            mountain = report.mountain,
            water = report.water,
            "generated hex grid"
        );
        report
    }

    /// Link every tile to the adjacent tiles present in the grid.
    ///
    /// Neighbors are recorded in [`HexDirection`] order; tiles on the map
    /// edge get fewer than six.
    pub fn assign_neighbors(&mut self) {
        let links: Vec<(HexCoord, Vec<HexCoord>)> = self
            .tiles
            .keys()
            .map(|coord| {
                let present = coord
                    .neighbors()
                    .into_iter()
                    .filter(|n| self.tiles.contains_key(n))
                    .collect();
                (*coord, present)
            })
            .collect();

        for (coord, neighbors) in links {
            tracing::trace!(%coord, count = neighbors.len(), "assigned neighbors");
            if let Some(tile) = self.tiles.get_mut(&coord) {
                tile.set_neighbors(neighbors);
            }
        }
        self.linked = true;
    }

    /// Have neighbors been assigned since the last generation?
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Settings this grid was built from.
    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Configured radius.
    pub fn radius(&self) -> u32 {
        self.settings.radius
    }

    /// Configured hex size in world units.
    pub fn hex_size(&self) -> f32 {
        self.settings.hex_size
    }

    /// Get a tile at the given coordinate.
    pub fn get(&self, coord: &HexCoord) -> Option<&HexTile> {
        self.tiles.get(coord)
    }

    pub(crate) fn get_mut(&mut self, coord: &HexCoord) -> Option<&mut HexTile> {
        self.tiles.get_mut(coord)
    }

    /// Check if the grid has a tile at `coord`.
    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.tiles.contains_key(coord)
    }

    /// Count total tiles in the grid.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the grid has no tiles (not generated yet).
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over all tiles in arbitrary order.
    pub fn tiles(&self) -> impl Iterator<Item = &HexTile> {
        self.tiles.values()
    }

    /// All coordinates in row-major order.
    pub fn sorted_coords(&self) -> Vec<HexCoord> {
        let mut coords: Vec<HexCoord> = self.tiles.keys().copied().collect();
        coords.sort();
        coords
    }

    /// Tiles adjacent to `coord`, as linked by [`assign_neighbors`](Self::assign_neighbors).
    pub fn neighbors_of(&self, coord: &HexCoord) -> Vec<&HexTile> {
        self.get(coord)
            .map(|tile| {
                tile.neighbors()
                    .iter()
                    .filter_map(|n| self.tiles.get(n))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Nearest tile to a world position by scanning every tile.
    ///
    /// Always returns a tile for a non-empty grid, even for positions far
    /// off the map.
    pub fn hex_tile_at_location(&self, pos: WorldPos) -> Option<&HexTile> {
        self.tiles.values().min_by(|a, b| {
            a.world_pos()
                .distance_squared(&pos)
                .total_cmp(&b.world_pos().distance_squared(&pos))
        })
    }

    /// The tile whose hexagon contains a world position, via cube rounding.
    ///
    /// Returns `None` for positions outside the map.
    pub fn tile_at_location_indexed(&self, pos: WorldPos) -> Option<&HexTile> {
        self.tiles
            .get(&HexCoord::from_world(pos, self.settings.hex_size))
    }

    /// Change a tile's terrain. Returns the appearance the renderer should
    /// re-apply.
    pub fn set_terrain(&mut self, coord: HexCoord, terrain: Terrain) -> Result<Appearance, GridError> {
        let tile = self
            .tiles
            .get_mut(&coord)
            .ok_or(GridError::UnknownTile(coord))?;
        let appearance = tile.set_terrain(terrain);
        self.push_update(coord, appearance);
        Ok(appearance)
    }

    /// Change a tile's owner.
    pub fn set_owner(&mut self, coord: HexCoord, owner: TileOwner) -> Result<(), GridError> {
        self.tiles
            .get_mut(&coord)
            .ok_or(GridError::UnknownTile(coord))?
            .set_owner(owner);
        Ok(())
    }

    /// Record a unit standing on a tile. Returns `false` if it was already there.
    pub fn add_occupant(&mut self, coord: HexCoord, unit: UnitId) -> Result<bool, GridError> {
        Ok(self
            .tiles
            .get_mut(&coord)
            .ok_or(GridError::UnknownTile(coord))?
            .add_occupant(unit))
    }

    /// Remove a unit from a tile. Returns `false` if it was not there.
    pub fn remove_occupant(&mut self, coord: HexCoord, unit: UnitId) -> Result<bool, GridError> {
        Ok(self
            .tiles
            .get_mut(&coord)
            .ok_or(GridError::UnknownTile(coord))?
            .remove_occupant(unit))
    }

    /// Move a unit between tiles.
    pub fn move_occupant(
        &mut self,
        unit: UnitId,
        from: HexCoord,
        to: HexCoord,
    ) -> Result<(), GridError> {
        if !self.contains(&to) {
            return Err(GridError::UnknownTile(to));
        }
        self.remove_occupant(from, unit)?;
        self.add_occupant(to, unit)?;
        Ok(())
    }

    /// Claim the tile under `pos` for the player unless it is water.
    ///
    /// Returns the claimed coordinate, or `None` when the position is off the
    /// map or over water.
    pub fn set_hex_owner_to_player_if_standing(&mut self, pos: WorldPos) -> Option<HexCoord> {
        let coord = self.tile_at_location_indexed(pos)?.coord();
        let tile = self.tiles.get_mut(&coord)?;
        if tile.terrain().is_water() {
            tracing::debug!(%coord, "not claiming water tile");
            return None;
        }
        tile.set_owner(TileOwner::Player);
        Some(coord)
    }

    /// Coordinates of every tile held by `owner`, in row-major order.
    pub fn owned_tiles(&self, owner: TileOwner) -> Vec<HexCoord> {
        let mut coords: Vec<HexCoord> = self
            .tiles
            .values()
            .filter(|t| t.owner() == owner)
            .map(|t| t.coord())
            .collect();
        coords.sort();
        coords
    }

    /// Change the hex size and re-derive every tile's world position.
    pub fn rescale(&mut self, hex_size: f32) -> Result<(), GridError> {
        if !hex_size.is_finite() || hex_size <= 0.0 {
            return Err(SettingsError::InvalidHexSize(hex_size).into());
        }
        self.settings.hex_size = hex_size;
        for tile in self.tiles.values_mut() {
            tile.recalculate_world_pos(hex_size);
        }
        Ok(())
    }

    /// Take all queued visual updates, oldest first.
    pub fn drain_visual_updates(&mut self) -> Vec<VisualUpdate> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn push_update(&mut self, coord: HexCoord, appearance: Appearance) {
        self.pending.push(VisualUpdate { coord, appearance });
    }

    /// Which side of `from` faces `to`, when both exist and are adjacent.
    pub fn shared_edge(&self, from: &HexCoord, to: &HexCoord) -> Option<HexDirection> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        from.direction_to(to)
    }
}
