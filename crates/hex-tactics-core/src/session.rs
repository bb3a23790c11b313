//! A tactical encounter: one grid, a turn order and the tracked player.
//!
//! The session owns every piece and passes the grid to whatever needs it, so
//! no collaborator ever has to find the grid on its own.

use crate::grid::{GridError, HexGrid};
use crate::hex::HexCoord;
use crate::movement::MovementRange;
use crate::settings::GridSettings;
use crate::turn::{Participant, TurnEvent, TurnSequencer};
use crate::types::{UnitId, WorldPos};

/// Unit id of the player in a session built by [`TacticalSession::new`].
pub const PLAYER_UNIT: UnitId = 0;

/// Movement range of the player in a session built by [`TacticalSession::new`].
pub const DEFAULT_MOVEMENT_RANGE: u32 = 2;

/// Follows the player across the grid and lifts fog when they change tile.
#[derive(Clone, Debug, Default)]
pub struct PlayerTracker {
    current: Option<HexCoord>,
}

impl PlayerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile the player was last seen on.
    pub fn current_tile(&self) -> Option<HexCoord> {
        self.current
    }

    /// Resolve the tile under `pos` and reveal around it if it is a new tile.
    ///
    /// Returns the tile just entered, or `None` when the player is still on
    /// the same tile or off the map.
    pub fn update(&mut self, grid: &mut HexGrid, pos: WorldPos) -> Option<HexCoord> {
        let coord = grid.tile_at_location_indexed(pos)?.coord();
        if self.current == Some(coord) {
            return None;
        }

        tracing::debug!(from = ?self.current, to = %coord, "player changed tile");
        self.current = Some(coord);
        grid.reveal_hex_and_neighbors(coord);
        Some(coord)
    }
}

/// Grid, turn order and player tracking wired together.
#[derive(Clone, Debug)]
pub struct TacticalSession {
    grid: HexGrid,
    turns: TurnSequencer,
    tracker: PlayerTracker,
    player: UnitId,
}

impl TacticalSession {
    /// Generate a grid from `settings` with the player as the only participant.
    pub fn new(settings: GridSettings) -> Result<Self, GridError> {
        let grid = HexGrid::generate(settings)?;
        Ok(Self::with_grid(
            grid,
            vec![Participant::new(PLAYER_UNIT, DEFAULT_MOVEMENT_RANGE)],
        ))
    }

    /// Use an existing grid. The first participant is the tracked player.
    pub fn with_grid(grid: HexGrid, participants: Vec<Participant>) -> Self {
        let player = participants.first().map_or(PLAYER_UNIT, |p| p.unit);
        Self {
            grid,
            turns: TurnSequencer::new(participants),
            tracker: PlayerTracker::new(),
            player,
        }
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// Mutable grid access, for terrain edits and draining visual updates.
    pub fn grid_mut(&mut self) -> &mut HexGrid {
        &mut self.grid
    }

    pub fn turns(&self) -> &TurnSequencer {
        &self.turns
    }

    pub fn player(&self) -> UnitId {
        self.player
    }

    /// Tile the player stands on, once they have been placed.
    pub fn player_tile(&self) -> Option<HexCoord> {
        self.tracker.current_tile()
    }

    /// Start the first turn.
    pub fn start(&mut self) -> Vec<TurnEvent> {
        self.turns.start_turn()
    }

    /// Report the player's world position.
    ///
    /// Entering a new tile reveals the area around it and moves the player's
    /// occupancy there. The tile under the player is then claimed unless it
    /// is water. Returns the tile entered, if it changed.
    pub fn move_player(&mut self, pos: WorldPos) -> Option<HexCoord> {
        let previous = self.tracker.current_tile();
        let entered = self.tracker.update(&mut self.grid, pos);

        if let Some(coord) = entered {
            let moved = match previous {
                Some(from) => self.grid.move_occupant(self.player, from, coord),
                None => self.grid.add_occupant(coord, self.player).map(|_| ()),
            };
            if let Err(err) = moved {
                tracing::warn!(%err, unit = self.player, "failed to move player occupancy");
            }
        }

        self.grid.set_hex_owner_to_player_if_standing(pos);
        entered
    }

    /// Highlight where the current participant may move from the player's tile.
    ///
    /// Returns an empty range when the player has not been placed or the turn
    /// order is empty.
    pub fn show_current_movement(&mut self) -> MovementRange {
        let range = self.turns.current().map(|p| p.movement_range);
        match (self.tracker.current_tile(), range) {
            (Some(start), Some(range)) => self.grid.show_movement_range(start, range),
            _ => {
                self.grid.clear_movement_range();
                MovementRange::default()
            }
        }
    }

    /// Clear the movement highlight and pass the turn on.
    pub fn end_turn(&mut self) -> Vec<TurnEvent> {
        self.grid.clear_movement_range();
        self.turns.end_turn()
    }
}
