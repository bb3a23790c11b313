//! Hex Tactics Core Library
//!
//! This crate contains the tactical hex-grid layer of a turn-based game:
//! axial-coordinate grid generation, neighbor adjacency, fog of war, short
//! range movement with terrain costs, and the boundary edges a renderer needs
//! to outline highlighted areas.
//!
//! # Design Principles
//!
//! - **No engine dependencies**: Rendering, input and AI sit outside this crate
//!   and talk to it through coordinates and [`VisualUpdate`]s
//! - **Deterministic**: Same settings and seed always produce the same map
//! - **Serializable**: Settings, tiles and updates can be saved/loaded via serde
//! - **Defensive queries**: Unknown tiles yield empty results, never panics

// Core modules
pub mod hex;
pub mod terrain;
pub mod types;

// Grid state
pub mod grid;
pub mod settings;
pub mod tile;

// Map generation
pub mod mapgen;

// Movement and fog of war
pub mod movement;
pub mod visibility;

// Turn flow
pub mod session;
pub mod turn;

// Re-exports for convenience
pub use grid::{GenerationReport, GridError, HexGrid, VisualUpdate};
pub use hex::{hex_count, HexCoord, HexDirection, NEIGHBOR_OFFSETS};
pub use mapgen::{TerrainGenerator, TerrainSource, UniformTerrain};
pub use movement::{
    movement_boundary_edges, movement_boundary_tiles, neighbors_in_range, valid_movement_tiles,
    BoundaryEdge, MovementRange,
};
pub use session::{PlayerTracker, TacticalSession};
pub use settings::{GridSettings, SettingsError, TerrainSettings};
pub use terrain::Terrain;
pub use tile::{Appearance, HexTile};
pub use turn::{Participant, TurnEvent, TurnEventKind, TurnPhase, TurnSequencer};
pub use types::*;
