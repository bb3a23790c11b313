//! Movement range and boundary outline tests.
//!
//! These tests cover:
//! - Zero and one step ranges
//! - Impassable water anywhere in range
//! - The two-step stepping-stone rule
//! - Boundary edges for single tiles, regions and the map edge
//! - Highlight state and the visual update queue

use hex_tactics_core::{
    grid::HexGrid,
    hex::{HexCoord, HexDirection},
    mapgen::UniformTerrain,
    movement::{movement_boundary_edges, neighbors_in_range, valid_movement_tiles, BoundaryEdge},
    settings::GridSettings,
    terrain::Terrain,
    tile::Appearance,
    types::WorldPos,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

// =============================================================================
// Test Helpers
// =============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Grid where every tile, border included, is grassland.
fn open_grid(radius: u32) -> HexGrid {
    let mut grid = HexGrid::with_terrain(
        GridSettings::new(radius),
        &mut UniformTerrain(Terrain::Grassland),
    )
    .unwrap();
    for coord in grid.sorted_coords() {
        grid.set_terrain(coord, Terrain::Grassland).unwrap();
    }
    grid.drain_visual_updates();
    grid
}

fn coords(list: &[(i32, i32)]) -> HashSet<HexCoord> {
    list.iter().map(|&(q, r)| HexCoord::new(q, r)).collect()
}

// =============================================================================
// Reachability
// =============================================================================

#[test]
fn test_zero_range_is_empty() {
    let grid = open_grid(3);
    assert!(valid_movement_tiles(&grid, HexCoord::ORIGIN, 0).is_empty());
}

#[test]
fn test_range_one_is_direct_neighbors() {
    let grid = open_grid(3);
    let valid = valid_movement_tiles(&grid, HexCoord::ORIGIN, 1);
    assert_eq!(valid.len(), 6);
    assert!(valid.iter().all(|c| c.distance(&HexCoord::ORIGIN) == 1));
}

#[test]
fn test_range_one_at_map_corner() {
    let grid = open_grid(3);
    let corner = HexCoord::new(3, 0);
    let valid = valid_movement_tiles(&grid, corner, 1);
    assert_eq!(valid.len(), 3);
}

#[test]
fn test_start_tile_never_included() {
    let grid = open_grid(3);
    for range in 0..=4 {
        assert!(!valid_movement_tiles(&grid, HexCoord::ORIGIN, range).contains(&HexCoord::ORIGIN));
    }
}

#[test]
fn test_nothing_beyond_two_steps() {
    let grid = open_grid(5);
    let valid = valid_movement_tiles(&grid, HexCoord::ORIGIN, 5);
    assert_eq!(valid.len(), 18);
    assert!(valid.iter().all(|c| c.distance(&HexCoord::ORIGIN) <= 2));

    // The search itself still reaches every tile in range
    assert_eq!(neighbors_in_range(&grid, HexCoord::ORIGIN, 5).len(), 90);
}

#[test]
fn test_water_never_valid() {
    init_tracing();
    let grid = HexGrid::generate(GridSettings::new(6).with_seed(17)).unwrap();
    let coords = grid.sorted_coords();
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..40 {
        let start = *coords.choose(&mut rng).unwrap();
        for range in 0..=3 {
            for coord in valid_movement_tiles(&grid, start, range) {
                let tile = grid.get(&coord).unwrap();
                assert!(tile.is_passable(), "{} from {}", coord, start);
                assert_ne!(tile.terrain(), Terrain::Water);
            }
        }
    }
}

#[test]
fn test_radius_two_scenario_with_water() {
    let mut grid = open_grid(2);
    let lake = HexCoord::new(2, -1);
    grid.set_terrain(lake, Terrain::Water).unwrap();

    let in_range = neighbors_in_range(&grid, HexCoord::ORIGIN, 2);
    assert_eq!(in_range.get(&lake), Some(&2));

    let valid = valid_movement_tiles(&grid, HexCoord::ORIGIN, 2);
    assert!(!valid.contains(&lake));
    assert_eq!(valid.len(), 17);
}

#[test]
fn test_generated_border_blocks_outer_ring() {
    let grid = HexGrid::with_terrain(
        GridSettings::new(2),
        &mut UniformTerrain(Terrain::Grassland),
    )
    .unwrap();
    let valid = valid_movement_tiles(&grid, HexCoord::ORIGIN, 2);
    assert_eq!(valid.len(), 6);
}

#[test]
fn test_mountains_cost_two_steps() {
    let mut grid = open_grid(3);
    for neighbor in HexCoord::ORIGIN.neighbors() {
        grid.set_terrain(neighbor, Terrain::Mountain).unwrap();
    }

    assert!(valid_movement_tiles(&grid, HexCoord::ORIGIN, 1).is_empty());

    // Mountains are affordable with two points, but no cheap tile leads past them
    let valid = valid_movement_tiles(&grid, HexCoord::ORIGIN, 2);
    let ring: HashSet<HexCoord> = HexCoord::ORIGIN.neighbors().into_iter().collect();
    assert_eq!(valid, ring);
}

/// Ring the origin with mountains except for one neighbor of `terrain`, and
/// return the distance-2 tiles reachable with range 2.
fn two_steps_past(terrain: Terrain) -> HashSet<HexCoord> {
    let mut grid = open_grid(3);
    for neighbor in HexCoord::ORIGIN.neighbors() {
        grid.set_terrain(neighbor, Terrain::Mountain).unwrap();
    }
    grid.set_terrain(HexCoord::new(0, -1), terrain).unwrap();

    valid_movement_tiles(&grid, HexCoord::ORIGIN, 2)
        .into_iter()
        .filter(|c| c.distance(&HexCoord::ORIGIN) == 2)
        .collect()
}

#[test]
fn test_single_cheap_neighbor_opens_three_tiles() {
    // (0, -1) touches three distance-2 tiles
    assert_eq!(
        two_steps_past(Terrain::Grassland),
        coords(&[(1, -2), (0, -2), (-1, -1)])
    );
}

#[test]
fn test_desert_is_not_a_stepping_stone() {
    // Desert costs two, so it cannot carry a two-step move
    assert!(two_steps_past(Terrain::Desert).is_empty());
}

#[test]
fn test_unlinked_grid_yields_nothing() {
    let mut grid = HexGrid::new(GridSettings::new(3));
    grid.generate_hex_grid(&mut UniformTerrain(Terrain::Grassland));
    assert!(!grid.is_linked());
    assert!(valid_movement_tiles(&grid, HexCoord::ORIGIN, 2).is_empty());

    grid.assign_neighbors();
    assert_eq!(valid_movement_tiles(&grid, HexCoord::ORIGIN, 1).len(), 6);
}

// =============================================================================
// Boundary Edges
// =============================================================================

#[test]
fn test_single_tile_has_six_edges() {
    let grid = open_grid(2);
    let edges = movement_boundary_edges(&grid, &coords(&[(0, 0)]));
    assert_eq!(edges.len(), 6);
    let directions: Vec<HexDirection> = edges.iter().map(|e| e.direction).collect();
    assert_eq!(directions, HexDirection::all().to_vec());
}

#[test]
fn test_single_tile_on_map_edge_has_six_edges() {
    let grid = open_grid(2);
    // Sides facing off the map still outline the tile
    let edges = movement_boundary_edges(&grid, &coords(&[(2, 0)]));
    assert_eq!(edges.len(), 6);
}

#[test]
fn test_whole_map_outline() {
    let grid = open_grid(2);
    let all: HashSet<HexCoord> = grid.sorted_coords().into_iter().collect();
    let edges = movement_boundary_edges(&grid, &all);
    // Perimeter of a radius-r hexagon: 6 * (2r + 1) sides
    assert_eq!(edges.len(), 30);
    assert!(edges.iter().all(|e| e.coord.is_on_ring(2)));
}

#[test]
fn test_outline_has_no_internal_edges() {
    let grid = open_grid(4);
    let region: HashSet<HexCoord> = HexCoord::ORIGIN.hexes_in_radius(2).into_iter().collect();
    let edges = movement_boundary_edges(&grid, &region);
    assert_eq!(edges.len(), 30);

    for edge in &edges {
        let outside = edge.coord.neighbor(edge.direction);
        assert!(!region.contains(&outside));
    }
}

#[test]
fn test_edges_are_sorted_and_unique() {
    let grid = open_grid(3);
    let valid = valid_movement_tiles(&grid, HexCoord::ORIGIN, 2);
    let edges = movement_boundary_edges(&grid, &valid);
    let mut sorted = edges.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), edges.len());
    assert!(edges.windows(2).all(|w| w[0].coord <= w[1].coord));
}

#[test]
fn test_neighboring_edges_meet() {
    let a = BoundaryEdge {
        coord: HexCoord::ORIGIN,
        direction: HexDirection::North,
    };
    let b = BoundaryEdge {
        coord: HexCoord::new(0, 1),
        direction: HexDirection::South,
    };
    let (a0, a1) = a.endpoints(200.0);
    let (b0, b1) = b.endpoints(200.0);
    let close = |p: WorldPos, q: WorldPos| p.distance(&q) < 1e-2;
    assert!((close(a0, b0) && close(a1, b1)) || (close(a0, b1) && close(a1, b0)));
}

// =============================================================================
// Highlighting
// =============================================================================

#[test]
fn test_show_movement_range_highlights_exactly_valid_tiles() {
    let mut grid = open_grid(3);
    let shown = grid.show_movement_range(HexCoord::ORIGIN, 2);

    let highlighted: HashSet<HexCoord> = grid
        .tiles()
        .filter(|t| t.is_highlighted())
        .map(|t| t.coord())
        .collect();
    assert_eq!(highlighted, shown.tiles);
    assert_eq!(shown.boundary, grid.movement_boundary_edges(&shown.tiles));

    let updates = grid.drain_visual_updates();
    assert_eq!(updates.len(), shown.tiles.len());
    assert!(updates.iter().all(|u| u.appearance == Appearance::Highlighted));
}

#[test]
fn test_show_from_unknown_tile_clears() {
    let mut grid = open_grid(3);
    grid.show_movement_range(HexCoord::ORIGIN, 1);
    let shown = grid.show_movement_range(HexCoord::new(20, 20), 1);
    assert!(shown.is_empty());
    assert!(grid.tiles().all(|t| !t.is_highlighted()));
}

#[test]
fn test_clear_is_idempotent() {
    let mut grid = open_grid(2);
    grid.show_movement_range(HexCoord::ORIGIN, 1);
    grid.clear_movement_range();
    grid.drain_visual_updates();

    grid.clear_movement_range();
    assert!(grid.drain_visual_updates().is_empty());
}
