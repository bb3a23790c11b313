//! Axial hex coordinate system for the tactical grid.
//!
//! Coordinates are stored as `(q, r)` with the third cube component derived as
//! `s = -q - r`, so `q + r + s == 0` holds for every value of the type.
//! World projection is flat-top: `x = size * 3/2 * q`, `y = size * sqrt(3) * (r + q/2)`.

use crate::types::WorldPos;
use serde::{Deserialize, Serialize};

/// Axial offsets of the six neighbors, indexed by [`HexDirection`].
///
/// Every component that needs a direction index (neighbor linking, boundary
/// edges, edge geometry) reads this one table.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

const SQRT_3: f32 = 1.732_050_8;

/// Number of hexes within `radius` steps of a center, `3r² + 3r + 1`.
///
/// Saturates at `usize::MAX` instead of overflowing.
pub fn hex_count(radius: u32) -> usize {
    let r = radius as usize;
    r.saturating_mul(r)
        .saturating_add(r)
        .saturating_mul(3)
        .saturating_add(1)
}

// Upper bound on preallocation; larger areas grow on demand
const CAPACITY_HINT_LIMIT: usize = 1 << 16;

/// One of the six sides of a hex, in the order of [`NEIGHBOR_OFFSETS`].
///
/// With the flat-top projection the order runs clockwise on screen, starting
/// from the side facing +30 degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HexDirection {
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
    North,
}

impl HexDirection {
    /// All six directions in table order.
    pub const fn all() -> [HexDirection; 6] {
        [
            HexDirection::NorthEast,
            HexDirection::SouthEast,
            HexDirection::South,
            HexDirection::SouthWest,
            HexDirection::NorthWest,
            HexDirection::North,
        ]
    }

    /// Index into [`NEIGHBOR_OFFSETS`] (0-5).
    pub const fn index(&self) -> usize {
        match self {
            HexDirection::NorthEast => 0,
            HexDirection::SouthEast => 1,
            HexDirection::South => 2,
            HexDirection::SouthWest => 3,
            HexDirection::NorthWest => 4,
            HexDirection::North => 5,
        }
    }

    /// Direction for an edge index, if it is in range.
    pub const fn from_index(index: usize) -> Option<HexDirection> {
        match index {
            0 => Some(HexDirection::NorthEast),
            1 => Some(HexDirection::SouthEast),
            2 => Some(HexDirection::South),
            3 => Some(HexDirection::SouthWest),
            4 => Some(HexDirection::NorthWest),
            5 => Some(HexDirection::North),
            _ => None,
        }
    }

    /// Axial offset for this direction.
    pub const fn offset(&self) -> (i32, i32) {
        NEIGHBOR_OFFSETS[self.index()]
    }

    /// The direction pointing back across the same edge.
    pub const fn opposite(&self) -> HexDirection {
        match self {
            HexDirection::NorthEast => HexDirection::SouthWest,
            HexDirection::SouthEast => HexDirection::NorthWest,
            HexDirection::South => HexDirection::North,
            HexDirection::SouthWest => HexDirection::NorthEast,
            HexDirection::NorthWest => HexDirection::SouthEast,
            HexDirection::North => HexDirection::South,
        }
    }
}

/// Axial hex coordinate.
///
/// Equality and hashing use `(q, r)` only; `s` is always derivable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct HexCoord {
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
}

impl PartialOrd for HexCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Row-major ordering for deterministic iteration
        (self.r, self.q).cmp(&(other.r, other.q))
    }
}

impl HexCoord {
    /// The grid origin `(0, 0, 0)`.
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    /// Create a new axial coordinate.
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Build from a cube triple, rejecting triples where `q + r + s != 0`.
    pub fn from_cube(q: i32, r: i32, s: i32) -> Option<Self> {
        if q + r + s == 0 {
            Some(Self { q, r })
        } else {
            None
        }
    }

    /// The derived third cube component.
    #[inline]
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Cube triple `(q, r, s)`.
    pub const fn to_cube(&self) -> (i32, i32, i32) {
        (self.q, self.r, self.s())
    }

    /// Translate by an axial offset.
    #[inline]
    pub const fn add(&self, offset: (i32, i32)) -> HexCoord {
        HexCoord::new(self.q + offset.0, self.r + offset.1)
    }

    /// The adjacent coordinate across the given side.
    pub const fn neighbor(&self, direction: HexDirection) -> HexCoord {
        self.add(direction.offset())
    }

    /// All 6 adjacent coordinates in [`NEIGHBOR_OFFSETS`] order.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        NEIGHBOR_OFFSETS.map(|offset| self.add(offset))
    }

    /// Which side of `self` faces `other`, if the two are adjacent.
    pub fn direction_to(&self, other: &HexCoord) -> Option<HexDirection> {
        HexDirection::all()
            .into_iter()
            .find(|dir| self.neighbor(*dir) == *other)
    }

    /// Hex distance (number of adjacent steps) to another coordinate.
    pub fn distance(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let dqr = ((self.q + self.r) - (other.q + other.r)).abs();
        ((dq + dr + dqr) / 2) as u32
    }

    /// True when any cube component sits at `radius`, i.e. on the outer ring
    /// of a hexagonal map of that radius.
    pub fn is_on_ring(&self, radius: u32) -> bool {
        let radius = radius as i32;
        self.q.abs() == radius || self.r.abs() == radius || self.s().abs() == radius
    }

    /// All coordinates at most `radius` steps away, including `self`.
    pub fn hexes_in_radius(&self, radius: u32) -> Vec<HexCoord> {
        let n = radius as i32;
        let mut result = Vec::with_capacity(hex_count(radius).min(CAPACITY_HINT_LIMIT));
        for dq in -n..=n {
            for dr in (-n).max(-dq - n)..=n.min(-dq + n) {
                result.push(self.add((dq, dr)));
            }
        }
        result
    }

    /// Coordinates at exactly `radius` steps.
    pub fn ring(&self, radius: u32) -> Vec<HexCoord> {
        if radius == 0 {
            return vec![*self];
        }

        // Walk from the North-West corner around the six sides
        let start = HexDirection::NorthWest.offset();
        let n = radius as i32;
        let mut current = self.add((start.0 * n, start.1 * n));
        let mut result = Vec::with_capacity(6 * radius as usize);
        for direction in HexDirection::all() {
            for _ in 0..radius {
                result.push(current);
                current = current.neighbor(direction);
            }
        }
        result
    }

    /// Center of this hex in world space for the given hex size.
    pub fn to_world(&self, size: f32) -> WorldPos {
        let q = self.q as f32;
        let r = self.r as f32;
        WorldPos::new(size * (1.5 * q), size * (SQRT_3 * (r + q / 2.0)))
    }

    /// The hex whose area contains `pos`.
    ///
    /// Inverts the projection to fractional axial coordinates and rounds in
    /// cube space, fixing up the component with the largest rounding error.
    pub fn from_world(pos: WorldPos, size: f32) -> HexCoord {
        let fq = (2.0 / 3.0 * pos.x) / size;
        let fr = (pos.y / SQRT_3 - pos.x / 3.0) / size;
        let fs = -fq - fr;

        let mut q = fq.round();
        let mut r = fr.round();
        let s = fs.round();

        let dq = (q - fq).abs();
        let dr = (r - fr).abs();
        let ds = (s - fs).abs();

        if dq > dr && dq > ds {
            q = -r - s;
        } else if dr > ds {
            r = -q - s;
        }

        HexCoord::new(q as i32, r as i32)
    }

    /// World position of corner `index` (0-5) of a hex centered at `center`.
    ///
    /// Corner `i` sits at angle `60 * i` degrees from the center.
    pub fn corner(center: WorldPos, size: f32, index: usize) -> WorldPos {
        let angle = std::f32::consts::FRAC_PI_3 * (index % 6) as f32;
        WorldPos::new(center.x + size * angle.cos(), center.y + size * angle.sin())
    }

    /// The two world-space endpoints of the side facing `direction`.
    pub fn edge_endpoints(&self, direction: HexDirection, size: f32) -> (WorldPos, WorldPos) {
        let center = self.to_world(size);
        // Side i faces 30 - 60i degrees and spans corners -i and 1 - i
        let first = (6 - direction.index()) % 6;
        (
            Self::corner(center, size, first),
            Self::corner(center, size, first + 1),
        )
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s())
    }
}
