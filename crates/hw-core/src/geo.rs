//! Grid geometry: integer cells, floating draw positions and cardinal
//! rotations.
//!
//! The world is a flat grid of square cells addressed by `(x, z)`.  Agents
//! occupy whole cells for logic but carry a `Vec3` draw position that moves
//! smoothly between cells; a mounted vehicle derives its own position from
//! that draw position every tick.
//!
//! Cardinal rotations are resolved exactly with integer/sign arithmetic so
//! offset arithmetic never accumulates float error across runs.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ── Cell ─────────────────────────────────────────────────────────────────────

/// An integer grid coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    /// Sentinel for "no cell".  Never in bounds of any map.
    pub const INVALID: Cell = Cell { x: i32::MIN, z: i32::MIN };

    /// Offsets of the eight surrounding cells, clockwise from north.
    pub const ADJACENT_8: [(i32, i32); 8] = [
        (0, 1),
        (1, 1),
        (1, 0),
        (1, -1),
        (0, -1),
        (-1, -1),
        (-1, 0),
        (-1, 1),
    ];

    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Cell { x, z }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Cell {
        Cell::new(self.x + dx, self.z + dz)
    }

    /// Chebyshev (king-move) distance.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// Squared euclidean distance, exact in integers.
    #[inline]
    pub fn distance_sq(self, other: Cell) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dz = (self.z - other.z) as i64;
        dx * dx + dz * dz
    }

    /// `true` if `other` is one of the eight cells surrounding `self`.
    /// A cell is not adjacent to itself.
    #[inline]
    pub fn is_adjacent_8way(self, other: Cell) -> bool {
        self.chebyshev(other) == 1
    }

    /// `true` if `other` is `self` or one of its eight neighbours.
    #[inline]
    pub fn is_adjacent_or_inside(self, other: Cell) -> bool {
        self.chebyshev(other) <= 1
    }

    /// The eight surrounding cells, clockwise from north.  Bounds are not
    /// checked.
    pub fn neighbors8(self) -> [Cell; 8] {
        Self::ADJACENT_8.map(|(dx, dz)| self.offset(dx, dz))
    }

    /// Draw-space centre of the cell.
    #[inline]
    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f32 + 0.5, 0.0, self.z as f32 + 0.5)
    }
}

impl Add for Cell {
    type Output = Cell;
    #[inline]
    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl Sub for Cell {
    type Output = Cell;
    #[inline]
    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

// ── Vec3 ─────────────────────────────────────────────────────────────────────

/// A draw-space position.  `y` is altitude and is carried but never used for
/// cell lookup.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    /// The cell containing this point (floor on both axes).
    #[inline]
    pub fn to_cell(self) -> Cell {
        Cell::new(self.x.floor() as i32, self.z.floor() as i32)
    }

    /// Rotate about the vertical axis by a cardinal rotation, clockwise.
    pub fn rotated_by(self, rot: Rot4) -> Vec3 {
        match rot {
            Rot4::North => self,
            Rot4::East => Vec3::new(self.z, self.y, -self.x),
            Rot4::South => Vec3::new(-self.x, self.y, -self.z),
            Rot4::West => Vec3::new(-self.z, self.y, self.x),
        }
    }

    /// Linear interpolation; `t` is clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(self, to: Vec3, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        self + (to - self) * t
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// ── Rot4 ─────────────────────────────────────────────────────────────────────

/// One of the four cardinal facings.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rot4 {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rot4 {
    /// Clockwise angle from north in degrees.
    pub fn as_angle(self) -> f32 {
        match self {
            Rot4::North => 0.0,
            Rot4::East => 90.0,
            Rot4::South => 180.0,
            Rot4::West => 270.0,
        }
    }

    /// Unit cell step in the facing direction.
    pub fn facing_cell(self) -> Cell {
        match self {
            Rot4::North => Cell::new(0, 1),
            Rot4::East => Cell::new(1, 0),
            Rot4::South => Cell::new(0, -1),
            Rot4::West => Cell::new(-1, 0),
        }
    }

    /// Facing for a step of `(dx, dz)`; the dominant axis wins, ties go to
    /// the horizontal axis.  `None` for a zero step.
    pub fn from_delta(dx: i32, dz: i32) -> Option<Rot4> {
        if dx == 0 && dz == 0 {
            return None;
        }
        Some(if dx.abs() >= dz.abs() {
            if dx > 0 { Rot4::East } else { Rot4::West }
        } else if dz > 0 {
            Rot4::North
        } else {
            Rot4::South
        })
    }
}
