use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A cell on the integer grid.
///
/// Positions carry no bounds of their own, whether a position is part of a
/// race is decided by the [`Track`](crate::Track).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// The 8 cells around a position, in the order neighbor queries report them.
pub const NEIGHBOR_OFFSETS_8: [Position; 8] = [
    Position::new(-1, 1),
    Position::new(0, 1),
    Position::new(1, 1),
    Position::new(-1, 0),
    Position::new(1, 0),
    Position::new(-1, -1),
    Position::new(0, -1),
    Position::new(1, -1),
];

/// Left, right, down, up.
pub const NEIGHBOR_OFFSETS_4: [Position; 4] = [
    Position::new(-1, 0),
    Position::new(1, 0),
    Position::new(0, -1),
    Position::new(0, 1),
];

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance, i.e. the number of king moves between two cells.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// `self + rhs`, or `None` if a coordinate leaves the `i32` range.
    pub fn checked_add(self, rhs: Position) -> Option<Position> {
        Some(Position::new(
            self.x.checked_add(rhs.x)?,
            self.y.checked_add(rhs.y)?,
        ))
    }

    /// Is `other` one of the 8 cells surrounding `self`?
    pub fn is_adjacent_to(self, other: Position) -> bool {
        self.chebyshev_distance(other) == 1
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// All cells on the straight line from `a` to `b`, both endpoints included.
///
/// Uses integer-only Bresenham rasterization. The line is always traced from
/// the smaller endpoint (by `x`, then `y`), so `line_between(b, a)` is exactly
/// `line_between(a, b)` reversed.
pub fn line_between(a: Position, b: Position) -> Vec<Position> {
    if b < a {
        let mut line = bresenham(b, a);
        line.reverse();
        line
    } else {
        bresenham(a, b)
    }
}

// The error term is kept in i64, which holds the differences of any two i32.
fn bresenham(from: Position, to: Position) -> Vec<Position> {
    let dx = (i64::from(to.x) - i64::from(from.x)).abs();
    let dy = (i64::from(to.y) - i64::from(from.y)).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx - dy;
    let mut cursor = from;

    let mut cells = Vec::with_capacity(dx.max(dy) as usize + 1);
    loop {
        cells.push(cursor);
        if cursor == to {
            break cells;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            cursor.x += sx;
        }
        if e2 < dx {
            err += dx;
            cursor.y += sy;
        }
    }
}
