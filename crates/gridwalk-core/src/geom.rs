//! Geometry primitives: [`Position`] and [`Dims`].
//!
//! Grids are addressed the way they are generated: `x` selects the row and
//! `y` the column, and node storage is row-major.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// An integer grid coordinate. Equality is by value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a position shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four orthogonal neighbours in traversal order: +x, +y, -x, -y.
    ///
    /// Breadth-first tie-breaking depends on this order.
    #[inline]
    pub const fn neighbors_4(self) -> [Position; 4] {
        [
            self.shift(1, 0),
            self.shift(0, 1),
            self.shift(-1, 0),
            self.shift(0, -1),
        ]
    }

    /// Manhattan (L1) distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Dims
// ---------------------------------------------------------------------------

/// Grid dimensions: `rows` along x, `cols` along y.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub rows: i32,
    pub cols: i32,
}

impl Dims {
    /// Create new dimensions.
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Number of cells. Zero if either side is non-positive.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.rows as usize) * (self.cols as usize)
        }
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(self, p: Position) -> bool {
        p.x >= 0 && p.x < self.rows && p.y >= 0 && p.y < self.cols
    }

    /// Row-major index of `p`, or `None` if it is outside the grid.
    #[inline]
    pub fn index(self, p: Position) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.x as usize * self.cols as usize + p.y as usize)
    }

    /// Position of the row-major index `i`. `i` must be below [`len`](Self::len).
    #[inline]
    pub fn position(self, i: usize) -> Position {
        let cols = self.cols.max(1) as usize;
        Position::new((i / cols) as i32, (i % cols) as i32)
    }

    /// All positions in row-major (generation) order.
    pub fn iter(self) -> impl Iterator<Item = Position> {
        let rows = self.rows.max(0);
        let cols = self.cols.max(0);
        (0..rows).flat_map(move |x| (0..cols).map(move |y| Position::new(x, y)))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbour_order() {
        let p = Position::new(2, 3);
        assert_eq!(
            p.neighbors_4(),
            [
                Position::new(3, 3),
                Position::new(2, 4),
                Position::new(1, 3),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Position::new(0, 0).manhattan(Position::new(3, -4)), 7);
        assert_eq!(Position::new(5, 5).manhattan(Position::new(5, 5)), 0);
    }

    #[test]
    fn index_round_trip() {
        let d = Dims::new(3, 4);
        assert_eq!(d.len(), 12);
        for (i, p) in d.iter().enumerate() {
            assert_eq!(d.index(p), Some(i));
            assert_eq!(d.position(i), p);
        }
    }

    #[test]
    fn outside_positions() {
        let d = Dims::new(2, 5);
        assert_eq!(d.index(Position::new(2, 0)), None);
        assert_eq!(d.index(Position::new(0, 5)), None);
        assert_eq!(d.index(Position::new(-1, 0)), None);
        assert_eq!(d.index(Position::new(1, 4)), Some(9));
    }

    #[test]
    fn empty_dims() {
        assert!(Dims::new(0, 4).is_empty());
        assert_eq!(Dims::new(-1, 4).len(), 0);
        assert_eq!(Dims::new(0, 4).iter().count(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn position_json_shape() {
        let json = serde_json::to_string(&Position::new(1, 2)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2}"#);
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Position::new(1, 2));
    }
}
