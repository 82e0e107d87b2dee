use std::fmt;

use pathwise_core::{Point, Range};

/// Errors raised while building a grid world or validating coordinates.
///
/// Search itself never fails with an error; these only guard the boundary
/// where positions become vertices.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The grid would have zero width or height.
    Empty,
    /// A row's width differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A map picture contains a character other than `.` or `#`.
    InvalidTile { ch: char, pos: Point },
    /// A tile cost is negative or not finite.
    InvalidCost { pos: Point, cost: f32 },
    /// A position lies outside the grid.
    OutOfBounds(Point),
    /// A stored map's bounds do not start at the origin.
    InvalidRange(Range),
    /// A stored map holds a different number of tiles than its bounds.
    TileCount { expected: usize, found: usize },
    /// The diagonal step factor lies outside `1.0..=2.0`.
    InvalidDiagonalFactor(f32),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: zero width or height"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} tiles, expected {expected}"
            ),
            Self::InvalidTile { ch, pos } => {
                write!(f, "grid: invalid tile \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::InvalidCost { pos, cost } => {
                write!(f, "grid: invalid cost {cost} at {pos}")
            }
            Self::OutOfBounds(p) => write!(f, "grid: {p} is out of bounds"),
            Self::InvalidRange(r) => {
                write!(f, "grid: range {r} does not start at the origin")
            }
            Self::TileCount { expected, found } => {
                write!(f, "grid: map has {found} tiles, expected {expected}")
            }
            Self::InvalidDiagonalFactor(factor) => {
                write!(f, "grid: diagonal factor {factor} is outside [1, 2]")
            }
        }
    }
}

impl std::error::Error for GridError {}
