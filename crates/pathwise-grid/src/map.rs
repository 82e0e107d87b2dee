//! Obstacle maps with per-tile entry costs.

use std::fmt;

use pathwise_core::{Point, Range};

use crate::error::GridError;

/// Cost of entering an ordinary walkable tile.
pub const DEFAULT_COST: f32 = 1.0;

/// A rectangular map of walkable and blocked tiles.
///
/// Walkable tiles carry the cost of stepping onto them. Positions are
/// `(x, y)` with `0 <= x < width` and `0 <= y < height`.
///
/// Deserialized maps go through the same checks as [`GridMap::new`] and
/// [`GridMap::set_cost`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGridMap")
)]
pub struct GridMap {
    range: Range,
    /// Entry cost per tile in row-major order; `None` means blocked.
    tiles: Vec<Option<f32>>,
}

impl GridMap {
    /// An open map where every tile costs [`DEFAULT_COST`].
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::Empty);
        }
        let range = Range::sized(width, height);
        Ok(Self {
            range,
            tiles: vec![Some(DEFAULT_COST); range.len()],
        })
    }

    /// Build a map from rows of integers: `0` is walkable, anything else is
    /// blocked. `rows[y][x]` describes position `(x, y)`.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut map = Self::new(width as i32, height as i32)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &v) in row.iter().enumerate() {
                if v != 0 {
                    map.set_blocked(Point::new(x as i32, y as i32))?;
                }
            }
        }
        Ok(map)
    }

    /// Parse a map picture: `.` is walkable, `#` is blocked, one line per
    /// row.
    ///
    /// Leading and trailing whitespace of the whole picture is ignored, as
    /// is whitespace at the start of each line, so pictures can be indented
    /// in source code.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim_start).collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        let mut map = Self::new(width as i32, lines.len() as i32)?;
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    '.' => {}
                    '#' => map.set_blocked(pos)?,
                    _ => return Err(GridError::InvalidTile { ch, pos }),
                }
            }
        }
        Ok(map)
    }

    /// The map bounds.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.range.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.range.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range.contains(p)
    }

    /// Entry cost of `p`, or `None` if it is blocked or out of bounds.
    #[inline]
    pub fn cost(&self, p: Point) -> Option<f32> {
        self.tiles[self.range.index_of(p)?]
    }

    /// Whether `p` is inside the map and not blocked.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.cost(p).is_some()
    }

    pub fn set_blocked(&mut self, p: Point) -> Result<(), GridError> {
        let idx = self.range.index_of(p).ok_or(GridError::OutOfBounds(p))?;
        self.tiles[idx] = None;
        Ok(())
    }

    /// Make `p` walkable with entry cost `cost`.
    pub fn set_cost(&mut self, p: Point, cost: f32) -> Result<(), GridError> {
        let idx = self.range.index_of(p).ok_or(GridError::OutOfBounds(p))?;
        if !cost.is_finite() || cost < 0.0 {
            return Err(GridError::InvalidCost { pos: p, cost });
        }
        self.tiles[idx] = Some(cost);
        Ok(())
    }

    /// Cheapest entry cost over all walkable tiles, or `None` if every tile
    /// is blocked.
    pub fn min_cost(&self) -> Option<f32> {
        self.tiles.iter().flatten().copied().reduce(f32::min)
    }
}

/// Unchecked serialized form of [`GridMap`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGridMap {
    range: Range,
    tiles: Vec<Option<f32>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGridMap> for GridMap {
    type Error = GridError;

    fn try_from(raw: RawGridMap) -> Result<Self, GridError> {
        let RawGridMap { range, tiles } = raw;
        if range.min != Point::ZERO {
            return Err(GridError::InvalidRange(range));
        }
        let mut map = Self::new(range.width(), range.height())?;
        if tiles.len() != range.len() {
            return Err(GridError::TileCount {
                expected: range.len(),
                found: tiles.len(),
            });
        }
        let width = range.width() as usize;
        for (idx, tile) in tiles.into_iter().enumerate() {
            let pos = Point::new((idx % width) as i32, (idx / width) as i32);
            match tile {
                Some(cost) => map.set_cost(pos, cost)?,
                None => map.set_blocked(pos)?,
            }
        }
        Ok(map)
    }
}

impl fmt::Display for GridMap {
    /// Renders the map picture accepted by [`GridMap::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width() {
                let ch = if self.is_walkable(Point::new(x, y)) { '.' } else { '#' };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
