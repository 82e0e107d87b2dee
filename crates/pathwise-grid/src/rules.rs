use std::ops::RangeInclusive;

use pathwise_core::Point;

use crate::distance::{chebyshev, euclidean, manhattan, octile};
use crate::error::GridError;

/// Cost multiplier for a diagonal step.
pub const DIAGONAL_FACTOR: f32 = 1.4;

/// Accepted diagonal factors. Below 1 two diagonal steps undercut two
/// straight ones; above 2 one diagonal costs more than going around. Either
/// way the octile heuristic overestimates.
pub const DIAGONAL_FACTOR_RANGE: RangeInclusive<f32> = 1.0..=2.0;

/// Distance formula used as the search heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    Manhattan,
    Chebyshev,
    /// Straight steps cost 1, diagonal steps cost the rules' diagonal factor.
    Octile,
    /// Only admissible when the diagonal factor is at least `√2`.
    Euclidean,
}

impl Metric {
    #[inline]
    pub fn measure(self, a: Point, b: Point, diagonal_factor: f32) -> f32 {
        match self {
            Self::Manhattan => manhattan(a, b) as f32,
            Self::Chebyshev => chebyshev(a, b) as f32,
            Self::Octile => octile(a, b, diagonal_factor),
            Self::Euclidean => euclidean(a, b),
        }
    }
}

/// Movement rules for a grid world.
///
/// The default is 4-way movement with the Manhattan heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridRules {
    /// Allow 8-way movement.
    pub diagonal: bool,
    /// Allow a diagonal step past a blocked orthogonal tile. When false, both
    /// tiles sharing an edge with the two endpoints must be walkable.
    pub corner_cutting: bool,
    /// Cost multiplier applied to diagonal steps, within
    /// [`DIAGONAL_FACTOR_RANGE`].
    pub diagonal_factor: f32,
    /// Heuristic override; `None` picks Manhattan for 4-way and octile for
    /// 8-way movement.
    pub metric: Option<Metric>,
}

impl Default for GridRules {
    fn default() -> Self {
        Self {
            diagonal: false,
            corner_cutting: false,
            diagonal_factor: DIAGONAL_FACTOR,
            metric: None,
        }
    }
}

impl GridRules {
    /// 4-way movement.
    pub fn cardinal() -> Self {
        Self::default()
    }

    /// 8-way movement without corner cutting.
    pub fn diagonal() -> Self {
        Self {
            diagonal: true,
            ..Self::default()
        }
    }

    pub fn with_corner_cutting(mut self, allow: bool) -> Self {
        self.corner_cutting = allow;
        self
    }

    /// Set the diagonal step factor. It must lie in
    /// [`DIAGONAL_FACTOR_RANGE`], which [`validate`](Self::validate) and
    /// [`GridWorld::new`](crate::GridWorld::new) check.
    pub fn with_diagonal_factor(mut self, factor: f32) -> Self {
        self.diagonal_factor = factor;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// The heuristic in effect.
    pub fn metric(&self) -> Metric {
        match self.metric {
            Some(m) => m,
            None if self.diagonal => Metric::Octile,
            None => Metric::Manhattan,
        }
    }

    /// Check that every step cost and heuristic derived from these rules is
    /// non-negative and admissible.
    pub fn validate(&self) -> Result<(), GridError> {
        if !DIAGONAL_FACTOR_RANGE.contains(&self.diagonal_factor) {
            return Err(GridError::InvalidDiagonalFactor(self.diagonal_factor));
        }
        Ok(())
    }

    /// Heuristic distance between two positions under these rules.
    #[inline]
    pub fn estimate(&self, a: Point, b: Point) -> f32 {
        self.metric().measure(a, b, self.diagonal_factor)
    }
}
