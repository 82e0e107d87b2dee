use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// A real-valued priority weight with a total order.
///
/// Frontier entries are keyed by `Weight`, so it must be `Ord`; ordering
/// follows [`f32::total_cmp`].
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weight(pub f32);

impl Weight {
    pub const ZERO: Self = Self(0.0);

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl PartialEq for Weight {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Weight {}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Weight {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl From<f32> for Weight {
    #[inline]
    fn from(v: f32) -> Self {
        Self(v)
    }
}

impl From<Weight> for f32 {
    #[inline]
    fn from(w: Weight) -> Self {
        w.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How a frontier vertex's priority weight is derived.
///
/// The strategy is fixed for one search call and applies to every vertex
/// that search discovers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scoring {
    /// `cost + heuristic`. Optimal with an admissible, consistent heuristic.
    #[default]
    CostPlusHeuristic,
    /// `cost` alone. Optimal, but explores without guidance.
    CostOnly,
    /// `heuristic` alone. Greedy; fast but not guaranteed optimal.
    HeuristicOnly,
}

impl Scoring {
    /// Priority weight of a vertex with cumulative `cost` and `heuristic`.
    #[inline]
    pub fn weight(self, cost: f32, heuristic: f32) -> Weight {
        match self {
            Self::CostPlusHeuristic => Weight(cost + heuristic),
            Self::CostOnly => Weight(cost),
            Self::HeuristicOnly => Weight(heuristic),
        }
    }

    /// Whether searches under this strategy return shortest paths.
    #[inline]
    pub fn is_optimal(self) -> bool {
        !matches!(self, Self::HeuristicOnly)
    }
}
