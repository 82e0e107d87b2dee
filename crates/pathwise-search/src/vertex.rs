/// The capability a graph node type needs to take part in a search.
///
/// Vertices are immutable descriptors. The [`Pathfinder`](crate::Pathfinder)
/// keeps all per-search state (parent links, cumulative cost, heuristic) in
/// its own tables keyed by [`index`](Self::index), so the same vertex value
/// can be handed to any number of searches.
///
/// Searches run from the goals back toward the origin. For directed graphs
/// this means [`neighbors`](Self::neighbors) must produce the vertices from
/// which `self` can be *entered*; for undirected graphs the distinction does
/// not matter.
pub trait Vertex: Clone {
    /// Stable, collision-free identifier within the search space.
    ///
    /// Two vertices are the same vertex iff their indices are equal. Types
    /// that also implement `PartialEq`/`Hash` must keep them consistent with
    /// the index.
    fn index(&self) -> usize;

    /// Append every vertex one step away from `self` into `buf`.
    ///
    /// The caller clears `buf` before calling. The set must be finite.
    fn neighbors(&self, buf: &mut Vec<Self>);

    /// Cost of moving from `self` to the adjacent vertex `to`. Must be >= 0.
    fn travel_cost(&self, to: &Self) -> f32;

    /// Heuristic estimate of the cost from `self` to `to`.
    ///
    /// Must never overestimate the true cost for
    /// [`Scoring::CostPlusHeuristic`](crate::Scoring::CostPlusHeuristic) to
    /// return optimal paths.
    fn distance(&self, to: &Self) -> f32;

    /// Index equality.
    #[inline]
    fn same_vertex(&self, other: &Self) -> bool {
        self.index() == other.index()
    }
}
