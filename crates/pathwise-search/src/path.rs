use std::collections::HashMap;

use crate::pathfinder::Record;

/// A route found by the [`Pathfinder`](crate::Pathfinder).
///
/// `steps` runs from the vertex right after the origin up to and including
/// the goal that was reached. The origin itself is not part of the path, so
/// a search whose origin is one of its goals yields an empty path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<V> {
    steps: Vec<V>,
    cost: f32,
}

impl<V> Path<V> {
    /// Vertices to visit, in travel order.
    #[inline]
    pub fn steps(&self) -> &[V] {
        &self.steps
    }

    /// Sum of edge costs from the origin to the goal.
    #[inline]
    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Number of steps (edges) in the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the origin already was a goal.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The vertex adjacent to the origin.
    #[inline]
    pub fn first(&self) -> Option<&V> {
        self.steps.first()
    }

    /// The goal that was reached, or `None` for an empty path.
    #[inline]
    pub fn goal(&self) -> Option<&V> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.steps.iter()
    }

    pub fn into_steps(self) -> Vec<V> {
        self.steps
    }
}

impl<V> IntoIterator for Path<V> {
    type Item = V;
    type IntoIter = std::vec::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Path<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Walk parent links from `found` (where the origin was matched) back to a
/// seeding goal.
///
/// Because the search runs in reverse, following parents from the origin
/// already yields the steps in travel order.
pub(crate) fn retrace<V: Clone>(records: &HashMap<usize, Record<V>>, found: usize) -> Path<V> {
    let Some(origin) = records.get(&found) else {
        return Path {
            steps: Vec::new(),
            cost: 0.0,
        };
    };

    let mut steps = Vec::new();
    let mut next = origin.parent;
    while let Some(idx) = next {
        let Some(rec) = records.get(&idx) else {
            break;
        };
        steps.push(rec.vertex.clone());
        next = rec.parent;
    }

    Path {
        steps,
        cost: origin.cost,
    }
}
