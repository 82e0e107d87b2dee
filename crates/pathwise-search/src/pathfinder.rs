use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::keyed::KeyedPriorityQueue;
use crate::path::{Path, retrace};
use crate::scoring::{Scoring, Weight};
use crate::vertex::Vertex;

/// Per-index search state for one vertex.
#[derive(Debug, Clone)]
pub(crate) struct Record<V> {
    pub(crate) vertex: V,
    /// Index of the predecessor on the best known path, `None` for a goal.
    pub(crate) parent: Option<usize>,
    /// Sum of edge costs from the seeding goal.
    pub(crate) cost: f32,
    /// Estimated remaining cost to the origin.
    pub(crate) heuristic: f32,
}

/// Counters describing the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Vertices popped from the frontier and marked visited.
    pub expanded: usize,
    /// Frontier insertions, goal seeds included.
    pub enqueued: usize,
    /// Whether the origin was reached.
    pub reached: bool,
}

/// Best-first search driver.
///
/// The search starts at the goals and works toward the origin, so a single
/// pass answers "shortest route from the origin to the nearest goal".
///
/// `Pathfinder` owns its frontier, visited set and per-vertex tables and
/// clears them at the start of every call, so repeated queries reuse their
/// allocations. Every query borrows it mutably; run concurrent searches with
/// separate instances.
///
/// Once a vertex has been expanded it is never expanded again, even if a
/// cheaper route to it turns up later. This is exact for consistent
/// heuristics (and for [`Scoring::CostOnly`]).
#[derive(Debug)]
pub struct Pathfinder<V> {
    frontier: KeyedPriorityQueue<Weight, usize>,
    visited: HashSet<usize>,
    best: HashMap<usize, Weight>,
    records: HashMap<usize, Record<V>>,
    nbuf: Vec<V>,
    stats: SearchStats,
}

impl<V: Vertex> Default for Pathfinder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> Pathfinder<V> {
    pub fn new() -> Self {
        Self {
            frontier: KeyedPriorityQueue::new(),
            visited: HashSet::new(),
            best: HashMap::new(),
            records: HashMap::new(),
            nbuf: Vec::with_capacity(8),
            stats: SearchStats::default(),
        }
    }

    /// Pre-size the per-vertex tables for searches touching about
    /// `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            frontier: KeyedPriorityQueue::new(),
            visited: HashSet::with_capacity(vertices),
            best: HashMap::with_capacity(vertices),
            records: HashMap::with_capacity(vertices),
            nbuf: Vec::with_capacity(8),
            stats: SearchStats::default(),
        }
    }

    /// Counters from the last `find_path*` call.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Shortest route from `origin` to `goal`.
    pub fn find_path_to(&mut self, origin: &V, goal: &V, scoring: Scoring) -> Option<Path<V>> {
        self.find_path(origin, std::slice::from_ref(goal), scoring)
    }

    /// Route from `origin` to whichever of `goals` is cheapest to reach.
    ///
    /// Returns `None` when `goals` is empty or no goal is connected to
    /// `origin`. If `origin` is itself a goal the path is empty.
    pub fn find_path(&mut self, origin: &V, goals: &[V], scoring: Scoring) -> Option<Path<V>> {
        self.reset();

        if goals.is_empty() {
            debug!("search toward {} skipped: no goals", origin.index());
            return None;
        }

        let target = origin.index();
        for goal in goals {
            let gi = goal.index();
            if self.records.contains_key(&gi) {
                continue;
            }
            let heuristic = goal.distance(origin);
            let weight = scoring.weight(0.0, heuristic);
            self.records.insert(
                gi,
                Record {
                    vertex: goal.clone(),
                    parent: None,
                    cost: 0.0,
                    heuristic,
                },
            );
            self.best.insert(gi, weight);
            self.frontier.enqueue(weight, gi);
            self.stats.enqueued += 1;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = loop {
            let Some(ci) = self.frontier.dequeue() else {
                break false;
            };
            if !self.visited.insert(ci) {
                continue;
            }
            self.stats.expanded += 1;

            if ci == target {
                break true;
            }

            let Some(current) = self.records.get(&ci) else {
                continue;
            };
            let current_vertex = current.vertex.clone();
            let current_cost = current.cost;
            trace!("expanding {ci} (cost {current_cost})");

            nbuf.clear();
            current_vertex.neighbors(&mut nbuf);

            for neighbor in nbuf.drain(..) {
                let ni = neighbor.index();
                if self.visited.contains(&ni) {
                    continue;
                }

                // The search walks edges backwards: the real move is
                // neighbor -> current.
                let cost = current_cost + neighbor.travel_cost(&current_vertex);
                let heuristic = match self.records.get(&ni) {
                    Some(rec) => rec.heuristic,
                    None => neighbor.distance(origin),
                };
                let weight = scoring.weight(cost, heuristic);

                if let Some(&known) = self.best.get(&ni) {
                    if weight >= known {
                        continue;
                    }
                    self.frontier.remove(&ni);
                }

                self.best.insert(ni, weight);
                self.records.insert(
                    ni,
                    Record {
                        vertex: neighbor,
                        parent: Some(ci),
                        cost,
                        heuristic,
                    },
                );
                self.frontier.enqueue(weight, ni);
                self.stats.enqueued += 1;
            }
        };

        self.nbuf = nbuf;
        self.stats.reached = found;

        if !found {
            debug!(
                "search toward {target} exhausted after expanding {} vertices",
                self.stats.expanded
            );
            return None;
        }

        let path = retrace(&self.records, target);
        debug!(
            "search toward {target} found {} steps, cost {}, after expanding {} vertices",
            path.len(),
            path.cost(),
            self.stats.expanded
        );
        Some(path)
    }

    fn reset(&mut self) {
        self.frontier.clear();
        self.visited.clear();
        self.best.clear();
        self.records.clear();
        self.stats = SearchStats::default();
    }
}
