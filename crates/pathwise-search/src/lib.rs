//! Generic best-first graph search.
//!
//! This crate provides the search engine behind *pathwise*:
//!
//! - [`IndexedPriorityQueue`], an array-backed binary heap that supports
//!   removing and re-queuing arbitrary elements, and [`KeyedPriorityQueue`],
//!   its priority/datum wrapper used as the search frontier.
//! - The [`Vertex`] trait, the capability a client graph node type provides.
//! - [`Pathfinder`], which searches from one or more goals back toward an
//!   origin under a [`Scoring`] strategy and returns a [`Path`].
//!
//! # Scoring strategies
//!
//! | [`Scoring`] | Weight | Optimal |
//! |---|---|---|
//! | `CostPlusHeuristic` | cost + heuristic | yes, with an admissible heuristic |
//! | `CostOnly` | cost | yes |
//! | `HeuristicOnly` | heuristic | no |

mod keyed;
mod path;
mod pathfinder;
mod queue;
mod scoring;
mod vertex;

pub use keyed::KeyedPriorityQueue;
pub use path::Path;
pub use pathfinder::{Pathfinder, SearchStats};
pub use queue::{DEFAULT_CAPACITY, IndexedPriorityQueue};
pub use scoring::{Scoring, Weight};
pub use vertex::Vertex;
