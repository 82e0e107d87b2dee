//! 2D grid worlds for the *pathwise* search engine.
//!
//! A [`GridWorld`] pairs a [`GridMap`] (walkable and blocked tiles with entry
//! costs) with [`GridRules`] (4-way or 8-way movement, corner cutting,
//! heuristic). Its positions become [`GridVertex`] values that implement
//! [`pathwise_search::Vertex`], so any [`pathwise_search::Pathfinder`] can
//! route over them.
//!
//! ```
//! use pathwise_core::Point;
//! use pathwise_grid::{GridMap, GridRules, GridWorld};
//! use pathwise_search::{Pathfinder, Scoring};
//!
//! let map = GridMap::parse("
//!     ....
//!     .##.
//!     ....
//! ").unwrap();
//! let world = GridWorld::new(map, GridRules::cardinal()).unwrap();
//! let mut pf = Pathfinder::new();
//! let route = world
//!     .route(&mut pf, Point::new(0, 1), Point::new(3, 1), Scoring::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(route.len(), 5);
//! ```

mod distance;
mod error;
mod map;
mod rules;
mod world;

pub use distance::{chebyshev, euclidean, manhattan, octile};
pub use error::GridError;
pub use map::{DEFAULT_COST, GridMap};
pub use rules::{DIAGONAL_FACTOR, DIAGONAL_FACTOR_RANGE, GridRules, Metric};
pub use world::{GridVertex, GridWorld};
