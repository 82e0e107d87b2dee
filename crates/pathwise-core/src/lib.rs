//! **pathwise-core**: geometry primitives shared by the *pathwise* crates.
//!
//! Grid adapters describe positions with [`Point`] and world bounds with
//! [`Range`]. A `Range` also provides the row-major flat encoding that grid
//! vertices use as their search index.

pub mod geom;

pub use geom::{Point, Range};
