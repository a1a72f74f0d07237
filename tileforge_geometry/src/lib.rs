//! Geometry primitives and Mapbox Vector Tile encoding for tileforge.
//!
//! - [`math`]: points, line primitives and Douglas-Peucker simplification.
//! - [`geo`]: feature geometries in tile coordinates.
//! - [`vector_tile`]: layers, features, attribute values and the wire-layer builder.

pub mod geo;
pub mod math;
pub mod vector_tile;

pub use geo::*;
