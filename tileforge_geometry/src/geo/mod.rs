mod geometry;

pub use geometry::*;
