//! Planar math on tile-space coordinates.

mod area;
mod line;
mod point;
mod simplify;

pub use area::area_ring;
pub use line::Line;
pub use point::Point;
pub use simplify::{simplify_line, simplify_ring};
