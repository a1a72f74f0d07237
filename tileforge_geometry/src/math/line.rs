//! Geometric primitives on a two-point segment.
//!
//! All bounding-box operations use the box spanned by both endpoints and do not depend on
//! their order. [`Line::slope_intercept`] and [`Line::is_left`] treat the line as directed
//! from `p0` to `p1`.

use super::Point;

/// A directed segment from `p0` to `p1`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Line {
	pub p0: Point,
	pub p1: Point,
}

impl Line {
	#[must_use]
	pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Line {
		Line {
			p0: Point::new(x0, y0),
			p1: Point::new(x1, y1),
		}
	}

	#[must_use]
	pub fn from_points(p0: Point, p1: Point) -> Line {
		Line { p0, p1 }
	}

	/// Returns `(min_x, max_x, min_y, max_y)`.
	fn bounds(&self) -> (f64, f64, f64, f64) {
		let (lx, gx) = if self.p0.x > self.p1.x {
			(self.p1.x, self.p0.x)
		} else {
			(self.p0.x, self.p1.x)
		};
		let (ly, gy) = if self.p0.y > self.p1.y {
			(self.p1.y, self.p0.y)
		} else {
			(self.p0.y, self.p1.y)
		};
		(lx, gx, ly, gy)
	}

	/// Checks whether `pt` lies inside the closed bounding box of the endpoints.
	#[must_use]
	pub fn in_between(&self, pt: Point) -> bool {
		let (lx, gx, ly, gy) = self.bounds();
		lx <= pt.x && pt.x <= gx && ly <= pt.y && pt.y <= gy
	}

	/// Checks whether `pt` lies strictly inside the bounding box of the endpoints.
	///
	/// An axis on which the box has zero size always passes, so points on an axis-aligned
	/// segment count as inside.
	#[must_use]
	pub fn ex_in_between(&self, pt: Point) -> bool {
		let (lx, gx, ly, gy) = self.bounds();

		let good_x = gx - lx == 0.0 || (lx < pt.x && pt.x < gx);
		let good_y = gy - ly == 0.0 || (ly < pt.y && pt.y < gy);

		good_x && good_y
	}

	#[must_use]
	pub fn is_vertical(&self) -> bool {
		self.p0.x == self.p1.x
	}

	#[must_use]
	pub fn is_horizontal(&self) -> bool {
		self.p0.y == self.p1.y
	}

	/// Restricts each coordinate of `pt` independently to the bounding box of the endpoints.
	///
	/// The result is not a projection onto the line.
	#[must_use]
	pub fn clamp(&self, pt: Point) -> Point {
		let (lx, gx, ly, gy) = self.bounds();
		let mut p = pt;

		if pt.x < lx {
			p.x = lx;
		}
		if pt.x > gx {
			p.x = gx;
		}
		if pt.y < ly {
			p.y = ly;
		}
		if pt.y > gy {
			p.y = gy;
		}
		p
	}

	/// Perpendicular distance from `pt` to the infinite line through both endpoints.
	///
	/// Returns `0` for a zero-length line.
	#[must_use]
	pub fn distance_from_point(&self, pt: Point) -> f64 {
		let dx = self.delta_x();
		let dy = self.delta_y();

		let numerator = (dy * pt.x - dx * pt.y + self.p1.x * self.p0.y - self.p1.y * self.p0.x).abs();
		let length = dx.hypot(dy);
		if length == 0.0 {
			return 0.0;
		}
		numerator / length
	}

	/// Returns `(slope, intercept, defined)`.
	///
	/// Horizontal lines yield `(0, y0, true)`. Vertical lines yield `(0, y0, false)` because
	/// their slope is undefined.
	#[must_use]
	pub fn slope_intercept(&self) -> (f64, f64, bool) {
		let dx = self.delta_x();
		let dy = self.delta_y();
		if dx == 0.0 || dy == 0.0 {
			return (0.0, self.p0.y, dx != 0.0);
		}
		let m = dy / dx;
		(m, self.p0.y - m * self.p0.x, true)
	}

	#[must_use]
	pub fn delta_x(&self) -> f64 {
		self.p1.x - self.p0.x
	}

	#[must_use]
	pub fn delta_y(&self) -> f64 {
		self.p1.y - self.p0.y
	}

	/// Tests on which side of the directed line `pt` lies.
	///
	/// Positive: left, zero: on the line, negative: right.
	#[must_use]
	pub fn is_left(&self, pt: Point) -> f64 {
		self.delta_x() * (pt.y - self.p0.y) - (pt.x - self.p0.x) * self.delta_y()
	}
}
