use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A position in tile space.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Point {
		Point { x, y }
	}

	/// Rounds both coordinates to the integer grid used on the wire.
	///
	/// Geometry parameters are 32-bit, so a coordinate that does not fit into an `i32` after
	/// rounding (or is not finite) is an error.
	pub fn to_grid(&self) -> Result<(i32, i32)> {
		Ok((grid_value(self.x)?, grid_value(self.y)?))
	}
}

fn grid_value(value: f64) -> Result<i32> {
	let rounded = value.round();
	ensure!(
		(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&rounded),
		"coordinate {value} is outside of the 32-bit tile grid"
	);
	Ok(rounded as i32)
}

impl<T: Into<f64>> From<[T; 2]> for Point {
	fn from([x, y]: [T; 2]) -> Self {
		Point { x: x.into(), y: y.into() }
	}
}

impl From<(f64, f64)> for Point {
	fn from((x, y): (f64, f64)) -> Self {
		Point { x, y }
	}
}

impl Debug for Point {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{}, {}]", self.x, self.y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn conversions() {
		assert_eq!(Point::from([1, 2]), Point::new(1.0, 2.0));
		assert_eq!(Point::from([1.5f32, -2.0]), Point::new(1.5, -2.0));
		assert_eq!(Point::from((3.0, 4.0)), Point::new(3.0, 4.0));
	}

	#[test]
	fn to_grid_rounds() -> Result<()> {
		assert_eq!(Point::new(1.4, 2.6).to_grid()?, (1, 3));
		assert_eq!(Point::new(-0.6, -1.2).to_grid()?, (-1, -1));
		assert_eq!(Point::new(2_147_483_647.4, -2_147_483_648.0).to_grid()?, (i32::MAX, i32::MIN));
		Ok(())
	}

	#[test]
	fn to_grid_rejects_coordinates_beyond_32_bit() {
		for point in [
			Point::new(1e300, 0.0),
			Point::new(0.0, -1e300),
			Point::new(2_147_483_648.0, 0.0),
			Point::new(f64::NAN, 0.0),
			Point::new(0.0, f64::INFINITY),
		] {
			let err = point.to_grid().unwrap_err();
			assert!(err.to_string().contains("outside of the 32-bit tile grid"), "{point:?}");
		}
	}

	#[test]
	fn debug_format() {
		assert_eq!(format!("{:?}", Point::new(1.0, 2.5)), "[1, 2.5]");
	}
}
