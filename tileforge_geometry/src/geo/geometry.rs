use crate::math::{Line, Point};
use std::fmt::Debug;

pub type Coordinates1 = Vec<Point>;
pub type Coordinates2 = Vec<Coordinates1>;
pub type Coordinates3 = Vec<Coordinates2>;

/// Feature geometry in tile coordinates.
///
/// Polygon rings are closed: the first and last point are equal.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(Point),
	LineString(Coordinates1),
	Polygon(Coordinates2),
	MultiPoint(Coordinates1),
	MultiLineString(Coordinates2),
	MultiPolygon(Coordinates3),
}

fn c1<T: Into<f64>>(value: Vec<[T; 2]>) -> Coordinates1 {
	value.into_iter().map(Point::from).collect()
}

fn c2<T: Into<f64>>(value: Vec<Vec<[T; 2]>>) -> Coordinates2 {
	value.into_iter().map(c1).collect()
}

impl Geometry {
	pub fn new_point<T: Into<f64>>(value: [T; 2]) -> Self {
		Self::Point(Point::from(value))
	}
	pub fn new_line_string<T: Into<f64>>(value: Vec<[T; 2]>) -> Self {
		Self::LineString(c1(value))
	}
	pub fn new_polygon<T: Into<f64>>(value: Vec<Vec<[T; 2]>>) -> Self {
		Self::Polygon(c2(value))
	}
	pub fn new_multi_point<T: Into<f64>>(value: Vec<[T; 2]>) -> Self {
		Self::MultiPoint(c1(value))
	}
	pub fn new_multi_line_string<T: Into<f64>>(value: Vec<Vec<[T; 2]>>) -> Self {
		Self::MultiLineString(c2(value))
	}
	pub fn new_multi_polygon<T: Into<f64>>(value: Vec<Vec<Vec<[T; 2]>>>) -> Self {
		Self::MultiPolygon(value.into_iter().map(c2).collect())
	}

	pub fn get_type(&self) -> &str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::LineString(_) => "LineString",
			Geometry::Polygon(_) => "Polygon",
			Geometry::MultiPoint(_) => "MultiPoint",
			Geometry::MultiLineString(_) => "MultiLineString",
			Geometry::MultiPolygon(_) => "MultiPolygon",
		}
	}

	fn points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
		match self {
			Geometry::Point(p) => Box::new(std::iter::once(p)),
			Geometry::LineString(g) | Geometry::MultiPoint(g) => Box::new(g.iter()),
			Geometry::Polygon(g) | Geometry::MultiLineString(g) => Box::new(g.iter().flatten()),
			Geometry::MultiPolygon(g) => Box::new(g.iter().flatten().flatten()),
		}
	}

	/// Returns the bounding box as a line from the minimum to the maximum corner,
	/// or `None` if the geometry has no points.
	pub fn bounding_box(&self) -> Option<Line> {
		let mut points = self.points();
		let first = *points.next()?;
		let (min, max) = points.fold((first, first), |(min, max), p| {
			(
				Point::new(min.x.min(p.x), min.y.min(p.y)),
				Point::new(max.x.max(p.x), max.y.max(p.y)),
			)
		});
		Some(Line::from_points(min, max))
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		Self::new_multi_polygon(vec![
			vec![
				vec![[0.0, 0.0], [5.0, 0.0], [2.5, 4.0], [0.0, 0.0]],
				vec![[2.0, 1.0], [2.5, 2.0], [3.0, 1.0], [2.0, 1.0]],
			],
			vec![
				vec![[6.0, 0.0], [9.0, 0.0], [9.0, 4.0], [6.0, 4.0], [6.0, 0.0]],
				vec![[7.0, 1.0], [7.0, 3.0], [8.0, 3.0], [8.0, 1.0], [7.0, 1.0]],
			],
		])
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let (type_name, inner): (&str, &dyn Debug) = match self {
			Geometry::Point(g) => ("Point", g),
			Geometry::LineString(g) => ("LineString", g),
			Geometry::Polygon(g) => ("Polygon", g),
			Geometry::MultiPoint(g) => ("MultiPoint", g),
			Geometry::MultiLineString(g) => ("MultiLineString", g),
			Geometry::MultiPolygon(g) => ("MultiPolygon", g),
		};
		f.debug_tuple(type_name).field(inner).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bounding_box() {
		let bbox = Geometry::new_example().bounding_box().unwrap();
		assert_eq!(bbox, Line::new(0.0, 0.0, 9.0, 4.0));

		let bbox = Geometry::new_point([3, -2]).bounding_box().unwrap();
		assert_eq!(bbox, Line::new(3.0, -2.0, 3.0, -2.0));

		assert!(Geometry::MultiPoint(vec![]).bounding_box().is_none());
	}

	#[test]
	fn debug_format() {
		assert_eq!(
			format!("{:?}", Geometry::new_line_string(vec![[0, 0], [1, 2]])),
			"LineString([[0, 0], [1, 2]])"
		);
		assert_eq!(Geometry::new_example().get_type(), "MultiPolygon");
	}
}
