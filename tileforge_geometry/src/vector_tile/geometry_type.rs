use crate::geo::Geometry;

/// `Tile.GeomType` of the MVT schema.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GeomType {
	#[default]
	Unknown = 0,
	MultiPoint = 1,
	MultiLineString = 2,
	MultiPolygon = 3,
}

impl GeomType {
	#[must_use]
	pub fn as_u64(&self) -> u64 {
		*self as u64
	}
}

impl From<&Geometry> for GeomType {
	fn from(geometry: &Geometry) -> Self {
		use Geometry::*;
		match geometry {
			Point(_) | MultiPoint(_) => GeomType::MultiPoint,
			LineString(_) | MultiLineString(_) => GeomType::MultiLineString,
			Polygon(_) | MultiPolygon(_) => GeomType::MultiPolygon,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn as_u64() {
		assert_eq!(GeomType::Unknown.as_u64(), 0);
		assert_eq!(GeomType::MultiPoint.as_u64(), 1);
		assert_eq!(GeomType::MultiLineString.as_u64(), 2);
		assert_eq!(GeomType::MultiPolygon.as_u64(), 3);
	}

	#[test]
	fn from_geometry() {
		assert_eq!(GeomType::from(&Geometry::new_point([1, 2])), GeomType::MultiPoint);
		assert_eq!(
			GeomType::from(&Geometry::new_line_string(vec![[1, 2], [3, 4]])),
			GeomType::MultiLineString
		);
		assert_eq!(GeomType::from(&Geometry::new_example()), GeomType::MultiPolygon);
	}
}
