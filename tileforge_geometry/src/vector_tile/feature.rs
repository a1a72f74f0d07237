//! The default feature type and its encoder.

use super::{AttributeValue, Cancelled, EncodeFeature, FeatureProperties, PropertyManager, TileContext, VectorTileFeature};
use crate::{
	geo::{Coordinates1, Coordinates2, Geometry},
	math::{Line, Point, simplify_line, simplify_ring},
};
use anyhow::{Context, Result};
use log::trace;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
	pub id: Option<u64>,
	pub geometry: Geometry,
	pub properties: FeatureProperties,
}

impl Feature {
	#[must_use]
	pub fn new(geometry: Geometry) -> Self {
		Self {
			id: None,
			geometry,
			properties: FeatureProperties::new(),
		}
	}

	#[must_use]
	pub fn with_id(mut self, id: u64) -> Self {
		self.id = Some(id);
		self
	}

	pub fn set_id(&mut self, id: u64) {
		self.id = Some(id);
	}

	pub fn set_properties(&mut self, properties: FeatureProperties) {
		self.properties = properties;
	}

	pub fn set_property<T>(&mut self, key: String, value: T)
	where
		AttributeValue: From<T>,
	{
		self.properties.insert(key, value);
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		Self {
			id: Some(13),
			geometry: Geometry::new_example(),
			properties: FeatureProperties::from(vec![
				("name", AttributeValue::from("Nice")),
				("population", AttributeValue::from(348_085u32)),
				("is_nice", AttributeValue::from(true)),
			]),
		}
	}
}

/// Clips and simplifies geometry parts against the buffered tile box.
struct Preparer<'a> {
	cancel: &'a CancellationToken,
	clip: Line,
	tolerance: Option<f64>,
}

impl Preparer<'_> {
	fn points(&self, points: &[Point]) -> Result<Coordinates1> {
		Cancelled::check(self.cancel)?;
		Ok(points.iter().copied().filter(|p| self.clip.in_between(*p)).collect())
	}

	fn line(&self, line: &[Point]) -> Result<Option<Coordinates1>> {
		Cancelled::check(self.cancel)?;
		let line = match self.tolerance {
			Some(tolerance) => simplify_line(line, tolerance),
			None => line.to_vec(),
		};
		Ok((line.len() >= 2).then_some(line))
	}

	fn ring(&self, ring: &[Point]) -> Result<Option<Coordinates1>> {
		Cancelled::check(self.cancel)?;
		let ring = match self.tolerance {
			Some(tolerance) => simplify_ring(ring, tolerance),
			None => ring.to_vec(),
		};
		Ok((ring.len() >= 4).then_some(ring))
	}

	fn polygon(&self, polygon: &[Coordinates1]) -> Result<Option<Coordinates2>> {
		let mut rings = polygon.iter();
		let Some(exterior) = rings.next() else {
			return Ok(None);
		};
		let Some(exterior) = self.ring(exterior)? else {
			return Ok(None);
		};
		let mut result = vec![exterior];
		for ring in rings {
			if let Some(ring) = self.ring(ring)? {
				result.push(ring);
			}
		}
		Ok(Some(result))
	}

	fn geometry(&self, geometry: &Geometry) -> Result<Option<Geometry>> {
		let result = match geometry {
			Geometry::Point(p) => self.points(std::slice::from_ref(p))?.pop().map(Geometry::Point),
			Geometry::MultiPoint(points) => Some(Geometry::MultiPoint(self.points(points)?)),
			Geometry::LineString(line) => self.line(line)?.map(Geometry::LineString),
			Geometry::MultiLineString(lines) => {
				let mut result = Vec::with_capacity(lines.len());
				for line in lines {
					result.extend(self.line(line)?);
				}
				Some(Geometry::MultiLineString(result))
			}
			Geometry::Polygon(polygon) => self.polygon(polygon)?.map(Geometry::Polygon),
			Geometry::MultiPolygon(polygons) => {
				let mut result = Vec::with_capacity(polygons.len());
				for polygon in polygons {
					result.extend(self.polygon(polygon)?);
				}
				Some(Geometry::MultiPolygon(result))
			}
		};
		Ok(result.filter(|g| !is_empty(g)))
	}
}

fn is_empty(geometry: &Geometry) -> bool {
	match geometry {
		Geometry::Point(_) => false,
		Geometry::LineString(g) | Geometry::MultiPoint(g) => g.is_empty(),
		Geometry::Polygon(g) | Geometry::MultiLineString(g) => g.is_empty(),
		Geometry::MultiPolygon(g) => g.is_empty(),
	}
}

/// Checks whether two bounding boxes, given as min/max corner lines, overlap.
fn boxes_intersect(a: &Line, b: &Line) -> bool {
	a.in_between(b.clamp(a.p0))
}

impl EncodeFeature for Feature {
	fn id(&self) -> Option<u64> {
		self.id
	}

	fn properties(&self) -> &FeatureProperties {
		&self.properties
	}

	fn encode(
		&self,
		cancel: &CancellationToken,
		tables: &PropertyManager,
		tile: &dyn TileContext,
		simplify: bool,
	) -> Result<Option<VectorTileFeature>> {
		let extent = f64::from(tile.extent());
		let buffer = f64::from(tile.buffer());
		let clip = Line::new(-buffer, -buffer, extent + buffer, extent + buffer);

		let visible = self
			.geometry
			.bounding_box()
			.is_some_and(|bbox| boxes_intersect(&bbox, &clip));
		if !visible {
			trace!("feature {:?} is outside of the tile", self.id);
			return Ok(None);
		}

		let preparer = Preparer {
			cancel,
			clip,
			tolerance: simplify.then(|| tile.tolerance()),
		};
		let Some(geometry) = preparer.geometry(&self.geometry)? else {
			trace!("feature {:?} has no geometry left after clipping and simplification", self.id);
			return Ok(None);
		};

		let tag_ids = tables
			.lookup_tag_ids(&self.properties)
			.context("Failed to look up feature properties")?;

		VectorTileFeature::from_geometry(self.id, tag_ids, &geometry)
	}
}
