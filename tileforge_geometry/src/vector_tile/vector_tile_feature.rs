//! Encoded form of a single feature (`Tile.Feature` in the MVT schema).
//!
//! Geometry is stored as the packed command stream described in
//! <https://github.com/mapbox/vector-tile-spec/blob/master/2.1/README.md#43-geometry-encoding>:
//! `MoveTo`, `LineTo` and `ClosePath` commands followed by zigzag-encoded coordinate deltas
//! on the integer tile grid.

use super::geometry_type::GeomType;
use crate::{
	geo::Geometry,
	math::{Point, area_ring},
};
use anyhow::{Context, Result, anyhow};
use byteorder::LE;
use tileforge_core::{
	Blob,
	io::{ValueWriter, ValueWriterBlob},
};

const MOVE_TO: u64 = 1;
const LINE_TO: u64 = 2;
const CLOSE_PATH: u64 = 7;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTileFeature {
	pub id: Option<u64>,
	pub tag_ids: Vec<u32>,
	pub geom_type: GeomType,
	pub geom_data: Blob,
}

struct CommandWriter {
	writer: ValueWriterBlob<LE>,
	cursor: (i32, i32),
	commands: usize,
}

impl CommandWriter {
	fn new() -> Self {
		CommandWriter {
			writer: ValueWriterBlob::new_le(),
			cursor: (0, 0),
			commands: 0,
		}
	}

	fn command(&mut self, id: u64, count: usize) -> Result<()> {
		self.commands += 1;
		self.writer.write_varint(((count as u64) << 3) | id)
	}

	fn points(&mut self, points: &[(i32, i32)]) -> Result<()> {
		for &(x, y) in points {
			self.writer.write_svarint(i64::from(delta(x, self.cursor.0)?))?;
			self.writer.write_svarint(i64::from(delta(y, self.cursor.1)?))?;
			self.cursor = (x, y);
		}
		Ok(())
	}

	/// Writes `MoveTo` for the first point and `LineTo` for the rest.
	fn path(&mut self, points: &[(i32, i32)]) -> Result<()> {
		let Some((first, rest)) = points.split_first() else {
			return Ok(());
		};
		self.command(MOVE_TO, 1)?;
		self.points(&[*first])?;
		if !rest.is_empty() {
			self.command(LINE_TO, rest.len())?;
			self.points(rest)?;
		}
		Ok(())
	}

	fn into_blob(self) -> Option<Blob> {
		(self.commands > 0).then(|| self.writer.into_blob())
	}
}

/// Parameters are 32-bit, so the step between two grid points has to fit into an `i32`.
fn delta(value: i32, cursor: i32) -> Result<i32> {
	value
		.checked_sub(cursor)
		.ok_or_else(|| anyhow!("step from {cursor} to {value} does not fit into a 32-bit parameter"))
}

/// Rounds to the tile grid and drops consecutive duplicates.
fn to_grid(points: &[Point]) -> Result<Vec<(i32, i32)>> {
	let mut grid = points.iter().map(Point::to_grid).collect::<Result<Vec<_>>>()?;
	grid.dedup();
	Ok(grid)
}

fn write_points(writer: &mut CommandWriter, points: &[Point]) -> Result<()> {
	if points.is_empty() {
		return Ok(());
	}
	let grid = points.iter().map(Point::to_grid).collect::<Result<Vec<_>>>()?;
	writer.command(MOVE_TO, grid.len())?;
	writer.points(&grid)
}

fn write_line_string(writer: &mut CommandWriter, line: &[Point]) -> Result<()> {
	let grid = to_grid(line)?;
	if grid.len() < 2 {
		return Ok(());
	}
	writer.path(&grid)
}

fn write_polygon(writer: &mut CommandWriter, polygon: &[Vec<Point>]) -> Result<()> {
	for (index, ring) in polygon.iter().enumerate() {
		let mut grid = to_grid(ring)?;
		if grid.len() > 1 && grid.first() == grid.last() {
			grid.pop();
		}

		let area = area_ring(
			&grid
				.iter()
				.map(|&(x, y)| Point::new(f64::from(x), f64::from(y)))
				.collect::<Vec<_>>(),
		);

		if grid.len() < 3 || area == 0.0 {
			if index == 0 {
				// without its exterior ring the polygon is gone
				return Ok(());
			}
			continue;
		}

		let is_exterior = index == 0;
		if (is_exterior && area < 0.0) || (!is_exterior && area > 0.0) {
			grid.reverse();
		}

		writer.path(&grid)?;
		writer.command(CLOSE_PATH, 1)?;
	}
	Ok(())
}

impl VectorTileFeature {
	/// Encodes `geometry` as a feature with the given id and tags.
	///
	/// Returns `None` if nothing of the geometry survives encoding, e.g. lines that collapse to
	/// a single grid point or rings without area.
	pub fn from_geometry(id: Option<u64>, tag_ids: Vec<u32>, geometry: &Geometry) -> Result<Option<VectorTileFeature>> {
		let mut writer = CommandWriter::new();

		match geometry {
			Geometry::Point(point) => write_points(&mut writer, std::slice::from_ref(point)),
			Geometry::MultiPoint(points) => write_points(&mut writer, points),
			Geometry::LineString(line) => write_line_string(&mut writer, line),
			Geometry::MultiLineString(lines) => lines
				.iter()
				.try_for_each(|line| write_line_string(&mut writer, line)),
			Geometry::Polygon(polygon) => write_polygon(&mut writer, polygon),
			Geometry::MultiPolygon(polygons) => polygons
				.iter()
				.try_for_each(|polygon| write_polygon(&mut writer, polygon)),
		}
		.with_context(|| format!("Failed to write {} geometry", geometry.get_type()))?;

		Ok(writer.into_blob().map(|geom_data| VectorTileFeature {
			id,
			tag_ids,
			geom_type: GeomType::from(geometry),
			geom_data,
		}))
	}

	/// Serializes the feature as a `Tile.Feature` message.
	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		if let Some(id) = self.id {
			writer
				.write_pbf_key(1, 0)
				.context("Failed to write PBF key for feature ID")?;
			writer.write_varint(id).context("Failed to write feature ID")?;
		}

		if !self.tag_ids.is_empty() {
			writer
				.write_pbf_key(2, 2)
				.context("Failed to write PBF key for tag IDs")?;
			writer
				.write_pbf_packed_uint32(&self.tag_ids)
				.context("Failed to write tag IDs")?;
		}

		writer
			.write_pbf_key(3, 0)
			.context("Failed to write PBF key for geometry type")?;
		writer
			.write_varint(self.geom_type.as_u64())
			.context("Failed to write geometry type")?;

		if !self.geom_data.is_empty() {
			writer
				.write_pbf_key(4, 2)
				.context("Failed to write PBF key for geometry data")?;
			writer
				.write_pbf_blob(&self.geom_data)
				.context("Failed to write geometry data")?;
		}

		Ok(writer.into_blob())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn geometry_bytes(geometry: &Geometry) -> Vec<u8> {
		VectorTileFeature::from_geometry(None, vec![], geometry)
			.unwrap()
			.unwrap()
			.geom_data
			.into_vec()
	}

	#[test]
	fn point() {
		// MoveTo(1), +25, +17
		assert_eq!(geometry_bytes(&Geometry::new_point([25, 17])), vec![9, 50, 34]);
	}

	#[test]
	fn multi_point() {
		// MoveTo(2), +5 +7, +(-2) +(-5)
		assert_eq!(
			geometry_bytes(&Geometry::new_multi_point(vec![[5, 7], [3, 2]])),
			vec![17, 10, 14, 3, 9]
		);
	}

	#[test]
	fn line_string() {
		// MoveTo(1) +2 +2, LineTo(2) +0 +8, +8 +0
		assert_eq!(
			geometry_bytes(&Geometry::new_line_string(vec![[2, 2], [2, 10], [10, 10]])),
			vec![9, 4, 4, 18, 0, 16, 16, 0]
		);
	}

	#[test]
	fn multi_line_string_keeps_cursor_between_parts() {
		assert_eq!(
			geometry_bytes(&Geometry::new_multi_line_string(vec![
				vec![[2, 2], [2, 10], [10, 10]],
				vec![[1, 1], [3, 5]],
			])),
			vec![9, 4, 4, 18, 0, 16, 16, 0, 9, 17, 17, 10, 4, 8]
		);
	}

	#[test]
	fn polygon() {
		// MoveTo(1) +3 +6, LineTo(2) +5 +6 +12 +22, ClosePath
		assert_eq!(
			geometry_bytes(&Geometry::new_polygon(vec![vec![[3, 6], [8, 12], [20, 34], [3, 6]]])),
			vec![9, 6, 12, 18, 10, 12, 24, 44, 15]
		);
	}

	#[test]
	fn polygon_rings_are_oriented() {
		let exterior_ccw = vec![[0, 0], [0, 10], [10, 10], [10, 0], [0, 0]];
		let interior_cw = vec![[2, 2], [8, 2], [8, 8], [2, 8], [2, 2]];
		let feature =
			VectorTileFeature::from_geometry(None, vec![], &Geometry::new_polygon(vec![exterior_ccw, interior_cw]))
				.unwrap()
				.unwrap();

		// exterior reversed: MoveTo(10,0), LineTo (10,10) (0,10) (0,0), ClosePath
		// interior reversed: MoveTo(2,8), LineTo (8,8) (8,2) (2,2), ClosePath
		assert_eq!(
			feature.geom_data.into_vec(),
			vec![9, 20, 0, 26, 0, 20, 19, 0, 0, 19, 15, 9, 4, 16, 26, 12, 0, 0, 11, 11, 0, 15]
		);
	}

	#[test]
	fn degenerate_geometries_encode_to_nothing() -> Result<()> {
		assert!(VectorTileFeature::from_geometry(None, vec![], &Geometry::MultiPoint(vec![]))?.is_none());
		assert!(
			VectorTileFeature::from_geometry(None, vec![], &Geometry::new_line_string(vec![[1.1, 1.0], [0.9, 1.2]]))?
				.is_none()
		);
		assert!(
			VectorTileFeature::from_geometry(
				None,
				vec![],
				&Geometry::new_polygon(vec![vec![[0, 0], [5, 5], [10, 10], [0, 0]]])
			)?
			.is_none()
		);
		Ok(())
	}

	#[test]
	fn huge_coordinates_fail_instead_of_overflowing() {
		let err = VectorTileFeature::from_geometry(
			None,
			vec![],
			&Geometry::new_line_string(vec![[-1e300, 10.0], [1e300, 10.0]]),
		)
		.unwrap_err();
		assert!(format!("{err:?}").contains("outside of the 32-bit tile grid"));

		// both ends fit, the step between them does not
		let err = VectorTileFeature::from_geometry(
			None,
			vec![],
			&Geometry::new_line_string(vec![[-2e9, 10.0], [2e9, 10.0]]),
		)
		.unwrap_err();
		assert!(format!("{err:?}").contains("does not fit into a 32-bit parameter"));
	}

	#[test]
	fn extreme_grid_values_still_encode() -> Result<()> {
		let feature = VectorTileFeature::from_geometry(None, vec![], &Geometry::new_point([i32::MIN, i32::MAX]))?;
		assert!(feature.is_some());
		Ok(())
	}

	#[test]
	fn to_blob() -> Result<()> {
		let feature = VectorTileFeature::from_geometry(Some(3), vec![0, 1], &Geometry::new_point([25, 17]))?.unwrap();
		assert_eq!(
			feature.to_blob()?.into_vec(),
			vec![0x08, 3, 0x12, 2, 0, 1, 0x18, 1, 0x22, 3, 9, 50, 34]
		);
		Ok(())
	}

	#[test]
	fn to_blob_without_id_and_tags() -> Result<()> {
		let feature = VectorTileFeature::from_geometry(None, vec![], &Geometry::new_point([0, 0]))?.unwrap();
		assert_eq!(feature.to_blob()?.into_vec(), vec![0x18, 1, 0x22, 3, 9, 0, 0]);
		Ok(())
	}
}
