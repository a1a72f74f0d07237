//! Encoded form of a layer (`Tile.Layer` in the MVT schema).
//!
//! Field layout:
//!  * field 1: `name` (string)
//!  * field 2: repeated `features` (embedded message)
//!  * field 3: repeated `keys` (string)
//!  * field 4: repeated `values` (embedded message)
//!  * field 5: `extent` (varint)
//!  * field 15: `version` (varint)

use super::{PropertyManager, VectorTileFeature};
use anyhow::{Context, Result};
use tileforge_core::{
	Blob,
	io::{ValueWriter, ValueWriterBlob},
};

/// Result of [`Layer::to_wire_layer`](super::Layer::to_wire_layer).
///
/// Owns all of its data, so it can outlive the layer it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct WireLayer {
	pub version: u32,
	pub name: String,
	pub extent: u32,
	/// Key and value tables referenced by the features' `tag_ids`.
	pub property_manager: PropertyManager,
	pub features: Vec<VectorTileFeature>,
}

impl WireLayer {
	/// Serializes the layer. `extent` and `version` are always written.
	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		writer
			.write_pbf_key(1, 2)
			.context("Failed to write PBF key for layer name")?;
		writer
			.write_pbf_string(&self.name)
			.context("Failed to write layer name")?;

		for feature in &self.features {
			writer
				.write_pbf_key(2, 2)
				.context("Failed to write PBF key for feature")?;
			writer
				.write_pbf_blob(&feature.to_blob().context("Failed to convert feature to blob")?)
				.context("Failed to write feature blob")?;
		}

		for key in self.property_manager.iter_key() {
			writer
				.write_pbf_key(3, 2)
				.context("Failed to write PBF key for property key")?;
			writer.write_pbf_string(key).context("Failed to write property key")?;
		}

		for value in self.property_manager.iter_val() {
			writer
				.write_pbf_key(4, 2)
				.context("Failed to write PBF key for property value")?;
			writer
				.write_pbf_blob(&value.to_blob().context("Failed to convert property value to blob")?)
				.context("Failed to write property value blob")?;
		}

		writer
			.write_pbf_key(5, 0)
			.context("Failed to write PBF key for extent")?;
		writer
			.write_varint(u64::from(self.extent))
			.context("Failed to write extent")?;

		writer
			.write_pbf_key(15, 0)
			.context("Failed to write PBF key for version")?;
		writer
			.write_varint(u64::from(self.version))
			.context("Failed to write version")?;

		Ok(writer.into_blob())
	}
}
