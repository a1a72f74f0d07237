//! Vector tile **layer** model and the wire-layer builder.
//!
//! A [`Layer`] is a named, ordered collection of features plus the policy that decides how
//! its features are encoded: the tile extent and whether geometries are simplified at a
//! given zoom level. [`Layer::to_wire_layer`] turns it into an owned [`WireLayer`].

use super::{Cancelled, EncodeFeature, EncoderConfig, Feature, PropertyManager, TileContext, WireLayer};
use anyhow::Result;
use log::{debug, trace, warn};
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

const DEFAULT_EXTENT: u32 = 4096;
const VERSION: u32 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct Layer<F = Feature> {
	name: String,
	features: Vec<F>,
	extent: Option<u32>,
	dont_simplify: bool,
	/// `0` means "use the configured default".
	max_simplification_zoom: u8,
}

impl<F: EncodeFeature> Layer<F> {
	/// Creates an empty layer that is simplified according to the encoder configuration.
	#[must_use]
	pub fn new(name: &str) -> Layer<F> {
		Layer {
			name: name.to_string(),
			features: Vec::new(),
			extent: None,
			dont_simplify: false,
			max_simplification_zoom: 0,
		}
	}

	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns a snapshot of the features. Changing it does not change the layer.
	#[must_use]
	pub fn features(&self) -> Vec<F> {
		self.features.clone()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.features.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	/// Appends features in order.
	///
	/// A feature whose id is already present in the layer, including ids added earlier in the
	/// same call, is skipped. Features without id are always added. Returns `true` if at least
	/// one feature was skipped.
	pub fn add_features<I>(&mut self, features: I) -> bool
	where
		I: IntoIterator<Item = F>,
	{
		let mut ids: HashSet<u64> = self.features.iter().filter_map(|f| f.id()).collect();
		let mut skipped = false;

		for feature in features {
			if let Some(id) = feature.id() {
				if !ids.insert(id) {
					warn!("layer '{}' already contains a feature with id {id}, skipping", self.name);
					skipped = true;
					continue;
				}
			}
			self.features.push(feature);
		}

		skipped
	}

	/// Removes the features at `indices`, as seen in [`Layer::features`], keeping the order of
	/// the others. Indices out of range are ignored.
	pub fn remove_features(&mut self, indices: &[usize]) {
		let indices: HashSet<usize> = indices.iter().copied().collect();
		let mut index = 0;
		self.features.retain(|_| {
			let keep = !indices.contains(&index);
			index += 1;
			keep
		});
	}

	#[must_use]
	pub fn extent(&self) -> u32 {
		self.extent.unwrap_or(DEFAULT_EXTENT)
	}

	pub fn set_extent(&mut self, extent: u32) {
		self.extent = Some(extent);
	}

	#[must_use]
	pub fn version(&self) -> u32 {
		VERSION
	}

	#[must_use]
	pub fn dont_simplify(&self) -> bool {
		self.dont_simplify
	}

	pub fn set_dont_simplify(&mut self, dont_simplify: bool) {
		self.dont_simplify = dont_simplify;
	}

	#[must_use]
	pub fn max_simplification_zoom(&self) -> u8 {
		self.max_simplification_zoom
	}

	pub fn set_max_simplification_zoom(&mut self, zoom: u8) {
		self.max_simplification_zoom = zoom;
	}

	/// Decides whether geometries of this layer are simplified in `tile`.
	#[must_use]
	pub fn should_simplify(&self, tile: &dyn TileContext, config: &EncoderConfig) -> bool {
		config.simplify
			&& !self.dont_simplify
			&& tile.zoom() < config.effective_max_zoom(self.max_simplification_zoom)
	}

	/// Encodes all features into a [`WireLayer`].
	///
	/// Features are encoded one after the other; `cancel` is checked before each of them.
	/// Features whose encoder returns `None` are left out.
	///
	/// # Errors
	///
	/// Returns [`Cancelled`] unchanged if `cancel` fires, either here or inside a feature
	/// encoder. Any other encoder error aborts the layer and is returned with context naming
	/// the feature.
	pub fn to_wire_layer(
		&self,
		cancel: &CancellationToken,
		tile: &dyn TileContext,
		config: &EncoderConfig,
	) -> Result<WireLayer> {
		let property_manager = PropertyManager::from_properties(self.features.iter().map(|f| f.properties()));
		let simplify = self.should_simplify(tile, config);

		let mut features = Vec::with_capacity(self.features.len());
		for (index, feature) in self.features.iter().enumerate() {
			Cancelled::check(cancel)?;

			match feature.encode(cancel, &property_manager, tile, simplify) {
				Ok(Some(encoded)) => features.push(encoded),
				Ok(None) => trace!("layer '{}': feature #{index} omitted", self.name),
				Err(err) if err.is::<Cancelled>() => return Err(err),
				Err(err) => {
					return Err(err.context(format!(
						"Failed to encode feature #{index} (id {:?}) of layer '{}'",
						feature.id(),
						self.name
					)));
				}
			}
		}

		debug!(
			"layer '{}': encoded {} of {} features, {} keys, {} values, simplify: {simplify}",
			self.name,
			features.len(),
			self.features.len(),
			property_manager.key.len(),
			property_manager.val.len()
		);

		Ok(WireLayer {
			version: VERSION,
			name: self.name.clone(),
			extent: tile.extent(),
			property_manager,
			features,
		})
	}
}
