//! Seams between the layer builder and the things it encodes.

use super::{FeatureProperties, PropertyManager, VectorTileFeature};
use anyhow::Result;
use tileforge_core::TileCoord;
use tokio_util::sync::CancellationToken;

/// What a feature encoder needs to know about the tile it is written into.
pub trait TileContext: Send + Sync {
	fn zoom(&self) -> u8;

	/// Size of the tile's coordinate grid.
	fn extent(&self) -> u32;

	/// Margin around the tile, in tile units, that is still considered visible.
	fn buffer(&self) -> u32 {
		0
	}

	/// Douglas-Peucker epsilon, in tile units.
	fn tolerance(&self) -> f64 {
		1.0
	}
}

/// A feature that can turn itself into its encoded form.
///
/// [`Feature`](super::Feature) is the default implementation. Other implementations may
/// clip or project differently, as long as they report cancellation as
/// [`Cancelled`](super::Cancelled).
pub trait EncodeFeature: Clone + Send + Sync {
	fn id(&self) -> Option<u64>;

	fn properties(&self) -> &FeatureProperties;

	/// Encodes geometry and tags.
	///
	/// `tables` already contains every key and value of the layer. Returns `Ok(None)` if the
	/// feature is not visible in `tile`.
	fn encode(
		&self,
		cancel: &CancellationToken,
		tables: &PropertyManager,
		tile: &dyn TileContext,
		simplify: bool,
	) -> Result<Option<VectorTileFeature>>;
}

/// Tile descriptor used by [`encode_tile`](super::encode_tile).
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeTile {
	pub coord: TileCoord,
	pub extent: u32,
	pub buffer: u32,
	pub tolerance: f64,
}

impl EncodeTile {
	#[must_use]
	pub fn new(coord: TileCoord) -> EncodeTile {
		EncodeTile {
			coord,
			extent: 4096,
			buffer: 64,
			tolerance: 1.0,
		}
	}

	#[must_use]
	pub fn with_extent(mut self, extent: u32) -> Self {
		self.extent = extent;
		self
	}

	#[must_use]
	pub fn with_buffer(mut self, buffer: u32) -> Self {
		self.buffer = buffer;
		self
	}

	#[must_use]
	pub fn with_tolerance(mut self, tolerance: f64) -> Self {
		self.tolerance = tolerance;
		self
	}
}

impl TileContext for EncodeTile {
	fn zoom(&self) -> u8 {
		self.coord.level
	}
	fn extent(&self) -> u32 {
		self.extent
	}
	fn buffer(&self) -> u32 {
		self.buffer
	}
	fn tolerance(&self) -> f64 {
		self.tolerance
	}
}
