use super::{EncodeFeature, EncodeTile, EncoderConfig, Layer, WireLayer};
use anyhow::{Context, Result};
use futures::future::try_join_all;
use log::{debug, warn};
use std::sync::Arc;
use tileforge_core::{
	Blob,
	io::{ValueWriter, ValueWriterBlob},
};
use tokio_util::sync::CancellationToken;

/// An encoded tile: an ordered list of wire layers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTile {
	pub layers: Vec<WireLayer>,
}

impl VectorTile {
	#[must_use]
	pub fn new(layers: Vec<WireLayer>) -> VectorTile {
		VectorTile { layers }
	}

	/// Appends a layer. Layer names should be unique within a tile; a duplicate is kept but
	/// logged.
	pub fn add_layer(&mut self, layer: WireLayer) {
		if self.find_layer(&layer.name).is_some() {
			warn!("tile already contains a layer named '{}'", layer.name);
		}
		self.layers.push(layer);
	}

	#[must_use]
	pub fn find_layer(&self, name: &str) -> Option<&WireLayer> {
		self.layers.iter().find(|layer| layer.name == name)
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		for layer in &self.layers {
			writer.write_pbf_key(3, 2).context("Failed to write PBF key")?;
			writer
				.write_pbf_blob(&layer.to_blob().context("Failed to convert WireLayer to blob")?)
				.context("Failed to write PBF blob")?;
		}

		Ok(writer.into_blob())
	}
}

/// Encodes several layers in parallel on the blocking thread pool.
///
/// The layers of the result keep the order of `layers`. The first failing layer fails the
/// whole tile and cancels the layers still running; a [`Cancelled`](super::Cancelled) error is
/// passed through unchanged. `cancel` itself is never cancelled here.
pub async fn encode_tile<F>(
	layers: Vec<Arc<Layer<F>>>,
	tile: EncodeTile,
	cancel: CancellationToken,
	config: EncoderConfig,
) -> Result<VectorTile>
where
	F: EncodeFeature + 'static,
{
	let tile = Arc::new(tile);
	let config = config.arc();
	let cancel = cancel.child_token();

	let tasks = layers.into_iter().map(|layer| {
		let tile = tile.clone();
		let config = config.clone();
		let cancel = cancel.clone();
		async move {
			tokio::task::spawn_blocking(move || layer.to_wire_layer(&cancel, tile.as_ref(), &config))
				.await
				.context("Failed to join layer encoding task")
				.and_then(|result| result)
		}
	});

	let layers = match try_join_all(tasks).await {
		Ok(layers) => layers,
		Err(err) => {
			// blocking tasks keep running after their handles are dropped
			cancel.cancel();
			return Err(err);
		}
	};

	let mut vector_tile = VectorTile::default();
	for layer in layers {
		vector_tile.add_layer(layer);
	}

	debug!("encoded tile {:?} with {} layers", tile.coord, vector_tile.layers.len());

	Ok(vector_tile)
}
