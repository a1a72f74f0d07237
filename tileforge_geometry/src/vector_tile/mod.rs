//! Mapbox Vector Tile (v2) encoding.
//!
//! The usual flow:
//!
//! 1. Build a [`Layer`] and fill it with [`Feature`]s.
//! 2. Call [`Layer::to_wire_layer`] with a [`CancellationToken`](tokio_util::sync::CancellationToken),
//!    a [`TileContext`] and an [`EncoderConfig`], or encode several layers at once with
//!    [`encode_tile`].
//! 3. Serialize the result with [`WireLayer::to_blob`] or [`VectorTile::to_blob`].

mod config;
mod encode;
mod error;
mod feature;
mod geometry_type;
mod layer;
mod properties;
mod property_manager;
mod tile;
mod value;
mod vector_tile_feature;
mod wire_layer;

pub use config::EncoderConfig;
pub use encode::{EncodeFeature, EncodeTile, TileContext};
pub use error::Cancelled;
pub use feature::Feature;
pub use geometry_type::GeomType;
pub use layer::Layer;
pub use properties::FeatureProperties;
pub use property_manager::{LookupTable, PropertyManager};
pub use tile::{VectorTile, encode_tile};
pub use value::AttributeValue;
pub use vector_tile_feature::VectorTileFeature;
pub use wire_layer::WireLayer;
