//! Simplification policy of the encoder.
//!
//! # Example
//!
//! ```yaml
//! simplify: true
//! max_simplification_zoom: 12
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{io::Read, sync::Arc};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct EncoderConfig {
	/// Global switch. When `false`, no layer is simplified.
	pub simplify: bool,

	/// Layers without their own limit are simplified below this zoom level.
	pub max_simplification_zoom: u8,
}

impl Default for EncoderConfig {
	fn default() -> Self {
		EncoderConfig {
			simplify: true,
			max_simplification_zoom: 14,
		}
	}
}

impl EncoderConfig {
	pub fn from_string(text: &str) -> Result<EncoderConfig> {
		serde_yaml_ng::from_str(text).context("Failed to parse encoder configuration")
	}

	pub fn from_reader(reader: impl Read) -> Result<EncoderConfig> {
		serde_yaml_ng::from_reader(reader).context("Failed to parse encoder configuration")
	}

	#[must_use]
	pub fn arc(self) -> Arc<EncoderConfig> {
		Arc::new(self)
	}

	/// Resolves the zoom limit of a layer, where `0` stands for "not set".
	#[must_use]
	pub fn effective_max_zoom(&self, layer_max_zoom: u8) -> u8 {
		if layer_max_zoom == 0 {
			self.max_simplification_zoom
		} else {
			layer_max_zoom
		}
	}
}
