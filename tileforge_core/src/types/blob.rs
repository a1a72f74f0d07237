//! This module provides the [`Blob`] struct, a wrapper around [`Vec<u8>`] holding encoded tile data.
//!
//! # Examples
//!
//! ```rust
//! use tileforge_core::Blob;
//!
//! let blob = Blob::from(vec![0x1A, 0x03, b'k', b'e', b'y']);
//! assert_eq!(blob.len(), 5);
//! assert_eq!(blob.as_hex(), "1a 03 6b 65 79");
//! ```

use std::fmt::Debug;

/// A simple wrapper around [`Vec<u8>`] for encoded protobuf messages.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Returns a reference to the underlying byte slice.
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		self.0.as_ref()
	}

	/// Consumes this [`Blob`] and returns the underlying `Vec<u8>`.
	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Returns the bytes as lowercase hex pairs separated by spaces.
	#[must_use]
	pub fn as_hex(&self) -> String {
		self
			.0
			.iter()
			.map(|byte| format!("{byte:02x}"))
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Returns the number of bytes.
	///
	/// The length is a `u64` because it is usually written straight into a varint.
	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	/// Returns `true` if the blob holds no bytes.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		const MAX: usize = 32;
		if self.0.len() > MAX {
			let head = Blob::from(&self.0[..MAX]);
			write!(f, "Blob({}): {} …", self.0.len(), head.as_hex())
		} else {
			write!(f, "Blob({}): {}", self.0.len(), self.as_hex())
		}
	}
}
