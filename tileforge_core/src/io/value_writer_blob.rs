//! This module provides the `ValueWriterBlob` struct for writing values into an in-memory [`Blob`].
//!
//! # Examples
//!
//! ```rust
//! use tileforge_core::io::{ValueWriter, ValueWriterBlob};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ValueWriterBlob::new_le();
//!     writer.write_varint(1025)?;
//!     assert_eq!(writer.into_blob().into_vec(), vec![0b1000_0001, 0b0000_1000]);
//!     Ok(())
//! }
//! ```

use super::ValueWriter;
use crate::Blob;
use byteorder::{ByteOrder, LittleEndian};
use std::io::{Cursor, Write};
use std::marker::PhantomData;

/// Writes values into a growing in-memory buffer using the byte order `E`.
pub struct ValueWriterBlob<E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<Vec<u8>>,
}

impl<E: ByteOrder> ValueWriterBlob<E> {
	/// Creates an empty writer.
	#[must_use]
	pub fn new() -> ValueWriterBlob<E> {
		ValueWriterBlob {
			_phantom: PhantomData,
			cursor: Cursor::new(Vec::new()),
		}
	}

	/// Converts the written data into a [`Blob`].
	#[must_use]
	pub fn into_blob(self) -> Blob {
		Blob::from(self.cursor.into_inner())
	}
}

impl ValueWriterBlob<LittleEndian> {
	/// Creates a little-endian writer, the byte order of protobuf fixed-width fields.
	#[must_use]
	pub fn new_le() -> ValueWriterBlob<LittleEndian> {
		ValueWriterBlob::new()
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterBlob<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.cursor
	}
}

impl<E: ByteOrder> Default for ValueWriterBlob<E> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::Result;

	#[test]
	fn little_endian_floats() -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_f32(1.0)?;
		assert_eq!(writer.into_blob().into_vec(), vec![0x00, 0x00, 0x80, 0x3F]);
		Ok(())
	}

	#[test]
	fn default_writer_starts_empty() -> Result<()> {
		assert!(ValueWriterBlob::<LittleEndian>::default().into_blob().is_empty());

		let mut writer = ValueWriterBlob::<LittleEndian>::default();
		writer.write_pbf_string("abc")?;
		assert_eq!(writer.into_blob().into_vec(), vec![3, b'a', b'b', b'c']);
		Ok(())
	}
}
