//! Attribute values and their encoding as MVT `Tile.Value` messages.
//!
//! The kind of a value is decided once, when it is converted into an [`AttributeValue`].
//! The mapping to wire fields is asymmetric on purpose:
//!
//! | Rust type                   | variant  | `Tile.Value` field   |
//! |-----------------------------|----------|----------------------|
//! | `String`, `&str`            | `String` | 1 `string_value`     |
//! | `f32`                       | `Float`  | 2 `float_value`      |
//! | `f64`                       | `Double` | 3 `double_value`     |
//! | `i64`                       | `Int`    | 4 `int_value`        |
//! | `u64`                       | `UInt`   | 5 `uint_value`       |
//! | `i8/i16/i32`, `u8/u16/u32`  | `SInt`   | 6 `sint_value`       |
//! | `bool`                      | `Bool`   | 7 `bool_value`       |
//! | anything `Serialize`        | `Opaque` | raw bytes, no field  |

use anyhow::{Context, Result};
use log::trace;
use serde::Serialize;
use std::{
	fmt::Display,
	hash::{Hash, Hasher},
};
use tileforge_core::{
	Blob,
	io::{ValueWriter, ValueWriterBlob},
};

#[derive(Clone, Debug)]
pub enum AttributeValue {
	String(String),
	Bool(bool),
	/// Narrow integers (signed or unsigned, up to 32 bit), widened to `i64`.
	SInt(i64),
	Int(i64),
	UInt(u64),
	Float(f32),
	Double(f64),
	/// Big-endian serialization of a value without a dedicated wire field.
	/// Empty if serialization failed.
	Opaque(Vec<u8>),
}

macro_rules! impl_from {
	($variant:ident, $target:ty, $($t:ty),*) => {$(
		impl From<$t> for AttributeValue {
			fn from(value: $t) -> Self {
				AttributeValue::$variant(<$target>::from(value))
			}
		}
	)*}
}

impl_from!(SInt, i64, i8, i16, i32, u8, u16, u32);
impl_from!(Int, i64, i64);
impl_from!(UInt, u64, u64);
impl_from!(Float, f32, f32);
impl_from!(Double, f64, f64);
impl_from!(Bool, bool, bool);
impl_from!(String, String, String, &str, &String);

impl AttributeValue {
	/// Stores the `Display` output of `value` as a string.
	pub fn from_display<T: Display + ?Sized>(value: &T) -> Self {
		AttributeValue::String(value.to_string())
	}

	/// Best-effort fallback for values without a dedicated wire field.
	///
	/// Serializes big-endian with fixed-width integers. Never fails: a value that cannot be
	/// serialized becomes an empty [`AttributeValue::Opaque`].
	pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
		let config = bincode::config::standard()
			.with_big_endian()
			.with_fixed_int_encoding();
		match bincode::serde::encode_to_vec(value, config) {
			Ok(bytes) => AttributeValue::Opaque(bytes),
			Err(err) => {
				trace!("attribute value could not be serialized, using empty value: {err}");
				AttributeValue::Opaque(Vec::new())
			}
		}
	}

	/// Encodes the value as a `Tile.Value` message.
	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		match self {
			AttributeValue::String(s) => {
				writer
					.write_pbf_key(1, 2)
					.context("Failed to write PBF key for string value")?;
				writer.write_pbf_string(s).context("Failed to write string value")?;
			}
			AttributeValue::Float(f) => {
				writer
					.write_pbf_key(2, 5)
					.context("Failed to write PBF key for float value")?;
				writer.write_f32(*f).context("Failed to write float value")?;
			}
			AttributeValue::Double(f) => {
				writer
					.write_pbf_key(3, 1)
					.context("Failed to write PBF key for double value")?;
				writer.write_f64(*f).context("Failed to write double value")?;
			}
			AttributeValue::Int(i) => {
				writer
					.write_pbf_key(4, 0)
					.context("Failed to write PBF key for int value")?;
				// int64 fields use two's complement varints
				writer.write_varint(*i as u64).context("Failed to write int value")?;
			}
			AttributeValue::UInt(u) => {
				writer
					.write_pbf_key(5, 0)
					.context("Failed to write PBF key for uint value")?;
				writer.write_varint(*u).context("Failed to write uint value")?;
			}
			AttributeValue::SInt(s) => {
				writer
					.write_pbf_key(6, 0)
					.context("Failed to write PBF key for sint value")?;
				writer.write_svarint(*s).context("Failed to write sint value")?;
			}
			AttributeValue::Bool(b) => {
				writer
					.write_pbf_key(7, 0)
					.context("Failed to write PBF key for bool value")?;
				writer
					.write_varint(u64::from(*b))
					.context("Failed to write bool value")?;
			}
			AttributeValue::Opaque(bytes) => {
				writer.write_slice(bytes).context("Failed to write opaque value")?;
			}
		}

		Ok(writer.into_blob())
	}
}

impl PartialEq for AttributeValue {
	fn eq(&self, other: &Self) -> bool {
		use AttributeValue::*;
		match (self, other) {
			(String(a), String(b)) => a == b,
			(Bool(a), Bool(b)) => a == b,
			(SInt(a), SInt(b)) | (Int(a), Int(b)) => a == b,
			(UInt(a), UInt(b)) => a == b,
			(Float(a), Float(b)) => a.to_bits() == b.to_bits(),
			(Double(a), Double(b)) => a.to_bits() == b.to_bits(),
			(Opaque(a), Opaque(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for AttributeValue {}

impl Hash for AttributeValue {
	fn hash<H: Hasher>(&self, state: &mut H) {
		core::mem::discriminant(self).hash(state);
		match self {
			AttributeValue::String(v) => v.hash(state),
			AttributeValue::Bool(v) => v.hash(state),
			AttributeValue::SInt(v) | AttributeValue::Int(v) => v.hash(state),
			AttributeValue::UInt(v) => v.hash(state),
			AttributeValue::Float(v) => v.to_bits().hash(state),
			AttributeValue::Double(v) => v.to_bits().hash(state),
			AttributeValue::Opaque(v) => v.hash(state),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde::Serializer;
	use std::net::Ipv4Addr;

	#[rstest]
	#[case(AttributeValue::from(-5i8), AttributeValue::SInt(-5))]
	#[case(AttributeValue::from(300i16), AttributeValue::SInt(300))]
	#[case(AttributeValue::from(-70_000i32), AttributeValue::SInt(-70_000))]
	#[case(AttributeValue::from(200u8), AttributeValue::SInt(200))]
	#[case(AttributeValue::from(60_000u16), AttributeValue::SInt(60_000))]
	#[case(AttributeValue::from(u32::MAX), AttributeValue::SInt(4_294_967_295))]
	#[case(AttributeValue::from(-5i64), AttributeValue::Int(-5))]
	#[case(AttributeValue::from(5u64), AttributeValue::UInt(5))]
	#[case(AttributeValue::from(1.5f32), AttributeValue::Float(1.5))]
	#[case(AttributeValue::from(1.5f64), AttributeValue::Double(1.5))]
	#[case(AttributeValue::from(true), AttributeValue::Bool(true))]
	#[case(AttributeValue::from("abc"), AttributeValue::String("abc".to_string()))]
	#[case(AttributeValue::from(String::from("abc")), AttributeValue::String("abc".to_string()))]
	fn kind_is_resolved_at_conversion(#[case] value: AttributeValue, #[case] expected: AttributeValue) {
		assert_eq!(value, expected);
	}

	#[test]
	fn narrow_and_wide_integers_use_different_fields() -> Result<()> {
		let narrow = AttributeValue::from(42i16);
		let wide = AttributeValue::from(42i64);
		assert_ne!(narrow, wide);
		assert_eq!(narrow.to_blob()?.into_vec(), vec![0x30, 84]);
		assert_eq!(wide.to_blob()?.into_vec(), vec![0x20, 42]);
		Ok(())
	}

	#[test]
	fn display_values_become_strings() {
		let ip = Ipv4Addr::new(10, 0, 0, 1);
		assert_eq!(AttributeValue::from_display(&ip), AttributeValue::from("10.0.0.1"));
	}

	#[test]
	fn serializable_values_become_big_endian_bytes() {
		#[derive(Serialize)]
		struct Rgb {
			r: u8,
			g: u8,
			b: u8,
		}
		assert_eq!(
			AttributeValue::from_serialize(&Rgb { r: 1, g: 2, b: 3 }),
			AttributeValue::Opaque(vec![1, 2, 3])
		);
		assert_eq!(
			AttributeValue::from_serialize(&[1u16, 258u16]),
			AttributeValue::Opaque(vec![0, 1, 1, 2])
		);
	}

	#[test]
	fn unserializable_values_become_empty() -> Result<()> {
		struct Broken;
		impl Serialize for Broken {
			fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
				Err(serde::ser::Error::custom("not serializable"))
			}
		}
		let value = AttributeValue::from_serialize(&Broken);
		assert_eq!(value, AttributeValue::Opaque(vec![]));
		assert!(value.to_blob()?.is_empty());
		Ok(())
	}

	#[test]
	fn float_equality_is_bitwise() {
		assert_eq!(AttributeValue::Double(f64::NAN), AttributeValue::Double(f64::NAN));
		assert_ne!(AttributeValue::Double(0.0), AttributeValue::Double(-0.0));
		assert_ne!(AttributeValue::Double(1.0), AttributeValue::Float(1.0));
	}

	#[rstest]
	#[case(AttributeValue::from("hello"), vec![0x0A, 0x05, b'h', b'e', b'l', b'l', b'o'])]
	#[case(AttributeValue::Float(1.0), vec![0x15, 0x00, 0x00, 0x80, 0x3F])]
	#[case(AttributeValue::Double(1.0), vec![0x19, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F])]
	#[case(AttributeValue::Int(150), vec![0x20, 0x96, 0x01])]
	#[case(AttributeValue::Int(-1), vec![0x20, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01])]
	#[case(AttributeValue::UInt(150), vec![0x28, 0x96, 0x01])]
	#[case(AttributeValue::SInt(75), vec![0x30, 0x96, 0x01])]
	#[case(AttributeValue::Bool(true), vec![0x38, 0x01])]
	#[case(AttributeValue::Opaque(vec![0xCA, 0xFE]), vec![0xCA, 0xFE])]
	fn to_blob(#[case] value: AttributeValue, #[case] expected: Vec<u8>) -> Result<()> {
		assert_eq!(value.to_blob()?.into_vec(), expected);
		Ok(())
	}
}
