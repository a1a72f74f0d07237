//! Shared building blocks for tileforge: byte containers, protobuf value writers and tile coordinates.

pub mod io;

pub mod types;

pub use types::*;
