//! Value writers used to serialize tiles.
//!
//! [`ValueWriter`] provides the primitive and protobuf (PBF) write operations,
//! [`ValueWriterBlob`] collects the written bytes in memory and hands them out as a [`Blob`](crate::Blob).

mod value_writer;
mod value_writer_blob;

pub use value_writer::*;
pub use value_writer_blob::*;
