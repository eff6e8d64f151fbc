//! Wire-level document support for dynbson.
//!
//! This crate owns the typed-document side of the codec: an append-only
//! [`DocumentBuilder`], the finalized [`Document`] with its lazy field
//! iterator, the element-type taxonomy, and [`ObjectId`] generation. It knows
//! nothing about the dynamic value model; the `dynbson` crate maps between
//! the two.
//!
//! Wire layout in brief: a document is a little-endian i32 total size, a run
//! of elements, and a 0x00 terminator. Each element is a type tag byte, a
//! NUL-terminated field name, and a type-specific payload.

pub mod builder;
pub mod document;
pub mod element;
pub mod error;
pub mod field;
pub mod oid;

pub use builder::DocumentBuilder;
pub use document::{Document, DocumentIter};
pub use element::{BinarySubtype, ElementType, MAX_FIELD_NAME_LEN};
pub use error::DocumentError;
pub use field::FieldValue;
pub use oid::ObjectId;
