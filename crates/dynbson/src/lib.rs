//! Bidirectional codec between a loosely-typed dynamic value model and BSON
//! documents.
//!
//! The dynamic side is [`Array`]: one ordered container whose entries are
//! keyed by either integer index or string, the way dynamic host runtimes
//! blur lists and maps together. The document side lives in the
//! [`dynbson-document`](dynbson_document) crate and is re-exported here.
//!
//! [`Encoder`] walks an array into a [`DocumentBuilder`]; [`Decoder`] walks a
//! [`Document`]'s fields back into an array, classifying each field name as
//! index or string exactly once. Values with no representation on the other
//! side are skipped with an advisory [`Diagnostic`] rather than failing the
//! conversion; malformed input and broken caller contracts fail with
//! [`CodecError`].
//!
//! ```
//! use dynbson::{Array, Decoder, Encoder, Value};
//!
//! let mut array = Array::new();
//! array.insert("greeting", Value::from("hello"));
//! array.push(Value::Int(42));
//!
//! let doc = Encoder::new().encode(&array).unwrap();
//! let back = Decoder::new().decode(&doc).unwrap();
//! assert_eq!(back, array);
//! ```

pub mod decode;
pub mod diag;
pub mod encode;
pub mod error;
pub mod json;
pub mod options;
pub mod value;

pub use decode::Decoder;
pub use diag::Diagnostic;
pub use encode::{prepare_for_persistence, Encoder};
pub use error::CodecError;
pub use options::{CodecOptions, DEFAULT_MAX_DEPTH};
pub use value::{Array, BinaryValue, DateValue, Key, ObjectIdValue, RegexValue, Value};

pub use dynbson_document::{
    BinarySubtype, Document, DocumentBuilder, DocumentError, DocumentIter, ElementType,
    FieldValue, ObjectId, MAX_FIELD_NAME_LEN,
};
