//! Codec error type.

use dynbson_document::DocumentError;
use thiserror::Error;

/// Fatal conversion errors.
///
/// Unsupported value or element types are deliberately absent: those are
/// skipped with a [`Diagnostic`](crate::Diagnostic) instead of failing the
/// conversion. Everything here aborts the conversion that raised it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A string key is longer than the document field-name bound.
    #[error("field name of {len} bytes exceeds the {max}-byte bound")]
    FieldNameTooLong { len: usize, max: usize },
    /// A string key contains a NUL byte and cannot be a field name.
    #[error("field name contains a NUL byte")]
    InvalidFieldName,
    /// Nesting went past [`CodecOptions::max_depth`](crate::CodecOptions).
    #[error("nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },
    /// A binary wrapper declares more significant bytes than it holds.
    #[error("binary wrapper declares {declared} bytes but holds {actual}")]
    BinaryLengthMismatch { declared: i64, actual: usize },
    /// Malformed wire bytes, surfaced from the document layer.
    #[error(transparent)]
    Document(#[from] DocumentError),
}
