//! Wire-level error type.

use thiserror::Error;

/// Errors raised while framing or iterating a document.
///
/// Any of these means the byte stream is not a well-formed document; there is
/// no recovery point past the failing element because element payload sizes
/// are only knowable for recognized tags.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("unexpected end of document")]
    UnexpectedEof,
    #[error("string data is not valid UTF-8")]
    InvalidUtf8,
    #[error("unsupported element type tag 0x{0:02x}")]
    UnsupportedElementType(u8),
    #[error("declared size {declared} does not match {actual} available bytes")]
    InvalidSize { declared: i64, actual: usize },
    #[error("document is missing its terminator byte")]
    MissingTerminator,
    #[error("invalid object id {0:?}")]
    InvalidObjectId(String),
}
