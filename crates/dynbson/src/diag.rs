//! Advisory diagnostics for skipped values.

use std::fmt;

use crate::value::Key;

/// A non-fatal note about a value the codec skipped.
///
/// Diagnostics never fail a conversion. They accumulate on the encoder or
/// decoder that produced them and are mirrored as `tracing` warnings, so a
/// caller can either inspect them programmatically or just watch the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An array entry whose runtime type has no document representation.
    UnsupportedElement { key: Key, kind: &'static str },
    /// A document field whose element type has no dynamic representation.
    UnsupportedField { name: String, element_type: u8 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedElement { kind, .. } => {
                write!(f, "array=>bson: type {kind} not supported")
            }
            Diagnostic::UnsupportedField { element_type, .. } => {
                write!(f, "bson=>array: type 0x{element_type:02x} not supported")
            }
        }
    }
}
