//! Decoded field values.

use crate::document::Document;
use crate::element::{BinarySubtype, ElementType};
use crate::oid::ObjectId;

/// One decoded field value, covering the full element taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Double(f64),
    String(String),
    Document(Document),
    Array(Document),
    Binary { subtype: BinarySubtype, data: Vec<u8> },
    Undefined,
    ObjectId(ObjectId),
    Bool(bool),
    /// Milliseconds since the Unix epoch.
    Date(i64),
    Null,
    Regex { pattern: String, flags: String },
    DbPointer { namespace: String, id: ObjectId },
    Code(String),
    Symbol(String),
    CodeWithScope { code: String, scope: Document },
    Int32(i32),
    Timestamp { increment: u32, time: u32 },
    Int64(i64),
    Decimal128([u8; 16]),
    MinKey,
    MaxKey,
}

impl FieldValue {
    /// The element type this value is carried under on the wire.
    pub fn element_type(&self) -> ElementType {
        match self {
            FieldValue::Double(_) => ElementType::Double,
            FieldValue::String(_) => ElementType::String,
            FieldValue::Document(_) => ElementType::Object,
            FieldValue::Array(_) => ElementType::Array,
            FieldValue::Binary { .. } => ElementType::Binary,
            FieldValue::Undefined => ElementType::Undefined,
            FieldValue::ObjectId(_) => ElementType::ObjectId,
            FieldValue::Bool(_) => ElementType::Bool,
            FieldValue::Date(_) => ElementType::Date,
            FieldValue::Null => ElementType::Null,
            FieldValue::Regex { .. } => ElementType::Regex,
            FieldValue::DbPointer { .. } => ElementType::DbPointer,
            FieldValue::Code(_) => ElementType::Code,
            FieldValue::Symbol(_) => ElementType::Symbol,
            FieldValue::CodeWithScope { .. } => ElementType::CodeWithScope,
            FieldValue::Int32(_) => ElementType::Int32,
            FieldValue::Timestamp { .. } => ElementType::Timestamp,
            FieldValue::Int64(_) => ElementType::Int64,
            FieldValue::Decimal128(_) => ElementType::Decimal128,
            FieldValue::MinKey => ElementType::MinKey,
            FieldValue::MaxKey => ElementType::MaxKey,
        }
    }

    /// Generic numeric reading: int32, int64, and double fields as `f64`,
    /// `None` for everything else.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Int32(v) => Some(f64::from(*v)),
            FieldValue::Int64(v) => Some(*v as f64),
            FieldValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            FieldValue::Document(d) | FieldValue::Array(d) => Some(d),
            _ => None,
        }
    }
}
