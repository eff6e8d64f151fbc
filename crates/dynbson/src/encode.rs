//! Dynamic array to document encoding.

use std::borrow::Cow;

use dynbson_document::{
    BinarySubtype, Document, DocumentBuilder, ObjectId, MAX_FIELD_NAME_LEN,
};

use crate::diag::Diagnostic;
use crate::error::CodecError;
use crate::options::CodecOptions;
use crate::value::{Array, BinaryValue, Key, Value};

/// Encodes dynamic arrays into documents.
///
/// A single instance can encode any number of arrays; the only state carried
/// between calls is the accumulated [`Diagnostic`] list.
///
/// Integer values narrow to 32 bits (`i64 as i32` wrapping), matching the
/// narrow integer model of the hosts this codec serves. Nested arrays are
/// always encoded under the object tag, whatever their key shape; a decoder
/// reconstructs list-ness from the field names alone.
#[derive(Debug)]
pub struct Encoder {
    pub options: CodecOptions,
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::with_options(CodecOptions::default())
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self {
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Encodes an array into a fresh, finalized document.
    pub fn encode(&mut self, array: &Array) -> Result<Document, CodecError> {
        let mut builder = DocumentBuilder::new();
        self.encode_into(&mut builder, array)?;
        Ok(builder.finalize())
    }

    /// Appends an array's entries to an existing builder and returns the
    /// number of entries visited. Entries skipped as unsupported still
    /// count; an empty array short-circuits to 0 without touching the
    /// builder.
    pub fn encode_into(
        &mut self,
        builder: &mut DocumentBuilder,
        array: &Array,
    ) -> Result<usize, CodecError> {
        self.encode_level(builder, array, 0)
    }

    fn encode_level(
        &mut self,
        builder: &mut DocumentBuilder,
        array: &Array,
        depth: usize,
    ) -> Result<usize, CodecError> {
        if depth >= self.options.max_depth {
            return Err(CodecError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        if array.is_empty() {
            return Ok(0);
        }

        let mut visited = 0;
        for (key, value) in array {
            visited += 1;
            let name = field_name(key)?;
            match value {
                Value::Null => builder.append_null(&name),
                Value::Int(v) => builder.append_i32(&name, *v as i32),
                Value::Float(v) => builder.append_f64(&name, *v),
                Value::Bool(v) => builder.append_bool(&name, *v),
                Value::Str(v) => builder.append_str(&name, v),
                Value::Array(nested) => {
                    let mut child = DocumentBuilder::new();
                    self.encode_level(&mut child, nested, depth + 1)?;
                    builder.append_document(&name, &child.finalize());
                }
                Value::ObjectId(v) => {
                    let id = ObjectId::from_hex(&v.id)?;
                    builder.append_object_id(&name, &id);
                }
                Value::Date(v) => builder.append_date(&name, v.timestamp_ms()),
                Value::Regex(v) => builder.append_regex(&name, &v.regex, &v.flags),
                Value::Binary(v) => {
                    builder.append_binary(&name, wire_subtype(v.subtype), significant_bytes(v)?)
                }
                Value::Opaque(kind) => self.report(Diagnostic::UnsupportedElement {
                    key: key.clone(),
                    kind: *kind,
                }),
            }
        }
        Ok(visited)
    }

    fn report(&mut self, diag: Diagnostic) {
        tracing::warn!("{diag}");
        self.diagnostics.push(diag);
    }
}

/// Appends a freshly generated object id under the reserved `_id` name.
///
/// The id lands wherever the builder currently is, so callers that want it
/// first append it first. Generation cannot fail.
pub fn prepare_for_persistence(builder: &mut DocumentBuilder) {
    builder.append_object_id("_id", &ObjectId::generate());
}

/// Renders a key as a field name, enforcing the name policy on string keys:
/// at most [`MAX_FIELD_NAME_LEN`] bytes and no embedded NUL.
fn field_name(key: &Key) -> Result<Cow<'_, str>, CodecError> {
    match key {
        Key::Index(i) => Ok(Cow::Owned(i.to_string())),
        Key::Str(s) => {
            if s.len() > MAX_FIELD_NAME_LEN {
                return Err(CodecError::FieldNameTooLong {
                    len: s.len(),
                    max: MAX_FIELD_NAME_LEN,
                });
            }
            if s.as_bytes().contains(&0) {
                return Err(CodecError::InvalidFieldName);
            }
            Ok(Cow::Borrowed(s.as_str()))
        }
    }
}

/// Maps a host subtype code to the wire subtype: 1 function, 3 legacy UUID,
/// 5 MD5, 128 user-defined; anything else is generic bytes.
fn wire_subtype(code: i64) -> BinarySubtype {
    match code {
        1 => BinarySubtype::Function,
        3 => BinarySubtype::UuidLegacy,
        5 => BinarySubtype::Md5,
        128 => BinarySubtype::UserDefined(0x80),
        _ => BinarySubtype::Generic,
    }
}

/// The declared-significant prefix of a binary wrapper's buffer.
fn significant_bytes(value: &BinaryValue) -> Result<&[u8], CodecError> {
    if value.length < 0 || value.length as usize > value.bin.len() {
        return Err(CodecError::BinaryLengthMismatch {
            declared: value.length,
            actual: value.bin.len(),
        });
    }
    Ok(&value.bin[..value.length as usize])
}
