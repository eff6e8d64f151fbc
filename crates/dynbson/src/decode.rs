//! Document to dynamic array decoding.

use dynbson_document::{Document, FieldValue};

use crate::diag::Diagnostic;
use crate::error::CodecError;
use crate::options::CodecOptions;
use crate::value::{Array, BinaryValue, DateValue, Key, ObjectIdValue, RegexValue, Value};

/// Decodes documents into dynamic arrays.
///
/// Field order is preserved. Each field name is classified exactly once: a
/// strict base-10 parse that yields a nonzero integer, or the literal name
/// `"0"`, makes an integer index; everything else stays a string key. Fields
/// whose element type has no dynamic representation are skipped with a
/// [`Diagnostic`]; malformed wire bytes abort with an error.
#[derive(Debug)]
pub struct Decoder {
    pub options: CodecOptions,
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::with_options(CodecOptions::default())
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self {
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Decodes a document. An empty document yields an empty array.
    pub fn decode(&mut self, doc: &Document) -> Result<Array, CodecError> {
        self.decode_level(doc, 0)
    }

    /// Validates raw bytes as a document frame and decodes them.
    pub fn decode_bytes(&mut self, bytes: &[u8]) -> Result<Array, CodecError> {
        let doc = Document::from_bytes(bytes.to_vec())?;
        self.decode(&doc)
    }

    fn decode_level(&mut self, doc: &Document, depth: usize) -> Result<Array, CodecError> {
        if depth >= self.options.max_depth {
            return Err(CodecError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        let mut array = Array::new();
        for field in doc.iter() {
            let (name, value) = field?;
            let value = match value {
                FieldValue::Double(v) => Value::Float(v),
                FieldValue::String(v) => Value::Str(v),
                // Object and array tags decode alike; list-ness is carried by
                // the field names.
                FieldValue::Document(child) | FieldValue::Array(child) => {
                    Value::Array(self.decode_level(&child, depth + 1)?)
                }
                FieldValue::Binary { subtype, data } => Value::Binary(BinaryValue {
                    length: data.len() as i64,
                    subtype: i64::from(subtype.as_u8()),
                    bin: data,
                }),
                FieldValue::Undefined | FieldValue::Null => Value::Null,
                FieldValue::ObjectId(id) => Value::ObjectId(ObjectIdValue { id: id.to_hex() }),
                FieldValue::Bool(v) => Value::Bool(v),
                FieldValue::Date(ms) => Value::Date(DateValue::from_timestamp_ms(ms)),
                FieldValue::Regex { pattern, flags } => Value::Regex(RegexValue {
                    regex: pattern,
                    flags,
                }),
                FieldValue::Int32(v) => Value::Int(i64::from(v)),
                unsupported => {
                    self.report(Diagnostic::UnsupportedField {
                        name,
                        element_type: unsupported.element_type().as_u8(),
                    });
                    continue;
                }
            };
            array.insert(classify_key(name), value);
        }
        Ok(array)
    }

    fn report(&mut self, diag: Diagnostic) {
        tracing::warn!("{diag}");
        self.diagnostics.push(diag);
    }
}

/// The index-versus-string key heuristic.
///
/// A name whose strict base-10 parse is nonzero, or that is exactly `"0"`,
/// becomes an integer index; every other name stays a string key. Lossy on
/// purpose for names like `"007"`, which come back as index 7; zero-padded
/// zeros (`"00"`) and names that fail the strict parse (`" 1"`, `"12abc"`)
/// stay strings.
fn classify_key(name: String) -> Key {
    match name.parse::<i64>() {
        Ok(n) if n != 0 || name == "0" => Key::Index(n),
        _ => Key::Str(name),
    }
}
