//! Append-only document builder.

use crate::document::Document;
use crate::element::{BinarySubtype, ElementType};
use crate::oid::ObjectId;

/// Builds a document field by field, in insertion order.
///
/// Every element is `tag byte, C-string name, payload`, with multi-byte
/// integers little-endian. Field names and regex components are C-strings on
/// the wire, so writing stops at an embedded NUL byte; string *values* are
/// length-prefixed and keep NULs intact. Callers that need a name policy
/// enforce it before appending.
///
/// [`finalize`](DocumentBuilder::finalize) consumes the builder; a nested
/// document is finalized first and appended to its parent whole.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    body: Vec<u8>,
    fields: usize,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            body: Vec::new(),
            fields: 0,
        }
    }

    /// Number of fields appended so far.
    pub fn len(&self) -> usize {
        self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields == 0
    }

    pub fn append_null(&mut self, name: &str) {
        self.element(ElementType::Null, name);
    }

    pub fn append_undefined(&mut self, name: &str) {
        self.element(ElementType::Undefined, name);
    }

    pub fn append_bool(&mut self, name: &str, value: bool) {
        self.element(ElementType::Bool, name);
        self.body.push(u8::from(value));
    }

    pub fn append_i32(&mut self, name: &str, value: i32) {
        self.element(ElementType::Int32, name);
        self.body.extend_from_slice(&value.to_le_bytes());
    }

    pub fn append_i64(&mut self, name: &str, value: i64) {
        self.element(ElementType::Int64, name);
        self.body.extend_from_slice(&value.to_le_bytes());
    }

    pub fn append_f64(&mut self, name: &str, value: f64) {
        self.element(ElementType::Double, name);
        self.body.extend_from_slice(&value.to_le_bytes());
    }

    pub fn append_str(&mut self, name: &str, value: &str) {
        self.element(ElementType::String, name);
        self.string(value);
    }

    /// Appends a UTC datetime as milliseconds since the Unix epoch.
    pub fn append_date(&mut self, name: &str, timestamp_ms: i64) {
        self.element(ElementType::Date, name);
        self.body.extend_from_slice(&timestamp_ms.to_le_bytes());
    }

    pub fn append_regex(&mut self, name: &str, pattern: &str, flags: &str) {
        self.element(ElementType::Regex, name);
        self.cstring(pattern);
        self.cstring(flags);
    }

    pub fn append_object_id(&mut self, name: &str, id: &ObjectId) {
        self.element(ElementType::ObjectId, name);
        self.body.extend_from_slice(&id.bytes());
    }

    pub fn append_binary(&mut self, name: &str, subtype: BinarySubtype, data: &[u8]) {
        self.element(ElementType::Binary, name);
        self.body.extend_from_slice(&(data.len() as i32).to_le_bytes());
        self.body.push(subtype.as_u8());
        self.body.extend_from_slice(data);
    }

    /// Appends a finalized document as a nested object field.
    pub fn append_document(&mut self, name: &str, doc: &Document) {
        self.element(ElementType::Object, name);
        self.body.extend_from_slice(doc.as_bytes());
    }

    /// Appends a finalized document under the array tag. The conventional
    /// `"0".."n"` field naming is up to the caller.
    pub fn append_array(&mut self, name: &str, doc: &Document) {
        self.element(ElementType::Array, name);
        self.body.extend_from_slice(doc.as_bytes());
    }

    pub fn append_code(&mut self, name: &str, code: &str) {
        self.element(ElementType::Code, name);
        self.string(code);
    }

    pub fn append_symbol(&mut self, name: &str, symbol: &str) {
        self.element(ElementType::Symbol, name);
        self.string(symbol);
    }

    pub fn append_code_with_scope(&mut self, name: &str, code: &str, scope: &Document) {
        self.element(ElementType::CodeWithScope, name);
        // total = i32 prefix + string + scope document
        let code_len = code.as_bytes().len() + 5;
        let total = (4 + code_len + scope.as_bytes().len()) as i32;
        self.body.extend_from_slice(&total.to_le_bytes());
        self.string(code);
        self.body.extend_from_slice(scope.as_bytes());
    }

    pub fn append_db_pointer(&mut self, name: &str, namespace: &str, id: &ObjectId) {
        self.element(ElementType::DbPointer, name);
        self.string(namespace);
        self.body.extend_from_slice(&id.bytes());
    }

    /// Appends a replication timestamp: increment then seconds, each u32.
    pub fn append_timestamp(&mut self, name: &str, increment: u32, time: u32) {
        self.element(ElementType::Timestamp, name);
        self.body.extend_from_slice(&increment.to_le_bytes());
        self.body.extend_from_slice(&time.to_le_bytes());
    }

    /// Appends a 128-bit decimal as its raw little-endian bytes.
    pub fn append_decimal128(&mut self, name: &str, bytes: &[u8; 16]) {
        self.element(ElementType::Decimal128, name);
        self.body.extend_from_slice(bytes);
    }

    pub fn append_min_key(&mut self, name: &str) {
        self.element(ElementType::MinKey, name);
    }

    pub fn append_max_key(&mut self, name: &str) {
        self.element(ElementType::MaxKey, name);
    }

    /// Consumes the builder and frames the document: little-endian i32 total
    /// size (header and trailer included), body, 0x00 terminator.
    pub fn finalize(self) -> Document {
        let size = self.body.len() + 5;
        let mut data = Vec::with_capacity(size);
        data.extend_from_slice(&(size as i32).to_le_bytes());
        data.extend_from_slice(&self.body);
        data.push(0);
        Document::from_vec_unchecked(data)
    }

    fn element(&mut self, tag: ElementType, name: &str) {
        self.body.push(tag.as_u8());
        self.cstring(name);
        self.fields += 1;
    }

    /// Writes a null-terminated C-string. Stops at any NUL byte in the input.
    fn cstring(&mut self, s: &str) {
        for byte in s.bytes() {
            if byte == 0 {
                break;
            }
            self.body.push(byte);
        }
        self.body.push(0);
    }

    /// Writes a length-prefixed string: little-endian i32 (byte count + 1),
    /// UTF-8 bytes, 0x00.
    fn string(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let len = (bytes.len() as i32) + 1;
        self.body.extend_from_slice(&len.to_le_bytes());
        self.body.extend_from_slice(bytes);
        self.body.push(0);
    }
}
