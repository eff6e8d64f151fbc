//! Finalized documents and field iteration.

use crate::element::{BinarySubtype, ElementType};
use crate::error::DocumentError;
use crate::field::FieldValue;
use crate::oid::ObjectId;

/// An immutable, finalized document.
///
/// The frame is validated on construction; element payloads are validated
/// lazily while iterating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    data: Vec<u8>,
}

impl Document {
    /// Wraps raw bytes after validating the frame: at least five bytes, a
    /// little-endian size prefix equal to the buffer length, and a trailing
    /// 0x00 terminator.
    pub fn from_bytes(data: Vec<u8>) -> Result<Document, DocumentError> {
        if data.len() < 5 {
            return Err(DocumentError::UnexpectedEof);
        }
        let declared = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        if declared < 0 || declared as usize != data.len() {
            return Err(DocumentError::InvalidSize {
                declared: i64::from(declared),
                actual: data.len(),
            });
        }
        if data[data.len() - 1] != 0 {
            return Err(DocumentError::MissingTerminator);
        }
        Ok(Document { data })
    }

    /// Builder output is framed by construction.
    pub(crate) fn from_vec_unchecked(data: Vec<u8>) -> Document {
        Document { data }
    }

    /// A document with zero fields.
    pub fn empty() -> Document {
        Document {
            data: vec![5, 0, 0, 0, 0],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// `true` when the document holds no fields.
    pub fn is_empty(&self) -> bool {
        self.data.len() == 5
    }

    /// Iterates fields lazily, in stored order.
    pub fn iter(&self) -> DocumentIter<'_> {
        DocumentIter {
            data: &self.data,
            x: 4,
            done: false,
        }
    }

    /// Collects every field, or the first wire error.
    pub fn fields(&self) -> Result<Vec<(String, FieldValue)>, DocumentError> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = Result<(String, FieldValue), DocumentError>;
    type IntoIter = DocumentIter<'a>;

    fn into_iter(self) -> DocumentIter<'a> {
        self.iter()
    }
}

/// Lazy field iterator.
///
/// Yields `(name, value)` pairs in stored order and fuses after the
/// end-of-object sentinel or the first error. Nested documents are sliced out
/// whole and re-framed, so a corrupt nested size surfaces as an error on the
/// field that carries it.
pub struct DocumentIter<'a> {
    data: &'a [u8],
    x: usize,
    done: bool,
}

impl Iterator for DocumentIter<'_> {
    type Item = Result<(String, FieldValue), DocumentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_element() {
            Ok(Some(field)) => Some(Ok(field)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl DocumentIter<'_> {
    fn read_element(&mut self) -> Result<Option<(String, FieldValue)>, DocumentError> {
        let tag = self.u8()?;
        if tag == 0 {
            return Ok(None);
        }
        let ty = ElementType::from_u8(tag).ok_or(DocumentError::UnsupportedElementType(tag))?;
        let name = self.cstring()?;
        let value = self.value(ty)?;
        Ok(Some((name, value)))
    }

    fn value(&mut self, ty: ElementType) -> Result<FieldValue, DocumentError> {
        Ok(match ty {
            ElementType::Double => FieldValue::Double(f64::from_le_bytes(self.take8()?)),
            ElementType::String => FieldValue::String(self.string()?),
            ElementType::Object => FieldValue::Document(self.document()?),
            ElementType::Array => FieldValue::Array(self.document()?),
            ElementType::Binary => {
                let (subtype, data) = self.binary()?;
                FieldValue::Binary { subtype, data }
            }
            ElementType::Undefined => FieldValue::Undefined,
            ElementType::ObjectId => FieldValue::ObjectId(self.object_id()?),
            ElementType::Bool => FieldValue::Bool(self.u8()? != 0),
            ElementType::Date => FieldValue::Date(i64::from_le_bytes(self.take8()?)),
            ElementType::Null => FieldValue::Null,
            ElementType::Regex => FieldValue::Regex {
                pattern: self.cstring()?,
                flags: self.cstring()?,
            },
            ElementType::DbPointer => FieldValue::DbPointer {
                namespace: self.string()?,
                id: self.object_id()?,
            },
            ElementType::Code => FieldValue::Code(self.string()?),
            ElementType::Symbol => FieldValue::Symbol(self.string()?),
            ElementType::CodeWithScope => {
                // total-size prefix is redundant with the inner frames
                let _total = self.i32()?;
                FieldValue::CodeWithScope {
                    code: self.string()?,
                    scope: self.document()?,
                }
            }
            ElementType::Int32 => FieldValue::Int32(self.i32()?),
            ElementType::Timestamp => FieldValue::Timestamp {
                increment: u32::from_le_bytes(self.take4()?),
                time: u32::from_le_bytes(self.take4()?),
            },
            ElementType::Int64 => FieldValue::Int64(i64::from_le_bytes(self.take8()?)),
            ElementType::Decimal128 => {
                let bytes = self.take(16)?;
                let mut raw = [0u8; 16];
                raw.copy_from_slice(bytes);
                FieldValue::Decimal128(raw)
            }
            ElementType::MinKey => FieldValue::MinKey,
            ElementType::MaxKey => FieldValue::MaxKey,
        })
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), DocumentError> {
        if self.x + n > self.data.len() {
            Err(DocumentError::UnexpectedEof)
        } else {
            Ok(())
        }
    }

    fn u8(&mut self) -> Result<u8, DocumentError> {
        self.check(1)?;
        let val = self.data[self.x];
        self.x += 1;
        Ok(val)
    }

    fn i32(&mut self) -> Result<i32, DocumentError> {
        Ok(i32::from_le_bytes(self.take4()?))
    }

    fn take(&mut self, n: usize) -> Result<&[u8], DocumentError> {
        self.check(n)?;
        let bytes = &self.data[self.x..self.x + n];
        self.x += n;
        Ok(bytes)
    }

    fn take4(&mut self) -> Result<[u8; 4], DocumentError> {
        self.check(4)?;
        let val = [
            self.data[self.x],
            self.data[self.x + 1],
            self.data[self.x + 2],
            self.data[self.x + 3],
        ];
        self.x += 4;
        Ok(val)
    }

    fn take8(&mut self) -> Result<[u8; 8], DocumentError> {
        self.check(8)?;
        let mut val = [0u8; 8];
        val.copy_from_slice(&self.data[self.x..self.x + 8]);
        self.x += 8;
        Ok(val)
    }

    /// Reads up to the next NUL; the terminator is consumed, not returned.
    fn cstring(&mut self) -> Result<String, DocumentError> {
        let start = self.x;
        while self.x < self.data.len() && self.data[self.x] != 0 {
            self.x += 1;
        }
        if self.x >= self.data.len() {
            return Err(DocumentError::UnexpectedEof);
        }
        let s = String::from_utf8(self.data[start..self.x].to_vec())
            .map_err(|_| DocumentError::InvalidUtf8)?;
        self.x += 1;
        Ok(s)
    }

    /// Reads a length-prefixed string; the declared length includes the
    /// terminator.
    fn string(&mut self) -> Result<String, DocumentError> {
        let length = self.i32()?;
        if length < 1 {
            return Err(DocumentError::InvalidSize {
                declared: i64::from(length),
                actual: self.data.len() - self.x,
            });
        }
        let bytes = self.take(length as usize - 1)?;
        let s = String::from_utf8(bytes.to_vec()).map_err(|_| DocumentError::InvalidUtf8)?;
        self.u8()?;
        Ok(s)
    }

    fn binary(&mut self) -> Result<(BinarySubtype, Vec<u8>), DocumentError> {
        let length = self.i32()?;
        if length < 0 {
            return Err(DocumentError::InvalidSize {
                declared: i64::from(length),
                actual: self.data.len() - self.x,
            });
        }
        let subtype = BinarySubtype::from_u8(self.u8()?);
        let data = self.take(length as usize)?.to_vec();
        Ok((subtype, data))
    }

    fn object_id(&mut self) -> Result<ObjectId, DocumentError> {
        let bytes = self.take(12)?;
        let mut raw = [0u8; 12];
        raw.copy_from_slice(bytes);
        Ok(ObjectId::from_bytes(raw))
    }

    /// Slices out a whole nested document and re-frames it.
    fn document(&mut self) -> Result<Document, DocumentError> {
        self.check(4)?;
        let declared = i32::from_le_bytes([
            self.data[self.x],
            self.data[self.x + 1],
            self.data[self.x + 2],
            self.data[self.x + 3],
        ]);
        if declared < 5 || self.x + declared as usize > self.data.len() {
            return Err(DocumentError::InvalidSize {
                declared: i64::from(declared),
                actual: self.data.len() - self.x,
            });
        }
        let bytes = self.data[self.x..self.x + declared as usize].to_vec();
        self.x += declared as usize;
        Document::from_bytes(bytes)
    }
}
