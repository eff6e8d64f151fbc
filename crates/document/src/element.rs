//! Element-type taxonomy and wire constants.

/// Upper bound, in bytes, for a document field name.
///
/// The wire format itself places no limit on name length; this bound is the
/// contract the codec layer enforces on caller-supplied string keys before
/// they reach a builder.
pub const MAX_FIELD_NAME_LEN: usize = 256;

/// Element type tag, the first byte of every document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementType {
    /// 64-bit IEEE 754 floating point.
    Double = 0x01,
    /// UTF-8 string, length-prefixed (embedded NULs survive).
    String = 0x02,
    /// Embedded document.
    Object = 0x03,
    /// Embedded document with conventional `"0".."n"` field names.
    Array = 0x04,
    /// Binary payload with a subtype byte.
    Binary = 0x05,
    /// Deprecated marker type; still decoded.
    Undefined = 0x06,
    /// 12-byte object id.
    ObjectId = 0x07,
    Bool = 0x08,
    /// UTC datetime, milliseconds since the Unix epoch, signed.
    Date = 0x09,
    Null = 0x0a,
    /// Regular expression: two C-strings (pattern, flags).
    Regex = 0x0b,
    /// Deprecated namespace/id pair; still decoded.
    DbPointer = 0x0c,
    /// JavaScript code.
    Code = 0x0d,
    /// Deprecated interned string; still decoded.
    Symbol = 0x0e,
    /// Deprecated code-plus-scope-document; still decoded.
    CodeWithScope = 0x0f,
    Int32 = 0x10,
    /// Internal replication timestamp (increment, seconds), not a datetime.
    Timestamp = 0x11,
    Int64 = 0x12,
    /// 128-bit IEEE 754-2008 decimal, carried as raw bytes.
    Decimal128 = 0x13,
    MaxKey = 0x7f,
    MinKey = 0xff,
}

impl ElementType {
    /// Maps a wire tag to its element type. `0x00` (the end-of-object
    /// sentinel) and unassigned tags return `None`.
    pub fn from_u8(tag: u8) -> Option<ElementType> {
        Some(match tag {
            0x01 => ElementType::Double,
            0x02 => ElementType::String,
            0x03 => ElementType::Object,
            0x04 => ElementType::Array,
            0x05 => ElementType::Binary,
            0x06 => ElementType::Undefined,
            0x07 => ElementType::ObjectId,
            0x08 => ElementType::Bool,
            0x09 => ElementType::Date,
            0x0a => ElementType::Null,
            0x0b => ElementType::Regex,
            0x0c => ElementType::DbPointer,
            0x0d => ElementType::Code,
            0x0e => ElementType::Symbol,
            0x0f => ElementType::CodeWithScope,
            0x10 => ElementType::Int32,
            0x11 => ElementType::Timestamp,
            0x12 => ElementType::Int64,
            0x13 => ElementType::Decimal128,
            0x7f => ElementType::MaxKey,
            0xff => ElementType::MinKey,
            _ => return None,
        })
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Subtype byte of a binary element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinarySubtype {
    /// Generic binary data (0x00).
    Generic,
    /// Compiled function (0x01).
    Function,
    /// Old generic subtype (0x02). The historical inner length prefix is not
    /// interpreted; the payload is carried raw.
    BinaryOld,
    /// Legacy UUID (0x03).
    UuidLegacy,
    /// UUID (0x04).
    Uuid,
    /// MD5 digest (0x05).
    Md5,
    /// User-defined range (0x80..=0xff).
    UserDefined(u8),
    /// Assigned but unmodeled range (0x06..=0x7f).
    Reserved(u8),
}

impl BinarySubtype {
    pub fn from_u8(byte: u8) -> BinarySubtype {
        match byte {
            0x00 => BinarySubtype::Generic,
            0x01 => BinarySubtype::Function,
            0x02 => BinarySubtype::BinaryOld,
            0x03 => BinarySubtype::UuidLegacy,
            0x04 => BinarySubtype::Uuid,
            0x05 => BinarySubtype::Md5,
            b if b >= 0x80 => BinarySubtype::UserDefined(b),
            b => BinarySubtype::Reserved(b),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            BinarySubtype::Generic => 0x00,
            BinarySubtype::Function => 0x01,
            BinarySubtype::BinaryOld => 0x02,
            BinarySubtype::UuidLegacy => 0x03,
            BinarySubtype::Uuid => 0x04,
            BinarySubtype::Md5 => 0x05,
            BinarySubtype::UserDefined(b) => b,
            BinarySubtype::Reserved(b) => b,
        }
    }
}
