//! The dynamic value model.
//!
//! [`Array`] is the single container type: an ordered sequence of entries
//! keyed by either a sequential integer index or an arbitrary string, the way
//! loosely-typed host runtimes blur lists and maps into one structure. Keys
//! carry their kind in the type, so "is this name an index?" is decided at
//! the conversion boundary exactly once and never re-guessed downstream.

use std::fmt;

/// An array key: a sequential integer index or an arbitrary string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(i64),
    Str(String),
}

impl From<i64> for Key {
    fn from(index: i64) -> Key {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Key {
        Key::Str(key.to_owned())
    }
}

impl From<String> for Key {
    fn from(key: String) -> Key {
        Key::Str(key)
    }
}

impl fmt::Display for Key {
    /// Canonical field-name rendering: indexes in decimal, strings verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

/// A dynamic value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    /// Host integer. Encoding narrows to 32 bits; see the encoder docs.
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Array(Array),
    ObjectId(ObjectIdValue),
    Date(DateValue),
    Regex(RegexValue),
    Binary(BinaryValue),
    /// A host value with no document representation (a resource handle, a
    /// closure). Carries a short type label for diagnostics; the encoder
    /// skips it.
    Opaque(&'static str),
}

impl Value {
    /// Short type label for diagnostics and logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::ObjectId(_) => "object-id",
            Value::Date(_) => "date",
            Value::Regex(_) => "regex",
            Value::Binary(_) => "binary",
            Value::Opaque(kind) => kind,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Str(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Value {
        Value::Array(v)
    }
}

/// The ordered int-or-string keyed container.
///
/// Entries keep insertion order regardless of key kind, and one array may mix
/// both kinds freely. [`push`](Array::push) appends under the next free
/// integer index, which tracks the highest index seen so far: after
/// `insert(Key::Index(7), ..)` the next push lands at index 8, matching how
/// dynamic runtimes grow their arrays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    entries: Vec<(Key, Value)>,
    next_index: i64,
}

impl Array {
    pub fn new() -> Array {
        Array::default()
    }

    /// List constructor: values land under dense indexes `0..n` in order.
    pub fn from_list(values: Vec<Value>) -> Array {
        let mut array = Array::new();
        for value in values {
            array.push(value);
        }
        array
    }

    /// Map constructor: string keys, in the given order.
    pub fn from_pairs(pairs: Vec<(String, Value)>) -> Array {
        let mut array = Array::new();
        for (key, value) in pairs {
            array.insert(Key::Str(key), value);
        }
        array
    }

    /// Appends under the next free integer index.
    pub fn push(&mut self, value: Value) {
        self.insert(Key::Index(self.next_index), value);
    }

    /// Inserts under an explicit key. An existing equal key is overwritten in
    /// place; otherwise the entry is appended. Integer keys at or above the
    /// next-free-index watermark advance it.
    pub fn insert(&mut self, key: impl Into<Key>, value: Value) {
        let key = key.into();
        if let Key::Index(i) = key {
            if i >= self.next_index {
                self.next_index = i.saturating_add(1);
            }
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_index(&self, index: i64) -> Option<&Value> {
        self.get(&Key::Index(index))
    }

    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| matches!(k, Key::Str(s) if s == key))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Key, Value)> {
        self.entries.iter()
    }

    /// `true` when the keys are exactly `Index(0)..Index(n)` in order, the
    /// conventional pure-list shape.
    pub fn is_dense_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (key, _))| matches!(key, Key::Index(n) if *n == i as i64))
    }
}

impl IntoIterator for Array {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a (Key, Value);
    type IntoIter = std::slice::Iter<'a, (Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Array {
        let mut array = Array::new();
        for value in iter {
            array.push(value);
        }
        array
    }
}

/// Textual object id, 24 hex characters, as host runtimes hand it around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdValue {
    pub id: String,
}

/// Seconds-plus-microseconds timestamp pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateValue {
    pub sec: i64,
    pub usec: i64,
}

impl DateValue {
    /// Millisecond reading: `sec * 1000 + usec / 1000`. Division truncates
    /// and overflow wraps.
    pub fn timestamp_ms(&self) -> i64 {
        self.sec.wrapping_mul(1000).wrapping_add(self.usec / 1000)
    }

    /// Splits milliseconds back into the pair with truncating division, so
    /// pre-epoch values keep C division semantics.
    pub fn from_timestamp_ms(ms: i64) -> DateValue {
        DateValue {
            sec: ms / 1000,
            usec: (ms % 1000) * 1000,
        }
    }
}

/// Regular expression wrapper: pattern and flags, both verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexValue {
    pub regex: String,
    pub flags: String,
}

/// Binary payload wrapper.
///
/// `length` declares how many leading bytes of `bin` are significant; the
/// encoder rejects a declaration larger than the buffer. `subtype` is the
/// host-level subtype code, mapped to a wire subtype at encode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryValue {
    pub bin: Vec<u8>,
    pub length: i64,
    pub subtype: i64,
}

impl BinaryValue {
    /// Wraps a buffer whole: `length` covers every byte.
    pub fn from_bytes(bin: Vec<u8>, subtype: i64) -> BinaryValue {
        BinaryValue {
            length: bin.len() as i64,
            bin,
            subtype,
        }
    }
}
