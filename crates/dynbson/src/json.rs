//! serde_json conversions: the host-adapter seam.
//!
//! This is where a concrete host tree becomes the dynamic model: JSON arrays
//! turn into dense-list arrays, JSON objects into string-keyed arrays, member
//! order preserved on both. Going the other way, wrapper values render in the
//! legacy extended-JSON shapes (`$oid`, `$date`, `$regex`/`$options`,
//! `$binary`/`$type`) and opaque values drop to null.
//!
//! The mapping is asymmetric on purpose: a `$`-shaped object coming *in*
//! stays a plain string-keyed array. Recognizing wrapper spellings on input
//! belongs to a host adapter that knows its conventions, not here.

use base64::Engine;
use serde_json::json;

use crate::value::{Array, Value};

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Value {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(members) => {
                Value::Array(Array::from_pairs(
                    members
                        .into_iter()
                        .map(|(k, v)| (k, Value::from(v)))
                        .collect(),
                ))
            }
        }
    }
}

impl From<serde_json::Value> for Array {
    /// Roots a JSON tree as the top-level array. A non-container value lands
    /// alone under index 0.
    fn from(v: serde_json::Value) -> Array {
        match Value::from(v) {
            Value::Array(array) => array,
            scalar => Array::from_list(vec![scalar]),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> serde_json::Value {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Int(i) => json!(i),
            Value::Float(f) => json!(f),
            Value::Bool(b) => json!(b),
            Value::Str(s) => serde_json::Value::String(s),
            Value::Array(array) => array.into(),
            Value::ObjectId(w) => json!({ "$oid": w.id }),
            Value::Date(w) => json!({ "$date": w.timestamp_ms() }),
            Value::Regex(w) => json!({ "$regex": w.regex, "$options": w.flags }),
            Value::Binary(w) => {
                let significant = w.length.clamp(0, w.bin.len() as i64) as usize;
                json!({
                    "$binary": base64::engine::general_purpose::STANDARD
                        .encode(&w.bin[..significant]),
                    "$type": format!("{:02x}", w.subtype & 0xff),
                })
            }
            Value::Opaque(_) => serde_json::Value::Null,
        }
    }
}

impl From<Array> for serde_json::Value {
    /// Dense lists render as JSON arrays; anything else renders as an object
    /// with canonical key spellings.
    fn from(array: Array) -> serde_json::Value {
        if array.is_dense_list() {
            serde_json::Value::Array(
                array.into_iter().map(|(_, v)| v.into()).collect(),
            )
        } else {
            serde_json::Value::Object(
                array
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
                    .collect(),
            )
        }
    }
}
