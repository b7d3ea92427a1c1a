//! Dynamic value model matched by the engine.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum nesting depth accepted when converting foreign values.
pub const MAX_VALUE_DEPTH: usize = 128;

/// A dynamic value the engine can match patterns against.
///
/// `Null` doubles as the absent value: a missing record key is presented to
/// `optional` sub-patterns as `Null`, and `optional` treats a `Null` input
/// as absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null, also standing in for an absent field.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value - using Arc for cheap cloning.
    String(Arc<str>),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// String-keyed record.
    Object(HashMap<String, Value>),
    /// Key-value collection with arbitrary keys, matched by existence.
    Map(Vec<(Value, Value)>),
    /// Set-like collection, matched by existence.
    Set(Vec<Value>),
}

impl Value {
    /// True for composite kinds that structural recursion can descend into.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Value::Array(_) | Value::Object(_) | Value::Map(_) | Value::Set(_)
        )
    }

    /// Short name of this value's kind, used in errors and traces.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
        }
    }

    /// Same-value equality.
    ///
    /// This is the equality that governs literal patterns: `NaN` equals
    /// `NaN`, while `+0.0` and `-0.0` are distinct. An `Int` equals a
    /// `Float` only when the float carries exactly the bits of the integer
    /// converted to `f64`, so `Int(0)` does not equal `Float(-0.0)`.
    /// Composite values compare structurally under the same rules; `Map`
    /// and `Set` compare by unordered existence of equal entries.
    pub fn same_value_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => {
                f.to_bits() == (*i as f64).to_bits()
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_value_eq(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.same_value_eq(w)))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| {
                        b.iter()
                            .any(|(k2, v2)| k.same_value_eq(k2) && v.same_value_eq(v2))
                    })
            }
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| x.same_value_eq(y)))
            }
            _ => false,
        }
    }

    /// Convert value to string if possible.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert value to integer if possible.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Convert value to float if possible.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Convert value to bool if possible.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert a JSON value, replacing anything nested past
    /// [`MAX_VALUE_DEPTH`] with `Null`.
    pub fn from_json(json: &serde_json::Value) -> Value {
        Self::from_json_bounded(json, 0).unwrap_or(Value::Null)
    }

    /// Convert a JSON value, failing once nesting exceeds
    /// [`MAX_VALUE_DEPTH`].
    ///
    /// JSON objects and arrays become `Object` and `Array`; `Map` and `Set`
    /// have no JSON spelling and are constructed programmatically.
    pub fn from_json_bounded(json: &serde_json::Value, depth: usize) -> Result<Value, Error> {
        if depth > MAX_VALUE_DEPTH {
            return Err(Error::DepthExceeded {
                current: depth,
                limit: MAX_VALUE_DEPTH,
            });
        }

        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    tracing::warn!(number = %n, "unable to convert JSON number");
                    Value::Float(f64::NAN)
                }
            }
            serde_json::Value::String(s) => Value::String(Arc::from(s.as_str())),
            serde_json::Value::Array(arr) => {
                let items: Result<Vec<Value>, Error> = arr
                    .iter()
                    .map(|v| Self::from_json_bounded(v, depth + 1))
                    .collect();
                Value::Array(items?)
            }
            serde_json::Value::Object(obj) => {
                let fields: Result<HashMap<String, Value>, Error> = obj
                    .iter()
                    .map(|(k, v)| Self::from_json_bounded(v, depth + 1).map(|val| (k.clone(), val)))
                    .collect();
                Value::Object(fields?)
            }
        })
    }
}

// Custom Serialize to handle Arc<str>, Map and Set transparently. Map
// serializes as a sequence of [key, value] pairs and Set as a plain
// sequence, since neither has a JSON spelling.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Object(fields) => fields.serialize(serializer),
            Value::Map(entries) => serializer.collect_seq(entries.iter()),
            Value::Set(members) => members.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let json = serde_json::Value::deserialize(deserializer)?;
        Ok(Value::from_json(&json))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s.as_str()))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Value::from_json(json)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from_json(&json)
    }
}
