//! Loosely-typed field maps - the intermediate form between source text and
//! typed records.
//!
//! A [`RawRecord`] is an ordered mapping from field name to [`RawValue`],
//! produced by parsing a JSON source unit or by encoding a typed record.
//! Field order is preserved so that repeated round-trips are stable.
//!
//! The serde derives on these types are the binary save-slot format: a
//! `RawRecord` serialized with bincode is the portable form of a single
//! record outside the main load pipeline.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered field-name to value mapping. Keys are unique.
pub type RawRecord = IndexMap<String, RawValue>;

/// A single loosely-typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<RawValue>),
    Map(RawRecord),
}

impl RawValue {
    /// Short type label used in coercion error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "integer",
            RawValue::Float(_) => "float",
            RawValue::Str(_) => "string",
            RawValue::List(_) => "list",
            RawValue::Map(_) => "object",
        }
    }

    /// Convert a parsed JSON value into a raw value.
    ///
    /// Whole numbers become `Int`, everything else numeric becomes `Float`.
    pub fn from_json(value: &serde_json::Value) -> RawValue {
        match value {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(b) => RawValue::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    RawValue::Float(f)
                } else {
                    RawValue::Null
                }
            }
            serde_json::Value::String(s) => RawValue::Str(s.clone()),
            serde_json::Value::Array(items) => {
                RawValue::List(items.iter().map(RawValue::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                let mut record = RawRecord::new();
                for (key, v) in map {
                    record.insert(key.clone(), RawValue::from_json(v));
                }
                RawValue::Map(record)
            }
        }
    }

    /// Convert back to a JSON value for text export.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            RawValue::Null => serde_json::Value::Null,
            RawValue::Bool(b) => serde_json::Value::Bool(*b),
            RawValue::Int(i) => serde_json::Value::from(*i),
            RawValue::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            RawValue::Str(s) => serde_json::Value::String(s.clone()),
            RawValue::List(items) => {
                serde_json::Value::Array(items.iter().map(RawValue::to_json).collect())
            }
            RawValue::Map(record) => serde_json::Value::Object(record_to_json(record)),
        }
    }
}

/// Convert a raw record to a JSON object map.
pub fn record_to_json(record: &RawRecord) -> serde_json::Map<String, serde_json::Value> {
    let mut map = serde_json::Map::new();
    for (key, value) in record {
        map.insert(key.clone(), value.to_json());
    }
    map
}

/// Convert a parsed JSON object into a raw record.
///
/// Returns `None` when the value is not an object.
pub fn record_from_json(value: &serde_json::Value) -> Option<RawRecord> {
    match RawValue::from_json(value) {
        RawValue::Map(record) => Some(record),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_conversion_preserves_order_and_types() {
        let text = r#"{ "id": "wolf", "speed": 1.5, "legs": 4, "tags": ["wild"], "shade": { "enabled": true } }"#;
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        let record = record_from_json(&value).unwrap();

        let keys: Vec<_> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "speed", "legs", "tags", "shade"]);
        assert_eq!(record["id"], RawValue::Str("wolf".into()));
        assert_eq!(record["speed"], RawValue::Float(1.5));
        assert_eq!(record["legs"], RawValue::Int(4));
        assert!(matches!(record["shade"], RawValue::Map(_)));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let value: serde_json::Value = serde_json::from_str("[1, 2]").unwrap();
        assert!(record_from_json(&value).is_none());
    }

    #[test]
    fn test_bincode_roundtrip() {
        let text = r#"{ "id": "spear", "cost": 12, "pools": ["weapon"] }"#;
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        let record = record_from_json(&value).unwrap();

        let bytes = bincode::serialize(&record).unwrap();
        let back: RawRecord = bincode::deserialize(&bytes).unwrap();
        assert_eq!(record, back);
    }
}
