//! Field-level codec between typed records and raw field maps.
//!
//! Every record kind publishes an explicit descriptor table: one entry per
//! declared field with its name, a getter producing a [`RawValue`], and a
//! setter that coerces a raw value back into the typed field. There is no
//! runtime reflection; the tables are built at compile time with the
//! [`field!`](crate::field) macro.
//!
//! Decode starts from the record's `Default` and visits declared fields by
//! name: a missing raw field keeps the default, an unknown raw field is
//! ignored, and a value that cannot coerce fails the whole record.
//!
//! Coercion rules: integer fields truncate from any numeric value (unsigned
//! fields clamp negative input to zero), float fields widen or narrow,
//! enumerated fields accept their underlying integer, structured fields
//! recurse field-by-field, strings and bools pass through unchanged.

use indexmap::IndexMap;
use thiserror::Error;

use crate::raw::{RawRecord, RawValue};

/// Errors raised while decoding a raw record into a typed record.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("field `{field}`: expected {expected}, got {got}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        got: &'static str,
    },
    #[error("field `{field}`: unknown behavior `{name}`")]
    UnknownBehavior { field: &'static str, name: String },
    #[error("field `{field}`: {source}")]
    Nested {
        field: &'static str,
        #[source]
        source: Box<CodecError>,
    },
    #[error("record source is not a JSON object")]
    NotAnObject,
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binary decode error: {0}")]
    Binary(#[from] bincode::Error),
}

/// A coercion failure before the field name is attached.
#[derive(Debug)]
pub enum FieldError {
    Expected { expected: &'static str, got: &'static str },
    UnknownBehavior { name: String },
    Nested(Box<CodecError>),
}

impl FieldError {
    pub fn expected(expected: &'static str, got: &RawValue) -> FieldError {
        FieldError::Expected { expected, got: got.type_name() }
    }

    fn into_codec(self, field: &'static str) -> CodecError {
        match self {
            FieldError::Expected { expected, got } => {
                CodecError::TypeMismatch { field, expected, got }
            }
            FieldError::UnknownBehavior { name } => CodecError::UnknownBehavior { field, name },
            FieldError::Nested(source) => CodecError::Nested { field, source },
        }
    }
}

/// Descriptor for one declared field of a record.
pub struct FieldDef<R> {
    pub name: &'static str,
    pub get: fn(&R) -> RawValue,
    pub set: fn(&mut R, &RawValue) -> Result<(), FieldError>,
}

/// A record (or nested structured value) with an enumerable field table.
pub trait FieldMapped: Default {
    /// Descriptor table, one entry per declared field, in declaration order.
    fn fields() -> &'static [FieldDef<Self>];
}

/// Encode a record into an ordered raw field map.
pub fn encode<R: FieldMapped + 'static>(record: &R) -> RawRecord {
    let mut raw = RawRecord::new();
    for field in R::fields() {
        raw.insert(field.name.to_string(), (field.get)(record));
    }
    raw
}

/// Decode a raw field map into a typed record.
pub fn decode<R: FieldMapped + 'static>(raw: &RawRecord) -> Result<R, CodecError> {
    let mut record = R::default();
    for field in R::fields() {
        if let Some(value) = raw.get(field.name) {
            (field.set)(&mut record, value).map_err(|e| e.into_codec(field.name))?;
        }
    }
    Ok(record)
}

/// Builds one [`FieldDef`] for a struct field whose type implements
/// [`FieldValue`]. The second form names a field reached through a nested
/// struct, flattening it into the record's own field map.
#[macro_export]
macro_rules! field {
    ($record:ty, $name:ident) => {
        $crate::codec::FieldDef::<$record> {
            name: stringify!($name),
            get: |r| $crate::codec::FieldValue::to_raw(&r.$name),
            set: |r, v| {
                r.$name = $crate::codec::FieldValue::from_raw(v)?;
                Ok(())
            },
        }
    };
    ($record:ty, $name:ident : $($path:ident).+) => {
        $crate::codec::FieldDef::<$record> {
            name: stringify!($name),
            get: |r| $crate::codec::FieldValue::to_raw(&r.$($path).+),
            set: |r, v| {
                r.$($path).+ = $crate::codec::FieldValue::from_raw(v)?;
                Ok(())
            },
        }
    };
}

// ── Field value coercions ───────────────────────────────────────────────

/// Conversion between a typed field and its raw representation.
pub trait FieldValue: Sized {
    fn to_raw(&self) -> RawValue;
    fn from_raw(raw: &RawValue) -> Result<Self, FieldError>;
}

impl FieldValue for bool {
    fn to_raw(&self) -> RawValue {
        RawValue::Bool(*self)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        match raw {
            RawValue::Bool(b) => Ok(*b),
            other => Err(FieldError::expected("bool", other)),
        }
    }
}

impl FieldValue for i32 {
    fn to_raw(&self) -> RawValue {
        RawValue::Int(*self as i64)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        match raw {
            RawValue::Int(i) => Ok(*i as i32),
            RawValue::Float(f) => Ok(*f as i32),
            other => Err(FieldError::expected("integer", other)),
        }
    }
}

impl FieldValue for u32 {
    fn to_raw(&self) -> RawValue {
        RawValue::Int(*self as i64)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        match raw {
            RawValue::Int(i) => Ok((*i).max(0) as u32),
            RawValue::Float(f) => Ok(f.max(0.0) as u32),
            other => Err(FieldError::expected("integer", other)),
        }
    }
}

impl FieldValue for i64 {
    fn to_raw(&self) -> RawValue {
        RawValue::Int(*self)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        match raw {
            RawValue::Int(i) => Ok(*i),
            RawValue::Float(f) => Ok(*f as i64),
            other => Err(FieldError::expected("integer", other)),
        }
    }
}

impl FieldValue for f32 {
    fn to_raw(&self) -> RawValue {
        RawValue::Float(*self as f64)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        match raw {
            RawValue::Int(i) => Ok(*i as f32),
            RawValue::Float(f) => Ok(*f as f32),
            other => Err(FieldError::expected("number", other)),
        }
    }
}

impl FieldValue for f64 {
    fn to_raw(&self) -> RawValue {
        RawValue::Float(*self)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        match raw {
            RawValue::Int(i) => Ok(*i as f64),
            RawValue::Float(f) => Ok(*f),
            other => Err(FieldError::expected("number", other)),
        }
    }
}

impl FieldValue for String {
    fn to_raw(&self) -> RawValue {
        RawValue::Str(self.clone())
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        match raw {
            RawValue::Str(s) => Ok(s.clone()),
            RawValue::Null => Ok(String::new()),
            other => Err(FieldError::expected("string", other)),
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_raw(&self) -> RawValue {
        RawValue::List(self.iter().map(FieldValue::to_raw).collect())
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        match raw {
            RawValue::List(items) => items.iter().map(T::from_raw).collect(),
            RawValue::Null => Ok(Vec::new()),
            other => Err(FieldError::expected("list", other)),
        }
    }
}

impl FieldValue for IndexMap<String, String> {
    fn to_raw(&self) -> RawValue {
        let mut record = RawRecord::new();
        for (key, value) in self {
            record.insert(key.clone(), RawValue::Str(value.clone()));
        }
        RawValue::Map(record)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        match raw {
            RawValue::Map(record) => {
                let mut map = IndexMap::new();
                for (key, value) in record {
                    map.insert(key.clone(), String::from_raw(value)?);
                }
                Ok(map)
            }
            RawValue::Null => Ok(IndexMap::new()),
            other => Err(FieldError::expected("object", other)),
        }
    }
}

/// Encode a nested structured field through its own descriptor table.
///
/// Structured types implement [`FieldValue`] with this pair of helpers;
/// a blanket impl would collide with the scalar impls above.
pub fn struct_to_raw<T: FieldMapped + 'static>(value: &T) -> RawValue {
    RawValue::Map(encode(value))
}

/// Decode a nested structured field, field by field.
pub fn struct_from_raw<T: FieldMapped + 'static>(raw: &RawValue) -> Result<T, FieldError> {
    match raw {
        RawValue::Map(record) => decode(record).map_err(|e| FieldError::Nested(Box::new(e))),
        other => Err(FieldError::expected("object", other)),
    }
}

// ── Single-record persistence round-trip ────────────────────────────────

/// Export a record as pretty JSON, the authoring-tool interchange form.
pub fn export_json<R: FieldMapped + 'static>(record: &R) -> String {
    let map = crate::raw::record_to_json(&encode(record));
    serde_json::to_string_pretty(&serde_json::Value::Object(map))
        .expect("raw record is always serializable")
}

/// Import a record from JSON text produced by [`export_json`] or authored
/// by hand.
pub fn import_json<R: FieldMapped + 'static>(text: &str) -> Result<R, CodecError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let raw = crate::raw::record_from_json(&value).ok_or(CodecError::NotAnObject)?;
    decode(&raw)
}

/// Export a record in the compact binary save-slot form.
pub fn export_binary<R: FieldMapped + 'static>(record: &R) -> Result<Vec<u8>, CodecError> {
    Ok(bincode::serialize(&encode(record))?)
}

/// Import a record from the binary save-slot form.
pub fn import_binary<R: FieldMapped + 'static>(bytes: &[u8]) -> Result<R, CodecError> {
    let raw: RawRecord = bincode::deserialize(bytes)?;
    decode(&raw)
}
