//! Runtime-typed cell values held by buffered rows.
//!
//! A [`Value`] is whatever the cursor scanned into a slot. Nothing in tablebuf
//! converts between variants: a value either already has the type a consumer
//! asks for or the consumer reports a mismatch naming both [`ValueKind`]s.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of a buffered row.
///
/// Serialized untagged, so a row encodes as a plain sequence of scalars.
/// Variant order drives untagged decoding: integers decode as [`Value::Int64`]
/// and [`Value::Int32`] is never produced by deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Text(String),
    Bytes(Vec<u8>),
    Int32(i32),
}

/// Fieldless tag describing the runtime type of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int32,
    Int64,
    Float64,
    Text,
    Bytes,
    /// Accepts a value of any kind. Used for fields declared as [`Value`].
    Any,
}

impl ValueKind {
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Float64 => "float64",
            ValueKind::Text => "text",
            ValueKind::Bytes => "bytes",
            ValueKind::Any => "any",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int64(_) => ValueKind::Int64,
            Value::Float64(_) => ValueKind::Float64,
            Value::Text(_) => ValueKind::Text,
            Value::Bytes(_) => ValueKind::Bytes,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

macro_rules! impl_from_for_value {
    ($variant:ident, $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for_value!(Bool, bool);
impl_from_for_value!(Int32, i8, i16, i32, u8, u16);
impl_from_for_value!(Int64, i64, u32);
impl_from_for_value!(Float64, f32, f64);
impl_from_for_value!(Text, String);
impl_from_for_value!(Bytes, Vec<u8>);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}
