//! Declared record shapes used as reconciliation targets.
//!
//! A record type describes itself through a static [`RecordShape`]: its kind
//! and, for structs, one [`FieldDescriptor`] per field in declaration order.
//! The [`record!`](crate::record) macro generates the struct, its shape and the
//! [`Record::assign`] dispatch in one declaration:
//!
//! ```
//! use tablebuf_table::{Record, record};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Account {
//!         #[column = "account_id"]
//!         pub id: i64,
//!         pub owner: Option<String>,
//!         #[column = "-"]
//!         pub cached_score: f64,
//!     }
//! }
//!
//! let fields = Account::shape().fields();
//! assert_eq!(fields[0].tag(), Some("account_id"));
//! assert!(fields[2].is_skipped());
//! ```

use std::fmt;

use tablebuf_result::{Error, Result};
use tablebuf_types::{Value, ValueKind};

/// Annotation value that excludes a field from binding.
pub const SKIP_TAG: &str = "-";

/// Structural kind of a record type. Only [`ShapeKind::Struct`] can be a
/// reconciliation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Struct,
    Tuple,
    Scalar,
    Reference,
}

impl ShapeKind {
    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Struct => "struct",
            ShapeKind::Tuple => "tuple",
            ShapeKind::Scalar => "scalar",
            ShapeKind::Reference => "reference",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType {
    kind: ValueKind,
    nullable: bool,
}

impl FieldType {
    pub const fn required(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub const fn nullable(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }

    pub const fn kind(self) -> ValueKind {
        self.kind
    }

}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "option<{}>", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// One field of a struct shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    field_type: FieldType,
    tag: Option<&'static str>,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, field_type: FieldType, tag: Option<&'static str>) -> Self {
        Self {
            name,
            field_type,
            tag,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// The `#[column = "..."]` annotation, if any.
    #[inline]
    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    pub fn is_skipped(&self) -> bool {
        self.tag == Some(SKIP_TAG)
    }

    /// Identifier used in unused-field reports: `name`, or `name(tag=value)`
    /// for annotated fields.
    pub fn describe(&self) -> String {
        match self.tag {
            Some(tag) if !tag.is_empty() => format!("{}(tag={})", self.name, tag),
            _ => self.name.to_string(),
        }
    }

    /// Extract a `F` from `value` without conversion.
    pub fn decode<F: FieldValue>(&self, value: &Value) -> Result<F> {
        F::from_value(value)
            .ok_or_else(|| Error::type_mismatch(self.name, F::FIELD_TYPE, value.kind()))
    }
}

/// Static description of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordShape {
    name: &'static str,
    kind: ShapeKind,
    fields: &'static [FieldDescriptor],
}

impl RecordShape {
    pub const fn new(name: &'static str, kind: ShapeKind, fields: &'static [FieldDescriptor]) -> Self {
        Self { name, kind, fields }
    }

    /// Shape of a flat struct with the given fields.
    pub const fn flat(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self::new(name, ShapeKind::Struct, fields)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    pub fn field(&self, ordinal: usize) -> Result<&'static FieldDescriptor> {
        self.fields.get(ordinal).ok_or_else(|| {
            Error::Internal(format!(
                "{} has no field at ordinal {ordinal}",
                self.name
            ))
        })
    }

    /// Fail with [`Error::InvalidShape`] unless this is a struct shape.
    pub fn ensure_flat(&self) -> Result<()> {
        match self.kind {
            ShapeKind::Struct => Ok(()),
            kind => Err(Error::InvalidShape {
                record: self.name.to_string(),
                kind: kind.to_string(),
            }),
        }
    }
}

/// A type that buffered values can be stored in without conversion.
pub trait FieldValue: Sized {
    const FIELD_TYPE: FieldType;

    /// Returns `None` when `value` has a different runtime type.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_field_value {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl FieldValue for $ty {
            const FIELD_TYPE: FieldType = FieldType::required(ValueKind::$kind);

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_field_value!(bool, Bool, Bool);
impl_field_value!(i32, Int32, Int32);
impl_field_value!(i64, Int64, Int64);
impl_field_value!(f64, Float64, Float64);
impl_field_value!(String, Text, Text);
impl_field_value!(Vec<u8>, Bytes, Bytes);

impl FieldValue for Value {
    const FIELD_TYPE: FieldType = FieldType::required(ValueKind::Any);

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const FIELD_TYPE: FieldType = FieldType::nullable(T::FIELD_TYPE.kind());

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }
        T::from_value(value).map(Some)
    }
}

/// A flat record type that buffered rows can be reconciled onto.
///
/// Usually implemented through [`record!`](crate::record).
pub trait Record: Default {
    fn shape() -> &'static RecordShape;

    /// Store `value` into the field at `ordinal` of [`Record::shape`].
    fn assign(&mut self, ordinal: usize, value: &Value) -> Result<()>;
}

/// Declare a flat struct and implement [`Record`] for it.
///
/// Fields bind to the column with their own name unless annotated with
/// `#[column = "name"]`; `#[column = "-"]` excludes the field from binding.
/// Other field attributes and doc comments are kept on the generated field.
/// Every field type must implement [`FieldValue`], which rules out nested
/// records and references at compile time. The struct must implement
/// `Default`, typically through `#[derive(Default)]`.
#[macro_export]
macro_rules! record {
    (@tag) => {
        ::core::option::Option::None
    };
    (@tag [column = $tag:literal] $($rest:tt)*) => {
        ::core::option::Option::Some($tag)
    };
    (@tag $skip:tt $($rest:tt)*) => {
        $crate::record!(@tag $($rest)*)
    };

    // Struct emission: fields are rebuilt one attribute at a time so that
    // `#[column = ...]` never reaches the compiler.
    (@struct [$($meta:tt)*] [$($vis:tt)*] [$name:ident] [$($out:tt)*]) => {
        $($meta)*
        $($vis)* struct $name {
            $($out)*
        }
    };
    (@struct $meta:tt $vis:tt $name:tt $out:tt
        $fvis:tt $field:tt $fty:tt $kept:tt
        [[column = $tag:literal] $($attrs:tt)*]
        $($rest:tt)*
    ) => {
        $crate::record!(@struct $meta $vis $name $out
            $fvis $field $fty $kept [$($attrs)*] $($rest)*);
    };
    (@struct $meta:tt $vis:tt $name:tt $out:tt
        $fvis:tt $field:tt $fty:tt [$($kept:tt)*]
        [[$($attr:tt)*] $($attrs:tt)*]
        $($rest:tt)*
    ) => {
        $crate::record!(@struct $meta $vis $name $out
            $fvis $field $fty [$($kept)* #[$($attr)*]] [$($attrs)*] $($rest)*);
    };
    (@struct $meta:tt $vis:tt $name:tt [$($out:tt)*]
        [$($fvis:tt)*] [$field:ident] [$($fty:tt)*] [$($kept:tt)*]
        []
        $($rest:tt)*
    ) => {
        $crate::record!(@struct $meta $vis $name
            [$($out)* $($kept)* $($fvis)* $field: $($fty)*,] $($rest)*);
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$($fattr:tt)*])*
                $fvis:vis $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $crate::record!(@struct
            [$(#[$meta])*] [$vis] [$name] []
            $( [$fvis] [$field] [$fty] [] [$( [$($fattr)*] )*] )*
        );

        impl $crate::Record for $name {
            fn shape() -> &'static $crate::RecordShape {
                static SHAPE: $crate::RecordShape = $crate::RecordShape::flat(
                    ::core::stringify!($name),
                    &[
                        $(
                            $crate::FieldDescriptor::new(
                                ::core::stringify!($field),
                                <$fty as $crate::FieldValue>::FIELD_TYPE,
                                $crate::record!(@tag $( [$($fattr)*] )*),
                            ),
                        )*
                    ],
                );
                &SHAPE
            }

            fn assign(
                &mut self,
                ordinal: usize,
                value: &$crate::Value,
            ) -> $crate::Result<()> {
                let field = <Self as $crate::Record>::shape().field(ordinal)?;
                $(
                    if field.name() == ::core::stringify!($field) {
                        self.$field = field.decode(value)?;
                        return ::core::result::Result::Ok(());
                    }
                )*
                ::core::result::Result::Err($crate::Error::Internal(::std::format!(
                    "field {} is not declared on {}",
                    field.name(),
                    ::core::stringify!($name),
                )))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::record! {
        #[derive(Debug, Default, PartialEq)]
        struct Sample {
            #[column = "sample_id"]
            id: i64,
            label: Option<String>,
            #[column = "-"]
            ignored: i32,
            raw: Value,
        }
    }

    crate::record! {
        /// Ledger entry.
        #[derive(Debug, Default, PartialEq)]
        struct Documented {
            /// Primary key.
            #[column = "entry_id"]
            pub id: i64,
            #[allow(dead_code)]
            /// Free-form memo.
            memo: Option<String>,
            #[column = "-"]
            #[doc = "Never buffered."]
            cached: bool,
        }
    }

    #[test]
    fn field_doc_comments_and_attributes_are_kept() {
        let fields = Documented::shape().fields();
        assert_eq!(fields[0].tag(), Some("entry_id"));
        assert_eq!(fields[1].tag(), None);
        assert!(fields[2].is_skipped());

        let mut entry = Documented::default();
        entry.assign(0, &Value::Int64(3)).unwrap();
        entry.assign(1, &Value::from("paid")).unwrap();
        assert_eq!(
            entry,
            Documented {
                id: 3,
                memo: Some("paid".into()),
                cached: false,
            }
        );
    }

    #[test]
    fn macro_declares_fields_in_order() {
        let shape = Sample::shape();
        assert_eq!(shape.name(), "Sample");
        assert_eq!(shape.kind(), ShapeKind::Struct);
        let names: Vec<_> = shape.fields().iter().map(FieldDescriptor::name).collect();
        assert_eq!(names, ["id", "label", "ignored", "raw"]);
        assert_eq!(shape.fields()[0].describe(), "id(tag=sample_id)");
        assert_eq!(shape.fields()[1].field_type().to_string(), "option<text>");
        assert!(shape.fields()[2].is_skipped());
        assert_eq!(shape.fields()[3].field_type().kind(), ValueKind::Any);
    }

    #[test]
    fn assign_is_strict() {
        let mut sample = Sample::default();
        sample.assign(0, &Value::Int64(9)).unwrap();
        sample.assign(1, &Value::Null).unwrap();
        sample.assign(3, &Value::Bytes(vec![1])).unwrap();
        assert_eq!(sample.id, 9);
        assert_eq!(sample.label, None);
        assert_eq!(sample.raw, Value::Bytes(vec![1]));

        let err = sample.assign(2, &Value::Int64(4)).unwrap_err();
        match err {
            Error::TypeMismatch {
                field,
                expected,
                actual,
            } => {
                assert_eq!(field, "ignored");
                assert_eq!(expected, "int32");
                assert_eq!(actual, "int64");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_struct_shapes_are_rejected() {
        let shape = RecordShape::new("i64", ShapeKind::Scalar, &[]);
        let err = shape.ensure_flat().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid type kind for i64, expected struct, got scalar"
        );
    }
}
