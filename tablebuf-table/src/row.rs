use std::fmt;
use std::sync::Arc;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use tablebuf_result::{Error, Result};
use tablebuf_types::Value;

use crate::column_index::ColumnIndex;

/// One buffered record: its values in column order plus the owning table's
/// [`ColumnIndex`].
///
/// Rows are created by [`TableBuilder`](crate::TableBuilder) and the index
/// association is fixed at that point; there is no API to swap it.
#[derive(Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
    index: Arc<ColumnIndex>,
}

impl Row {
    pub(crate) fn new(values: Vec<Value>, index: Arc<ColumnIndex>) -> Self {
        debug_assert_eq!(values.len(), index.width());
        Self { values, index }
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn column_index(&self) -> &Arc<ColumnIndex> {
        &self.index
    }

    /// Value at `ordinal`, or `None` past the last column.
    #[inline]
    pub fn get_at(&self, ordinal: usize) -> Option<&Value> {
        self.values.get(ordinal)
    }

    /// Value of the column named `column`.
    pub fn get(&self, column: &str) -> Result<&Value> {
        let ordinal = self.index.get(column)?;
        self.get_at(ordinal).ok_or_else(|| {
            Error::Internal(format!(
                "column {column:?} maps to ordinal {ordinal} past the row's {} values",
                self.values.len()
            ))
        })
    }

    /// Value of the column named `column`.
    ///
    /// # Panics
    ///
    /// Panics when the column does not exist. Meant for call sites that spell
    /// the column name as a literal; use [`Row::get`] for names computed at
    /// runtime.
    pub fn value(&self, column: &str) -> &Value {
        match self.get(column) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Replace the row's values with a sequence read from `deserializer`.
    ///
    /// The column index is kept. A sequence whose length differs from the
    /// table width is rejected and the row is left untouched.
    pub fn replace_values<'de, D>(&mut self, deserializer: D) -> std::result::Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;
        if values.len() != self.index.width() {
            return Err(de::Error::invalid_length(
                values.len(),
                &WidthExpectation(self.index.width()),
            ));
        }
        self.values = values;
        Ok(())
    }
}

struct WidthExpectation(usize);

impl de::Expected for WidthExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a sequence of {} values", self.0)
    }
}

/// Only the values are written; column names are not part of the encoding.
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}
