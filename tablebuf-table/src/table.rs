//! Buffered result set: column names, their index, and the rows.

use std::sync::Arc;

use tablebuf_result::{Error, Result};
use tablebuf_types::Value;

use crate::column_index::ColumnIndex;
use crate::row::Row;

/// One fully buffered result set.
///
/// Tables are assembled with a [`TableBuilder`] and are read-only once
/// finished, so a `TableBuffer` can be shared between reader threads freely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableBuffer {
    columns: Vec<String>,
    index: Arc<ColumnIndex>,
    rows: Vec<Row>,
}

impl TableBuffer {
    /// A table with no columns and no rows, as produced for an empty result set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Column names in cursor order, verbatim.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[inline]
    pub fn column_index(&self) -> &Arc<ColumnIndex> {
        &self.index
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`, failing with [`Error::RowOutOfRange`].
    pub fn row(&self, index: usize) -> Result<&Row> {
        self.rows.get(index).ok_or(Error::RowOutOfRange {
            index,
            len: self.rows.len(),
        })
    }

    /// Value at (`row`, `column`).
    pub fn get(&self, row: usize, column: &str) -> Result<&Value> {
        self.row(row)?.get(column)
    }

    /// Value at (`row`, `column`).
    ///
    /// # Panics
    ///
    /// Panics when the row or column does not exist. Meant for literal column
    /// names; use [`TableBuffer::get`] otherwise.
    pub fn value(&self, row: usize, column: &str) -> &Value {
        match self.get(row, column) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a TableBuffer {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Accumulates rows for one result set.
///
/// The column list is fixed at construction; every pushed row must have one
/// value per column.
#[derive(Debug)]
pub struct TableBuilder {
    table: TableBuffer,
}

impl TableBuilder {
    pub fn new(columns: Vec<String>) -> Self {
        let index = Arc::new(ColumnIndex::new(&columns));
        Self {
            table: TableBuffer {
                columns,
                index,
                rows: Vec::new(),
            },
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.table.columns.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }

    /// Append a row, rejecting value lists that do not match the column count.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.width() {
            return Err(Error::InvalidArgumentError(format!(
                "row has {} values but table has {} columns",
                values.len(),
                self.width()
            )));
        }
        let row = Row::new(values, Arc::clone(&self.table.index));
        self.table.rows.push(row);
        Ok(())
    }

    pub fn finish(self) -> TableBuffer {
        self.table
    }
}
