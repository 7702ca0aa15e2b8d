//! Mapping buffered tables onto [`Record`] types.
//!
//! Reconciliation runs in two phases. Binding computes, once per call, which
//! record field each buffered column feeds and validates the correspondence in
//! both directions. Materialization then copies every row into a fresh record
//! through that lookup table without converting any value.

use std::marker::PhantomData;

use tablebuf_result::{Error, Result};

use crate::column_index::ColumnIndex;
use crate::record::Record;
use crate::row::Row;
use crate::table::TableBuffer;

/// Which binding mismatches fail a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Fail when a record field binds to no buffered column. Default: `true`.
    pub report_unused_struct_fields: bool,
    /// Fail when a named buffered column binds to no record field.
    /// Default: `false`.
    pub report_unused_buffer_columns: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            report_unused_struct_fields: true,
            report_unused_buffer_columns: false,
        }
    }
}

impl ReconcileOptions {
    /// Fail on any mismatch in either direction.
    pub fn strict() -> Self {
        Self {
            report_unused_struct_fields: true,
            report_unused_buffer_columns: true,
        }
    }

    pub fn with_report_unused_struct_fields(mut self, report: bool) -> Self {
        self.report_unused_struct_fields = report;
        self
    }

    pub fn with_report_unused_buffer_columns(mut self, report: bool) -> Self {
        self.report_unused_buffer_columns = report;
        self
    }
}

/// Validated column-to-field lookup for record type `T`.
///
/// Slot `i` of the lookup holds the ordinal of the field fed by column `i`.
/// A binding can decode any row whose table has the column layout it was
/// bound against.
#[derive(Debug, Clone)]
pub struct FieldBinding<T> {
    lookup: Vec<Option<usize>>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> FieldBinding<T> {
    /// Bind `T` against the columns of `table`.
    pub fn bind(table: &TableBuffer, options: &ReconcileOptions) -> Result<Self> {
        Self::bind_columns(table.columns(), table.column_index(), options)
    }

    /// Bind `T` against an explicit column layout.
    ///
    /// An empty layout (a result set that produced no records, so its columns
    /// were never discovered) binds nothing and reports nothing.
    pub fn bind_columns(
        columns: &[String],
        index: &ColumnIndex,
        options: &ReconcileOptions,
    ) -> Result<Self> {
        let shape = T::shape();
        shape.ensure_flat()?;

        let mut lookup: Vec<Option<usize>> = vec![None; columns.len()];
        if columns.is_empty() {
            return Ok(Self {
                lookup,
                _record: PhantomData,
            });
        }

        // A later field resolving to a bound column replaces the earlier one,
        // which then keeps its default.
        let mut unresolved = Vec::new();
        for (ordinal, field) in shape.fields().iter().enumerate() {
            if field.is_skipped() {
                continue;
            }
            let column = field.tag().unwrap_or(field.name());
            match index.position(column) {
                Some(position) => lookup[position] = Some(ordinal),
                None => unresolved.push(field.describe()),
            }
        }

        let mut errors = Vec::new();
        if options.report_unused_struct_fields && !unresolved.is_empty() {
            errors.push(Error::UnusedStructFields(unresolved));
        }
        if options.report_unused_buffer_columns {
            let unused: Vec<String> = columns
                .iter()
                .zip(&lookup)
                .filter(|(name, slot)| slot.is_none() && !name.is_empty())
                .map(|(name, _)| name.clone())
                .collect();
            if !unused.is_empty() {
                errors.push(Error::UnusedBufferColumns(unused));
            }
        }

        tracing::debug!(
            record = shape.name(),
            columns = columns.len(),
            bound = lookup.iter().flatten().count(),
            failures = errors.len(),
            "bound record fields to buffered columns"
        );

        match Error::join(errors) {
            Some(err) => Err(err),
            None => Ok(Self {
                lookup,
                _record: PhantomData,
            }),
        }
    }

    /// Field ordinal bound to each column, in column order.
    pub fn lookup(&self) -> &[Option<usize>] {
        &self.lookup
    }

    /// Copy one row into a new `T`. Unbound columns are skipped, leaving the
    /// corresponding fields at their default.
    pub fn decode(&self, row: &Row) -> Result<T> {
        if row.len() != self.lookup.len() {
            return Err(Error::InvalidArgumentError(format!(
                "row has {} values but binding expects {} columns",
                row.len(),
                self.lookup.len()
            )));
        }
        let mut record = T::default();
        for (value, slot) in row.values().iter().zip(&self.lookup) {
            if let Some(ordinal) = slot {
                record.assign(*ordinal, value)?;
            }
        }
        Ok(record)
    }

    /// Decode every row of `table`, preserving row order.
    pub fn decode_all(&self, table: &TableBuffer) -> Result<Vec<T>> {
        table.rows().iter().map(|row| self.decode(row)).collect()
    }
}

/// Reconcile `table` onto `T` with [`ReconcileOptions::default`].
pub fn buffer_to_records<T: Record>(table: &TableBuffer) -> Result<Vec<T>> {
    buffer_to_records_with(table, &ReconcileOptions::default())
}

/// Reconcile `table` onto `T`, one record per row in row order.
pub fn buffer_to_records_with<T: Record>(
    table: &TableBuffer,
    options: &ReconcileOptions,
) -> Result<Vec<T>> {
    FieldBinding::<T>::bind(table, options)?.decode_all(table)
}
