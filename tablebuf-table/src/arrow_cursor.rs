//! [`Cursor`] over Arrow record batches.
//!
//! Engines that return query results as [`RecordBatch`]es (one batch list per
//! statement) can be buffered through this adapter like any row cursor.

use arrow::array::{
    Array, ArrayRef, BinaryArray, BooleanArray, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use tablebuf_result::{Error, Result};
use tablebuf_types::Value;

use crate::cursor::Cursor;

/// Walks a list of result sets, each a list of batches sharing one schema.
#[derive(Debug, Default)]
pub struct RecordBatchCursor {
    result_sets: Vec<Vec<RecordBatch>>,
    set: usize,
    /// (batch, row) of the current record.
    current: Option<(usize, usize)>,
    exhausted: bool,
}

impl RecordBatchCursor {
    pub fn new(result_sets: Vec<Vec<RecordBatch>>) -> Self {
        Self {
            result_sets,
            ..Self::default()
        }
    }

    /// Cursor over a single result set.
    pub fn single(batches: Vec<RecordBatch>) -> Self {
        Self::new(vec![batches])
    }

    fn current_batch(&self) -> Result<(&RecordBatch, usize)> {
        let (batch, row) = self.current.ok_or_else(|| {
            Error::InvalidArgumentError("cursor is not positioned on a record".into())
        })?;
        let batch = self
            .result_sets
            .get(self.set)
            .and_then(|batches| batches.get(batch))
            .ok_or_else(|| Error::Internal("cursor position outside its batches".into()))?;
        Ok((batch, row))
    }
}

impl Cursor for RecordBatchCursor {
    fn next(&mut self) -> Result<bool> {
        let Some(batches) = self.result_sets.get(self.set) else {
            return Ok(false);
        };
        let (mut batch, mut row) = match self.current {
            Some((batch, row)) => (batch, row + 1),
            None if self.exhausted => return Ok(false),
            None => (0, 0),
        };
        while batch < batches.len() && row >= batches[batch].num_rows() {
            batch += 1;
            row = 0;
        }
        if batch < batches.len() {
            self.current = Some((batch, row));
            Ok(true)
        } else {
            self.current = None;
            self.exhausted = true;
            Ok(false)
        }
    }

    fn columns(&self) -> Result<Vec<String>> {
        let (batch, _) = self.current_batch()?;
        Ok(batch
            .schema()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect())
    }

    fn scan(&mut self, dest: &mut [Value]) -> Result<()> {
        let (batch, row) = self.current_batch()?;
        if dest.len() != batch.num_columns() {
            return Err(Error::InvalidArgumentError(format!(
                "scan expects {} slots, got {}",
                batch.num_columns(),
                dest.len()
            )));
        }
        let schema = batch.schema();
        for (idx, slot) in dest.iter_mut().enumerate() {
            *slot = value_at(batch.column(idx), row, schema.field(idx).name())?;
        }
        Ok(())
    }

    fn next_result_set(&mut self) -> Result<bool> {
        self.set += 1;
        self.current = None;
        self.exhausted = false;
        Ok(self.set < self.result_sets.len())
    }

    fn close(&mut self) -> Result<()> {
        self.result_sets.clear();
        self.current = None;
        Ok(())
    }
}

fn downcast<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column: &str,
) -> std::result::Result<&'a A, ArrowError> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        ArrowError::CastError(format!(
            "column '{column}' does not match its declared type {:?}",
            array.data_type()
        ))
    })
}

fn value_at(array: &ArrayRef, row: usize, column: &str) -> Result<Value> {
    if matches!(array.data_type(), DataType::Null) || array.is_null(row) {
        return Ok(Value::Null);
    }
    let value = match array.data_type() {
        DataType::Boolean => Value::Bool(downcast::<BooleanArray>(array, column)?.value(row)),
        DataType::Int32 => Value::Int32(downcast::<Int32Array>(array, column)?.value(row)),
        DataType::Int64 => Value::Int64(downcast::<Int64Array>(array, column)?.value(row)),
        DataType::Float64 => Value::Float64(downcast::<Float64Array>(array, column)?.value(row)),
        DataType::Utf8 => {
            Value::Text(downcast::<StringArray>(array, column)?.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            Value::Text(downcast::<LargeStringArray>(array, column)?.value(row).to_string())
        }
        DataType::Binary => {
            Value::Bytes(downcast::<BinaryArray>(array, column)?.value(row).to_vec())
        }
        other => {
            return Err(ArrowError::NotYetImplemented(format!(
                "column '{column}': unsupported Arrow type {other:?}"
            ))
            .into());
        }
    };
    Ok(value)
}
