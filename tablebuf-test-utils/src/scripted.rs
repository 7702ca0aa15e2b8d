//! In-memory stand-ins for the query-execution collaborator.
//!
//! A [`ScriptedCursor`] replays fixed result sets and can be told to fail at a
//! given point, which is how ingestion failure paths are exercised.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tablebuf_result::{Error, Result};
use tablebuf_table::{Cursor, Queryer};
use tablebuf_types::{QueryContext, Value};

/// One result set to replay.
#[derive(Debug, Clone, Default)]
pub struct ScriptedResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    fail_scan_at: Option<usize>,
    fail_columns: bool,
}

impl ScriptedResultSet {
    pub fn new<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
            ..Self::default()
        }
    }

    /// Fail when the record at `row` is scanned.
    pub fn failing_scan_at(mut self, row: usize) -> Self {
        self.fail_scan_at = Some(row);
        self
    }

    /// Fail when the column names are requested.
    pub fn failing_columns(mut self) -> Self {
        self.fail_columns = true;
        self
    }
}

fn scripted_failure(message: String) -> Error {
    Error::driver(io::Error::other(message))
}

/// Cursor replaying [`ScriptedResultSet`]s in order.
#[derive(Debug, Default)]
pub struct ScriptedCursor {
    sets: Vec<ScriptedResultSet>,
    set: usize,
    row: Option<usize>,
    exhausted: bool,
    fail_next_result_set: bool,
    ctx: QueryContext,
    closed: Option<Arc<AtomicUsize>>,
    is_closed: bool,
}

impl ScriptedCursor {
    pub fn new(sets: Vec<ScriptedResultSet>) -> Self {
        Self {
            sets,
            ..Self::default()
        }
    }

    /// Fail column discovery for result set `index`.
    pub fn fail_columns_in_result_set(&mut self, index: usize) {
        if let Some(set) = self.sets.get_mut(index) {
            set.fail_columns = true;
        }
    }

    /// Fail the first call to [`Cursor::next_result_set`].
    pub fn fail_next_result_set(&mut self) {
        self.fail_next_result_set = true;
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    fn current_set(&self) -> Result<&ScriptedResultSet> {
        self.sets
            .get(self.set)
            .ok_or_else(|| Error::Internal("cursor has no current result set".into()))
    }
}

impl Cursor for ScriptedCursor {
    fn next(&mut self) -> Result<bool> {
        if self.ctx.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let Some(set) = self.sets.get(self.set) else {
            return Ok(false);
        };
        if self.exhausted {
            return Ok(false);
        }
        let next = self.row.map_or(0, |row| row + 1);
        if next < set.rows.len() {
            self.row = Some(next);
            Ok(true)
        } else {
            self.row = None;
            self.exhausted = true;
            Ok(false)
        }
    }

    fn columns(&self) -> Result<Vec<String>> {
        let set = self.current_set()?;
        if set.fail_columns {
            return Err(scripted_failure(format!(
                "columns unavailable for result set {}",
                self.set
            )));
        }
        if self.row.is_none() {
            return Err(Error::InvalidArgumentError(
                "columns requested before the first record".into(),
            ));
        }
        Ok(set.columns.clone())
    }

    fn scan(&mut self, dest: &mut [Value]) -> Result<()> {
        let set = self.current_set()?;
        let row = self
            .row
            .ok_or_else(|| Error::InvalidArgumentError("scan without a current record".into()))?;
        if set.fail_scan_at == Some(row) {
            return Err(scripted_failure(format!("scan failed at record {row}")));
        }
        let values = &set.rows[row];
        if values.len() != dest.len() {
            return Err(scripted_failure(format!(
                "record {row} has {} values, scan expects {}",
                values.len(),
                dest.len()
            )));
        }
        dest.clone_from_slice(values);
        Ok(())
    }

    fn next_result_set(&mut self) -> Result<bool> {
        if std::mem::take(&mut self.fail_next_result_set) {
            return Err(scripted_failure("next result set unavailable".into()));
        }
        self.set += 1;
        self.row = None;
        self.exhausted = false;
        Ok(self.set < self.sets.len())
    }

    fn close(&mut self) -> Result<()> {
        if !self.is_closed {
            self.is_closed = true;
            if let Some(counter) = &self.closed {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }
        Ok(())
    }
}

/// [`Queryer`] answering fixed query texts with scripted result sets.
#[derive(Debug, Default)]
pub struct MemQueryer {
    scripts: HashMap<String, Vec<ScriptedResultSet>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl MemQueryer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(mut self, text: impl Into<String>, sets: Vec<ScriptedResultSet>) -> Self {
        self.scripts.insert(text.into(), sets);
        self
    }

    /// Number of cursors handed out.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of cursors closed.
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Queryer for MemQueryer {
    type Cursor = ScriptedCursor;

    fn query(&self, ctx: &QueryContext, text: &str, _params: &[Value]) -> Result<ScriptedCursor> {
        if ctx.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let sets = self
            .scripts
            .get(text)
            .cloned()
            .ok_or_else(|| scripted_failure(format!("no script for query {text:?}")))?;
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedCursor {
            sets,
            ctx: ctx.clone(),
            closed: Some(Arc::clone(&self.closed)),
            ..ScriptedCursor::default()
        })
    }
}
