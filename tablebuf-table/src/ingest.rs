//! Draining a cursor into [`TableBuffer`]s.

use tablebuf_result::Error;
use tablebuf_types::Value;

use crate::cursor::Cursor;
use crate::result_sets::ResultSets;
use crate::table::{TableBuffer, TableBuilder};

/// Ingestion failure together with everything buffered before it.
///
/// `partial` holds every completed result set followed by the result set that
/// was being read when the cursor failed, with the rows appended up to that
/// point.
#[derive(Debug, thiserror::Error)]
#[error("result set ingestion failed")]
pub struct IngestError {
    #[source]
    pub error: Error,
    pub partial: ResultSets,
}

impl IngestError {
    pub fn into_parts(self) -> (Error, ResultSets) {
        (self.error, self.partial)
    }
}

impl From<IngestError> for Error {
    fn from(err: IngestError) -> Self {
        err.error
    }
}

/// Drain every result set exposed by `cursor`.
///
/// Column names are read on the first record of each result set, since
/// cursors may not know them earlier; a result set without records becomes an
/// empty table. The first cursor error stops ingestion. The cursor is not
/// closed.
pub fn ingest<C: Cursor>(mut cursor: C) -> Result<ResultSets, IngestError> {
    let mut sets = ResultSets::new();
    loop {
        let mut builder: Option<TableBuilder> = None;
        let outcome = drain_result_set(&mut cursor, &mut builder);
        let table = builder.map(TableBuilder::finish).unwrap_or_default();

        if let Err(error) = outcome {
            tracing::debug!(
                result_set = sets.len(),
                rows = table.len(),
                error = ?error,
                "result set ingestion aborted"
            );
            sets.push(table);
            return Err(IngestError {
                error,
                partial: sets,
            });
        }

        tracing::debug!(
            result_set = sets.len(),
            columns = table.columns().len(),
            rows = table.len(),
            "buffered result set"
        );
        sets.push(table);

        match cursor.next_result_set() {
            Ok(true) => continue,
            Ok(false) => return Ok(sets),
            Err(error) => {
                return Err(IngestError {
                    error,
                    partial: sets,
                });
            }
        }
    }
}

/// Drain `cursor` and keep only the first result set.
///
/// Returns an empty table when the cursor produced no result set at all.
pub fn ingest_first<C: Cursor>(cursor: C) -> Result<TableBuffer, IngestError> {
    ingest(cursor).map(ResultSets::into_first)
}

fn drain_result_set<C: Cursor>(
    cursor: &mut C,
    builder: &mut Option<TableBuilder>,
) -> tablebuf_result::Result<()> {
    while cursor.next()? {
        if builder.is_none() {
            let columns = cursor.columns()?;
            tracing::trace!(?columns, "discovered result set columns");
            *builder = Some(TableBuilder::new(columns));
        }
        if let Some(table) = builder.as_mut() {
            let mut slots = vec![Value::Null; table.width()];
            cursor.scan(&mut slots)?;
            table.push_row(slots)?;
        }
    }
    Ok(())
}
