//! One-call helpers: run a query, buffer it, optionally reconcile it.

use tablebuf_result::Result;
use tablebuf_types::{QueryContext, Value};

use crate::cursor::{Cursor, Queryer};
use crate::ingest::ingest;
use crate::reconcile::{ReconcileOptions, buffer_to_records_with};
use crate::record::Record;
use crate::result_sets::ResultSets;
use crate::table::TableBuffer;

/// Run `text` and buffer every result set it returns.
///
/// The cursor is closed whether or not ingestion succeeded; an ingestion error
/// takes precedence over a close error. Use [`ingest`] directly to keep the
/// partially buffered data of a failed query.
pub fn query_result_sets<Q: Queryer>(
    ctx: &QueryContext,
    queryer: &Q,
    text: &str,
    params: &[Value],
) -> Result<ResultSets> {
    let mut cursor = queryer.query(ctx, text, params)?;
    let ingested = ingest(&mut cursor);
    let closed = cursor.close();
    let sets = ingested?;
    closed?;
    Ok(sets)
}

/// Run `text` and buffer its first result set.
pub fn query_buffer<Q: Queryer>(
    ctx: &QueryContext,
    queryer: &Q,
    text: &str,
    params: &[Value],
) -> Result<TableBuffer> {
    query_result_sets(ctx, queryer, text, params).map(ResultSets::into_first)
}

/// Run `text` and reconcile its first result set onto `T`.
pub fn query_records<T: Record, Q: Queryer>(
    ctx: &QueryContext,
    queryer: &Q,
    text: &str,
    params: &[Value],
) -> Result<Vec<T>> {
    query_records_with(ctx, queryer, text, params, &ReconcileOptions::default())
}

/// [`query_records`] with explicit [`ReconcileOptions`].
pub fn query_records_with<T: Record, Q: Queryer>(
    ctx: &QueryContext,
    queryer: &Q,
    text: &str,
    params: &[Value],
    options: &ReconcileOptions,
) -> Result<Vec<T>> {
    let table = query_buffer(ctx, queryer, text, params)?;
    buffer_to_records_with(&table, options)
}
