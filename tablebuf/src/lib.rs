//! tablebuf: in-memory buffering of relational query results.
//!
//! This crate is the entrypoint for the workspace. It re-exports the buffering
//! and reconciliation API from the underlying `tablebuf-*` crates.
//!
//! # Quick Start
//!
//! Buffer a query through any [`Queryer`] and map its first result set onto a
//! record type:
//!
//! ```rust,ignore
//! use tablebuf::{QueryContext, query_records, record};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Person {
//!         #[column = "person_id"]
//!         pub id: i64,
//!         pub name: String,
//!     }
//! }
//!
//! let people: Vec<Person> =
//!     query_records(&QueryContext::new(), &db, "SELECT person_id, name FROM people", &[])?;
//! ```
//!
//! # Architecture
//!
//! - **Errors** (`tablebuf-result`): the unified [`Error`] enum.
//! - **Values** (`tablebuf-types`): runtime-typed [`Value`] cells and the [`QueryContext`].
//! - **Buffering and reconciliation** (`tablebuf-table`): [`TableBuffer`], [`ingest`],
//!   [`buffer_to_records`] and the [`record!`] macro.

pub use tablebuf_table::{
    ColumnIndex, Cursor, FieldBinding, FieldDescriptor, FieldType, FieldValue, IngestError,
    Queryer, ReconcileOptions, Record, RecordBatchCursor, RecordShape, ResultSets, Row, SKIP_TAG,
    ShapeKind, TableBuffer, TableBuilder, buffer_to_records, buffer_to_records_with, ingest,
    ingest_first, query_buffer, query_records, query_records_with, query_result_sets, record,
};

pub use tablebuf_result::{Error, Result};
pub use tablebuf_types::{QueryContext, Value, ValueKind};
