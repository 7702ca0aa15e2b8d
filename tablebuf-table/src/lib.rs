//! In-memory buffering of query result sets.
//!
//! A query cursor is drained into one [`TableBuffer`] per result set
//! ([`ingest`]). Each table owns its rows and a [`ColumnIndex`] shared by every
//! [`Row`], so cells can be looked up by column name in O(1). A table can then
//! be reconciled onto a flat record type declared with [`record!`]
//! ([`buffer_to_records`]): record fields bind to columns by name or by
//! `#[column = "..."]` annotation, and every mismatch is reported in one error.
//!
//! ```
//! use tablebuf_table::{TableBuilder, buffer_to_records, record};
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Person {
//!         #[column = "ID"]
//!         pub id: i64,
//!         pub name: String,
//!     }
//! }
//!
//! let mut builder = TableBuilder::new(vec!["ID".into(), "name".into()]);
//! builder.push_row(vec![1i64.into(), "R1".into()]).unwrap();
//! let table = builder.finish();
//!
//! let people: Vec<Person> = buffer_to_records(&table).unwrap();
//! assert_eq!(people, vec![Person { id: 1, name: "R1".into() }]);
//! ```

pub mod arrow_cursor;
pub mod column_index;
pub mod cursor;
pub mod ingest;
pub mod query;
pub mod reconcile;
pub mod record;
pub mod result_sets;
pub mod row;
pub mod table;

pub use arrow_cursor::RecordBatchCursor;
pub use column_index::ColumnIndex;
pub use cursor::{Cursor, Queryer};
pub use ingest::{IngestError, ingest, ingest_first};
pub use query::{query_buffer, query_records, query_records_with, query_result_sets};
pub use reconcile::{FieldBinding, ReconcileOptions, buffer_to_records, buffer_to_records_with};
pub use record::{FieldDescriptor, FieldType, FieldValue, Record, RecordShape, SKIP_TAG, ShapeKind};
pub use result_sets::ResultSets;
pub use row::Row;
pub use table::{TableBuffer, TableBuilder};

pub use tablebuf_result::{Error, Result};
pub use tablebuf_types::{QueryContext, Value, ValueKind};
