//! Capabilities consumed from the query-execution collaborator.

use tablebuf_result::Result;
use tablebuf_types::{QueryContext, Value};

/// Forward-only cursor over the records of one or more result sets.
///
/// The cursor starts positioned before the first record of the first result
/// set. Implementations report their own failures as [`tablebuf_result::Error`],
/// typically wrapping the driver error with [`Error::driver`](tablebuf_result::Error::driver).
pub trait Cursor {
    /// Advance to the next record of the current result set. Returns `false`
    /// when the current result set is exhausted.
    fn next(&mut self) -> Result<bool>;

    /// Column names of the current result set. Only valid once [`Cursor::next`]
    /// has returned `true` for that result set.
    fn columns(&self) -> Result<Vec<String>>;

    /// Write the current record into `dest`, one slot per column.
    fn scan(&mut self, dest: &mut [Value]) -> Result<()>;

    /// Move to the next result set. Returns `false` when none follows.
    fn next_result_set(&mut self) -> Result<bool>;

    /// Release the cursor's resources.
    fn close(&mut self) -> Result<()>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn next(&mut self) -> Result<bool> {
        (**self).next()
    }

    fn columns(&self) -> Result<Vec<String>> {
        (**self).columns()
    }

    fn scan(&mut self, dest: &mut [Value]) -> Result<()> {
        (**self).scan(dest)
    }

    fn next_result_set(&mut self) -> Result<bool> {
        (**self).next_result_set()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Anything that can run query text with parameters and return a cursor.
pub trait Queryer {
    type Cursor: Cursor;

    fn query(&self, ctx: &QueryContext, text: &str, params: &[Value]) -> Result<Self::Cursor>;
}
