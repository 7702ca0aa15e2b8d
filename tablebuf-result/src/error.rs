use std::fmt;
use thiserror::Error;

/// Boxed error raised by a query-execution collaborator.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for all tablebuf operations.
///
/// Errors propagate upward using `?`. The only aggregation performed anywhere
/// in the workspace is [`Error::Multiple`], which the schema reconciler uses to
/// report unmatched record fields and unmatched buffered columns in one pass.
///
/// # Thread Safety
///
/// `Error` implements `Send` and `Sync`, so a failed ingestion can be handed to
/// another thread together with the partially buffered data.
#[derive(Error, Debug)]
pub enum Error {
    /// Arrow error raised while reading record batches, such as an array whose
    /// physical type disagrees with its schema or an unsupported data type.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Failure reported by the query-execution collaborator.
    ///
    /// The collaborator's error is kept verbatim; `Display` and `source` are
    /// forwarded to it.
    #[error(transparent)]
    Driver(DriverError),

    /// The collaborator observed a cancelled query context.
    #[error("query cancelled")]
    Cancelled,

    /// The target record type is not a flat struct.
    ///
    /// `kind` names the offending shape kind (`tuple`, `scalar`, `reference`).
    #[error("invalid type kind for {record}, expected struct, got {kind}")]
    InvalidShape { record: String, kind: String },

    /// Record fields that bind to no buffered column.
    ///
    /// Each entry is the field name, or `name(tag=value)` when the field carried
    /// a column annotation that did not match.
    #[error("unused fields in struct {0:?}")]
    UnusedStructFields(Vec<String>),

    /// Buffered columns that bind to no record field. Empty column names are
    /// never listed.
    #[error("unused fields in query {0:?}")]
    UnusedBufferColumns(Vec<String>),

    /// Several independent failures detected in a single call.
    #[error("{}", join_errors(.0))]
    Multiple(Vec<Error>),

    /// A buffered value's runtime type is not assignable to its bound field.
    #[error("cannot assign {actual} value to field {field} of type {expected}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Column-name lookup failed.
    #[error("no such column {column:?} (table has {available} columns)")]
    NoSuchColumn { column: String, available: usize },

    /// Row index lookup failed.
    #[error("no such row: requested index {index}, table has {len} rows")]
    RowOutOfRange { index: usize, len: usize },

    /// Result-set index lookup failed.
    #[error("no such result set: requested index {index}, query returned {len} result sets")]
    ResultSetOutOfRange { index: usize, len: usize },

    /// Invalid user input or API parameter.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// Internal error indicating a bug or unexpected state.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

fn join_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl Error {
    /// Wrap any collaborator error into [`Error::Driver`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebuf_result::Error;
    ///
    /// let io_err = std::io::Error::other("connection reset");
    /// let err = Error::driver(io_err);
    /// assert_eq!(err.to_string(), "connection reset");
    /// ```
    #[inline]
    pub fn driver<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Driver(Box::new(err))
    }

    /// Build a [`Error::NoSuchColumn`] error.
    #[inline]
    pub fn no_such_column(column: impl Into<String>, available: usize) -> Self {
        Error::NoSuchColumn {
            column: column.into(),
            available,
        }
    }

    /// Build a [`Error::TypeMismatch`] error from displayable type names.
    #[inline]
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Error::TypeMismatch {
            field: field.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Combine errors collected during one call.
    ///
    /// Returns `None` when `errors` is empty and the single error unchanged when
    /// only one was collected.
    pub fn join(mut errors: Vec<Error>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Error::Multiple(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_fields_render_quoted_list() {
        let err = Error::UnusedStructFields(vec!["Age".into(), "Nick(tag=nick)".into()]);
        assert_eq!(
            err.to_string(),
            r#"unused fields in struct ["Age", "Nick(tag=nick)"]"#
        );
    }

    #[test]
    fn join_collapses_single_error() {
        assert!(Error::join(Vec::new()).is_none());

        let single = Error::join(vec![Error::Cancelled]).unwrap();
        assert!(matches!(single, Error::Cancelled));

        let both = Error::join(vec![
            Error::UnusedStructFields(vec!["Age".into()]),
            Error::UnusedBufferColumns(vec!["Name2".into()]),
        ])
        .unwrap();
        assert_eq!(
            both.to_string(),
            "unused fields in struct [\"Age\"]\nunused fields in query [\"Name2\"]"
        );
    }

    #[test]
    fn driver_error_is_transparent() {
        let err = Error::driver(std::io::Error::other("socket closed"));
        assert_eq!(err.to_string(), "socket closed");
        assert!(std::error::Error::source(&err).is_none());
    }
}
