use crate::error::Error;

/// Result type alias used throughout tablebuf.
///
/// Shorthand for `std::result::Result<T, Error>`. Every fallible operation in
/// the buffering and reconciliation layers returns this type.
pub type Result<T> = std::result::Result<T, Error>;
