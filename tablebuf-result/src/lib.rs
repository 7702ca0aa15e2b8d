//! Error types and result definitions for the tablebuf crates.
//!
//! All crates in the workspace report failures through the single [`Error`]
//! enum so errors propagate with `?` across crate boundaries and callers can
//! match on a variant when they need to react to a specific failure.
//!
//! # Error Categories
//!
//! - **Shape errors** ([`Error::InvalidShape`]): the target record is not a flat struct
//! - **Binding errors** ([`Error::UnusedStructFields`], [`Error::UnusedBufferColumns`]):
//!   record fields and buffered columns do not correspond
//! - **Value errors** ([`Error::TypeMismatch`]): a buffered value cannot be assigned to its field
//! - **Lookup errors** ([`Error::NoSuchColumn`], [`Error::RowOutOfRange`],
//!   [`Error::ResultSetOutOfRange`])
//! - **Collaborator errors** ([`Error::Driver`], [`Error::Arrow`],
//!   [`Error::Cancelled`]): failures raised while a query cursor is drained

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
