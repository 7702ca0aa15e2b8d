//! Value and context types shared by the tablebuf crates.

pub mod query_context;
pub mod value;

pub use query_context::QueryContext;
pub use value::{Value, ValueKind};
