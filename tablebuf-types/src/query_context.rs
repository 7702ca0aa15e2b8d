use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Per-query context handed to the query-execution collaborator.
///
/// Buffering never inspects the context. It exists so collaborators can label
/// a query and observe cancellation; a cancelled query surfaces to ingestion
/// as an ordinary cursor error.
#[derive(Clone, Debug, Default)]
pub struct QueryContext {
    label: Option<String>,
    cancelled: Arc<AtomicBool>,
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a context carrying a label for diagnostics.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            cancelled: Arc::default(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Request cancellation. Every clone of this context observes the request.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
