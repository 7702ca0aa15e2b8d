//! Column-name to ordinal lookup shared by every row of a table.

use rustc_hash::FxHashMap;
use tablebuf_result::{Error, Result};

/// Maps column names to their ordinal in a table's rows.
///
/// Built once from the column names reported by the cursor and never mutated
/// afterwards; tables hand it to their rows behind an `Arc`. Names are stored
/// verbatim. When a name occurs more than once the last occurrence wins, so
/// lookups of duplicated names are deterministic but only reach the rightmost
/// column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    lookup: FxHashMap<String, usize>,
    width: usize,
}

impl ColumnIndex {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let mut lookup = FxHashMap::with_capacity_and_hasher(names.len(), Default::default());
        for (ordinal, name) in names.iter().enumerate() {
            lookup.insert(name.as_ref().to_string(), ordinal);
        }
        Self {
            lookup,
            width: names.len(),
        }
    }

    /// Number of columns the index was built from, duplicates included.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    /// Resolve `name`, failing with [`Error::NoSuchColumn`] when absent.
    pub fn get(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| Error::no_such_column(name, self.width))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }
}
