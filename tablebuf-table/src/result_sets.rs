use tablebuf_result::{Error, Result};

use crate::table::TableBuffer;

/// Tables buffered from one query execution, one per result set, in the order
/// the cursor produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSets {
    tables: Vec<TableBuffer>,
}

impl ResultSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, table: TableBuffer) {
        self.tables.push(table);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table for result set `index`, failing with [`Error::ResultSetOutOfRange`].
    pub fn get(&self, index: usize) -> Result<&TableBuffer> {
        self.tables.get(index).ok_or(Error::ResultSetOutOfRange {
            index,
            len: self.tables.len(),
        })
    }

    pub fn first(&self) -> Option<&TableBuffer> {
        self.tables.first()
    }

    pub fn tables(&self) -> &[TableBuffer] {
        &self.tables
    }

    /// Consume the collection, keeping the first table or an empty one.
    pub fn into_first(self) -> TableBuffer {
        self.tables.into_iter().next().unwrap_or_default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TableBuffer> {
        self.tables.iter()
    }
}

impl From<Vec<TableBuffer>> for ResultSets {
    fn from(tables: Vec<TableBuffer>) -> Self {
        Self { tables }
    }
}

impl IntoIterator for ResultSets {
    type Item = TableBuffer;
    type IntoIter = std::vec::IntoIter<TableBuffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSets {
    type Item = &'a TableBuffer;
    type IntoIter = std::slice::Iter<'a, TableBuffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
