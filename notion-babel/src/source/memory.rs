//! In-memory content source.
//!
//! Serves prebuilt blocks and pages with real pagination semantics (cursors are
//! stringified offsets). Ids registered through [`MemorySource::fail`] return
//! the given error from every call, which makes degraded paths reproducible.
//! Each call is recorded so callers can assert on request order.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{ContentSource, DatabaseMeta, PageMeta, Paginated};
use crate::error::FetchError;
use crate::ir::nodes::Block;

#[derive(Debug, Default)]
pub struct MemorySource {
    children: HashMap<String, Vec<Block>>,
    pages: HashMap<String, PageMeta>,
    databases: HashMap<String, DatabaseMeta>,
    rows: HashMap<String, Vec<PageMeta>>,
    failures: HashMap<String, FetchError>,
    /// Caps the batch size regardless of what the caller asks for.
    max_batch: Option<usize>,
    calls: RefCell<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the direct children of a block or page.
    pub fn with_children(mut self, parent_id: &str, blocks: Vec<Block>) -> Self {
        self.children.insert(parent_id.to_string(), blocks);
        self
    }

    pub fn with_page(mut self, page: PageMeta) -> Self {
        self.pages.insert(page.id.clone(), page);
        self
    }

    pub fn with_database(mut self, database: DatabaseMeta, rows: Vec<PageMeta>) -> Self {
        self.rows.insert(database.id.clone(), rows);
        self.databases.insert(database.id.clone(), database);
        self
    }

    /// Make every call touching `id` fail with `error`.
    pub fn fail(mut self, id: &str, error: FetchError) -> Self {
        self.failures.insert(id.to_string(), error);
        self
    }

    pub fn with_max_batch(mut self, max_batch: usize) -> Self {
        self.max_batch = Some(max_batch.max(1));
        self
    }

    /// Calls made so far, formatted as `"<operation> <id> <cursor>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, operation: &str, id: &str, cursor: Option<&str>) -> Result<(), FetchError> {
        self.calls
            .borrow_mut()
            .push(format!("{operation} {id} {}", cursor.unwrap_or("-")));
        match self.failures.get(id) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn paginate<T: Clone>(
        &self,
        items: &[T],
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<Paginated<T>, FetchError> {
        let start = match cursor {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| FetchError::Other(format!("invalid cursor '{raw}'")))?,
            None => 0,
        };
        let size = match self.max_batch {
            Some(max) => max.min(page_size.max(1) as usize),
            None => page_size.max(1) as usize,
        };
        let end = (start + size).min(items.len());
        let batch = items.get(start..end).unwrap_or_default().to_vec();
        let next_cursor = (end < items.len()).then(|| end.to_string());
        Ok(Paginated {
            items: batch,
            next_cursor,
        })
    }
}

impl ContentSource for MemorySource {
    fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<Paginated<Block>, FetchError> {
        self.record("children", block_id, cursor)?;
        let items = self
            .children
            .get(block_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        self.paginate(items, cursor, page_size)
    }

    fn get_page(&self, page_id: &str) -> Result<PageMeta, FetchError> {
        self.record("page", page_id, None)?;
        self.pages.get(page_id).cloned().ok_or(FetchError::NotFound)
    }

    fn get_database(&self, database_id: &str) -> Result<DatabaseMeta, FetchError> {
        self.record("database", database_id, None)?;
        self.databases
            .get(database_id)
            .cloned()
            .ok_or(FetchError::NotFound)
    }

    fn query_database(
        &self,
        database_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<Paginated<PageMeta>, FetchError> {
        self.record("query", database_id, cursor)?;
        let rows = self.rows.get(database_id).ok_or(FetchError::NotFound)?;
        self.paginate(rows, cursor, page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::BlockKind;

    fn paragraphs(count: usize) -> Vec<Block> {
        (0..count)
            .map(|i| Block::new(format!("b{i}"), BlockKind::Divider))
            .collect()
    }

    #[test]
    fn paginates_with_offset_cursors() {
        let source = MemorySource::new().with_children("root", paragraphs(5));
        let first = source.list_children("root", None, 2).unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.next_cursor.as_deref(), Some("2"));
        let last = source.list_children("root", Some("4"), 2).unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.next_cursor, None);
    }

    #[test]
    fn unknown_parent_has_no_children() {
        let source = MemorySource::new();
        let batch = source.list_children("nothing", None, 100).unwrap();
        assert!(batch.items.is_empty());
        assert_eq!(batch.next_cursor, None);
    }

    #[test]
    fn registered_failure_is_returned() {
        let source = MemorySource::new().fail("p", FetchError::Forbidden);
        assert_eq!(source.get_page("p"), Err(FetchError::Forbidden));
        assert_eq!(source.calls(), vec!["page p -".to_string()]);
    }
}
