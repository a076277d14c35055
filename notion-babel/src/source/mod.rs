//! Content source interaction: the ability to read pages, databases and blocks.
//!
//! The fetcher and the converter depend on [`ContentSource`] only; the HTTP
//! details live in [`http::NotionClient`]. [`memory::MemorySource`] serves
//! prebuilt content without any network access.
//!
//! Every call is blocking and performed sequentially by the caller, so the
//! order of calls mirrors the reading order of the document.

pub mod http;
pub mod memory;
pub mod wire;

use crate::error::FetchError;
use crate::ir::nodes::{Block, Icon};
use crate::ir::properties::PageProperties;

/// One batch of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Continuation cursor; `None` once the listing is exhausted.
    pub next_cursor: Option<String>,
}

/// Metadata of a page: title, icon and typed properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageMeta {
    pub id: String,
    pub title: String,
    pub icon: Option<Icon>,
    pub properties: PageProperties,
}

/// Metadata of a database.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatabaseMeta {
    pub id: String,
    pub title: String,
    pub icon: Option<Icon>,
}

/// The ability to retrieve content from a workspace.
pub trait ContentSource {
    /// List one batch of a block's direct children.
    fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<Paginated<Block>, FetchError>;

    fn get_page(&self, page_id: &str) -> Result<PageMeta, FetchError>;

    fn get_database(&self, database_id: &str) -> Result<DatabaseMeta, FetchError>;

    /// List one batch of a database's rows (pages).
    fn query_database(
        &self,
        database_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<Paginated<PageMeta>, FetchError>;
}

impl<S: ContentSource + ?Sized> ContentSource for &S {
    fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<Paginated<Block>, FetchError> {
        (**self).list_children(block_id, cursor, page_size)
    }

    fn get_page(&self, page_id: &str) -> Result<PageMeta, FetchError> {
        (**self).get_page(page_id)
    }

    fn get_database(&self, database_id: &str) -> Result<DatabaseMeta, FetchError> {
        (**self).get_database(database_id)
    }

    fn query_database(
        &self,
        database_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<Paginated<PageMeta>, FetchError> {
        (**self).query_database(database_id, cursor, page_size)
    }
}

/// Drain every row of a database, following continuation cursors.
pub fn query_all_rows<S: ContentSource + ?Sized>(
    source: &S,
    database_id: &str,
    page_size: u32,
) -> Result<Vec<PageMeta>, FetchError> {
    let mut rows = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let batch = source.query_database(database_id, cursor.as_deref(), page_size)?;
        log::debug!(
            "database {database_id}: received {} rows (more: {})",
            batch.items.len(),
            batch.next_cursor.is_some()
        );
        rows.extend(batch.items);
        match batch.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    Ok(rows)
}
