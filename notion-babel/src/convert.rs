//! Top-level conversion: resolve a locator, fetch, assemble.

use crate::common::fetch::{BlockTreeFetcher, FetchOptions};
use crate::error::FetchError;
use crate::formats::markdown::document::{assemble, finish};
use crate::formats::markdown::properties::rows_table;
use crate::formats::markdown::rules::MarkdownRules;
use crate::ir::nodes::Icon;
use crate::locator::{Locator, LocatorKind};
use crate::source::{query_all_rows, ContentSource};

/// A converted page or database, with what a host needs to present it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedDocument {
    pub title: String,
    pub icon: Option<Icon>,
    pub markdown: String,
}

/// Converts pages and databases from a content source into Markdown.
///
/// Each call starts from fresh state; a converter can be reused for any
/// number of documents.
pub struct Converter<S: ContentSource> {
    source: S,
    fetch: FetchOptions,
    rules: MarkdownRules,
}

impl<S: ContentSource> Converter<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            fetch: FetchOptions::default(),
            rules: MarkdownRules::default(),
        }
    }

    pub fn with_fetch_options(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn with_rules(mut self, rules: MarkdownRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn convert(&self, locator: &Locator) -> Result<ConvertedDocument, FetchError> {
        log::info!("converting {} {}", locator.kind, locator.id);
        match locator.kind {
            LocatorKind::Page => self.convert_page(&locator.id),
            LocatorKind::Database => self.convert_database(&locator.id),
        }
    }

    /// Page metadata first, then its content; the property table leads the output.
    pub fn convert_page(&self, page_id: &str) -> Result<ConvertedDocument, FetchError> {
        let meta = self.source.get_page(page_id)?;
        let blocks = BlockTreeFetcher::new(&self.source, self.fetch).fetch_page_content(page_id)?;
        log::debug!("page {page_id}: {} blocks fetched", blocks.len());
        let markdown = assemble(&blocks, Some(&meta.properties), true, &self.rules);
        Ok(ConvertedDocument {
            title: meta.title,
            icon: meta.icon,
            markdown,
        })
    }

    /// A database renders as a single table of its rows' properties.
    pub fn convert_database(&self, database_id: &str) -> Result<ConvertedDocument, FetchError> {
        let meta = self.source.get_database(database_id)?;
        let rows = query_all_rows(&self.source, database_id, self.fetch.page_size)?;
        log::debug!("database {database_id}: {} rows fetched", rows.len());
        Ok(ConvertedDocument {
            title: meta.title,
            icon: meta.icon,
            markdown: finish(&rows_table(&rows, &self.rules)),
        })
    }
}
