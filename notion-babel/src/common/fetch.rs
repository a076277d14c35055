//! Fetches a block tree and flattens it into a level-annotated sequence.
//!
//! # The High-Level Concept
//!
//! The content source exposes a tree: every block may own children, listed
//! page by page. Rather than materializing that tree, we walk it depth-first
//! and emit a single `Vec<Block>` in reading order, stamping each block with
//! the indentation level it should be rendered at. The serializer works on
//! that flat sequence only.
//!
//! # The Algorithm
//!
//! 1. **Listing:** drain a container's children batch by batch, following the
//!    continuation cursor until the source reports none.
//!
//! 2. **Per child, by kind:**
//!    - *Column list:* emit it, list its columns; emit each column at the same
//!      level followed by the column's content one level deeper.
//!    - *Table:* emit it, then only its `table_row` children one level deeper.
//!    - *Child page:* below the depth bound, fetch the page's metadata and
//!      content (content levels restart at 0) and attach both to the block.
//!      Any failure leaves the block unexpanded; it never propagates.
//!    - *Child database:* emitted as-is, never expanded.
//!    - *Anything else with children:* emit it, then recurse; list items,
//!      to-dos and toggles indent their children by one level.
//!
//! 3. **Completion:** the accumulated sequence is returned. Calls are made one
//!    at a time in document order, so the sequence order is the reading order.

use crate::error::FetchError;
use crate::ir::nodes::{Block, BlockKind, Expansion, SubPage};
use crate::source::ContentSource;

/// The API never returns more than this many children per request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Knobs for [`BlockTreeFetcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Children requested per listing call (clamped to `1..=MAX_PAGE_SIZE`).
    pub page_size: u32,
    /// How many levels of sub-pages get their content embedded.
    pub max_depth: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            max_depth: 1,
        }
    }
}

/// Recursive, paginated fetcher over a [`ContentSource`].
pub struct BlockTreeFetcher<'a, S: ContentSource + ?Sized> {
    source: &'a S,
    options: FetchOptions,
}

impl<'a, S: ContentSource + ?Sized> BlockTreeFetcher<'a, S> {
    pub fn new(source: &'a S, options: FetchOptions) -> Self {
        Self { source, options }
    }

    /// Fetch the content of a page as a flat sequence starting at level 0.
    pub fn fetch_page_content(&self, page_id: &str) -> Result<Vec<Block>, FetchError> {
        self.fetch_children(page_id, 0, 0)
    }

    /// Fetch and flatten every descendant of `container_id`.
    ///
    /// `level` is the indentation of the direct children; `depth` is the
    /// number of sub-pages already expanded on the way here.
    pub fn fetch_children(
        &self,
        container_id: &str,
        level: usize,
        depth: usize,
    ) -> Result<Vec<Block>, FetchError> {
        let children = self.list_all(container_id)?;
        let mut flat = Vec::with_capacity(children.len());

        for mut block in children {
            block.level = level;
            match block.kind {
                BlockKind::ColumnList => {
                    let layout_id = block.id.clone();
                    flat.push(block);
                    for mut column in self.list_all(&layout_id)? {
                        column.level = level;
                        let column_id = column.id.clone();
                        flat.push(column);
                        flat.extend(self.fetch_children(&column_id, level + 1, depth)?);
                    }
                }
                BlockKind::Table(_) => {
                    let table_id = block.id.clone();
                    flat.push(block);
                    let rows = self.list_all(&table_id)?;
                    flat.extend(
                        rows.into_iter()
                            .filter(|row| matches!(row.kind, BlockKind::TableRow { .. }))
                            .map(|row| row.at_level(level + 1)),
                    );
                }
                BlockKind::ChildPage {
                    ref mut expansion, ..
                } => {
                    *expansion = self.expand_sub_page(&block.id, depth);
                    flat.push(block);
                }
                BlockKind::ChildDatabase { .. } => flat.push(block),
                _ if block.has_children => {
                    let child_level = if block.kind.indents_children() {
                        level + 1
                    } else {
                        level
                    };
                    let parent_id = block.id.clone();
                    flat.push(block);
                    flat.extend(self.fetch_children(&parent_id, child_level, depth)?);
                }
                _ => flat.push(block),
            }
        }

        Ok(flat)
    }

    /// Embed a sub-page's content, degrading to unexpanded on any failure.
    fn expand_sub_page(&self, page_id: &str, depth: usize) -> Expansion {
        if depth >= self.options.max_depth {
            log::debug!("sub-page {page_id}: depth {depth} reached the expansion bound");
            return Expansion::Unexpanded;
        }

        let expanded = self.source.get_page(page_id).and_then(|meta| {
            let blocks = self.fetch_children(page_id, 0, depth + 1)?;
            Ok(SubPage {
                title: meta.title,
                icon: meta.icon,
                blocks,
                properties: meta.properties,
            })
        });

        match expanded {
            Ok(sub_page) => {
                log::debug!(
                    "sub-page {page_id}: embedded {} blocks",
                    sub_page.blocks.len()
                );
                Expansion::Expanded(Box::new(sub_page))
            }
            Err(err) => {
                log::warn!("sub-page {page_id} left unexpanded: {err}");
                Expansion::Unexpanded
            }
        }
    }

    /// Drain a paginated children listing.
    fn list_all(&self, block_id: &str) -> Result<Vec<Block>, FetchError> {
        let page_size = self.options.page_size.clamp(1, MAX_PAGE_SIZE);
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let batch = self
                .source
                .list_children(block_id, cursor.as_deref(), page_size)?;
            log::debug!(
                "{block_id}: received {} children (more: {})",
                batch.items.len(),
                batch.next_cursor.is_some()
            );
            blocks.extend(batch.items);
            match batch.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        Ok(blocks)
    }
}
