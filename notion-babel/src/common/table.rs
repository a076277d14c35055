//! Pipe table reconstruction.
//!
//! A table arrives flattened: the table block itself, followed by its rows as
//! sibling blocks one level deeper. [`reconstruct_table`] scans forward from
//! the table block and collects those rows; [`PipeTable::render`] turns the
//! result into a Markdown pipe table whose rows all have the same width.

use super::rich_text::{render_spans, ConversionContext};
use crate::ir::nodes::{Block, BlockKind};

/// Dash run used for every column of the separator row.
const SEPARATOR_CELL: &str = "--------";

/// A table of already-rendered cell strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipeTable {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl PipeTable {
    /// Column count: the header's width, else the first data row's.
    pub fn columns(&self) -> usize {
        match &self.header {
            Some(header) => header.len(),
            None => self.rows.first().map(Vec::len).unwrap_or(0),
        }
    }

    /// Render with every line prefixed by `indent`. No trailing newline.
    ///
    /// A table without a header gets an empty header row, since pipe tables
    /// require one. Returns an empty string when there is nothing to render.
    pub fn render(&self, indent: &str) -> String {
        let columns = self.columns();
        if columns == 0 {
            return String::new();
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        let header = self
            .header
            .clone()
            .unwrap_or_else(|| vec![String::new(); columns]);
        lines.push(format_row(&header, columns, indent));
        lines.push(format!(
            "{indent}| {} |",
            vec![SEPARATOR_CELL; columns].join(" | ")
        ));
        for row in &self.rows {
            lines.push(format_row(row, columns, indent));
        }
        lines.join("\n")
    }
}

/// Pad with empty cells or truncate so the row has exactly `columns` cells.
pub fn normalize_row(row: &[String], columns: usize) -> Vec<String> {
    let mut cells: Vec<String> = row.iter().take(columns).cloned().collect();
    cells.resize(columns, String::new());
    cells
}

fn format_row(row: &[String], columns: usize, indent: &str) -> String {
    format!("{indent}| {} |", normalize_row(row, columns).join(" | "))
}

/// Collect the rows following the table block at `table_index`.
///
/// Rows are blocks exactly one level below the table. Deeper blocks are
/// skipped; a shallower block or a non-row at row level ends the scan.
/// Returns `None` if `table_index` does not point at a table.
pub fn reconstruct_table(blocks: &[Block], table_index: usize) -> Option<PipeTable> {
    let table = blocks.get(table_index)?;
    let BlockKind::Table(info) = &table.kind else {
        return None;
    };
    let row_level = table.level + 1;

    let mut scanned: Vec<Vec<String>> = Vec::new();
    for block in &blocks[table_index + 1..] {
        if block.level > row_level {
            continue;
        }
        if block.level < row_level {
            break;
        }
        match &block.kind {
            BlockKind::TableRow { cells } => scanned.push(
                cells
                    .iter()
                    .map(|cell| {
                        render_spans(cell, ConversionContext::TableCell)
                            .trim()
                            .to_string()
                    })
                    .collect(),
            ),
            _ => break,
        }
    }

    let header = if info.has_column_header && !scanned.is_empty() {
        Some(scanned.remove(0))
    } else {
        None
    };

    Some(PipeTable {
        header,
        rows: scanned,
    })
}
