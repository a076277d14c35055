//! Document assembly: property table, serialized blocks and final newline
//! normalization, behind a panic boundary.

use std::panic::{self, AssertUnwindSafe};

use super::properties::property_table;
use super::rules::MarkdownRules;
use super::serializer::MarkdownSerializer;
use crate::ir::nodes::Block;
use crate::ir::properties::PageProperties;

/// Returned instead of a document when assembly fails unexpectedly.
pub const ASSEMBLY_ERROR_PLACEHOLDER: &str = "_[error: this document could not be converted]_\n";

/// Assemble a flat block sequence into a Markdown document.
///
/// The property table is only emitted for top-level documents, and only when
/// the rules ask for it. The result is either empty or ends with exactly one
/// newline. A panic anywhere in serialization yields
/// [`ASSEMBLY_ERROR_PLACEHOLDER`] instead of propagating.
pub fn assemble(
    blocks: &[Block],
    properties: Option<&PageProperties>,
    is_top_level: bool,
    rules: &MarkdownRules,
) -> String {
    guarded(|| assemble_unchecked(blocks, properties, is_top_level, rules))
}

/// Run `render`, turning a panic into the error placeholder.
fn guarded(render: impl FnOnce() -> String) -> String {
    match panic::catch_unwind(AssertUnwindSafe(render)) {
        Ok(markdown) => markdown,
        Err(payload) => {
            let cause = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown cause".to_string());
            log::error!("document assembly failed: {cause}");
            ASSEMBLY_ERROR_PLACEHOLDER.to_string()
        }
    }
}

fn assemble_unchecked(
    blocks: &[Block],
    properties: Option<&PageProperties>,
    is_top_level: bool,
    rules: &MarkdownRules,
) -> String {
    let mut sections = Vec::with_capacity(2);
    if is_top_level && rules.include_properties {
        if let Some(properties) = properties {
            sections.push(property_table(properties, rules));
        }
    }
    sections.push(MarkdownSerializer::new(rules).serialize(blocks));

    let joined = sections
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    finish(&joined)
}

/// Strip trailing blank lines and end non-empty output with one newline.
pub fn finish(markdown: &str) -> String {
    let trimmed = markdown.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n")
    }
}
