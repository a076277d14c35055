//! Markdown output
//!
//! Serializes the flat block sequence produced by the fetcher into
//! GitHub-flavored Markdown. Output only: nothing here parses Markdown.
//!
//! # Element Mapping Table
//!
//! | Block              | Markdown                                  | Notes                                     |
//! |--------------------|-------------------------------------------|-------------------------------------------|
//! | heading_1/2/3      | `#` / `##` / `###`                        |                                           |
//! | paragraph          | Paragraph                                 | Empty paragraphs are dropped              |
//! | bulleted_list_item | `* item`                                  | Tight                                     |
//! | numbered_list_item | `n. item`                                 | Tight, counter per level                  |
//! | to_do              | `- [ ]` / `- [x]`                         | Tight                                     |
//! | quote              | `> ` on every line                        |                                           |
//! | callout            | `> icon text`                             | Image icons become a glyph                |
//! | toggle             | Summary text, or `<details>`              | See [`rules::ToggleStyle`]                |
//! | code               | Fenced block, caption below               | `plain text` drops the info string        |
//! | divider            | `---`                                     |                                           |
//! | embed              | `<iframe src="…">`                        | Nothing without a URL                     |
//! | link_preview       | `[url](url)`                              |                                           |
//! | child_page         | Link, or `<details>` with nested content  | Nested content is one level deeper        |
//! | child_database     | Link                                      | Never expanded                            |
//! | table / table_row  | Pipe table                                | Rendered from the table block             |
//! | image, columns     | Nothing                                   | Column content renders normally           |
//! | anything else      | `_[unsupported block: type (id)]_`        |                                           |
//!
//! Inline spans go through [`crate::common::rich_text`].
//!
//! # Lossy Conversions
//!
//! - Column layouts collapse into a single column.
//! - Images are dropped.
//! - Toggles lose their collapsed state unless rendered as disclosures.
//! - Colors and mentions render as plain text.
//! - Row headers of tables are not marked.
//!
//! # Spacing
//!
//! Consecutive fragments are separated by a blank line, except two tight
//! kinds (bulleted, numbered, to-do) which are only separated by a line
//! break, whatever their levels.

pub mod document;
pub mod properties;
pub mod rules;
pub mod section;
pub mod serializer;

pub use document::{assemble, ASSEMBLY_ERROR_PLACEHOLDER};
pub use rules::{MarkdownRules, ToggleStyle};
pub use section::render_section;
pub use serializer::{ListCounters, MarkdownSerializer};
