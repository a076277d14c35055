//! Serializes a flat block sequence into Markdown fragments.
//!
//! Each block becomes one fragment (possibly empty) indented by its level plus
//! the serializer's offset. Fragments are joined with a blank line, except
//! between two tight list kinds which are joined by a single line break.
//!
//! State that depends on position in the sequence lives on the serializer:
//! the numbered-list counters and, when toggles render as disclosures, the
//! stack of toggles still open. A fresh serializer is created for every
//! sequence, including the nested content of an expanded sub-page.

use super::rules::{MarkdownRules, ToggleStyle};
use crate::common::rich_text::{escape_html, escape_link_target, render_spans, ConversionContext};
use crate::common::table::reconstruct_table;
use crate::ir::nodes::{Block, BlockKind, CodeBlock, Expansion, Icon, RichTextSpan, SubPage};

/// Language tag the source uses for code without a language.
const PLAIN_TEXT_LANGUAGE: &str = "plain text";
const DIAGRAM_LANGUAGE: &str = "mermaid";
const UNTITLED: &str = "Untitled";

/// Per-level counters for numbered list items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCounters {
    counts: Vec<usize>,
}

impl ListCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a block at `level` and return that level's counter.
    ///
    /// Counters of deeper levels are cleared. A numbered item increments its
    /// level's counter; any other block resets it to zero.
    pub fn advance(&mut self, level: usize, numbered: bool) -> usize {
        self.counts.resize(level + 1, 0);
        if numbered {
            self.counts[level] += 1;
        } else {
            self.counts[level] = 0;
        }
        self.counts[level]
    }

}

pub struct MarkdownSerializer<'r> {
    rules: &'r MarkdownRules,
    /// Levels added to every block's own level.
    offset: usize,
    counters: ListCounters,
    /// Levels of toggles rendered as `<details>` and not yet closed.
    open_toggles: Vec<usize>,
}

impl<'r> MarkdownSerializer<'r> {
    pub fn new(rules: &'r MarkdownRules) -> Self {
        Self::with_offset(rules, 0)
    }

    pub fn with_offset(rules: &'r MarkdownRules, offset: usize) -> Self {
        Self {
            rules,
            offset,
            counters: ListCounters::new(),
            open_toggles: Vec::new(),
        }
    }

    /// Serialize a whole sequence. No trailing newline.
    pub fn serialize(mut self, blocks: &[Block]) -> String {
        let mut output = Fragments::default();
        for index in 0..blocks.len() {
            let level = blocks[index].level;
            for closing in self.close_toggles(level) {
                output.push(closing, false);
            }
            let fragment = self.serialize_block(blocks, index);
            output.push(fragment, blocks[index].kind.is_tight());
        }
        for closing in self.close_toggles(0) {
            output.push(closing, false);
        }
        output.text
    }

    /// Render the block at `index`. Returns an empty string for kinds with no
    /// output of their own.
    ///
    /// The whole sequence is needed because a table's rows follow it.
    pub fn serialize_block(&mut self, blocks: &[Block], index: usize) -> String {
        let block = &blocks[index];
        let numbered = matches!(block.kind, BlockKind::NumberedListItem(_));
        let number = self.counters.advance(block.level, numbered);
        let indent = self.rules.indent(self.offset + block.level);

        let text = match &block.kind {
            BlockKind::Paragraph(text) => standard(text),
            BlockKind::Heading { level, text } => {
                let hashes = "#".repeat(usize::from(*level).clamp(1, 3));
                format!("{hashes} {}", standard(text))
            }
            BlockKind::BulletedListItem(text) => format!("* {}", standard(text)),
            BlockKind::NumberedListItem(text) => format!("{number}. {}", standard(text)),
            BlockKind::ToDo { text, checked } => {
                let mark = if *checked { "x" } else { " " };
                format!("- [{mark}] {}", standard(text))
            }
            BlockKind::Quote(text) => quote_lines(&standard(text)),
            BlockKind::Toggle(text) => match self.rules.toggle_style {
                ToggleStyle::Flatten => standard(text),
                ToggleStyle::Details => {
                    self.open_toggles.push(block.level);
                    format!("<details>\n<summary>{}</summary>", standard(text))
                }
            },
            BlockKind::Code(code) => render_code(code),
            BlockKind::Callout { text, icon } => {
                let body = standard(text);
                match icon {
                    Some(icon) => quote_lines(&format!("{} {body}", icon.glyph())),
                    None => quote_lines(&body),
                }
            }
            BlockKind::Divider => "---".to_string(),
            BlockKind::Embed { url } => match url.as_deref() {
                Some(url) if !url.is_empty() => {
                    format!("<iframe src=\"{}\"></iframe>", escape_html(url))
                }
                _ => String::new(),
            },
            BlockKind::LinkPreview { url } => format!("[{url}]({})", escape_link_target(url)),
            BlockKind::ChildPage { title, expansion } => match expansion {
                Expansion::Expanded(sub_page) => {
                    return self.render_sub_page(&block.id, title, sub_page, block.level)
                }
                Expansion::Unexpanded => self.page_link(&block.id, title),
            },
            BlockKind::ChildDatabase { title } => self.page_link(&block.id, title),
            BlockKind::Table(_) => {
                return reconstruct_table(blocks, index)
                    .map(|table| table.render(&indent))
                    .unwrap_or_default()
            }
            BlockKind::TableRow { .. }
            | BlockKind::Image { .. }
            | BlockKind::ColumnList
            | BlockKind::Column
            | BlockKind::SyncedBlock => String::new(),
            BlockKind::Unsupported { type_name } => {
                format!("_[unsupported block: {type_name} ({})]_", block.id)
            }
        };

        indent_lines(&text, &indent)
    }

    fn page_link(&self, id: &str, title: &str) -> String {
        format!(
            "[{}]({})",
            display_title(title),
            escape_link_target(&self.rules.page_url(id))
        )
    }

    /// Disclosure block with a summary line, a link to the page and the page's
    /// content one level deeper.
    fn render_sub_page(&self, id: &str, title: &str, sub_page: &SubPage, level: usize) -> String {
        let indent = self.rules.indent(self.offset + level);
        let title = if title.is_empty() {
            sub_page.title.as_str()
        } else {
            title
        };
        let summary = summary_text(sub_page.icon.as_ref(), title);

        let mut parts = vec![
            format!("{indent}<details>\n{indent}<summary>{summary}</summary>"),
            format!("{indent}{}", self.page_link(id, title)),
        ];
        let nested = MarkdownSerializer::with_offset(self.rules, self.offset + level + 1)
            .serialize(&sub_page.blocks);
        if !nested.is_empty() {
            parts.push(nested);
        }
        parts.push(format!("{indent}</details>"));
        parts.join("\n\n")
    }

    /// Closing tags for every open toggle at `level` or deeper, innermost first.
    fn close_toggles(&mut self, level: usize) -> Vec<String> {
        let mut closing = Vec::new();
        while let Some(&open) = self.open_toggles.last() {
            if open < level {
                break;
            }
            self.open_toggles.pop();
            let indent = self.rules.indent(self.offset + open);
            closing.push(format!("{indent}</details>"));
        }
        closing
    }
}

/// Accumulates fragments with the tight/loose spacing rule.
#[derive(Default)]
struct Fragments {
    text: String,
    previous_tight: Option<bool>,
}

impl Fragments {
    fn push(&mut self, fragment: String, tight: bool) {
        if fragment.is_empty() {
            return;
        }
        if let Some(previous_tight) = self.previous_tight {
            let separator = if previous_tight && tight { "\n" } else { "\n\n" };
            self.text.push_str(separator);
        }
        self.text.push_str(&fragment);
        self.previous_tight = Some(tight);
    }
}

fn standard(text: &[RichTextSpan]) -> String {
    render_spans(text, ConversionContext::Standard)
}

pub(crate) fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        UNTITLED
    } else {
        title
    }
}

/// Text of a `<summary>` element: icon glyph and escaped title.
pub(crate) fn summary_text(icon: Option<&Icon>, title: &str) -> String {
    let title = escape_html(display_title(title));
    match icon {
        Some(icon) => format!("{} {title}", icon.glyph()),
        None => title,
    }
}

fn render_code(code: &CodeBlock) -> String {
    let context = if code.language == DIAGRAM_LANGUAGE {
        ConversionContext::DiagramContent
    } else {
        ConversionContext::CodeContent
    };
    let content = render_spans(&code.text, context);
    let caption = render_spans(&code.caption, ConversionContext::CodeCaption);
    if content.is_empty() && caption.is_empty() {
        return String::new();
    }

    let language = if code.language == PLAIN_TEXT_LANGUAGE {
        ""
    } else {
        code.language.as_str()
    };
    let mut lines = vec![format!("```{language}")];
    if !content.is_empty() {
        lines.push(content.trim_end_matches('\n').to_string());
    }
    lines.push("```".to_string());
    if !caption.is_empty() {
        lines.push(caption);
    }
    lines.join("\n")
}

fn quote_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                "> ".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix every non-empty line with `indent`.
pub(crate) fn indent_lines(text: &str, indent: &str) -> String {
    if indent.is_empty() {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
