//! Rendering of styled inline spans into Markdown text.
//!
//! The same spans render differently depending on where they land: a table
//! cell cannot hold line breaks or pipes, code content must stay verbatim, and
//! diagram sources need their escaped newlines turned back into real ones.
//! [`ConversionContext`] selects the rules.

use crate::ir::nodes::RichTextSpan;

/// The two-character escape sequence (backslash, `n`) found in some content.
const ESCAPED_NEWLINE: &str = "\\n";
/// Hard line break that survives Markdown rendering.
const HARD_BREAK: &str = "  \n";
/// Line break marker safe inside a pipe table row.
const TABLE_BREAK: &str = "<br>";

/// Where rendered text will be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionContext {
    #[default]
    Standard,
    TableCell,
    CodeContent,
    CodeCaption,
    DiagramContent,
}

/// Render spans into a single string under `context`.
pub fn render_spans(spans: &[RichTextSpan], context: ConversionContext) -> String {
    spans
        .iter()
        .map(|span| render_span(span, context))
        .collect()
}

fn render_span(span: &RichTextSpan, context: ConversionContext) -> String {
    match context {
        ConversionContext::CodeContent => span.content.clone(),
        ConversionContext::DiagramContent => span.content.replace(ESCAPED_NEWLINE, "\n"),
        ConversionContext::TableCell => escape_table_cell(&span.content),
        ConversionContext::Standard | ConversionContext::CodeCaption => render_styled(span),
    }
}

/// Replace line breaks (real or escaped) and escape pipes.
pub fn escape_table_cell(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace(ESCAPED_NEWLINE, TABLE_BREAK)
        .replace('\n', TABLE_BREAK)
        .replace('|', "\\|")
}

fn render_styled(span: &RichTextSpan) -> String {
    let content = span.content.replace(ESCAPED_NEWLINE, HARD_BREAK);
    let annotations = span.annotations;

    // Markers must hug non-whitespace, so surrounding whitespace stays outside.
    let core = content.trim();
    let styled = if core.is_empty() {
        content.clone()
    } else {
        let leading = &content[..content.len() - content.trim_start().len()];
        let trailing = &content[content.trim_end().len()..];

        let mut text = core.to_string();
        if annotations.code {
            text = format!("`{text}`");
        }
        if annotations.bold {
            text = format!("**{text}**");
        }
        if annotations.italic {
            text = format!("_{text}_");
        }
        if annotations.strikethrough {
            text = format!("~~{text}~~");
        }
        if annotations.underline {
            text = format!("<u>{text}</u>");
        }
        format!("{leading}{text}{trailing}")
    };

    match span.link.as_deref() {
        Some(url) if !url.is_empty() => format!("[{styled}]({})", escape_link_target(url)),
        _ => styled,
    }
}

/// Escape characters in a link target that Markdown would read as emphasis.
pub fn escape_link_target(url: &str) -> String {
    url.replace('_', "\\_")
}

/// Escape text placed inside raw HTML, either as element content or as a
/// double-quoted attribute value.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
