//! Collapsible wrapper for embedding a converted document in a larger message.

use super::serializer::summary_text;
use crate::ir::nodes::Icon;

/// Wrap `markdown` in a `<details>` block whose summary is the icon and title.
pub fn render_section(title: &str, icon: Option<&Icon>, markdown: &str) -> String {
    let summary = summary_text(icon, title);
    let body = markdown.trim_end();
    if body.is_empty() {
        format!("<details>\n<summary>{summary}</summary>\n</details>\n")
    } else {
        format!("<details>\n<summary>{summary}</summary>\n\n{body}\n\n</details>\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_wraps_document() {
        let icon = Icon::Emoji("📘".to_string());
        assert_eq!(
            render_section("Guide", Some(&icon), "Hello.\n"),
            "<details>\n<summary>📘 Guide</summary>\n\nHello.\n\n</details>\n"
        );
    }

    #[test]
    fn test_blank_title_and_markup_in_title() {
        let blank = render_section("  ", None, "x");
        assert!(blank.starts_with("<details>\n<summary>Untitled</summary>"));
        let marked_up = render_section("<T>", None, "x");
        assert!(marked_up.contains("<summary>&lt;T&gt;</summary>"));
    }

    #[test]
    fn test_empty_section() {
        assert_eq!(
            render_section("", None, ""),
            "<details>\n<summary>Untitled</summary>\n</details>\n"
        );
    }
}
