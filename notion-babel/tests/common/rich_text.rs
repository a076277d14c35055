use notion_babel::common::rich_text::{render_spans, ConversionContext};
use notion_babel::ir::nodes::RichTextSpan;
use proptest::prelude::*;

const ALL_CONTEXTS: [ConversionContext; 5] = [
    ConversionContext::Standard,
    ConversionContext::TableCell,
    ConversionContext::CodeContent,
    ConversionContext::CodeCaption,
    ConversionContext::DiagramContent,
];

#[test]
fn test_spans_decoded_from_json_render() {
    let spans: Vec<RichTextSpan> = serde_json::from_str(
        r#"[
            {"plain_text": "Hello, "},
            {"plain_text": "bold world", "annotations": {"bold": true}},
            {"plain_text": " and a "},
            {"plain_text": "link", "href": "https://example.com"}
        ]"#,
    )
    .unwrap();
    assert_eq!(
        render_spans(&spans, ConversionContext::Standard),
        "Hello, **bold world** and a [link](https://example.com)"
    );
}

#[test]
fn test_empty_spans_render_empty_in_every_context() {
    for context in ALL_CONTEXTS {
        assert_eq!(render_spans(&[], context), "");
    }
}

proptest! {
    #[test]
    fn plain_spans_render_literally(content in "[a-zA-Z0-9 .,!?]{0,40}") {
        let spans = vec![RichTextSpan::plain(content.clone())];
        prop_assert_eq!(render_spans(&spans, ConversionContext::Standard), content);
    }

    #[test]
    fn table_cells_never_break_rows(content in "[a-z|\n ]{0,30}") {
        let spans = vec![RichTextSpan::plain(content).bold()];
        let rendered = render_spans(&spans, ConversionContext::TableCell);
        prop_assert!(!rendered.contains('\n'));
        prop_assert!(!rendered.replace("\\|", "").contains('|'));
    }

    #[test]
    fn code_content_is_untouched(content in "[ -~\n]{0,40}") {
        let spans = vec![RichTextSpan::plain(content.clone()).italic().code()];
        prop_assert_eq!(render_spans(&spans, ConversionContext::CodeContent), content);
    }
}
