//! Re-parse converted documents and check the Markdown structure a reader
//! would actually see.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use notion_babel::{Converter, Locator, LocatorKind};

use crate::fixtures::{kitchensink, KITCHENSINK};

fn comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options
}

fn kitchensink_markdown() -> String {
    Converter::new(kitchensink())
        .convert(&Locator {
            kind: LocatorKind::Page,
            id: KITCHENSINK.to_string(),
        })
        .unwrap()
        .markdown
}

fn direct_children<'a>(node: &'a AstNode<'a>) -> Vec<&'a AstNode<'a>> {
    node.children().collect()
}

#[test]
fn test_tables_parse_with_declared_widths() {
    let markdown = kitchensink_markdown();
    let arena = Arena::new();
    let root = parse_document(&arena, &markdown, &comrak_options());

    let widths: Vec<usize> = root
        .descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Table(table) => Some(table.alignments.len()),
            _ => None,
        })
        .collect();
    assert_eq!(widths, vec![2, 2]);
}

#[test]
fn test_nested_numbered_list_under_bullet() {
    let markdown = kitchensink_markdown();
    let arena = Arena::new();
    let root = parse_document(&arena, &markdown, &comrak_options());

    let bullets = root
        .descendants()
        .find(|node| {
            matches!(
                &node.data.borrow().value,
                NodeValue::List(list) if matches!(list.list_type, ListType::Bullet)
            )
        })
        .expect("a bulleted list");
    let items = direct_children(bullets);
    assert_eq!(items.len(), 2);

    let nested = items[0]
        .descendants()
        .find(|node| {
            matches!(
                &node.data.borrow().value,
                NodeValue::List(list) if matches!(list.list_type, ListType::Ordered)
            )
        })
        .expect("numbered list nested in the first bullet");
    assert_eq!(direct_children(nested).len(), 2);
}

#[test]
fn test_code_block_keeps_language_and_content() {
    let markdown = kitchensink_markdown();
    let arena = Arena::new();
    let root = parse_document(&arena, &markdown, &comrak_options());

    let code = root
        .descendants()
        .find_map(|node| match &node.data.borrow().value {
            NodeValue::CodeBlock(code) if code.fenced => {
                Some((code.info.clone(), code.literal.clone()))
            }
            _ => None,
        })
        .expect("a fenced code block");
    assert_eq!(code, ("rust".to_string(), "fn main() {}\n".to_string()));
}

#[test]
fn test_heading_and_link_survive() {
    let markdown = kitchensink_markdown();
    let arena = Arena::new();
    let root = parse_document(&arena, &markdown, &comrak_options());

    let heading_levels: Vec<u8> = root
        .descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Heading(heading) => Some(heading.level),
            _ => None,
        })
        .collect();
    assert_eq!(heading_levels, vec![1]);

    let link_targets: Vec<String> = root
        .descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Link(link) => Some(link.url.clone()),
            _ => None,
        })
        .collect();
    assert!(link_targets.contains(&"https://example.com/getting_started".to_string()));
    assert!(link_targets.contains(&"https://www.notion.so/archive".to_string()));
}
