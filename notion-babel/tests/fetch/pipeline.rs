use insta::assert_snapshot;
use notion_babel::{Converter, FetchOptions, Locator, LocatorKind, MarkdownRules};

use crate::fixtures::{kitchensink, KITCHENSINK};

fn page() -> Locator {
    Locator {
        kind: LocatorKind::Page,
        id: KITCHENSINK.to_string(),
    }
}

#[test]
fn test_kitchensink_markdown() {
    let document = Converter::new(kitchensink()).convert(&page()).unwrap();

    assert_eq!(document.title, "Kitchensink");
    assert_snapshot!(document.markdown, @r###"
    | Property | Value |
    | -------- | -------- |
    | Status | Draft |

    # Overview

    Read the **guide** at [docs](https://example.com/getting\_started).

    * Alpha
        1. one
        2. two
    * Beta
    - [x] Ship it

    Steps

    1. first
    2. second

    > Stay curious

    ```rust
    fn main() {}
    ```

    ---

    | A | B |
    | -------- | -------- |
    | 1 | 2 |

    <details>
    <summary>📎 Appendix</summary>

    [Appendix](https://www.notion.so/appendix)

        Extra notes.

        * nested item

    </details>

    [Archive](https://www.notion.so/archive)

    [Tasks](https://www.notion.so/tasks)

    _[unsupported block: bookmark (bm)]_
    "###);
}

#[test]
fn test_output_ends_with_single_newline() {
    let document = Converter::new(kitchensink()).convert(&page()).unwrap();
    assert!(document.markdown.ends_with("_\n"));
    assert!(!document.markdown.ends_with("\n\n"));
}

#[test]
fn test_small_batches_produce_identical_output() {
    let whole = Converter::new(kitchensink()).convert(&page()).unwrap();
    let batched = Converter::new(kitchensink().with_max_batch(2))
        .with_fetch_options(FetchOptions {
            page_size: 3,
            max_depth: 1,
        })
        .convert(&page())
        .unwrap();
    assert_eq!(whole.markdown, batched.markdown);
}

#[test]
fn test_exhausted_depth_renders_sub_page_as_link() {
    let source = kitchensink();
    let document = Converter::new(&source)
        .with_fetch_options(FetchOptions {
            page_size: 100,
            max_depth: 0,
        })
        .convert(&page())
        .unwrap();

    assert!(document
        .markdown
        .contains("\n[Appendix](https://www.notion.so/appendix)\n"));
    assert!(!document.markdown.contains("Extra notes."));
    assert!(!document.markdown.contains("<details>"));
    assert!(!source
        .calls()
        .iter()
        .any(|call| call.starts_with("page appendix")));
}

#[test]
fn test_rules_flow_into_output() {
    let rules = MarkdownRules {
        indent_unit: "\t".to_string(),
        include_properties: false,
        page_url_base: "https://notes.example".to_string(),
        ..MarkdownRules::default()
    };
    let document = Converter::new(kitchensink())
        .with_rules(rules)
        .convert(&page())
        .unwrap();

    assert!(document.markdown.starts_with("# Overview\n"));
    assert!(document.markdown.contains("* Alpha\n\t1. one\n"));
    assert!(document
        .markdown
        .contains("[Tasks](https://notes.example/tasks)"));
}
