use notion_babel::error::FetchError;
use notion_babel::ir::nodes::{BlockKind, Expansion};
use notion_babel::source::memory::MemorySource;
use notion_babel::source::PageMeta;
use notion_babel::{BlockTreeFetcher, Converter, FetchOptions, Locator, LocatorKind};

use crate::fixtures::{child_page, kitchensink, para, KITCHENSINK};

#[test]
fn test_primary_failures_are_classified() {
    for error in [
        FetchError::NotFound,
        FetchError::Unauthorized,
        FetchError::Forbidden,
        FetchError::RateLimited,
        FetchError::Other("HTTP 500".to_string()),
    ] {
        let source = MemorySource::new().fail("gone", error.clone());
        let result = Converter::new(source).convert(&Locator {
            kind: LocatorKind::Page,
            id: "gone".to_string(),
        });
        assert_eq!(result, Err(error));
    }
}

#[test]
fn test_failed_sub_page_keeps_siblings() {
    let source = kitchensink();
    let blocks = BlockTreeFetcher::new(&source, FetchOptions::default())
        .fetch_page_content(KITCHENSINK)
        .unwrap();

    let archive = blocks
        .iter()
        .find(|block| block.id == "archive")
        .expect("archive block present");
    assert!(matches!(
        archive.kind,
        BlockKind::ChildPage {
            expansion: Expansion::Unexpanded,
            ..
        }
    ));
    let ids: Vec<&str> = blocks.iter().map(|block| block.id.as_str()).collect();
    let archive_at = ids.iter().position(|id| *id == "archive").unwrap();
    assert_eq!(&ids[archive_at + 1..], &["tasks", "bm"]);
}

#[test]
fn test_sub_page_failing_mid_content_degrades_to_link() {
    // Metadata resolves but listing the content fails.
    let source = MemorySource::new()
        .with_children(
            "root",
            vec![child_page("sub", "Sub"), para("after", "After.")],
        )
        .with_page(PageMeta {
            id: "sub".to_string(),
            title: "Sub".to_string(),
            ..PageMeta::default()
        })
        .with_children("sub", vec![para("deep", "Deep.").with_children()])
        .fail("deep", FetchError::RateLimited);

    let blocks = BlockTreeFetcher::new(&source, FetchOptions::default())
        .fetch_page_content("root")
        .unwrap();
    let markdown = notion_babel::assemble(&blocks, None, true, &Default::default());
    assert_eq!(markdown, "[Sub](https://www.notion.so/sub)\n\nAfter.\n");
}
