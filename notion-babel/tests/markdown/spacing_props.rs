//! Layout rules checked over generated block sequences.

use notion_babel::formats::markdown::MarkdownSerializer;
use notion_babel::ir::nodes::{Block, BlockKind, RichTextSpan};
use notion_babel::MarkdownRules;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Paragraph,
    Bullet,
    Numbered,
    ToDo,
}

impl Kind {
    fn is_tight(self) -> bool {
        !matches!(self, Kind::Paragraph)
    }

    fn block(self, i: usize, level: usize) -> Block {
        let text = vec![RichTextSpan::plain(format!("item{i}"))];
        let kind = match self {
            Kind::Paragraph => BlockKind::Paragraph(text),
            Kind::Bullet => BlockKind::BulletedListItem(text),
            Kind::Numbered => BlockKind::NumberedListItem(text),
            Kind::ToDo => BlockKind::ToDo {
                text,
                checked: false,
            },
        };
        Block::new(format!("b{i}"), kind).at_level(level)
    }
}

fn kind_strategy() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Paragraph),
        Just(Kind::Bullet),
        Just(Kind::Numbered),
        Just(Kind::ToDo),
    ]
}

fn serialize(blocks: &[Block], rules: &MarkdownRules) -> String {
    MarkdownSerializer::new(rules).serialize(blocks)
}

proptest! {
    #[test]
    fn separators_follow_tightness(
        items in prop::collection::vec((kind_strategy(), 0usize..4), 1..20)
    ) {
        let blocks: Vec<Block> = items
            .iter()
            .enumerate()
            .map(|(i, (kind, level))| kind.block(i, *level))
            .collect();
        let output = serialize(&blocks, &MarkdownRules::default());

        for i in 1..items.len() {
            // Earlier ids are never prefixed by later ones in output order.
            let start = output.find(&format!("item{}", i - 1)).unwrap();
            let this = output.find(&format!("item{i}")).unwrap();
            let between = &output[start..this];
            let newlines = between.matches('\n').count();
            let expected = if items[i - 1].0.is_tight() && items[i].0.is_tight() { 1 } else { 2 };
            prop_assert_eq!(newlines, expected, "between item{} and item{}", i - 1, i);
        }
    }

    #[test]
    fn indentation_is_unit_times_level(
        levels in prop::collection::vec(0usize..5, 1..20),
        width in 1usize..5
    ) {
        let rules = MarkdownRules {
            indent_unit: " ".repeat(width),
            ..MarkdownRules::default()
        };
        let blocks: Vec<Block> = levels
            .iter()
            .enumerate()
            .map(|(i, level)| Kind::Bullet.block(i, *level))
            .collect();
        let output = serialize(&blocks, &rules);
        let lines: Vec<&str> = output.lines().collect();

        prop_assert_eq!(lines.len(), levels.len());
        for (i, (line, level)) in lines.iter().zip(&levels).enumerate() {
            prop_assert_eq!(*line, format!("{}* item{i}", " ".repeat(width * level)));
        }
    }

    #[test]
    fn numbering_counts_contiguous_runs(
        numbered in prop::collection::vec(any::<bool>(), 1..30)
    ) {
        let blocks: Vec<Block> = numbered
            .iter()
            .enumerate()
            .map(|(i, is_numbered)| {
                let kind = if *is_numbered { Kind::Numbered } else { Kind::Paragraph };
                kind.block(i, 0)
            })
            .collect();
        let output = serialize(&blocks, &MarkdownRules::default());

        let mut run = 0;
        for (i, is_numbered) in numbered.iter().enumerate() {
            if *is_numbered {
                run += 1;
                let expected = format!("{run}. item{i}");
                prop_assert!(
                    output.lines().any(|line| line == expected),
                    "missing {:?} in {:?}", expected, output
                );
            } else {
                run = 0;
            }
        }
    }
}
