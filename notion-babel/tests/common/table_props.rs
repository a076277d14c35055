use notion_babel::common::table::reconstruct_table;
use notion_babel::ir::nodes::{Block, BlockKind, RichTextSpan, TableInfo};
use proptest::prelude::*;

fn table_blocks(rows: &[Vec<String>], has_column_header: bool) -> Vec<Block> {
    let table = Block::new("table", BlockKind::Table(TableInfo { has_column_header }));
    let mut blocks = vec![table];
    blocks.extend(rows.iter().enumerate().map(|(i, cells)| {
        Block::new(
            format!("row{i}"),
            BlockKind::TableRow {
                cells: cells
                    .iter()
                    .map(|cell| vec![RichTextSpan::plain(cell.clone())])
                    .collect(),
            },
        )
        .at_level(1)
    }));
    blocks
}

fn rows_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("[a-z0-9 ]{0,6}", 1..6), 1..8)
}

proptest! {
    #[test]
    fn every_row_has_the_column_count(rows in rows_strategy(), header in any::<bool>()) {
        let table = reconstruct_table(&table_blocks(&rows, header), 0).unwrap();
        let columns = table.columns();
        prop_assert_eq!(columns, rows[0].len());

        let rendered = table.render("");
        let lines: Vec<&str> = rendered.lines().collect();
        // Header (real or empty), separator, then one line per data row.
        prop_assert_eq!(lines.len(), table.rows.len() + 2);
        for line in lines {
            prop_assert_eq!(line.matches('|').count(), columns + 1);
        }
    }

    #[test]
    fn header_flag_decides_first_row(rows in rows_strategy(), header in any::<bool>()) {
        let table = reconstruct_table(&table_blocks(&rows, header), 0).unwrap();
        let expected_rows = if header { rows.len() - 1 } else { rows.len() };
        prop_assert_eq!(table.header.is_some(), header);
        prop_assert_eq!(table.rows.len(), expected_rows);
    }
}
