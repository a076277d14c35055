//! Decoding of API JSON payloads into the intermediate representation.
//!
//! Decoding is lenient: missing optional fields fall back to defaults, and an
//! unknown block type becomes [`BlockKind::Unsupported`] carrying its raw name.
//! Only a payload without an id or a type is rejected.

use serde_json::Value;

use super::{DatabaseMeta, PageMeta, Paginated};
use crate::error::FetchError;
use crate::ir::nodes::{
    plain_text, Block, BlockKind, CodeBlock, Expansion, Icon, RichText, RichTextSpan, TableInfo,
};
use crate::ir::properties::{
    DateRange, FileRef, FormulaValue, PageProperties, PropertyValue, RollupValue, UserRef,
};

/// Decode a single block object.
pub fn parse_block(value: &Value) -> Result<Block, FetchError> {
    let id = str_field(value, "id")
        .ok_or_else(|| FetchError::Other("block payload without an id".to_string()))?;
    let type_name = str_field(value, "type")
        .ok_or_else(|| FetchError::Other(format!("block {id} has no type")))?;
    let payload = value.get(type_name).unwrap_or(&Value::Null);

    let kind = match type_name {
        "paragraph" => BlockKind::Paragraph(rich_text_field(payload, "rich_text")),
        "heading_1" => heading(1, payload),
        "heading_2" => heading(2, payload),
        "heading_3" => heading(3, payload),
        "bulleted_list_item" => BlockKind::BulletedListItem(rich_text_field(payload, "rich_text")),
        "numbered_list_item" => BlockKind::NumberedListItem(rich_text_field(payload, "rich_text")),
        "to_do" => BlockKind::ToDo {
            text: rich_text_field(payload, "rich_text"),
            checked: payload
                .get("checked")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        },
        "quote" => BlockKind::Quote(rich_text_field(payload, "rich_text")),
        "toggle" => BlockKind::Toggle(rich_text_field(payload, "rich_text")),
        "code" => BlockKind::Code(CodeBlock {
            text: rich_text_field(payload, "rich_text"),
            caption: rich_text_field(payload, "caption"),
            language: str_field(payload, "language")
                .unwrap_or("plain text")
                .to_string(),
        }),
        "callout" => BlockKind::Callout {
            text: rich_text_field(payload, "rich_text"),
            icon: payload.get("icon").and_then(parse_icon),
        },
        "divider" => BlockKind::Divider,
        "embed" => BlockKind::Embed {
            url: str_field(payload, "url")
                .filter(|url| !url.is_empty())
                .map(str::to_string),
        },
        "link_preview" => BlockKind::LinkPreview {
            url: str_field(payload, "url").unwrap_or_default().to_string(),
        },
        "child_page" => BlockKind::ChildPage {
            title: str_field(payload, "title").unwrap_or_default().to_string(),
            expansion: Expansion::Unexpanded,
        },
        "child_database" => BlockKind::ChildDatabase {
            title: str_field(payload, "title").unwrap_or_default().to_string(),
        },
        "column_list" => BlockKind::ColumnList,
        "column" => BlockKind::Column,
        "table" => BlockKind::Table(TableInfo {
            has_column_header: payload
                .get("has_column_header")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }),
        "table_row" => BlockKind::TableRow {
            cells: payload
                .get("cells")
                .and_then(Value::as_array)
                .map(|cells| cells.iter().map(parse_rich_text).collect())
                .unwrap_or_default(),
        },
        "image" => BlockKind::Image {
            url: hosted_file_url(payload).map(str::to_string),
            caption: rich_text_field(payload, "caption"),
        },
        "synced_block" => BlockKind::SyncedBlock,
        other => BlockKind::Unsupported {
            type_name: other.to_string(),
        },
    };

    Ok(Block {
        id: id.to_string(),
        level: 0,
        has_children: value
            .get("has_children")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        kind,
    })
}

fn heading(level: u8, payload: &Value) -> BlockKind {
    BlockKind::Heading {
        level,
        text: rich_text_field(payload, "rich_text"),
    }
}

/// Decode a children listing response.
pub fn parse_children_page(body: &Value) -> Result<Paginated<Block>, FetchError> {
    let items = results(body)?
        .iter()
        .map(parse_block)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Paginated {
        items,
        next_cursor: next_cursor(body),
    })
}

/// Decode a database query response.
pub fn parse_rows_page(body: &Value) -> Result<Paginated<PageMeta>, FetchError> {
    let items = results(body)?
        .iter()
        .map(parse_page)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Paginated {
        items,
        next_cursor: next_cursor(body),
    })
}

/// Decode a page object.
pub fn parse_page(value: &Value) -> Result<PageMeta, FetchError> {
    let id = str_field(value, "id")
        .ok_or_else(|| FetchError::Other("page payload without an id".to_string()))?;

    let mut properties = PageProperties::new();
    let mut title = String::new();
    if let Some(map) = value.get("properties").and_then(Value::as_object) {
        for (name, raw) in map {
            let property = parse_property(raw);
            if let PropertyValue::Title(spans) = &property {
                title = plain_text(spans);
            }
            properties.insert(name.clone(), property);
        }
    }

    Ok(PageMeta {
        id: id.to_string(),
        title,
        icon: value.get("icon").and_then(parse_icon),
        properties,
    })
}

/// Decode a database object.
pub fn parse_database(value: &Value) -> Result<DatabaseMeta, FetchError> {
    let id = str_field(value, "id")
        .ok_or_else(|| FetchError::Other("database payload without an id".to_string()))?;
    Ok(DatabaseMeta {
        id: id.to_string(),
        title: plain_text(&rich_text_field(value, "title")),
        icon: value.get("icon").and_then(parse_icon),
    })
}

/// Decode an icon object (`emoji`, `external` or `file`).
pub fn parse_icon(value: &Value) -> Option<Icon> {
    match str_field(value, "type")? {
        "emoji" => str_field(value, "emoji").map(|emoji| Icon::Emoji(emoji.to_string())),
        _ => hosted_file_url(value).map(|url| Icon::Image(url.to_string())),
    }
}

/// Decode a rich text array. Spans that fail to decode keep their plain text.
pub fn parse_rich_text(value: &Value) -> RichText {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| {
            serde_json::from_value::<RichTextSpan>(item.clone()).unwrap_or_else(|_| {
                RichTextSpan::plain(str_field(item, "plain_text").unwrap_or_default())
            })
        })
        .collect()
}

/// Extract the `message` field of an API error body.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    str_field(&value, "message").map(str::to_string)
}

/// Decode a single property value by its declared type.
pub fn parse_property(value: &Value) -> PropertyValue {
    let Some(type_name) = str_field(value, "type") else {
        return PropertyValue::Unknown("unknown".to_string());
    };
    let payload = value.get(type_name).unwrap_or(&Value::Null);

    match type_name {
        "title" => PropertyValue::Title(parse_rich_text(payload)),
        "rich_text" => PropertyValue::RichText(parse_rich_text(payload)),
        "number" => PropertyValue::Number(payload.as_f64()),
        "select" => PropertyValue::Select(option_name(payload)),
        "status" => PropertyValue::Status(option_name(payload)),
        "multi_select" => PropertyValue::MultiSelect(
            payload
                .as_array()
                .map(|options| options.iter().filter_map(option_name).collect())
                .unwrap_or_default(),
        ),
        "date" => PropertyValue::Date(parse_date(payload)),
        "checkbox" => PropertyValue::Checkbox(payload.as_bool().unwrap_or(false)),
        "url" => PropertyValue::Url(payload.as_str().map(str::to_string)),
        "email" => PropertyValue::Email(payload.as_str().map(str::to_string)),
        "phone_number" => PropertyValue::PhoneNumber(payload.as_str().map(str::to_string)),
        "formula" => PropertyValue::Formula(parse_formula(payload)),
        "relation" => PropertyValue::Relation(
            payload
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| str_field(item, "id").map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
        ),
        "rollup" => PropertyValue::Rollup(parse_rollup(payload)),
        "people" => PropertyValue::People(
            payload
                .as_array()
                .map(|users| users.iter().filter_map(parse_user).collect())
                .unwrap_or_default(),
        ),
        "files" => PropertyValue::Files(
            payload
                .as_array()
                .map(|files| {
                    files
                        .iter()
                        .map(|file| FileRef {
                            name: str_field(file, "name").unwrap_or_default().to_string(),
                            url: hosted_file_url(file).map(str::to_string),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        ),
        "created_time" => {
            PropertyValue::CreatedTime(payload.as_str().unwrap_or_default().to_string())
        }
        "last_edited_time" => {
            PropertyValue::LastEditedTime(payload.as_str().unwrap_or_default().to_string())
        }
        "created_by" => PropertyValue::CreatedBy(parse_user(payload).unwrap_or(UserRef {
            id: String::new(),
            name: None,
        })),
        "last_edited_by" => PropertyValue::LastEditedBy(parse_user(payload).unwrap_or(UserRef {
            id: String::new(),
            name: None,
        })),
        other => PropertyValue::Unknown(other.to_string()),
    }
}

fn parse_formula(value: &Value) -> FormulaValue {
    let Some(type_name) = str_field(value, "type") else {
        return FormulaValue::Unknown("unknown".to_string());
    };
    let payload = value.get(type_name).unwrap_or(&Value::Null);
    match type_name {
        "string" => FormulaValue::String(payload.as_str().map(str::to_string)),
        "number" => FormulaValue::Number(payload.as_f64()),
        "boolean" => FormulaValue::Boolean(payload.as_bool()),
        "date" => FormulaValue::Date(parse_date(payload)),
        other => FormulaValue::Unknown(other.to_string()),
    }
}

fn parse_rollup(value: &Value) -> RollupValue {
    let Some(type_name) = str_field(value, "type") else {
        return RollupValue::Unknown("unknown".to_string());
    };
    let payload = value.get(type_name).unwrap_or(&Value::Null);
    match type_name {
        "number" => RollupValue::Number(payload.as_f64()),
        "date" => RollupValue::Date(parse_date(payload)),
        "array" => RollupValue::Array(
            payload
                .as_array()
                .map(|items| items.iter().map(parse_property).collect())
                .unwrap_or_default(),
        ),
        other => RollupValue::Unknown(other.to_string()),
    }
}

fn parse_date(value: &Value) -> Option<DateRange> {
    let start = str_field(value, "start")?;
    Some(DateRange {
        start: start.to_string(),
        end: str_field(value, "end").map(str::to_string),
    })
}

fn parse_user(value: &Value) -> Option<UserRef> {
    let id = str_field(value, "id")?;
    Some(UserRef {
        id: id.to_string(),
        name: str_field(value, "name").map(str::to_string),
    })
}

fn option_name(value: &Value) -> Option<String> {
    str_field(value, "name").map(str::to_string)
}

/// URL of an `external` or uploaded `file` object.
fn hosted_file_url(value: &Value) -> Option<&str> {
    let type_name = str_field(value, "type")?;
    value
        .get(type_name)
        .and_then(|inner| str_field(inner, "url"))
}

fn results(body: &Value) -> Result<&Vec<Value>, FetchError> {
    body.get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Other("listing response without results".to_string()))
}

fn next_cursor(body: &Value) -> Option<String> {
    let has_more = body
        .get("has_more")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    if !has_more {
        return None;
    }
    str_field(body, "next_cursor").map(str::to_string)
}

fn rich_text_field(value: &Value, key: &str) -> RichText {
    value.get(key).map(parse_rich_text).unwrap_or_default()
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_paragraph_block() {
        let block = parse_block(&json!({
            "object": "block",
            "id": "b1",
            "type": "paragraph",
            "has_children": true,
            "paragraph": {
                "rich_text": [
                    {"plain_text": "Hi ", "annotations": {"bold": false}},
                    {"plain_text": "there", "annotations": {"bold": true}, "href": null}
                ]
            }
        }))
        .unwrap();
        assert_eq!(block.id, "b1");
        assert!(block.has_children);
        assert_eq!(
            block.kind,
            BlockKind::Paragraph(vec![
                RichTextSpan::plain("Hi "),
                RichTextSpan::plain("there").bold()
            ])
        );
    }

    #[test]
    fn unknown_type_becomes_unsupported() {
        let block = parse_block(&json!({
            "id": "bm",
            "type": "bookmark",
            "bookmark": {"url": "https://example.com"}
        }))
        .unwrap();
        assert_eq!(
            block.kind,
            BlockKind::Unsupported {
                type_name: "bookmark".to_string()
            }
        );
    }

    #[test]
    fn block_without_type_is_rejected() {
        assert!(parse_block(&json!({"id": "x"})).is_err());
    }

    #[test]
    fn decodes_table_and_rows() {
        let table = parse_block(&json!({
            "id": "t",
            "type": "table",
            "has_children": true,
            "table": {"table_width": 2, "has_column_header": true, "has_row_header": false}
        }))
        .unwrap();
        assert_eq!(
            table.kind,
            BlockKind::Table(TableInfo {
                has_column_header: true,
            })
        );

        let row = parse_block(&json!({
            "id": "r",
            "type": "table_row",
            "table_row": {"cells": [[{"plain_text": "A"}], []]}
        }))
        .unwrap();
        assert_eq!(
            row.kind,
            BlockKind::TableRow {
                cells: vec![vec![RichTextSpan::plain("A")], vec![]]
            }
        );
    }

    #[test]
    fn decodes_callout_icons() {
        let emoji = parse_icon(&json!({"type": "emoji", "emoji": "💡"}));
        assert_eq!(emoji, Some(Icon::Emoji("💡".to_string())));
        let external = parse_icon(&json!({
            "type": "external",
            "external": {"url": "https://img/x.png"}
        }));
        assert_eq!(external, Some(Icon::Image("https://img/x.png".to_string())));
    }

    #[test]
    fn next_cursor_respects_has_more() {
        let body = json!({"results": [], "next_cursor": "abc", "has_more": false});
        assert_eq!(parse_children_page(&body).unwrap().next_cursor, None);
        let body = json!({"results": [], "next_cursor": "abc", "has_more": true});
        assert_eq!(
            parse_children_page(&body).unwrap().next_cursor.as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn decodes_page_properties_in_order() {
        let page = parse_page(&json!({
            "id": "p",
            "url": "https://www.notion.so/p",
            "icon": {"type": "emoji", "emoji": "📄"},
            "properties": {
                "Status": {"type": "status", "status": {"name": "Done"}},
                "Name": {"type": "title", "title": [{"plain_text": "Roadmap"}]},
                "Tags": {"type": "multi_select", "multi_select": [{"name": "a"}, {"name": "b"}]},
                "Score": {"type": "formula", "formula": {"type": "number", "number": 4.5}},
                "Weird": {"type": "button", "button": {}}
            }
        }))
        .unwrap();
        assert_eq!(page.title, "Roadmap");
        assert_eq!(
            page.properties.names().collect::<Vec<_>>(),
            vec!["Status", "Name", "Tags", "Score", "Weird"]
        );
        assert_eq!(
            page.properties.get("Tags"),
            Some(&PropertyValue::MultiSelect(vec![
                "a".to_string(),
                "b".to_string()
            ]))
        );
        assert_eq!(
            page.properties.get("Score"),
            Some(&PropertyValue::Formula(FormulaValue::Number(Some(4.5))))
        );
        assert_eq!(
            page.properties.get("Weird"),
            Some(&PropertyValue::Unknown("button".to_string()))
        );
    }

    #[test]
    fn decodes_rollup_array() {
        let value = parse_property(&json!({
            "type": "rollup",
            "rollup": {
                "type": "array",
                "array": [{"type": "number", "number": 2}]
            }
        }));
        assert_eq!(
            value,
            PropertyValue::Rollup(RollupValue::Array(vec![PropertyValue::Number(Some(2.0))]))
        );
    }

    #[test]
    fn extracts_error_message() {
        assert_eq!(
            error_message(r#"{"object":"error","status":400,"message":"bad cursor"}"#),
            Some("bad cursor".to_string())
        );
        assert_eq!(error_message("<html>"), None);
    }
}
