//! Rendering of typed page property values.
//!
//! Values always end up in pipe table cells (the page property table or a
//! database rows table), so every rendered value is cell-safe.

use chrono::{DateTime, NaiveDate, Utc};

use super::rules::MarkdownRules;
use crate::common::rich_text::{
    escape_link_target, escape_table_cell, render_spans, ConversionContext,
};
use crate::common::table::PipeTable;
use crate::ir::properties::{DateRange, FormulaValue, PageProperties, PropertyValue, RollupValue};
use crate::source::PageMeta;

const PROPERTY_HEADER: [&str; 2] = ["Property", "Value"];

/// Render one value as a table-cell-safe string. Missing values render empty.
pub fn render_value(value: &PropertyValue, rules: &MarkdownRules) -> String {
    match value {
        PropertyValue::Title(text) | PropertyValue::RichText(text) => {
            render_spans(text, ConversionContext::TableCell)
                .trim()
                .to_string()
        }
        PropertyValue::Number(number) => number.map(format_number).unwrap_or_default(),
        PropertyValue::Select(name) | PropertyValue::Status(name) => cell(name.as_deref()),
        PropertyValue::MultiSelect(names) => escape_table_cell(&names.join(", ")),
        PropertyValue::Date(range) => range
            .as_ref()
            .map(|range| format_range(range, rules))
            .unwrap_or_default(),
        PropertyValue::Checkbox(checked) => yes_no(*checked),
        PropertyValue::Url(url) => cell(url.as_deref()),
        PropertyValue::Email(email) => cell(email.as_deref()),
        PropertyValue::PhoneNumber(phone) => cell(phone.as_deref()),
        PropertyValue::Formula(formula) => match formula {
            FormulaValue::String(text) => cell(text.as_deref()),
            FormulaValue::Number(number) => number.map(format_number).unwrap_or_default(),
            FormulaValue::Boolean(flag) => flag.map(yes_no).unwrap_or_default(),
            FormulaValue::Date(range) => range
                .as_ref()
                .map(|range| format_range(range, rules))
                .unwrap_or_default(),
            FormulaValue::Unknown(type_name) => placeholder(type_name),
        },
        PropertyValue::Relation(ids) => ids
            .iter()
            .map(|id| format!("[{id}]({})", escape_link_target(&rules.page_url(id))))
            .collect::<Vec<_>>()
            .join(", "),
        PropertyValue::Rollup(rollup) => match rollup {
            RollupValue::Number(number) => number.map(format_number).unwrap_or_default(),
            RollupValue::Date(range) => range
                .as_ref()
                .map(|range| format_range(range, rules))
                .unwrap_or_default(),
            RollupValue::Array(items) => items
                .iter()
                .map(|item| render_value(item, rules))
                .filter(|rendered| !rendered.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            RollupValue::Unknown(type_name) => placeholder(type_name),
        },
        PropertyValue::People(users) => escape_table_cell(
            &users
                .iter()
                .map(|user| user.display_name())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        PropertyValue::Files(files) => files
            .iter()
            .map(|file| match &file.url {
                Some(url) => format!(
                    "[{}]({})",
                    escape_table_cell(&file.name),
                    escape_link_target(url)
                ),
                None => escape_table_cell(&file.name),
            })
            .collect::<Vec<_>>()
            .join(", "),
        PropertyValue::CreatedTime(raw) | PropertyValue::LastEditedTime(raw) => {
            format_timestamp(raw, rules)
        }
        PropertyValue::CreatedBy(user) | PropertyValue::LastEditedBy(user) => {
            escape_table_cell(user.display_name())
        }
        PropertyValue::Unknown(type_name) => placeholder(type_name),
    }
}

/// Two-column name/value table of a page's properties, in declaration order.
/// Empty when there are no properties.
pub fn property_table(properties: &PageProperties, rules: &MarkdownRules) -> String {
    if properties.is_empty() {
        return String::new();
    }
    PipeTable {
        header: Some(PROPERTY_HEADER.iter().map(|h| h.to_string()).collect()),
        rows: properties
            .iter()
            .map(|(name, value)| vec![escape_table_cell(name), render_value(value, rules)])
            .collect(),
    }
    .render("")
}

/// One row per database entry, one column per property.
///
/// Columns are ordered by first appearance across rows; a row without a
/// property gets an empty cell.
pub fn rows_table(rows: &[PageMeta], rules: &MarkdownRules) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for name in row.properties.names() {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
    }
    if columns.is_empty() {
        return String::new();
    }

    PipeTable {
        header: Some(columns.iter().map(|name| escape_table_cell(name)).collect()),
        rows: rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|name| {
                        row.properties
                            .get(name)
                            .map(|value| render_value(value, rules))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect(),
    }
    .render("")
}

/// Whole numbers render without a fractional part.
pub fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// Format a timestamp in UTC; unparseable input is kept as-is.
pub fn format_timestamp(raw: &str, rules: &MarkdownRules) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => timestamp
            .with_timezone(&Utc)
            .format(&rules.timestamp_format)
            .to_string(),
        Err(_) => escape_table_cell(raw),
    }
}

/// Format a date value, which may be a bare date or a full timestamp.
pub fn format_date(raw: &str, rules: &MarkdownRules) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format(&rules.date_format).to_string(),
        Err(_) => format_timestamp(raw, rules),
    }
}

fn format_range(range: &DateRange, rules: &MarkdownRules) -> String {
    let start = format_date(&range.start, rules);
    match &range.end {
        Some(end) => format!("{start} → {}", format_date(end, rules)),
        None => start,
    }
}

fn cell(value: Option<&str>) -> String {
    value.map(escape_table_cell).unwrap_or_default()
}

fn yes_no(flag: bool) -> String {
    let answer = if flag { "Yes" } else { "No" };
    answer.to_string()
}

fn placeholder(type_name: &str) -> String {
    format!("[{type_name}]")
}
