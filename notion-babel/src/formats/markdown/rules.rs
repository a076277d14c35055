use serde::{Deserialize, Serialize};

/// How toggle blocks are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleStyle {
    /// Summary text only; children follow as ordinary indented blocks.
    #[default]
    Flatten,
    /// `<details>` disclosure wrapping the toggle's children.
    Details,
}

/// Configuration for the Markdown serializer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownRules {
    /// String repeated once per indentation level
    pub indent_unit: String,

    pub toggle_style: ToggleStyle,

    /// Whether top-level documents start with a property table
    pub include_properties: bool,

    /// Base of links to sub-pages and databases
    pub page_url_base: String,

    /// chrono format for created/edited timestamps
    pub timestamp_format: String,

    /// chrono format for date property values without a time component
    pub date_format: String,
}

impl Default for MarkdownRules {
    fn default() -> Self {
        Self {
            indent_unit: "    ".to_string(),
            toggle_style: ToggleStyle::Flatten,
            include_properties: true,
            page_url_base: "https://www.notion.so".to_string(),
            timestamp_format: "%-m/%-d/%Y, %-I:%M:%S %p".to_string(),
            date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

impl MarkdownRules {
    pub fn indent(&self, level: usize) -> String {
        self.indent_unit.repeat(level)
    }

    /// Link target of a page or database: the base plus the undashed id.
    pub fn page_url(&self, id: &str) -> String {
        format!(
            "{}/{}",
            self.page_url_base.trim_end_matches('/'),
            id.replace('-', "")
        )
    }
}
