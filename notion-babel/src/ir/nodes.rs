//! Core data structures for the flattened block sequence.
//!
//! A fetched document is a `Vec<Block>` in reading order. Nesting is not
//! represented by pointers: every block carries the indentation `level` it was
//! emitted at, and the serializer derives structure from the flat order.

use serde::Deserialize;

use super::properties::PageProperties;

/// A single flattened block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    /// Indentation depth relative to the sequence it lives in.
    pub level: usize,
    pub has_children: bool,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Block {
            id: id.into(),
            level: 0,
            has_children: false,
            kind,
        }
    }

    pub fn at_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }
}

/// Styled inline text runs.
pub type RichText = Vec<RichTextSpan>;

/// The closed set of block kinds the converter understands.
///
/// Anything else decodes to [`BlockKind::Unsupported`], which keeps the raw
/// type name so the serializer can render a visible placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph(RichText),
    /// Heading level is 1, 2 or 3.
    Heading {
        level: u8,
        text: RichText,
    },
    BulletedListItem(RichText),
    NumberedListItem(RichText),
    ToDo {
        text: RichText,
        checked: bool,
    },
    Quote(RichText),
    Toggle(RichText),
    Code(CodeBlock),
    Callout {
        text: RichText,
        icon: Option<Icon>,
    },
    Divider,
    Embed {
        url: Option<String>,
    },
    LinkPreview {
        url: String,
    },
    ChildPage {
        title: String,
        expansion: Expansion,
    },
    ChildDatabase {
        title: String,
    },
    ColumnList,
    Column,
    Table(TableInfo),
    TableRow {
        cells: Vec<RichText>,
    },
    Image {
        url: Option<String>,
        caption: RichText,
    },
    SyncedBlock,
    Unsupported {
        type_name: String,
    },
}

impl BlockKind {
    /// Kinds rendered without blank separator lines between them.
    pub fn is_tight(&self) -> bool {
        matches!(
            self,
            BlockKind::BulletedListItem(_)
                | BlockKind::NumberedListItem(_)
                | BlockKind::ToDo { .. }
        )
    }

    /// Kinds whose children are indented one level deeper.
    pub fn indents_children(&self) -> bool {
        matches!(
            self,
            BlockKind::BulletedListItem(_)
                | BlockKind::NumberedListItem(_)
                | BlockKind::ToDo { .. }
                | BlockKind::Toggle(_)
        )
    }
}

/// Payload of a code block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub text: RichText,
    pub caption: RichText,
    pub language: String,
}

/// Declared shape of a table container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TableInfo {
    /// The first row holds column names.
    pub has_column_header: bool,
}

/// Page or callout icon.
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Emoji(String),
    /// Externally hosted or uploaded image.
    Image(String),
}

impl Icon {
    /// Text glyph used where an icon prefixes inline text.
    pub fn glyph(&self) -> &str {
        match self {
            Icon::Emoji(emoji) => emoji,
            Icon::Image(_) => "🖼️",
        }
    }
}

/// Whether a child page had its content embedded at fetch time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Expansion {
    #[default]
    Unexpanded,
    Expanded(Box<SubPage>),
}

/// Content of an embedded sub-page, fetched by value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubPage {
    pub title: String,
    pub icon: Option<Icon>,
    /// Flattened content, levels relative to the sub-page (starting at 0).
    pub blocks: Vec<Block>,
    pub properties: PageProperties,
}

/// A styled inline run of text.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RichTextSpan {
    #[serde(rename = "plain_text", default)]
    pub content: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(rename = "href", default)]
    pub link: Option<String>,
}

impl RichTextSpan {
    pub fn plain(content: impl Into<String>) -> Self {
        RichTextSpan {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.annotations.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.annotations.italic = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.annotations.strikethrough = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.annotations.underline = true;
        self
    }

    pub fn code(mut self) -> Self {
        self.annotations.code = true;
        self
    }

    pub fn linked(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }
}

/// Style annotations of a span. Missing fields default to unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

/// Concatenate span contents with no styling.
pub fn plain_text(spans: &[RichTextSpan]) -> String {
    spans.iter().map(|span| span.content.as_str()).collect()
}
