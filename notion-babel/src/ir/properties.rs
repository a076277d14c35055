//! Typed page property values.

use super::nodes::RichText;

/// Ordered name → value map of a page's properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageProperties {
    entries: Vec<(String, PropertyValue)>,
}

impl PageProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, replacing an existing one with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, PropertyValue)> for PageProperties {
    fn from_iter<T: IntoIterator<Item = (S, PropertyValue)>>(iter: T) -> Self {
        let mut properties = PageProperties::new();
        for (name, value) in iter {
            properties.insert(name, value);
        }
        properties
    }
}

/// A start date with an optional end, as ISO-8601 strings.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

/// A file attached to a files property.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRef {
    pub name: String,
    pub url: Option<String>,
}

/// A workspace member or bot.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRef {
    pub id: String,
    pub name: Option<String>,
}

impl UserRef {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    String(Option<String>),
    Number(Option<f64>),
    Boolean(Option<bool>),
    Date(Option<DateRange>),
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RollupValue {
    Number(Option<f64>),
    Date(Option<DateRange>),
    Array(Vec<PropertyValue>),
    Unknown(String),
}

/// A property value dispatched by its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(RichText),
    RichText(RichText),
    Number(Option<f64>),
    Select(Option<String>),
    MultiSelect(Vec<String>),
    Status(Option<String>),
    Date(Option<DateRange>),
    Checkbox(bool),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    Formula(FormulaValue),
    /// Ids of related pages.
    Relation(Vec<String>),
    Rollup(RollupValue),
    People(Vec<UserRef>),
    Files(Vec<FileRef>),
    CreatedTime(String),
    LastEditedTime(String),
    CreatedBy(UserRef),
    LastEditedBy(UserRef),
    Unknown(String),
}
