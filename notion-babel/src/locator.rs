//! Classification of user-supplied locators.
//!
//! Accepts a bare 32-digit hex id, a dashed UUID, or a workspace URL whose
//! last path segment ends with the id. URLs carrying a `v=` view parameter
//! point at a database; everything else is taken to be a page.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::FetchError;

/// Matches an id, dashed or not, at the end of a path segment or string.
static ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9a-f]{8})-?([0-9a-f]{4})-?([0-9a-f]{4})-?([0-9a-f]{4})-?([0-9a-f]{12})$")
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorKind {
    Page,
    Database,
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorKind::Page => write!(f, "page"),
            LocatorKind::Database => write!(f, "database"),
        }
    }
}

/// A validated target: what it is and its canonical dashed id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub kind: LocatorKind,
    pub id: String,
}

/// Classify `input`, inferring the kind from its shape.
pub fn classify(input: &str) -> Result<Locator, FetchError> {
    let input = input.trim();
    match Url::parse(input) {
        Ok(url) if url.has_host() => {
            let is_view = url.query_pairs().any(|(key, _)| key == "v");
            let segment = url
                .path_segments()
                .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
                .unwrap_or_default();
            Ok(Locator {
                kind: if is_view {
                    LocatorKind::Database
                } else {
                    LocatorKind::Page
                },
                id: extract_id(segment, input)?,
            })
        }
        _ => Ok(Locator {
            kind: LocatorKind::Page,
            id: extract_id(input, input)?,
        }),
    }
}

/// Classify `input` but force the kind.
pub fn classify_as(input: &str, kind: LocatorKind) -> Result<Locator, FetchError> {
    let mut locator = classify(input)?;
    locator.kind = kind;
    Ok(locator)
}

fn extract_id(candidate: &str, input: &str) -> Result<String, FetchError> {
    let captures = ID_RE
        .captures(candidate)
        .ok_or_else(|| FetchError::InvalidLocator(input.to_string()))?;
    let groups: Vec<String> = (1..=5)
        .filter_map(|i| captures.get(i))
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect();
    Ok(groups.join("-"))
}
