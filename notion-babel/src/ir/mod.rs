//! Intermediate representation of fetched content.
//!
//! This module defines the flat, level-annotated block sequence produced by the
//! fetcher and consumed by every output format, plus the typed page properties
//! rendered in front of a page's content.

pub mod nodes;
pub mod properties;
