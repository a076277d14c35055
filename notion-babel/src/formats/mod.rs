//! Format implementations
//!
//! Output formats for fetched block sequences.

pub mod markdown;

pub use markdown::{assemble, MarkdownRules, ToggleStyle};
