//! Markdown output tests
//!
//! Structural checks re-parse the emitted Markdown with comrak; layout rules
//! are checked as properties over generated block sequences.

mod spacing_props;
mod structure;
