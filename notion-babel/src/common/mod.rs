//! Format-agnostic core: turning a remote block tree into a flat sequence, and
//! the rendering pieces shared by any text output (inline spans, pipe tables).

pub mod fetch;
pub mod rich_text;
pub mod table;
