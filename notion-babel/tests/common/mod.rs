//! Tests for the format agnostic core: inline spans and table reconstruction.

mod rich_text;
mod table_props;
