//! Notion to Markdown conversion
//!
//!     This crate turns hosted Notion pages and databases into flat Markdown documents suitable
//!     for embedding in other text (review comments, READMEs, chat messages).
//!
//!     This is a pure lib, that is, it powers notion-cli but is shell agnostic: no code here
//!     should suppose a shell environment, be it printing, env vars or exit codes. Network access
//!     only happens through the ContentSource trait.
//!
//! Architecture
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FetchError taxonomy
//!     ├── locator.rs              # URL / id classification
//!     ├── convert.rs              # Converter: the entry point tying everything together
//!     ├── source                  # ContentSource trait and implementations
//!     │   ├── http.rs             # Blocking REST client
//!     │   ├── memory.rs           # In-memory source for tests and offline use
//!     │   └── wire.rs             # JSON payloads → IR
//!     ├── ir                      # Block and property data model
//!     ├── common                  # Format agnostic core
//!     │   ├── fetch.rs            # Tree → flat sequence
//!     │   ├── rich_text.rs        # Inline spans
//!     │   └── table.rs            # Pipe table reconstruction
//!     └── formats
//!         └── markdown            # Serializer, properties, assembler, rules
//!
//! Core Algorithms
//!
//!     The remote content is a tree, but Markdown is flat text where nesting is only expressed
//!     by indentation. So the fetcher never builds a tree: it walks the remote one depth first
//!     and emits a single ordered sequence of blocks, each stamped with its indentation level
//!     (see ./common/fetch.rs). Every rendering rule (list numbering, blank line spacing, table
//!     row collection) is then defined over that flat order (see ./formats/markdown/serializer.rs).
//!
//!     Sub-pages are the one exception to flatness: up to a depth bound their content is fetched
//!     and carried by value on the sub-page block, and rendered one level deeper.
//!
//! Error Handling
//!
//!     Failing to resolve the requested page or database is an error for the caller
//!     (FetchError). Everything after that degrades instead: a sub-page that can't be fetched
//!     becomes a plain link, an unknown block becomes a visible placeholder, and a panic during
//!     assembly becomes a fixed placeholder document.
//!
//! Testing
//!
//!     Unit tests live beside each module. Integration tests in tests/ drive whole conversions
//!     through MemorySource, so nothing here needs network access to be tested.
//!
pub mod common;
pub mod convert;
pub mod error;
pub mod formats;
pub mod ir;
pub mod locator;
pub mod source;

pub use common::fetch::{BlockTreeFetcher, FetchOptions};
pub use convert::{ConvertedDocument, Converter};
pub use error::FetchError;
pub use formats::markdown::{assemble, render_section, MarkdownRules, ToggleStyle};
pub use locator::{classify, classify_as, Locator, LocatorKind};
pub use source::http::{ClientOptions, NotionClient};
pub use source::memory::MemorySource;
pub use source::ContentSource;
