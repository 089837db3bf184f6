//! Site build orchestration for Quill.
//!
//! [`SiteBuilder::build`] turns a directory of markdown pages into HTML:
//!
//! 1. Scan the source directory for `*.md` files (sorted).
//! 2. Parse YAML front matter (`title`, `summary`).
//! 3. Extract every page's summary before anything is rendered.
//! 4. Per page, expand directives (diagrams, embeds), render markdown and
//!    write `<output>/<path>.html`.
//! 5. Write `<output>/summaries.json`.
//!
//! Directive failures are collected as diagnostics in the [`BuildReport`].

mod builder;
mod error;
mod front_matter;
mod markdown;
mod page;

pub use builder::{BuildReport, SUMMARIES_FILENAME, SiteBuilder, SummaryEntry};
pub use error::BuildError;
pub use front_matter::{FrontMatter, split as split_front_matter};
pub use markdown::render_markdown;
pub use page::Page;
pub use quill_directives::{Diagnostic, Severity};
