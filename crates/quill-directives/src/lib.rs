//! Directive syntax, dispatch and diagnostics for Quill.
//!
//! Directives are the author-facing extension points of a page. Two forms
//! are recognized, both taking a whole line:
//!
//! - **Leaf** ([`LeafDirective`]): `::name[content]{attrs}`
//! - **Block** ([`BlockDirective`]): `:::name[content]{attrs}`, followed by
//!   body lines, closed by a line of three or more colons
//!
//! # Two-Phase Processing
//!
//! 1. [`DirectiveProcessor::process`] runs before markdown rendering and
//!    swaps every handled directive for an HTML comment placeholder, which
//!    pulldown-cmark passes through untouched.
//! 2. [`DirectiveProcessor::post_process`] replaces the placeholders in the
//!    rendered HTML with the handler output.
//!
//! Handler failures never abort processing: they are turned into an inline
//! error block plus a [`Diagnostic`] pointing at the directive's line.
//!
//! # Example
//!
//! ```
//! use quill_directives::{
//!     DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveProcessor, LeafDirective,
//! };
//!
//! struct Kbd;
//!
//! impl LeafDirective for Kbd {
//!     fn name(&self) -> &str { "kbd" }
//!
//!     fn process(&mut self, args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
//!         DirectiveOutput::html(format!("<kbd>{}</kbd>", args.content))
//!     }
//! }
//!
//! let mut processor = DirectiveProcessor::new().with_leaf(Kbd);
//! let mut html = processor.process("::kbd[Ctrl+C]");
//! processor.post_process(&mut html);
//! assert_eq!(html, "<kbd>Ctrl+C</kbd>");
//! ```

mod args;
mod block;
mod context;
mod diagnostic;
mod fence;
mod html;
mod leaf;
mod output;
mod parser;
mod processor;

pub use args::DirectiveArgs;
pub use block::BlockDirective;
pub use context::DirectiveContext;
pub use diagnostic::{Diagnostic, Severity};
pub use html::escape_html;
pub use leaf::LeafDirective;
pub use output::DirectiveOutput;
pub use processor::DirectiveProcessor;
