//! Diagram rendering via external tools for Quill.
//!
//! Block directives hand their body to a command-line tool:
//!
//! | Directive | Tool | Output |
//! |-----------|------|--------|
//! | `uml` | `plantuml` | `<img>` of a PNG (default) or SVG file |
//! | `tikz` | `tikz2svg` | `<img>` of an SVG file |
//! | `ditaa` | `ditaa` | `<img>` of a PNG file |
//! | `dot`, `neato`, `twopi`, `circo`, `fdp`, `sfdp`, `patchwork`, `osage` | Graphviz | inline SVG |
//!
//! Image files are content-addressed: the name is the Adler-32 checksum of
//! the directive body, so an unchanged diagram always maps to the same
//! `<8 hex digits>.<ext>` file.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use quill_diagrams::{Renderer, register};
//! use quill_directives::DirectiveProcessor;
//!
//! let renderer = Arc::new(Renderer::new("content/uml"));
//! let mut processor = register(DirectiveProcessor::new(), &renderer, "https://example.com/uml");
//!
//! let mut html = processor.process(":::uml\nAlice -> Bob: hello\n:::");
//! processor.post_process(&mut html);
//! ```

mod directive;
mod error;
mod hash;
mod language;
mod renderer;

use std::sync::Arc;

use quill_directives::DirectiveProcessor;

pub use directive::{DiagramDirective, GraphvizDirective};
pub use error::RenderError;
pub use hash::{artifact_name, content_hash};
pub use language::{DiagramFormat, DiagramTool, GraphvizLayout};
pub use renderer::{DiagramSource, RenderedArtifact, Renderer, render_piped};

/// Register every diagram directive on `processor`.
///
/// `url_prefix` is the public URL of the renderer's output directory.
#[must_use]
pub fn register(
    processor: DirectiveProcessor,
    renderer: &Arc<Renderer>,
    url_prefix: &str,
) -> DirectiveProcessor {
    let processor = DiagramTool::ALL.into_iter().fold(processor, |processor, tool| {
        processor.with_block(DiagramDirective::new(tool, Arc::clone(renderer), url_prefix))
    });
    GraphvizLayout::ALL
        .into_iter()
        .fold(processor, |processor, layout| {
            processor.with_block(GraphvizDirective::new(layout))
        })
}
