//! Diagram block directives.
//!
//! ```text
//! :::uml{format=svg alt="Login flow" class="figure wide"}
//! Alice -> Bob: hello
//! :::
//! ```

use std::sync::Arc;

use quill_directives::{
    BlockDirective, DirectiveArgs, DirectiveContext, DirectiveOutput, escape_html,
};

use crate::renderer::{DiagramSource, Renderer, render_piped};
use crate::{DiagramTool, GraphvizLayout, RenderError};

/// `uml`, `tikz` and `ditaa` directives: render to a file, emit `<img>`.
pub struct DiagramDirective {
    tool: DiagramTool,
    renderer: Arc<Renderer>,
    url_prefix: String,
}

impl DiagramDirective {
    /// `url_prefix` is prepended to artifact file names, e.g.
    /// `https://example.com/uml`.
    #[must_use]
    pub fn new(tool: DiagramTool, renderer: Arc<Renderer>, url_prefix: impl Into<String>) -> Self {
        Self {
            tool,
            renderer,
            url_prefix: url_prefix.into(),
        }
    }

    fn render(&self, args: &DirectiveArgs, body: &str) -> Result<String, RenderError> {
        let mut source = DiagramSource::new(self.tool, body);
        if let Some(format) = args.get("format") {
            source = source.with_format(format)?;
        }
        if let Some(libs) = args.get("libs") {
            source = source.with_libraries(
                libs.split(',')
                    .map(str::trim)
                    .filter(|lib| !lib.is_empty())
                    .map(str::to_owned)
                    .collect(),
            );
        }

        let artifact = self.renderer.render(&source)?;
        let url = format!("{}/{}", self.url_prefix, artifact.file_name);
        let classes = class_attr(args, self.tool.default_class());
        Ok(format!(
            r#"<img src="{}" alt="{}" class="{}">"#,
            escape_html(&url),
            escape_html(args.get_or("alt", self.tool.default_alt())),
            escape_html(&classes)
        ))
    }
}

impl BlockDirective for DiagramDirective {
    fn name(&self) -> &str {
        self.tool.directive_name()
    }

    fn process(&mut self, args: DirectiveArgs, body: &str, ctx: &DirectiveContext) -> DirectiveOutput {
        tracing::debug!(location = %ctx.location(), tool = self.name(), "Rendering diagram");
        self.render(&args, body).into()
    }
}

/// Graphviz layout directives: pipe through the layout engine, inline the SVG.
pub struct GraphvizDirective {
    layout: GraphvizLayout,
    program: String,
}

impl GraphvizDirective {
    #[must_use]
    pub fn new(layout: GraphvizLayout) -> Self {
        Self {
            layout,
            program: layout.as_str().to_owned(),
        }
    }

    /// Run `program` instead of the layout's own executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl BlockDirective for GraphvizDirective {
    fn name(&self) -> &str {
        self.layout.as_str()
    }

    fn process(&mut self, args: DirectiveArgs, body: &str, ctx: &DirectiveContext) -> DirectiveOutput {
        tracing::debug!(location = %ctx.location(), layout = self.name(), "Rendering graph");
        let classes = class_attr(&args, "graphviz");
        render_piped(&self.program, body)
            .map(|svg| format!(r#"<div class="{}">{svg}</div>"#, escape_html(&classes)))
            .into()
    }
}

fn class_attr(args: &DirectiveArgs, default: &str) -> String {
    args.class_list()
        .map_or_else(|| default.to_owned(), |classes| classes.join(" "))
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use quill_directives::DirectiveProcessor;

    use super::*;
    use crate::hash::content_hash;
    use crate::renderer::testing::{DITAA, DOT, FAILING, PLANTUML, TIKZ, fake_tool};

    struct Site {
        dir: tempfile::TempDir,
        renderer: Arc<Renderer>,
    }

    fn site(tool: DiagramTool, script: &str) -> Site {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_tool(dir.path(), tool.default_program(), script);
        let renderer = Renderer::new(dir.path().join("content/uml"))
            .with_program(tool, program.to_string_lossy());
        Site {
            dir,
            renderer: Arc::new(renderer),
        }
    }

    fn expand(processor: &mut DirectiveProcessor, input: &str) -> String {
        let mut html = processor.process(input);
        processor.post_process(&mut html);
        html
    }

    #[test]
    fn test_uml_image_markup() {
        let site = site(DiagramTool::PlantUml, PLANTUML);
        let mut processor = DirectiveProcessor::new().with_block(DiagramDirective::new(
            DiagramTool::PlantUml,
            Arc::clone(&site.renderer),
            "https://example.com/uml",
        ));

        let html = expand(&mut processor, ":::uml\nA -> B\n:::");
        assert_eq!(
            html,
            format!(
                r#"<img src="https://example.com/uml/{}.png" alt="uml diagram" class="uml">"#,
                content_hash("A -> B")
            )
        );
        assert!(processor.diagnostics().is_empty());
    }

    #[test]
    fn test_uml_options() {
        let site = site(DiagramTool::PlantUml, PLANTUML);
        let mut processor = DirectiveProcessor::new().with_block(DiagramDirective::new(
            DiagramTool::PlantUml,
            Arc::clone(&site.renderer),
            "/uml",
        ));

        let html = expand(
            &mut processor,
            ":::uml{format=svg alt=\"Login & logout\" class=\"figure wide\"}\nA -> B\n:::",
        );
        assert_eq!(
            html,
            format!(
                r#"<img src="/uml/{}.svg" alt="Login &amp; logout" class="figure wide">"#,
                content_hash("A -> B")
            )
        );
    }

    #[test]
    fn test_tikz_libraries() {
        let site = site(DiagramTool::Tikz, TIKZ);
        let mut processor = DirectiveProcessor::new().with_block(DiagramDirective::new(
            DiagramTool::Tikz,
            Arc::clone(&site.renderer),
            "/uml",
        ));

        let body = r"\draw[->] (0,0) -- (1,0);";
        let html = expand(
            &mut processor,
            &format!(":::tikz{{libs=\"arrows, positioning\"}}\n{body}\n:::"),
        );
        assert!(html.contains(r#"alt="tikz diagram" class="tikz""#));

        let written = fs::read_to_string(
            site.dir
                .path()
                .join(format!("content/uml/{}.svg", content_hash(body))),
        )
        .unwrap();
        assert!(written.contains("\\usetikzlibrary{arrows}\n\\usetikzlibrary{positioning}"));
    }

    #[test]
    fn test_ditaa_defaults() {
        let site = site(DiagramTool::Ditaa, DITAA);
        let mut processor = DirectiveProcessor::new().with_block(DiagramDirective::new(
            DiagramTool::Ditaa,
            Arc::clone(&site.renderer),
            "/uml",
        ));

        let html = expand(&mut processor, ":::ditaa\n+--+\n+--+\n:::");
        assert!(html.ends_with(r#".png" alt="ditaa diagram" class="ditaa">"#));
    }

    #[test]
    fn test_unsupported_format_is_diagnostic() {
        let site = site(DiagramTool::Ditaa, DITAA);
        let mut processor = DirectiveProcessor::new().with_block(DiagramDirective::new(
            DiagramTool::Ditaa,
            Arc::clone(&site.renderer),
            "/uml",
        ));

        let html = expand(&mut processor, ":::ditaa{format=svg}\nx\n:::");
        assert!(html.starts_with(r#"<div class="system-message">"#));
        let diagnostics = processor.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "ditaa does not support \"svg\" output");
    }

    #[test]
    fn test_tool_failure_is_diagnostic() {
        let site = site(DiagramTool::PlantUml, FAILING);
        let mut processor = DirectiveProcessor::new()
            .with_source_path("posts/broken.md")
            .with_block(DiagramDirective::new(
                DiagramTool::PlantUml,
                Arc::clone(&site.renderer),
                "/uml",
            ));

        let html = expand(&mut processor, "Intro\n\n:::uml\nA -> \n:::\n\nOutro\n");
        assert!(html.contains("Syntax Error? (line 2)"));
        assert!(html.contains(r#"<pre class="literal-block">:::uml"#));
        assert!(html.ends_with("\n\nOutro\n"));

        let diagnostics = processor.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 3);
        assert_eq!(diagnostics[0].directive, "uml");
    }

    #[test]
    fn test_graphviz_inline_svg() {
        let dir = tempfile::tempdir().unwrap();
        let dot = fake_tool(dir.path(), "dot", DOT);
        let mut processor = DirectiveProcessor::new().with_block(
            GraphvizDirective::new(GraphvizLayout::Dot).with_program(dot.to_string_lossy()),
        );

        let html = expand(&mut processor, ":::dot\ndigraph { a -> b }\n:::");
        assert_eq!(
            html,
            r#"<div class="graphviz"><svg>digraph { a -> b }</svg></div>"#
        );
    }

    #[test]
    fn test_graphviz_custom_class() {
        let dir = tempfile::tempdir().unwrap();
        let neato = fake_tool(dir.path(), "neato", DOT);
        let mut processor = DirectiveProcessor::new().with_block(
            GraphvizDirective::new(GraphvizLayout::Neato).with_program(neato.to_string_lossy()),
        );

        let html = expand(&mut processor, ":::neato{.network}\ngraph { a -- b }\n:::");
        assert!(html.starts_with(r#"<div class="network"><svg>"#));
    }
}
