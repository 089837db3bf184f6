//! Site build: load pages, expand directives, render, write.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quill_config::Config;
use quill_diagrams::{DiagramTool, Renderer};
use quill_directives::{Diagnostic, DirectiveProcessor, Severity};
use quill_embeds::YoukuDirective;
use quill_summary::SummaryMarkers;
use serde::Serialize;

use crate::markdown::render_markdown;
use crate::page::{self, Page};
use crate::BuildError;

/// File listing every page summary, written to the output directory.
pub const SUMMARIES_FILENAME: &str = "summaries.json";

/// One entry of `summaries.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub path: String,
    pub title: String,
    pub has_summary: bool,
    pub summary_html: Option<String>,
}

/// Outcome of a successful build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Pages written, in build order.
    pub pages: Vec<PathBuf>,
    pub summaries: Vec<SummaryEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }
}

/// Builds every markdown page under a source directory.
pub struct SiteBuilder {
    source_dir: PathBuf,
    markers: SummaryMarkers,
    renderer: Arc<Renderer>,
    diagram_url: String,
}

impl SiteBuilder {
    /// Builder with default markers.
    ///
    /// `diagram_url` is the public URL of the renderer's output directory.
    #[must_use]
    pub fn new(
        source_dir: impl Into<PathBuf>,
        renderer: Renderer,
        diagram_url: impl Into<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            markers: SummaryMarkers::default(),
            renderer: Arc::new(renderer),
            diagram_url: diagram_url.into(),
        }
    }

    /// Builder wired from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let diagrams = &config.diagrams_resolved;
        let renderer = Renderer::new(&diagrams.output_dir)
            .with_program(DiagramTool::PlantUml, &diagrams.plantuml)
            .with_program(DiagramTool::Tikz, &diagrams.tikz)
            .with_program(DiagramTool::Ditaa, &diagrams.ditaa)
            .with_reuse_existing(diagrams.reuse_existing);
        let diagram_url = format!(
            "{}/{}",
            config.site_resolved.asset_base_url(),
            diagrams.url_path
        );

        Self::new(&config.site_resolved.source_dir, renderer, diagram_url)
            .with_markers(config.summary.markers())
    }

    #[must_use]
    pub fn with_markers(mut self, markers: SummaryMarkers) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Scan, parse and run the extraction pass over every page.
    pub fn load_pages(&self) -> Result<Vec<Page>, BuildError> {
        page::scan(&self.source_dir)?
            .iter()
            .map(|relative| page::load(&self.source_dir, relative, &self.markers))
            .collect()
    }

    /// Build the site into `output_dir`.
    ///
    /// Summaries are extracted for every page before any page is rendered.
    /// A failing directive is reported in the returned diagnostics and
    /// never stops the build.
    pub fn build(&self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        let pages = self.load_pages()?;
        tracing::info!(count = pages.len(), source = %self.source_dir.display(), "Loaded pages");

        let mut report = BuildReport::default();
        for page in &pages {
            // A marked summary is also part of the body; report its
            // directives once, from the body.
            let summary_html = page.document.summary().map(|summary| {
                let mut processor = self.processor(&page.path);
                let html = expand(&mut processor, summary);
                if page.summary_from_front_matter {
                    report.diagnostics.extend(processor.take_diagnostics());
                }
                html
            });

            let mut processor = self
                .processor(&page.path)
                .with_line_offset(page.line_offset);
            let body_html = expand(&mut processor, &page.document.content());

            let output_path = output_dir.join(page.output_path());
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
            }
            fs::write(&output_path, page_html(&page.title, &body_html))
                .map_err(BuildError::io(&output_path))?;
            tracing::info!(path = %output_path.display(), "Wrote page");

            report.diagnostics.extend(processor.take_diagnostics());
            report.pages.push(page.output_path());
            report.summaries.push(SummaryEntry {
                path: page.url_path(),
                title: page.title.clone(),
                has_summary: page.document.has_summary(),
                summary_html,
            });
        }

        fs::create_dir_all(output_dir).map_err(BuildError::io(output_dir))?;
        let summaries_path = output_dir.join(SUMMARIES_FILENAME);
        let json = serde_json::to_string_pretty(&report.summaries)?;
        fs::write(&summaries_path, json).map_err(BuildError::io(&summaries_path))?;

        tracing::info!(
            pages = report.pages.len(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "Build finished"
        );
        Ok(report)
    }

    fn processor(&self, path: &Path) -> DirectiveProcessor {
        let processor = DirectiveProcessor::new()
            .with_source_path(path)
            .with_leaf(YoukuDirective);
        quill_diagrams::register(processor, &self.renderer, &self.diagram_url)
    }
}

/// Expand directives, render markdown, substitute directive output.
fn expand(processor: &mut DirectiveProcessor, markdown: &str) -> String {
    let preprocessed = processor.process(markdown);
    let mut html = render_markdown(&preprocessed);
    processor.post_process(&mut html);
    html
}

fn page_html(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        quill_directives::escape_html(title)
    )
}
