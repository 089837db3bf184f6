//! `quill summary` command implementation.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use quill_config::Config;
use quill_summary::{Document, SummaryMarkers, extract_summary};
use serde_json::{Value, json};

use crate::error::CliError;

/// Arguments for the summary command.
#[derive(Args)]
pub(crate) struct SummaryArgs {
    /// Markdown file to read.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl SummaryArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let markers = config.summary.markers();

        tracing::debug!(path = %self.file.display(), "Reading page");
        let text = std::fs::read_to_string(&self.file)?;
        let result = summary_json(&text, &markers)?;

        Term::stdout().write_line(&serde_json::to_string_pretty(&result)?)?;
        Ok(())
    }
}

/// Extraction result for one page, as the site build sees it.
fn summary_json(text: &str, markers: &SummaryMarkers) -> Result<Value, CliError> {
    let (front_matter, body) =
        quill_site::split_front_matter(text).map_err(|e| CliError::FrontMatter(e.to_string()))?;

    let mut document = Document::new(body);
    if let Some(summary) = front_matter.summary {
        document = document.with_summary(summary);
    }
    extract_summary(&mut document, markers);

    Ok(json!({
        "has_summary": document.has_summary(),
        "summary": document.summary(),
        "remaining": document.content(),
    }))
}
