//! `quill build` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::{CliSettings, Config};
use quill_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for generated pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Public site URL used for diagram links (overrides config).
    #[arg(long, env = "QUILL_SITE_URL")]
    site_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            site_url: self.site_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = &config.site_resolved;

        output.info(&format!("Source: {}", site.source_dir.display()));
        output.info(&format!("Output: {}", site.output_dir.display()));

        let report = SiteBuilder::from_config(&config).build(&site.output_dir)?;

        for diagnostic in &report.diagnostics {
            output.diagnostic(diagnostic);
        }

        let summary = format!(
            "Built {} page(s) to {}",
            report.pages.len(),
            site.output_dir.display()
        );
        if report.error_count() == 0 {
            output.success(&summary);
        } else {
            output.warning(&format!(
                "{summary} with {} directive error(s)",
                report.error_count()
            ));
        }
        Ok(())
    }
}
