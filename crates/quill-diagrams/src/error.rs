//! Diagram rendering errors.

use std::io;
use std::path::PathBuf;

/// Error raised while rendering a diagram.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The tool could not be started (missing binary, permissions).
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The tool exited with a non-zero status.
    #[error("{tool} failed: {stderr}")]
    ToolFailure { tool: String, stderr: String },
    /// The requested output format isn't produced by this tool.
    #[error("{tool} does not support \"{format}\" output")]
    UnsupportedFormat { tool: &'static str, format: String },
    /// Output directory, temporary file or rename failure.
    #[error("{}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Filesystem { path, source }
    }
}
