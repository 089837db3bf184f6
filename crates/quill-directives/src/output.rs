//! Directive output types.

/// Output from directive processing.
///
/// - [`Html`](Self::Html): markup spliced into the rendered page
/// - [`Error`](Self::Error): the directive failed; the message is shown to
///   the author next to the original directive text and recorded as a
///   [`Diagnostic`](crate::Diagnostic)
/// - [`Skip`](Self::Skip): leave the directive text unchanged
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// Raw HTML for the rendered page.
    Html(String),
    /// Failure message surfaced to the author.
    Error(String),
    /// Don't handle this directive (pass through unchanged).
    Skip,
}

impl DirectiveOutput {
    /// Create an HTML output.
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }

    /// Create an error output.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

impl<E: std::error::Error> From<Result<String, E>> for DirectiveOutput {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(html) => Self::Html(html),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}
