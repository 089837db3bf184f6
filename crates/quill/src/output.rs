//! Terminal output for build progress and directive diagnostics.

use console::{Style, Term};
use quill_site::{Diagnostic, Severity};

/// Colored messages on stderr.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }

    fn line(&self, style: Option<&Style>, msg: &str) {
        let _ = match style {
            Some(style) => self.term.write_line(&style.apply_to(msg).to_string()),
            None => self.term.write_line(msg),
        };
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(None, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(Some(&self.ok), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(Some(&self.warn), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(Some(&self.fail), msg);
    }

    /// `path:line: level in "name" directive: message`, colored by severity.
    pub(crate) fn diagnostic(&self, diagnostic: &Diagnostic) {
        let style = match diagnostic.severity {
            Severity::Warning => &self.warn,
            Severity::Error => &self.fail,
        };
        self.line(Some(style), &diagnostic.to_string());
    }
}
