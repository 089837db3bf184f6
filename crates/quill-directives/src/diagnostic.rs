//! Diagnostics attached to directive source locations.

use std::fmt;
use std::path::PathBuf;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Directive was malformed but processing could continue.
    Warning,
    /// Directive handler failed; an error block replaced its output.
    Error,
}

/// A problem reported while processing a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the problem.
    pub severity: Severity,
    /// Document the directive belongs to (if known).
    pub source_path: Option<PathBuf>,
    /// Line where the directive starts (1-indexed).
    pub line: usize,
    /// Directive name.
    pub directive: String,
    /// Message shown to the author.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        if let Some(path) = &self.source_path {
            write!(f, "{}:", path.display())?;
        }
        write!(
            f,
            "{}: {level} in \"{}\" directive: {}",
            self.line, self.directive, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_path() {
        let diagnostic = Diagnostic {
            severity: Severity::Error,
            source_path: Some(PathBuf::from("posts/intro.md")),
            line: 7,
            directive: "uml".to_owned(),
            message: "syntax error".to_owned(),
        };
        assert_eq!(
            diagnostic.to_string(),
            r#"posts/intro.md:7: error in "uml" directive: syntax error"#
        );
    }

    #[test]
    fn test_display_without_path() {
        let diagnostic = Diagnostic {
            severity: Severity::Warning,
            source_path: None,
            line: 2,
            directive: "tikz".to_owned(),
            message: "unclosed block".to_owned(),
        };
        assert_eq!(
            diagnostic.to_string(),
            r#"2: warning in "tikz" directive: unclosed block"#
        );
    }
}
