//! Directive processing context.
//!
//! Provides source location information to directive handlers.

use std::path::Path;

/// Context provided to directive handlers.
///
/// Created by [`DirectiveProcessor`](crate::DirectiveProcessor) for each
/// directive. Handlers use it to label log output and error messages with
/// the place the author wrote the directive.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveContext<'a> {
    /// Path to the document being processed (if known).
    pub source_path: Option<&'a Path>,
    /// Line number where the directive starts (1-indexed).
    pub line: usize,
    /// Original directive text, opening and closing lines included.
    pub block_text: &'a str,
}

impl DirectiveContext<'_> {
    /// Human-readable `file:line` location.
    ///
    /// ```
    /// use std::path::Path;
    /// use quill_directives::DirectiveContext;
    ///
    /// let ctx = DirectiveContext {
    ///     source_path: Some(Path::new("posts/hello.md")),
    ///     line: 12,
    ///     block_text: "::youku[XMTI4NTA3MjQ0]",
    /// };
    /// assert_eq!(ctx.location(), "posts/hello.md:12");
    /// ```
    #[must_use]
    pub fn location(&self) -> String {
        match self.source_path {
            Some(path) => format!("{}:{}", path.display(), self.line),
            None => format!("line {}", self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_without_path() {
        let ctx = DirectiveContext {
            source_path: None,
            line: 3,
            block_text: "",
        };
        assert_eq!(ctx.location(), "line 3");
    }
}
