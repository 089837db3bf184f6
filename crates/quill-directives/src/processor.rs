//! Directive processor.
//!
//! Handles preprocessing (before pulldown-cmark) and post-processing (after
//! rendering).

use std::path::PathBuf;

use crate::fence::FenceTracker;
use crate::parser::{ParsedLine, parse_line};
use crate::{
    BlockDirective, Diagnostic, DirectiveContext, DirectiveOutput, LeafDirective, Severity,
    escape_html,
};

/// Directive processor for markdown pages.
///
/// Handlers are registered with [`with_leaf`](Self::with_leaf) and
/// [`with_block`](Self::with_block). One processor handles one document:
/// [`process`](Self::process) the markdown, render it, then
/// [`post_process`](Self::post_process) the HTML.
pub struct DirectiveProcessor {
    source_path: Option<PathBuf>,
    /// Source lines preceding the processed text (e.g. front matter).
    line_offset: usize,
    leaf_handlers: Vec<Box<dyn LeafDirective>>,
    block_handlers: Vec<Box<dyn BlockDirective>>,
    fence: FenceTracker,
    /// Handler output, indexed by placeholder number.
    outputs: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Default for DirectiveProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            source_path: None,
            line_offset: 0,
            leaf_handlers: Vec::new(),
            block_handlers: Vec::new(),
            fence: FenceTracker::new(),
            outputs: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Set the path of the document being processed, used in diagnostics.
    #[must_use]
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Count directive lines from `offset + 1` instead of 1.
    #[must_use]
    pub fn with_line_offset(mut self, offset: usize) -> Self {
        self.line_offset = offset;
        self
    }

    /// Register a leaf directive handler.
    #[must_use]
    pub fn with_leaf<D: LeafDirective + 'static>(mut self, handler: D) -> Self {
        self.leaf_handlers.push(Box::new(handler));
        self
    }

    /// Register a block directive handler.
    #[must_use]
    pub fn with_block<D: BlockDirective + 'static>(mut self, handler: D) -> Self {
        self.block_handlers.push(Box::new(handler));
        self
    }

    /// Preprocess markdown, replacing handled directives with placeholders.
    ///
    /// Each handled directive becomes an HTML comment on a line of its own.
    /// Unknown directives, skipped directives and anything inside a code
    /// fence are left as written. Fence state does not carry over between
    /// calls.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        self.fence = FenceTracker::new();
        let lines: Vec<&str> = input.lines().collect();
        let mut output: Vec<String> = Vec::with_capacity(lines.len());
        let mut idx = 0;

        while idx < lines.len() {
            let line = lines[idx];
            let line_num = self.line_offset + idx + 1;
            idx += 1;

            if self.fence.update(line) || self.fence.in_fence() {
                output.push(line.to_owned());
                continue;
            }

            match parse_line(line) {
                Some(ParsedLine::Leaf { name, args }) => {
                    let Some(handler) = self.leaf_handlers.iter_mut().find(|h| h.name() == name)
                    else {
                        output.push(line.to_owned());
                        continue;
                    };
                    let ctx = DirectiveContext {
                        source_path: self.source_path.as_deref(),
                        line: line_num,
                        block_text: line,
                    };
                    let result = handler.process(args, &ctx);
                    output.push(self.emit(&name, result, line_num, line));
                }
                Some(ParsedLine::BlockStart { name, args }) => {
                    let Some(handler_idx) = self.block_handlers.iter().position(|h| h.name() == name)
                    else {
                        output.push(line.to_owned());
                        continue;
                    };
                    let Some(close) = lines[idx..]
                        .iter()
                        .position(|l| parse_line(l) == Some(ParsedLine::BlockEnd))
                        .map(|offset| idx + offset)
                    else {
                        self.report(
                            Severity::Warning,
                            line_num,
                            &name,
                            "unclosed block directive (missing closing :::)".to_owned(),
                        );
                        output.push(line.to_owned());
                        continue;
                    };

                    let body = lines[idx..close].join("\n");
                    let block_text = lines[idx - 1..=close].join("\n");
                    let ctx = DirectiveContext {
                        source_path: self.source_path.as_deref(),
                        line: line_num,
                        block_text: &block_text,
                    };
                    let result = self.block_handlers[handler_idx].process(args, &body, &ctx);
                    let emitted = self.emit(&name, result, line_num, &block_text);
                    output.push(emitted);
                    idx = close + 1;
                }
                Some(ParsedLine::BlockEnd) | None => output.push(line.to_owned()),
            }
        }

        let mut result = output.join("\n");
        if input.ends_with('\n') {
            result.push('\n');
        }
        result
    }

    /// Turn handler output into a placeholder (or the original text).
    fn emit(
        &mut self,
        name: &str,
        result: DirectiveOutput,
        line_num: usize,
        block_text: &str,
    ) -> String {
        let html = match result {
            DirectiveOutput::Html(html) => html,
            DirectiveOutput::Skip => return block_text.to_owned(),
            DirectiveOutput::Error(message) => {
                let html = error_block(name, &message, block_text);
                self.report(Severity::Error, line_num, name, message);
                html
            }
        };

        let placeholder = placeholder(self.outputs.len());
        self.outputs.push(html);
        placeholder
    }

    fn report(&mut self, severity: Severity, line: usize, directive: &str, message: String) {
        let diagnostic = Diagnostic {
            severity,
            source_path: self.source_path.clone(),
            line,
            directive: directive.to_owned(),
            message,
        };
        tracing::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Replace placeholders in rendered HTML with handler output.
    ///
    /// Placeholders missing from `html` are dropped. Numbering restarts for
    /// the next [`process`](Self::process) call.
    pub fn post_process(&mut self, html: &mut String) {
        for (idx, output) in self.outputs.drain(..).enumerate() {
            let placeholder = placeholder(idx);
            if html.contains(&placeholder) {
                *html = html.replace(&placeholder, &output);
            }
        }
    }

    /// Diagnostics reported so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take ownership of the diagnostics reported so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

fn placeholder(idx: usize) -> String {
    format!("<!--quill:directive:{idx}-->")
}

/// Inline error block shown in place of a failed directive.
fn error_block(name: &str, message: &str, block_text: &str) -> String {
    format!(
        concat!(
            r#"<div class="system-message">"#,
            r#"<p class="system-message-title">Error in "{}" directive:</p>"#,
            "<p>{}</p>",
            r#"<pre class="literal-block">{}</pre>"#,
            "</div>"
        ),
        escape_html(name),
        escape_html(message),
        escape_html(block_text)
    )
}
