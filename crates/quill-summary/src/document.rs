//! Page documents and document-level extraction.

use std::borrow::Cow;

use crate::{SummaryMarkers, extract};

/// How [`Document::content`] presents the stored text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContentMode {
    /// Stored text as is.
    #[default]
    Raw,
    /// Stored text with the first occurrence of each marker removed.
    StripMarkers(SummaryMarkers),
}

/// A page body and its summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    content: String,
    summary: Option<String>,
    has_summary: bool,
    mode: ContentMode,
}

impl Document {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Attach a summary given by the author (e.g. in front matter).
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Page text as it should be rendered.
    #[must_use]
    pub fn content(&self) -> Cow<'_, str> {
        match &self.mode {
            ContentMode::Raw => Cow::Borrowed(&self.content),
            ContentMode::StripMarkers(markers) => {
                let mut content = Cow::Borrowed(self.content.as_str());
                for marker in [markers.begin(), markers.end()].into_iter().flatten() {
                    if content.contains(marker) {
                        content = Cow::Owned(content.replacen(marker, "", 1));
                    }
                }
                content
            }
        }
    }

    /// Stored text, ignoring the content mode.
    #[must_use]
    pub fn raw_content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Whether the last extraction found (or kept) a summary.
    #[must_use]
    pub fn has_summary(&self) -> bool {
        self.has_summary
    }

    #[must_use]
    pub fn mode(&self) -> &ContentMode {
        &self.mode
    }
}

/// Extract the summary of `doc` in place.
///
/// - A summary already present is kept and the stored text is left alone;
///   markers are hidden on read instead.
/// - Empty content has no summary.
/// - Otherwise the text between the markers becomes the summary and the
///   markers are removed from the stored text.
pub fn extract_summary(doc: &mut Document, markers: &SummaryMarkers) {
    if doc.summary.is_some() {
        doc.has_summary = true;
        doc.mode = ContentMode::StripMarkers(markers.clone());
        return;
    }

    if doc.content.is_empty() {
        doc.has_summary = false;
        return;
    }

    let extraction = extract(&doc.content, markers);
    match extraction.summary {
        Some(summary) => {
            tracing::debug!(len = summary.len(), "Extracted summary");
            doc.content = extraction.remaining;
            doc.summary = Some(summary);
            doc.has_summary = true;
        }
        None => doc.has_summary = false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn plain() -> SummaryMarkers {
        SummaryMarkers::new("PELICAN_BEGIN_SUMMARY", "PELICAN_END_SUMMARY")
    }

    #[test]
    fn test_extracts_and_strips() {
        let mut doc = Document::new("intro PELICAN_BEGIN_SUMMARY teaser text PELICAN_END_SUMMARY rest");
        extract_summary(&mut doc, &plain());

        assert!(doc.has_summary());
        assert_eq!(doc.summary(), Some(" teaser text "));
        assert_eq!(doc.content(), "intro  teaser text  rest");
        assert_eq!(doc.raw_content(), "intro  teaser text  rest");
        assert_eq!(doc.mode(), &ContentMode::Raw);
    }

    #[test]
    fn test_no_markers() {
        let mut doc = Document::new("plain page");
        extract_summary(&mut doc, &plain());

        assert!(!doc.has_summary());
        assert_eq!(doc.summary(), None);
        assert_eq!(doc.content(), "plain page");
    }

    #[test]
    fn test_empty_content() {
        let mut doc = Document::new("");
        extract_summary(&mut doc, &plain());
        assert!(!doc.has_summary());
        assert_eq!(doc.summary(), None);
    }

    #[test]
    fn test_precomputed_summary_kept() {
        let raw = "intro PELICAN_BEGIN_SUMMARY teaser PELICAN_END_SUMMARY rest";
        let mut doc = Document::new(raw).with_summary("From front matter");
        extract_summary(&mut doc, &plain());

        assert!(doc.has_summary());
        assert_eq!(doc.summary(), Some("From front matter"));
        assert_eq!(doc.raw_content(), raw);
        assert_eq!(doc.content(), "intro  teaser  rest");
    }

    #[test]
    fn test_precomputed_summary_without_content() {
        let mut doc = Document::new("").with_summary("Teaser");
        extract_summary(&mut doc, &plain());
        assert!(doc.has_summary());
    }

    #[test]
    fn test_second_pass_keeps_result() {
        let mut doc = Document::new("teaser PELICAN_END_SUMMARY rest");
        extract_summary(&mut doc, &plain());
        let first = doc.clone();
        extract_summary(&mut doc, &plain());

        assert_eq!(doc.summary(), first.summary());
        assert_eq!(doc.content(), first.content());
        assert!(doc.has_summary());
    }

    #[test]
    fn test_content_borrows_without_markers() {
        let mut doc = Document::new("nothing here").with_summary("s");
        extract_summary(&mut doc, &plain());
        assert!(matches!(doc.content(), Cow::Borrowed(_)));
    }
}
