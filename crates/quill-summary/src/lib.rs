//! Marker-delimited summary extraction for Quill.
//!
//! Authors mark the teaser of a page with two literal markers:
//!
//! ```text
//! Intro paragraph.
//! <!-- PELICAN_BEGIN_SUMMARY -->
//! This part is the summary.
//! <!-- PELICAN_END_SUMMARY -->
//! The rest of the page.
//! ```
//!
//! The summary is the text between the markers. A missing begin marker
//! means "from the start", a missing end marker means "to the end". The
//! markers themselves are removed from the page content.

mod document;
mod markers;

pub use document::{ContentMode, Document, extract_summary};
pub use markers::{DEFAULT_BEGIN_MARKER, DEFAULT_END_MARKER, SummaryMarkers};

use serde::Serialize;

/// Result of [`extract`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Content with the first occurrence of each found marker removed.
    pub remaining: String,
    /// Text between the markers, `None` when neither marker occurs.
    pub summary: Option<String>,
}

/// Split `content` into summary and remaining text.
///
/// Only the first occurrence of each marker counts. When the end marker
/// comes before the begin marker the summary is empty, but both markers
/// are still removed.
///
/// ```
/// use quill_summary::{SummaryMarkers, extract};
///
/// let markers = SummaryMarkers::new("PELICAN_BEGIN_SUMMARY", "PELICAN_END_SUMMARY");
/// let extraction = extract(
///     "intro PELICAN_BEGIN_SUMMARY teaser text PELICAN_END_SUMMARY rest",
///     &markers,
/// );
/// assert_eq!(extraction.summary.as_deref(), Some(" teaser text "));
/// assert_eq!(extraction.remaining, "intro  teaser text  rest");
/// ```
#[must_use]
pub fn extract(content: &str, markers: &SummaryMarkers) -> Extraction {
    let begin = locate(content, markers.begin());
    let end = locate(content, markers.end());

    if begin.is_none() && end.is_none() {
        return Extraction {
            remaining: content.to_owned(),
            summary: None,
        };
    }

    let start = begin.map_or(0, |(pos, marker)| pos + marker.len());
    let stop = end.map_or(content.len(), |(pos, _)| pos);
    let summary = content.get(start..stop).unwrap_or_default().to_owned();

    let mut remaining = content.to_owned();
    for (_, marker) in [begin, end].into_iter().flatten() {
        remaining = remaining.replacen(marker, "", 1);
    }

    Extraction {
        remaining,
        summary: Some(summary),
    }
}

/// Byte offset of the first occurrence of an enabled marker.
fn locate<'m>(content: &str, marker: Option<&'m str>) -> Option<(usize, &'m str)> {
    let marker = marker?;
    content.find(marker).map(|pos| (pos, marker))
}
