//! Summary markers.

pub const DEFAULT_BEGIN_MARKER: &str = "<!-- PELICAN_BEGIN_SUMMARY -->";
pub const DEFAULT_END_MARKER: &str = "<!-- PELICAN_END_SUMMARY -->";

/// Begin and end markers. An empty marker is disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryMarkers {
    begin: String,
    end: String,
}

impl SummaryMarkers {
    #[must_use]
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Begin marker, `None` when disabled.
    #[must_use]
    pub fn begin(&self) -> Option<&str> {
        Some(self.begin.as_str()).filter(|m| !m.is_empty())
    }

    /// End marker, `None` when disabled.
    #[must_use]
    pub fn end(&self) -> Option<&str> {
        Some(self.end.as_str()).filter(|m| !m.is_empty())
    }
}

impl Default for SummaryMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_BEGIN_MARKER, DEFAULT_END_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_marker_disabled() {
        let markers = SummaryMarkers::new("", "<!-- more -->");
        assert_eq!(markers.begin(), None);
        assert_eq!(markers.end(), Some("<!-- more -->"));
    }

    #[test]
    fn test_defaults() {
        let markers = SummaryMarkers::default();
        assert_eq!(markers.begin(), Some("<!-- PELICAN_BEGIN_SUMMARY -->"));
        assert_eq!(markers.end(), Some("<!-- PELICAN_END_SUMMARY -->"));
    }
}
