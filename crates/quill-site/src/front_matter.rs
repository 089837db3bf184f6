//! YAML front matter.
//!
//! ```text
//! ---
//! title: Hello
//! summary: A short teaser.
//! ---
//! Page body.
//! ```

use serde::Deserialize;

/// Fields read from front matter. Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub title: Option<String>,
    /// Author-provided summary; disables marker extraction.
    #[serde(default)]
    pub summary: Option<String>,
}

/// Split a page into front matter and body.
///
/// Front matter must start on the first line with `---` and end with a
/// line containing only `---`. Without it the whole text is the body.
pub fn split(text: &str) -> Result<(FrontMatter, &str), serde_yaml::Error> {
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return Ok((FrontMatter::default(), text));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let front_matter = if yaml.trim().is_empty() {
                FrontMatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            return Ok((front_matter, body));
        }
        offset += line.len();
    }

    // Unterminated: treat as body.
    Ok((FrontMatter::default(), text))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_front_matter() {
        let (fm, body) = split("# Title\n\nText").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "# Title\n\nText");
    }

    #[test]
    fn test_title_and_summary() {
        let (fm, body) = split("---\ntitle: Hello\nsummary: Teaser\n---\nBody\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.summary.as_deref(), Some("Teaser"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (fm, _) = split("---\ntitle: Hi\ntags: [a, b]\n---\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_empty_front_matter() {
        let (fm, body) = split("---\n---\nBody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_crlf() {
        let (fm, body) = split("---\r\ntitle: Hi\r\n---\r\nBody").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hi"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unterminated_is_body() {
        let text = "---\ntitle: Hi\nno end";
        let (fm, body) = split(text).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, text);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(split("---\ntitle: [unclosed\n---\n").is_err());
    }
}
