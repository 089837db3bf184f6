//! HTML escaping.

use std::borrow::Cow;

/// Escape text for use in HTML content or a double-quoted attribute.
///
/// Borrows the input when nothing needs escaping.
///
/// ```
/// use quill_directives::escape_html;
///
/// assert_eq!(escape_html(r#"A -> "B""#), "A -&gt; &quot;B&quot;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
