//! Directive line parsing.
//!
//! Directives always occupy a whole line (leading and trailing whitespace
//! allowed). Anything else on the line makes it ordinary text.

use crate::DirectiveArgs;

/// Directive recognized on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedLine {
    /// `::name[content]{attrs}`
    Leaf { name: String, args: DirectiveArgs },
    /// `:::name[content]{attrs}`
    BlockStart { name: String, args: DirectiveArgs },
    /// Three or more colons and nothing else.
    BlockEnd,
}

/// Parse a line for directive syntax.
///
/// Returns `None` if the line isn't a directive.
pub(crate) fn parse_line(line: &str) -> Option<ParsedLine> {
    let trimmed = line.trim();
    let colons = trimmed.chars().take_while(|&c| c == ':').count();
    if colons < 2 {
        return None;
    }

    let rest = &trimmed[colons..];
    if colons >= 3 && rest.is_empty() {
        return Some(ParsedLine::BlockEnd);
    }

    let name_end = rest
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(rest.len());
    let name = &rest[..name_end];
    if !is_valid_name(name) {
        return None;
    }

    let after_name = &rest[name_end..];
    let (content, consumed) = delimited(after_name, '[', ']');
    let after_content = &after_name[consumed..];
    let (attrs, consumed) = delimited(after_content, '{', '}');
    if !after_content[consumed..].trim().is_empty() {
        return None;
    }

    let name = name.to_owned();
    let args = DirectiveArgs::parse(content, attrs);
    Some(if colons == 2 {
        ParsedLine::Leaf { name, args }
    } else {
        ParsedLine::BlockStart { name, args }
    })
}

/// Names contain only alphanumerics, hyphens and underscores.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Text between a balanced `open`/`close` pair at the start of `s`.
///
/// Returns the inner text and bytes consumed, or `("", 0)` when `s` doesn't
/// start with `open` or the pair is never closed.
fn delimited(s: &str, open: char, close: char) -> (&str, usize) {
    if !s.starts_with(open) {
        return ("", 0);
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return (&s[open.len_utf8()..i], i + close.len_utf8());
            }
        }
    }
    ("", 0)
}
