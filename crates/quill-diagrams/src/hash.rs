//! Content-addressed artifact names.

use crate::DiagramFormat;

/// Adler-32 checksum of `body` as 8 lowercase, zero-padded hex digits.
///
/// Only the author's body is hashed, never the wrapper text a tool needs,
/// so the name stays stable if the wrapping changes.
#[must_use]
pub fn content_hash(body: &str) -> String {
    hex::encode(adler2::adler32_slice(body.as_bytes()).to_be_bytes())
}

/// Artifact file name: `<hash>.<ext>`.
#[must_use]
pub fn artifact_name(body: &str, format: DiagramFormat) -> String {
    format!("{}.{}", content_hash(body), format.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_checksums() {
        assert_eq!(content_hash(""), "00000001");
        assert_eq!(content_hash("Wikipedia"), "11e60398");
    }

    #[test]
    fn test_hash_is_zero_padded() {
        let hash = content_hash("a");
        assert_eq!(hash, "00620062");
        assert_eq!(hash.len(), 8);
    }

    #[test]
    fn test_artifact_name() {
        assert_eq!(artifact_name("Wikipedia", DiagramFormat::Png), "11e60398.png");
        assert_eq!(artifact_name("Wikipedia", DiagramFormat::Svg), "11e60398.svg");
    }

    #[test]
    fn test_different_bodies_differ() {
        assert_ne!(content_hash("A -> B"), content_hash("A -> C"));
    }
}
