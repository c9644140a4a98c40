use serde::{Deserialize, Serialize};

/// One already-parsed dictionary entry line from a source adapter.
///
/// The core asks adapters for very little: a stable per-entry reference
/// string and the gloss text. Everything source-specific (HTTP, scraping,
/// markup) stays on the adapter side of the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceEntry {
    /// Originating backend label (e.g. "lsj", "lewis-short")
    pub source: String,

    /// Stable per-entry reference within the source (e.g. "pyr.1");
    /// re-extraction of the same reference yields the same witness ids
    pub entry_ref: String,

    /// Headword the entry glosses
    pub headword: String,

    /// Language tag of the headword ("grc", "lat", ...)
    pub language: String,

    /// Raw gloss text; may hold several `;`-separated sense fragments
    pub gloss: String,
}

impl SourceEntry {
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        entry_ref: impl Into<String>,
        headword: impl Into<String>,
        language: impl Into<String>,
        gloss: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            entry_ref: entry_ref.into(),
            headword: headword.into(),
            language: language.into(),
            gloss: gloss.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entry_deserializes_from_adapter_json() {
        let json = r#"{
            "source": "lsj",
            "entry_ref": "pyr.1",
            "headword": "πῦρ",
            "language": "grc",
            "gloss": "fire; funeral-fire"
        }"#;
        let entry: SourceEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.source, "lsj");
        assert_eq!(entry.headword, "πῦρ");
        assert_eq!(entry.gloss, "fire; funeral-fire");
    }
}
