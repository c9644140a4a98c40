use once_cell::sync::Lazy;
use regex::Regex;

/// Leading sense labels: "1.", "II.", "b)", "iv." at the start of a fragment.
static SENSE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+|[ivxlIVXL]+|[a-h])[.)]\s*").unwrap());

/// Inline classical citations: abbreviated author/work plus locus,
/// e.g. "Il. 2.204", "Hdt. 1.32", "Od. 9.231".
static CITATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]{1,8}\.\s*\d+(?:\.\d+)*\b").unwrap());

/// Runs of whitespace left behind by stripping.
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Source-selected gloss preprocessing, applied per fragment before
/// normalization. A small closed set keyed by source identifier — adding a
/// backend means adding a tag here, not a subclass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreprocessStrategy {
    /// Gloss text arrives clean
    Plain,

    /// Fragments carry leading sense labels ("1.", "II.", "b)")
    NumberedSenses,

    /// Author/work citations salted through the gloss text
    CitationHeavy,
}

impl PreprocessStrategy {
    /// Select the strategy for a source identifier. Unknown sources get
    /// [`PreprocessStrategy::Plain`].
    #[must_use]
    pub fn for_source(source: &str) -> Self {
        match source {
            "lsj" | "middle-liddell" | "autenrieth" => Self::CitationHeavy,
            "lewis-short" | "elementary-lewis" | "slater" => Self::NumberedSenses,
            _ => Self::Plain,
        }
    }

    /// Strip the strategy's known non-semantic tokens from one fragment.
    #[must_use]
    pub fn apply(self, fragment: &str) -> String {
        let stripped = match self {
            Self::Plain => fragment.to_string(),
            Self::NumberedSenses => SENSE_LABEL.replace(fragment, "").into_owned(),
            Self::CitationHeavy => {
                let no_citations = CITATION.replace_all(fragment, "");
                SENSE_LABEL.replace(&no_citations, "").into_owned()
            }
        };
        MULTI_SPACE
            .replace_all(stripped.trim(), " ")
            .into_owned()
    }
}
