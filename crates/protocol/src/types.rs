use crate::error::ProtocolError;
use crate::stats::ReductionStats;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Clustering aggressiveness profile.
///
/// `Skeptic` merges no more aggressively than `Open`: its threshold is
/// validated to be >= the open threshold, so skeptic runs never produce
/// fewer buckets than open runs over the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Merge on weak evidence; fewer, broader buckets.
    Open,
    /// Demand stronger evidence before merging; more, tighter buckets.
    Skeptic,
}

impl Mode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Open => "open",
            Mode::Skeptic => "skeptic",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Mode::Open),
            "skeptic" => Ok(Mode::Skeptic),
            other => Err(ProtocolError::InvalidConfig(format!(
                "unknown mode '{other}' (expected 'open' or 'skeptic')"
            ))),
        }
    }
}

/// Output of gloss normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedGloss {
    /// Lowercased text with non-semantic markers stripped
    pub cleaned_text: String,

    /// Ordered lemma sequence (order kept for traceability; similarity
    /// uses the token set)
    pub tokens: Vec<String>,

    /// Lemmatization fell back to raw lowercase tokens
    pub degraded: bool,
}

/// One atomic, source-attributed meaning fragment.
///
/// Immutable once constructed; the optional embedding is attached during
/// the enrichment phase of the pipeline, before any scoring happens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WitnessSenseUnit {
    /// Deterministic id: SHA-256 over (source, entry ref, raw gloss),
    /// first 16 hex chars. Re-extraction of the same entry is idempotent.
    pub id: String,

    /// Originating backend label (e.g. "lsj", "lewis-short")
    pub source: String,

    /// Language tag ("grc", "lat", ...)
    pub language: String,

    /// Gloss fragment as the adapter delivered it
    pub raw_gloss: String,

    /// Cleaned, denylist-stripped text
    pub normalized_gloss: String,

    /// Ordered lemma sequence
    pub tokens: Vec<String>,

    /// Mean-pooled token vector when an embedder is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// Normalization fell back to raw lowercase tokens
    #[serde(default)]
    pub degraded: bool,
}

impl WitnessSenseUnit {
    /// Create a WSU from an adapter-attributed gloss fragment and its
    /// normalization.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        entry_ref: &str,
        raw_gloss: impl Into<String>,
        language: impl Into<String>,
        normalized: NormalizedGloss,
    ) -> Self {
        let source = source.into();
        let raw_gloss = raw_gloss.into();
        let id = Self::compute_id(&source, entry_ref, &raw_gloss);
        Self {
            id,
            source,
            language: language.into(),
            raw_gloss,
            normalized_gloss: normalized.cleaned_text,
            tokens: normalized.tokens,
            embedding: None,
            degraded: normalized.degraded,
        }
    }

    /// Builder: attach an embedding vector.
    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Deterministic witness id. Fields are joined with a unit separator
    /// so ("ab", "c") and ("a", "bc") never collide.
    #[must_use]
    pub fn compute_id(source: &str, entry_ref: &str, raw_gloss: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        hasher.update([0x1f]);
        hasher.update(entry_ref.as_bytes());
        hasher.update([0x1f]);
        hasher.update(raw_gloss.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..16].to_string()
    }

    /// The gloss reduces to no usable tokens (scores 0 against everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A cluster of one or more witnesses judged to share meaning.
///
/// Buckets are created once by the clusterer and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SenseBucket {
    /// Stable within one run: "b000", "b001", ... assigned by ascending
    /// smallest-member-id order
    pub id: String,

    /// Member witness ids, ordered ascending
    pub member_ids: Vec<String>,

    /// Normalized gloss of the most central member
    pub representative_gloss: String,

    /// Merge confidence in [0, 1]
    pub confidence: f32,

    /// Mode used to produce this bucket
    pub mode: Mode,

    /// External semantic-constant identifier, passthrough only; curation
    /// happens outside the core and this is always None here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_constant: Option<String>,
}

impl SenseBucket {
    /// Number of witnesses supporting this bucket.
    #[must_use]
    pub fn witness_count(&self) -> usize {
        self.member_ids.len()
    }

    /// Whether the given witness id belongs to this bucket.
    #[must_use]
    pub fn contains(&self, wsu_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == wsu_id)
    }
}

/// Final output of one reduction: buckets plus diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReductionResult {
    pub buckets: Vec<SenseBucket>,
    pub stats: ReductionStats,
}

impl ReductionResult {
    /// Zero input witnesses is a valid "no senses found" result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
