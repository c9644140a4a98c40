use crate::error::Result;
use crate::types::Mode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Configuration for one sense-reduction pipeline.
///
/// All tuning is explicit here: thresholds, blend weight, denylist and
/// collaborator timeout travel with the reducer instead of living in
/// module-level globals. Defaults are tuning starting points, not contract;
/// the partition/monotonicity properties are what callers may rely on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceConfig {
    /// Merge threshold for [`Mode::Open`]
    pub open_threshold: f32,

    /// Merge threshold for [`Mode::Skeptic`]; must be >= `open_threshold`
    pub skeptic_threshold: f32,

    /// Weight of the Jaccard term in the blended score (embedding term
    /// gets `1 - blend_alpha`)
    pub blend_alpha: f32,

    /// Blend embedding cosine into the similarity score when an embedder
    /// is configured
    pub embedding_blend: bool,

    /// Upper bound on a single lemmatizer/embedder call, in milliseconds;
    /// exceeding it triggers fallback, never an error
    pub collaborator_timeout_ms: u64,

    /// Extra non-semantic markers to strip, keyed by language tag; merged
    /// over the built-in lists
    pub denylist: HashMap<String, Vec<String>>,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            open_threshold: 0.15,
            skeptic_threshold: 0.25,
            blend_alpha: 0.5,
            embedding_blend: false,
            collaborator_timeout_ms: 2_000,
            denylist: HashMap::new(),
        }
    }
}

impl ReduceConfig {
    /// Merge threshold for the given mode.
    #[must_use]
    pub fn threshold(&self, mode: Mode) -> f32 {
        match mode {
            Mode::Open => self.open_threshold,
            Mode::Skeptic => self.skeptic_threshold,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, value) in [
            ("open_threshold", self.open_threshold),
            ("skeptic_threshold", self.skeptic_threshold),
            ("blend_alpha", self.blend_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(format!("{name} ({value}) must be within [0, 1]"));
            }
        }

        if self.skeptic_threshold < self.open_threshold {
            return Err(format!(
                "skeptic_threshold ({}) cannot be below open_threshold ({})",
                self.skeptic_threshold, self.open_threshold
            ));
        }

        if self.collaborator_timeout_ms == 0 {
            return Err("collaborator_timeout_ms must be > 0".to_string());
        }

        Ok(())
    }

    /// Load and validate a config from a TOML file.
    pub fn from_toml_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config
            .validate()
            .map_err(crate::error::ProtocolError::InvalidConfig)?;
        Ok(config)
    }
}
