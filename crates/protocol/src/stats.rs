use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Diagnostics collected over one reduction.
///
/// Warnings recorded here never interrupt the pipeline; they exist so a
/// caller can see what was dropped or degraded without re-running.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReductionStats {
    /// Witnesses extracted across all entries
    pub wsus_extracted: usize,

    /// Buckets produced
    pub buckets: usize,

    /// Empty/whitespace-only glosses dropped, per source
    pub dropped_per_source: HashMap<String, usize>,

    /// Normalizations that fell back to raw tokens, per source
    pub degraded_per_source: HashMap<String, usize>,

    /// Human-readable warnings, in pipeline order
    pub warnings: Vec<String>,

    /// Wall time of the reduction in milliseconds
    pub time_ms: u64,
}

impl ReductionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dropped(&mut self, source: &str) {
        *self.dropped_per_source.entry(source.to_string()).or_insert(0) += 1;
    }

    pub fn add_degraded(&mut self, source: &str) {
        *self.degraded_per_source.entry(source.to_string()).or_insert(0) += 1;
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Total dropped glosses across sources.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped_per_source.values().sum()
    }

    /// Total degraded normalizations across sources.
    #[must_use]
    pub fn degraded(&self) -> usize {
        self.degraded_per_source.values().sum()
    }
}
