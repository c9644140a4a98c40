use crate::entry::SourceEntry;
use crate::strategy::PreprocessStrategy;
use sensebank_normalize::Normalizer;
use sensebank_protocol::{ReductionStats, WitnessSenseUnit};
use std::collections::HashSet;

/// Converts one parsed source entry into atomic witness sense units.
///
/// Extraction never fails: empty glosses are dropped with a warning in
/// stats, duplicate witnesses are collapsed, degraded normalizations are
/// counted and carried on the WSU.
pub struct WsuExtractor {
    normalizer: Normalizer,
}

impl WsuExtractor {
    #[must_use]
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// Extract all witnesses from one entry.
    ///
    /// A fragment equal to the headword alone is still emitted: it is a
    /// weak signal, and confidence scoring — not extraction — decides how
    /// much it counts.
    pub async fn extract(
        &self,
        entry: &SourceEntry,
        stats: &mut ReductionStats,
    ) -> Vec<WitnessSenseUnit> {
        if entry.gloss.trim().is_empty() {
            log::warn!(
                "{}:{}: dropped empty gloss for '{}'",
                entry.source,
                entry.entry_ref,
                entry.headword
            );
            stats.add_dropped(&entry.source);
            stats.add_warning(format!(
                "{}:{}: dropped empty gloss",
                entry.source, entry.entry_ref
            ));
            return Vec::new();
        }

        let strategy = PreprocessStrategy::for_source(&entry.source);
        let mut seen_ids = HashSet::new();
        let mut wsus = Vec::new();

        for raw_fragment in entry.gloss.split(';') {
            let raw_fragment = raw_fragment.trim();
            if raw_fragment.is_empty() {
                // Separator artifact ("a;;b", trailing ';'), not a dropped gloss
                continue;
            }

            let preprocessed = strategy.apply(raw_fragment);
            if preprocessed.is_empty() {
                // The fragment was nothing but citations/labels
                log::warn!(
                    "{}:{}: dropped non-semantic gloss fragment '{}'",
                    entry.source,
                    entry.entry_ref,
                    raw_fragment
                );
                stats.add_dropped(&entry.source);
                stats.add_warning(format!(
                    "{}:{}: dropped empty gloss fragment",
                    entry.source, entry.entry_ref
                ));
                continue;
            }

            let normalized = self.normalizer.normalize(&preprocessed, &entry.language).await;
            if normalized.degraded {
                stats.add_degraded(&entry.source);
            }

            let wsu = WitnessSenseUnit::new(
                &entry.source,
                &entry.entry_ref,
                raw_fragment,
                &entry.language,
                normalized,
            );

            // Identical (source, ref, raw) fragments hash to the same id and
            // carry no new evidence
            if !seen_ids.insert(wsu.id.clone()) {
                log::debug!(
                    "{}:{}: collapsed duplicate witness {}",
                    entry.source,
                    entry.entry_ref,
                    wsu.id
                );
                stats.add_warning(format!(
                    "{}:{}: collapsed duplicate witness {}",
                    entry.source, entry.entry_ref, wsu.id
                ));
                continue;
            }

            wsus.push(wsu);
        }

        wsus
    }
}
