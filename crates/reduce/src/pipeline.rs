use crate::cluster::Clusterer;
use crate::embedder::{pool_embedding, Embedder};
use crate::error::{ReduceError, Result};
use crate::similarity::SimilarityEngine;
use sensebank_extract::{SourceEntry, WsuExtractor};
use sensebank_normalize::{Denylist, Lemmatizer, Normalizer};
use sensebank_protocol::{Mode, ReduceConfig, ReductionResult, ReductionStats, WitnessSenseUnit};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Orchestrates one reduction: extraction, normalization, optional
/// embedding enrichment, similarity scoring and clustering.
///
/// The reducer itself is stateless across queries; collaborators are
/// shared behind `Arc`, so one instance can serve any number of
/// concurrent reductions.
pub struct SenseReducer {
    config: ReduceConfig,
    lemmatizer: Option<Arc<dyn Lemmatizer>>,
    embedder: Option<Arc<dyn Embedder>>,
}

impl SenseReducer {
    /// Create a reducer from validated configuration.
    pub fn new(config: ReduceConfig) -> Result<Self> {
        config.validate().map_err(ReduceError::InvalidConfig)?;
        Ok(Self {
            config,
            lemmatizer: None,
            embedder: None,
        })
    }

    /// Attach a lemmatization collaborator.
    #[must_use]
    pub fn with_lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    /// Attach an embedding collaborator (used only when the config enables
    /// blending).
    #[must_use]
    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    fn collaborator_timeout(&self) -> Duration {
        Duration::from_millis(self.config.collaborator_timeout_ms)
    }

    /// Reduce a flat batch of parsed entries into sense buckets.
    pub async fn reduce(&self, entries: &[SourceEntry], mode: Mode) -> Result<ReductionResult> {
        let start = Instant::now();
        let mut stats = ReductionStats::new();

        // 1. Extraction (normalization happens inside, per fragment)
        let normalizer = Normalizer::new(
            Denylist::with_overrides(&self.config.denylist),
            self.lemmatizer.clone(),
            self.collaborator_timeout(),
        );
        let extractor = WsuExtractor::new(normalizer);

        let mut wsus: Vec<WitnessSenseUnit> = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();
        for entry in entries {
            for wsu in extractor.extract(entry, &mut stats).await {
                // The extractor collapses duplicates within one entry; the
                // same (source, ref, fragment) submitted twice across
                // entries collapses here
                if seen_ids.insert(wsu.id.clone()) {
                    wsus.push(wsu);
                } else {
                    stats.add_warning(format!(
                        "{}:{}: collapsed duplicate witness {} across entries",
                        wsu.source, entry.entry_ref, wsu.id
                    ));
                }
            }
        }
        log::debug!("extracted {} witnesses from {} entries", wsus.len(), entries.len());

        // 2. Embedding enrichment (extension point; default path untouched)
        if self.config.embedding_blend {
            if let Some(embedder) = &self.embedder {
                let timeout = self.collaborator_timeout();
                for wsu in &mut wsus {
                    wsu.embedding = pool_embedding(embedder.as_ref(), &wsu.tokens, timeout).await;
                }
                log::debug!("embedding enrichment done");
            }
        }

        // 3. Similarity matrix (upper triangle only)
        let engine = SimilarityEngine::new(&self.config);
        let matrix = engine.matrix(&wsus);

        // 4. Clustering
        let clusterer = Clusterer::new(&self.config);
        let buckets = clusterer.cluster(&wsus, &matrix, mode)?;

        stats.wsus_extracted = wsus.len();
        stats.buckets = buckets.len();
        stats.time_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "reduction complete: {} witnesses -> {} buckets (mode={mode}, {}ms)",
            stats.wsus_extracted,
            stats.buckets,
            stats.time_ms
        );

        Ok(ReductionResult { buckets, stats })
    }

    /// Adapter-facing variant: entries grouped by source label, flattened
    /// in sorted-source order so grouping never changes the outcome.
    pub async fn reduce_by_source(
        &self,
        entries_by_source: &HashMap<String, Vec<SourceEntry>>,
        mode: Mode,
    ) -> Result<ReductionResult> {
        let mut sources: Vec<&String> = entries_by_source.keys().collect();
        sources.sort();

        let flat: Vec<SourceEntry> = sources
            .into_iter()
            .flat_map(|source| entries_by_source[source].iter().cloned())
            .collect();
        self.reduce(&flat, mode).await
    }
}
