use proptest::prelude::*;
use sensebank_protocol::{Mode, NormalizedGloss, ReduceConfig, WitnessSenseUnit};
use sensebank_reduce::{Clusterer, SimilarityEngine};
use std::collections::HashSet;

/// Small shared vocabulary so generated token sets actually overlap.
const VOCAB: &[&str] = &[
    "fire", "flame", "river", "bank", "sacred", "ritual", "water", "burn", "altar", "stream",
];

const SOURCES: &[&str] = &["lsj", "slater", "lewis-short", "autenrieth"];

fn wsu_batch() -> impl Strategy<Value = Vec<WitnessSenseUnit>> {
    prop::collection::vec(
        (
            0usize..SOURCES.len(),
            prop::collection::btree_set(0usize..VOCAB.len(), 0..5),
        ),
        0..12,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(idx, (source, token_idxs))| {
                let tokens: Vec<String> =
                    token_idxs.into_iter().map(|t| VOCAB[t].to_string()).collect();
                let raw = tokens.join(" ");
                WitnessSenseUnit::new(
                    SOURCES[source],
                    &format!("ref.{idx}"),
                    raw.clone(),
                    "grc",
                    NormalizedGloss {
                        cleaned_text: raw,
                        tokens,
                        degraded: false,
                    },
                )
            })
            .collect()
    })
}

fn run(wsus: &[WitnessSenseUnit], mode: Mode) -> Vec<sensebank_protocol::SenseBucket> {
    let config = ReduceConfig::default();
    let matrix = SimilarityEngine::new(&config).matrix(wsus);
    Clusterer::new(&config)
        .cluster(wsus, &matrix, mode)
        .expect("well-formed input never violates the partition")
}

proptest! {
    /// Bucket memberships are an exact, non-overlapping, non-omitting
    /// cover of the input witness ids.
    #[test]
    fn partition_is_exact(wsus in wsu_batch(), skeptic in any::<bool>()) {
        let mode = if skeptic { Mode::Skeptic } else { Mode::Open };
        let buckets = run(&wsus, mode);

        let mut seen = HashSet::new();
        for bucket in &buckets {
            prop_assert!(!bucket.member_ids.is_empty(), "bucket {} is empty", bucket.id);
            for id in &bucket.member_ids {
                prop_assert!(seen.insert(id.clone()), "witness {} in two buckets", id);
            }
        }
        prop_assert_eq!(seen.len(), wsus.len());
        for wsu in &wsus {
            prop_assert!(seen.contains(&wsu.id), "witness {} omitted", wsu.id);
        }
    }

    /// Identical input and mode reproduce identical buckets.
    #[test]
    fn reduction_is_deterministic(wsus in wsu_batch(), skeptic in any::<bool>()) {
        let mode = if skeptic { Mode::Skeptic } else { Mode::Open };
        let first = run(&wsus, mode);
        let second = run(&wsus, mode);
        prop_assert_eq!(first, second);
    }

    /// Skeptic never merges more aggressively than Open.
    #[test]
    fn skeptic_never_fewer_buckets(wsus in wsu_batch()) {
        let open = run(&wsus, Mode::Open);
        let skeptic = run(&wsus, Mode::Skeptic);
        prop_assert!(skeptic.len() >= open.len());
    }

    /// All pairwise scores sit in [0, 1] and self-similarity is 1.
    #[test]
    fn similarity_scores_bounded(wsus in wsu_batch()) {
        let config = ReduceConfig::default();
        let matrix = SimilarityEngine::new(&config).matrix(&wsus);
        for i in 0..wsus.len() {
            prop_assert_eq!(matrix.get(i, i), 1.0);
            for j in 0..wsus.len() {
                let score = matrix.get(i, j);
                prop_assert!((0.0..=1.0).contains(&score));
                prop_assert_eq!(score, matrix.get(j, i));
            }
        }
    }

    /// All bucket confidences sit in [0, 1].
    #[test]
    fn confidences_bounded(wsus in wsu_batch(), skeptic in any::<bool>()) {
        let mode = if skeptic { Mode::Skeptic } else { Mode::Open };
        for bucket in run(&wsus, mode) {
            prop_assert!((0.0..=1.0).contains(&bucket.confidence));
        }
    }
}
