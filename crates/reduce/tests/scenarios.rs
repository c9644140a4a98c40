use async_trait::async_trait;
use sensebank_normalize::{Lemmatizer, LemmatizerError};
use sensebank_reduce::{Mode, ReduceConfig, SenseReducer, SourceEntry, StubEmbedder};
use std::sync::Arc;
use std::time::Duration;

fn entry(source: &str, entry_ref: &str, gloss: &str) -> SourceEntry {
    SourceEntry::new(source, entry_ref, "πῦρ", "grc", gloss)
}

fn reducer() -> SenseReducer {
    SenseReducer::new(ReduceConfig::default()).unwrap()
}

#[tokio::test]
async fn scenario_a_identical_token_sets_merge_in_both_modes() {
    let entries = vec![
        entry("alpha-lex", "r1", "fire, flame"),
        entry("beta-lex", "r2", "flame, fire"),
    ];
    for mode in [Mode::Open, Mode::Skeptic] {
        let result = reducer().reduce(&entries, mode).await.unwrap();
        assert_eq!(result.buckets.len(), 1, "mode {mode}");
        assert_eq!(result.buckets[0].witness_count(), 2);
    }
}

#[tokio::test]
async fn scenario_b_disjoint_token_sets_stay_separate() {
    let entries = vec![
        entry("alpha-lex", "r1", "fire"),
        entry("beta-lex", "r2", "river"),
    ];
    for mode in [Mode::Open, Mode::Skeptic] {
        let result = reducer().reduce(&entries, mode).await.unwrap();
        assert_eq!(result.buckets.len(), 2, "mode {mode}");
    }
}

#[tokio::test]
async fn scenario_c_partial_overlap_two_buckets_in_both_modes() {
    // Jaccard(A,B) = 1/3, Jaccard(A,C) = Jaccard(B,C) = 0; with default
    // thresholds 0.15/0.25 both modes land on {A,B} and {C}
    let entries = vec![
        entry("alpha-lex", "r1", "fire sacred"),
        entry("beta-lex", "r2", "fire ritual"),
        entry("gamma-lex", "r3", "river bank"),
    ];
    for mode in [Mode::Open, Mode::Skeptic] {
        let result = reducer().reduce(&entries, mode).await.unwrap();
        assert_eq!(result.buckets.len(), 2, "mode {mode}");

        let pair = result
            .buckets
            .iter()
            .find(|b| b.witness_count() == 2)
            .expect("one bucket holds the overlapping pair");
        let singleton = result
            .buckets
            .iter()
            .find(|b| b.witness_count() == 1)
            .expect("river/bank stays alone");
        assert!(pair.confidence > singleton.confidence);
    }
}

#[tokio::test]
async fn mid_strength_overlap_splits_the_modes() {
    // Jaccard = 1/5 = 0.2 sits between open (0.15) and skeptic (0.25)
    let entries = vec![
        entry("alpha-lex", "r1", "fire sacred altar"),
        entry("beta-lex", "r2", "fire ritual dance"),
    ];
    let open = reducer().reduce(&entries, Mode::Open).await.unwrap();
    let skeptic = reducer().reduce(&entries, Mode::Skeptic).await.unwrap();
    assert_eq!(open.buckets.len(), 1);
    assert_eq!(skeptic.buckets.len(), 2);
}

#[tokio::test]
async fn empty_batch_is_no_senses_found_not_an_error() {
    let result = reducer().reduce(&[], Mode::Open).await.unwrap();
    assert!(result.is_empty());
    assert!(result.stats.warnings.is_empty());
}

#[tokio::test]
async fn identical_input_and_mode_reproduce_identical_buckets() {
    let entries = vec![
        entry("alpha-lex", "r1", "fire sacred; fire ritual; flame"),
        entry("beta-lex", "r2", "river bank; stream"),
        entry("gamma-lex", "r3", "fire; burnt offering"),
    ];
    let first = reducer().reduce(&entries, Mode::Open).await.unwrap();
    for _ in 0..5 {
        let again = reducer().reduce(&entries, Mode::Open).await.unwrap();
        assert_eq!(first.buckets, again.buckets);
    }
}

struct FailingLemmatizer;

#[async_trait]
impl Lemmatizer for FailingLemmatizer {
    async fn lemmatize(
        &self,
        _tokens: &[String],
        _language: &str,
    ) -> Result<Vec<String>, LemmatizerError> {
        Err(LemmatizerError::Unavailable("service down".into()))
    }
}

struct HangingLemmatizer;

#[async_trait]
impl Lemmatizer for HangingLemmatizer {
    async fn lemmatize(
        &self,
        _tokens: &[String],
        _language: &str,
    ) -> Result<Vec<String>, LemmatizerError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        unreachable!()
    }
}

#[tokio::test]
async fn unavailable_lemmatizer_degrades_but_completes() {
    let reducer = SenseReducer::new(ReduceConfig::default())
        .unwrap()
        .with_lemmatizer(Arc::new(FailingLemmatizer));
    let entries = vec![
        entry("alpha-lex", "r1", "fire, flame"),
        entry("beta-lex", "r2", "flame, fire"),
    ];
    let result = reducer.reduce(&entries, Mode::Open).await.unwrap();
    assert_eq!(result.buckets.len(), 1);
    assert_eq!(result.stats.degraded(), 2);
}

#[tokio::test(start_paused = true)]
async fn hanging_lemmatizer_times_out_and_completes() {
    let config = ReduceConfig {
        collaborator_timeout_ms: 50,
        ..Default::default()
    };
    let reducer = SenseReducer::new(config)
        .unwrap()
        .with_lemmatizer(Arc::new(HangingLemmatizer));
    let entries = vec![entry("alpha-lex", "r1", "fire")];
    let result = reducer.reduce(&entries, Mode::Open).await.unwrap();
    assert_eq!(result.buckets.len(), 1);
    assert_eq!(result.stats.degraded(), 1);
}

#[tokio::test]
async fn embedding_blend_path_still_partitions() {
    let config = ReduceConfig {
        embedding_blend: true,
        ..Default::default()
    };
    let reducer = SenseReducer::new(config)
        .unwrap()
        .with_embedder(Arc::new(StubEmbedder::default()));
    let entries = vec![
        entry("alpha-lex", "r1", "fire, flame"),
        entry("beta-lex", "r2", "flame, fire"),
        entry("gamma-lex", "r3", "river"),
    ];
    let result = reducer.reduce(&entries, Mode::Open).await.unwrap();

    let total_members: usize = result.buckets.iter().map(|b| b.witness_count()).sum();
    assert_eq!(total_members, result.stats.wsus_extracted);
    for bucket in &result.buckets {
        assert!((0.0..=1.0).contains(&bucket.confidence));
    }
    // Identical token sets stay together even on the blended path
    let id_a = sensebank_protocol::WitnessSenseUnit::compute_id("alpha-lex", "r1", "fire, flame");
    let id_b = sensebank_protocol::WitnessSenseUnit::compute_id("beta-lex", "r2", "flame, fire");
    assert!(result
        .buckets
        .iter()
        .any(|b| b.contains(&id_a) && b.contains(&id_b)));
}

#[tokio::test]
async fn result_round_trips_through_json() {
    let entries = vec![
        entry("alpha-lex", "r1", "fire sacred; fire ritual"),
        entry("beta-lex", "r2", "river bank"),
    ];
    let result = reducer().reduce(&entries, Mode::Skeptic).await.unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: sensebank_reduce::ReductionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.buckets, result.buckets);
    assert_eq!(back.stats.wsus_extracted, result.stats.wsus_extracted);
}
