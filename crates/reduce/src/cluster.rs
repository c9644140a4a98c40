use crate::error::{ReduceError, Result};
use crate::matrix::SimilarityMatrix;
use sensebank_protocol::{Mode, ReduceConfig, SenseBucket, WitnessSenseUnit};
use std::collections::HashSet;

/// Confidence floor for a bucket with no internal evidence (singleton).
const CONFIDENCE_BASE: f32 = 0.30;
const COHESION_WEIGHT: f32 = 0.45;
const WITNESS_WEIGHT: f32 = 0.15;
const SOURCE_WEIGHT: f32 = 0.10;

/// Partitions witnesses into sense buckets with greedy single-linkage
/// agglomerative clustering.
///
/// Merge order and tie-breaks are fully deterministic: identical input
/// and mode always reproduce identical buckets.
pub struct Clusterer {
    open_threshold: f32,
    skeptic_threshold: f32,
}

impl Clusterer {
    #[must_use]
    pub fn new(config: &ReduceConfig) -> Self {
        Self {
            open_threshold: config.open_threshold,
            skeptic_threshold: config.skeptic_threshold,
        }
    }

    /// Merge threshold for the given mode.
    #[must_use]
    pub fn threshold(&self, mode: Mode) -> f32 {
        match mode {
            Mode::Open => self.open_threshold,
            Mode::Skeptic => self.skeptic_threshold,
        }
    }

    /// Cluster the witness set.
    ///
    /// Zero witnesses yields zero buckets. A broken partition after
    /// construction is a programming error and aborts loudly.
    pub fn cluster(
        &self,
        wsus: &[WitnessSenseUnit],
        matrix: &SimilarityMatrix,
        mode: Mode,
    ) -> Result<Vec<SenseBucket>> {
        if wsus.is_empty() {
            return Ok(Vec::new());
        }

        let threshold = self.threshold(mode);
        let mut clusters: Vec<Vec<usize>> = (0..wsus.len()).map(|i| vec![i]).collect();

        // Greedy merge: highest single-linkage pair first, stop when no
        // pair reaches the threshold.
        loop {
            let mut best: Option<(usize, usize, f32)> = None;
            let mut best_key: Option<PairKey<'_>> = None;

            for i in 0..clusters.len() {
                for j in (i + 1)..clusters.len() {
                    let sim = single_linkage(&clusters[i], &clusters[j], matrix);
                    if sim < threshold {
                        continue;
                    }
                    let key = pair_key(&clusters[i], &clusters[j], wsus);
                    let wins = match (&best, &best_key) {
                        (None, _) => true,
                        (Some((_, _, best_sim)), Some(current_key)) => {
                            sim > *best_sim || (sim == *best_sim && key < *current_key)
                        }
                        _ => unreachable!("best and best_key are set together"),
                    };
                    if wins {
                        best = Some((i, j, sim));
                        best_key = Some(key);
                    }
                }
            }

            let Some((i, j, sim)) = best else { break };
            log::debug!(
                "merging clusters {i} and {j} at similarity {sim:.3} (threshold {threshold:.3})"
            );
            let merged = clusters.remove(j);
            clusters[i].extend(merged);
        }

        let buckets = self.build_buckets(wsus, matrix, mode, clusters);
        check_partition(wsus, &buckets)?;
        Ok(buckets)
    }

    fn build_buckets(
        &self,
        wsus: &[WitnessSenseUnit],
        matrix: &SimilarityMatrix,
        mode: Mode,
        mut clusters: Vec<Vec<usize>>,
    ) -> Vec<SenseBucket> {
        // Bucket ids follow ascending smallest-member-id order
        for members in &mut clusters {
            members.sort_by(|&a, &b| wsus[a].id.cmp(&wsus[b].id));
        }
        clusters.sort_by(|a, b| wsus[a[0]].id.cmp(&wsus[b[0]].id));

        clusters
            .into_iter()
            .enumerate()
            .map(|(idx, members)| {
                let representative = representative_member(&members, wsus, matrix);
                let confidence = confidence(&members, wsus, matrix);
                SenseBucket {
                    id: format!("b{idx:03}"),
                    member_ids: members.iter().map(|&m| wsus[m].id.clone()).collect(),
                    representative_gloss: wsus[representative].normalized_gloss.clone(),
                    confidence,
                    mode,
                    semantic_constant: None,
                }
            })
            .collect()
    }
}

/// Cluster-to-cluster similarity: maximum pairwise member similarity.
fn single_linkage(a: &[usize], b: &[usize], matrix: &SimilarityMatrix) -> f32 {
    let mut max = 0.0f32;
    for &i in a {
        for &j in b {
            let sim = matrix.get(i, j);
            if sim > max {
                max = sim;
            }
        }
    }
    max
}

type PairKey<'a> = ((&'a str, &'a str), (&'a str, &'a str));

/// (lowest member id, its source) of one cluster.
fn cluster_key<'a>(members: &[usize], wsus: &'a [WitnessSenseUnit]) -> (&'a str, &'a str) {
    let lowest = members
        .iter()
        .min_by_key(|&&m| &wsus[m].id)
        .expect("clusters are never empty");
    (&wsus[*lowest].id, &wsus[*lowest].source)
}

/// Order-independent tie-break key for a candidate merge pair: the two
/// cluster keys, lower one first. Ids are unique within a batch, so
/// comparing keys totally orders all candidate pairs.
fn pair_key<'a>(a: &[usize], b: &[usize], wsus: &'a [WitnessSenseUnit]) -> PairKey<'a> {
    let ka = cluster_key(a, wsus);
    let kb = cluster_key(b, wsus);
    if ka <= kb {
        (ka, kb)
    } else {
        (kb, ka)
    }
}

/// Member with the highest mean similarity to the rest of its cluster;
/// ties broken by shortest normalized gloss, then lexical order.
fn representative_member(
    members: &[usize],
    wsus: &[WitnessSenseUnit],
    matrix: &SimilarityMatrix,
) -> usize {
    let mean_to_others = |m: usize| -> f32 {
        if members.len() < 2 {
            return 1.0;
        }
        let sum: f32 = members
            .iter()
            .filter(|&&other| other != m)
            .map(|&other| matrix.get(m, other))
            .sum();
        sum / (members.len() - 1) as f32
    };

    let mut best = members[0];
    let mut best_mean = mean_to_others(best);
    for &candidate in &members[1..] {
        let mean = mean_to_others(candidate);
        let candidate_gloss = &wsus[candidate].normalized_gloss;
        let best_gloss = &wsus[best].normalized_gloss;
        let wins = mean > best_mean
            || (mean == best_mean
                && (candidate_gloss.len() < best_gloss.len()
                    || (candidate_gloss.len() == best_gloss.len()
                        && candidate_gloss < best_gloss)));
        if wins {
            best = candidate;
            best_mean = mean;
        }
    }
    best
}

/// Monotone confidence: grows with cohesion (mean pairwise similarity),
/// witness count and distinct-source count; clamped to [0, 1]. Singletons
/// sit at the base so headword-echo glosses stay visibly weak.
fn confidence(members: &[usize], wsus: &[WitnessSenseUnit], matrix: &SimilarityMatrix) -> f32 {
    let witnesses = members.len();

    let cohesion = if witnesses < 2 {
        0.0
    } else {
        let mut sum = 0.0f32;
        let mut pairs = 0usize;
        for (pos, &i) in members.iter().enumerate() {
            for &j in &members[pos + 1..] {
                sum += matrix.get(i, j);
                pairs += 1;
            }
        }
        sum / pairs as f32
    };

    let sources: HashSet<&str> = members.iter().map(|&m| wsus[m].source.as_str()).collect();

    let score = CONFIDENCE_BASE
        + COHESION_WEIGHT * cohesion
        + WITNESS_WEIGHT * (1.0 - 1.0 / witnesses as f32)
        + SOURCE_WEIGHT * (1.0 - 1.0 / sources.len() as f32);
    score.clamp(0.0, 1.0)
}

/// Verify bucket memberships exactly partition the input witness set.
pub(crate) fn check_partition(
    wsus: &[WitnessSenseUnit],
    buckets: &[SenseBucket],
) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for bucket in buckets {
        if bucket.member_ids.is_empty() {
            return Err(ReduceError::InvariantViolation(format!(
                "bucket {} has no members",
                bucket.id
            )));
        }
        for id in &bucket.member_ids {
            if !seen.insert(id.as_str()) {
                return Err(ReduceError::InvariantViolation(format!(
                    "witness {id} appears in more than one bucket"
                )));
            }
        }
    }

    for wsu in wsus {
        if !seen.remove(wsu.id.as_str()) {
            return Err(ReduceError::InvariantViolation(format!(
                "witness {} missing from every bucket",
                wsu.id
            )));
        }
    }
    if let Some(orphan) = seen.iter().next() {
        return Err(ReduceError::InvariantViolation(format!(
            "bucket member {orphan} does not correspond to any input witness"
        )));
    }
    Ok(())
}
