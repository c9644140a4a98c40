use crate::embedder::cosine_similarity;
use crate::matrix::SimilarityMatrix;
use sensebank_protocol::{ReduceConfig, WitnessSenseUnit};
use std::collections::HashSet;

/// Scores pairwise similarity between witnesses of one query.
///
/// Primary metric is token-set Jaccard. When embedding blending is
/// enabled and both witnesses carry a vector, the score becomes
/// `alpha * jaccard + (1 - alpha) * cosine`; a missing vector on either
/// side falls back to pure Jaccard, so the default path is untouched by
/// the extension point.
pub struct SimilarityEngine {
    blend_alpha: f32,
    embedding_blend: bool,
}

impl SimilarityEngine {
    #[must_use]
    pub fn new(config: &ReduceConfig) -> Self {
        Self {
            blend_alpha: config.blend_alpha,
            embedding_blend: config.embedding_blend,
        }
    }

    /// Score a witness pair; always within [0, 1], and 1.0 for the same
    /// witness.
    #[must_use]
    pub fn score(&self, a: &WitnessSenseUnit, b: &WitnessSenseUnit) -> f32 {
        if a.id == b.id {
            return 1.0;
        }

        let jaccard = token_jaccard(&a.tokens, &b.tokens);

        if self.embedding_blend {
            if let (Some(va), Some(vb)) = (&a.embedding, &b.embedding) {
                let cosine = cosine_similarity(va, vb).clamp(0.0, 1.0);
                let blended = self.blend_alpha * jaccard + (1.0 - self.blend_alpha) * cosine;
                return blended.clamp(0.0, 1.0);
            }
        }

        jaccard
    }

    /// Full pairwise matrix; only the upper triangle is computed.
    #[must_use]
    pub fn matrix(&self, wsus: &[WitnessSenseUnit]) -> SimilarityMatrix {
        let mut matrix = SimilarityMatrix::new(wsus.len());
        for i in 0..wsus.len() {
            for j in (i + 1)..wsus.len() {
                matrix.set(i, j, self.score(&wsus[i], &wsus[j]));
            }
        }
        matrix
    }
}

/// Token-set Jaccard similarity `|A∩B| / |A∪B|`; 0.0 when either set is
/// empty. Order and multiplicity of tokens are deliberately ignored.
#[must_use]
pub fn token_jaccard(a: &[String], b: &[String]) -> f32 {
    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f32 / union as f32
}
