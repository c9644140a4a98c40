use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

/// Optional embedding collaborator: per-token vectors for the blended
/// similarity score. May be absent, slow, or partial — every call is
/// timeout-bounded and a missing vector is an answer, not an error.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Vector for a single token, or None when the token has no vector.
    async fn embed(&self, token: &str) -> Option<Vec<f32>>;
}

/// Cosine similarity between two vectors; 0.0 on dimension mismatch or
/// zero norm.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Mean-pool the token vectors an embedder can produce for a witness.
///
/// Tokens without vectors are skipped; vectors whose dimension disagrees
/// with the first one seen are skipped too. Returns None when no token
/// has a vector or the per-token timeout keeps firing — the caller then
/// simply stays on the pure Jaccard path.
pub async fn pool_embedding(
    embedder: &dyn Embedder,
    tokens: &[String],
    per_token_timeout: Duration,
) -> Option<Vec<f32>> {
    let mut sum: Option<Vec<f32>> = None;
    let mut count = 0usize;

    for token in tokens {
        let vector = match timeout(per_token_timeout, embedder.embed(token)).await {
            Ok(Some(v)) => v,
            Ok(None) => continue,
            Err(_) => {
                log::warn!("embedder timed out on token '{token}', skipping");
                continue;
            }
        };

        match &mut sum {
            None => {
                sum = Some(vector);
                count = 1;
            }
            Some(acc) if acc.len() == vector.len() => {
                for (s, v) in acc.iter_mut().zip(&vector) {
                    *s += v;
                }
                count += 1;
            }
            Some(_) => {
                log::warn!("embedder returned mismatched dimension for '{token}', skipping");
            }
        }
    }

    let mut pooled = sum?;
    let inv = 1.0 / count as f32;
    for value in &mut pooled {
        *value *= inv;
    }
    Some(pooled)
}

/// Deterministic stand-in embedder: vectors derived from token bytes.
///
/// Similar only to itself by construction, which makes the blended path
/// testable without hosting a model.
pub struct StubEmbedder {
    dims: usize,
}

impl StubEmbedder {
    #[must_use]
    pub const fn new(dims: usize) -> Self {
        Self { dims }
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new(16)
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, token: &str) -> Option<Vec<f32>> {
        if token.is_empty() {
            return None;
        }
        // Simple byte-fold: stable across runs and platforms
        let bytes = token.as_bytes();
        let vector = (0..self.dims)
            .map(|i| {
                let mut acc = 0u32;
                for (pos, &b) in bytes.iter().enumerate() {
                    acc = acc
                        .wrapping_mul(31)
                        .wrapping_add(u32::from(b) * (i as u32 + 1) + pos as u32);
                }
                (acc % 1000) as f32 / 1000.0
            })
            .collect();
        Some(vector)
    }
}
