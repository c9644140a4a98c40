//! # Sensebank Reduce
//!
//! The sense-reduction engine: scores pairwise similarity between witness
//! sense units, clusters them into confidence-scored sense buckets, and
//! orchestrates the whole pipeline for one query.
//!
//! ## Architecture
//!
//! ```text
//! SourceEntry[]
//!     │
//!     ├──> WsuExtractor          (per-source strategy + normalization)
//!     │      └─> WitnessSenseUnit[]
//!     │
//!     ├──> SimilarityEngine      (token-set Jaccard, optional blend)
//!     │      └─> SimilarityMatrix (symmetric, upper triangle)
//!     │
//!     └──> Clusterer             (greedy single-linkage, mode threshold)
//!            └─> SenseBucket[]
//! ```
//!
//! Each reduction is a pure computation over its own batch. Components
//! hold no shared mutable state, so any number of reductions may run on
//! independent tasks without locking.

mod cluster;
mod embedder;
mod error;
mod matrix;
mod pipeline;
mod similarity;

pub use cluster::Clusterer;
pub use embedder::{cosine_similarity, Embedder, StubEmbedder};
pub use error::{ReduceError, Result};
pub use matrix::SimilarityMatrix;
pub use pipeline::SenseReducer;
pub use similarity::SimilarityEngine;

// Re-export the boundary types callers need alongside the reducer
pub use sensebank_extract::SourceEntry;
pub use sensebank_protocol::{Mode, ReduceConfig, ReductionResult, ReductionStats};
