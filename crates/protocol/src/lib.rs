//! # Sensebank Protocol
//!
//! Shared data model for the sense-reduction pipeline.
//!
//! ## Architecture
//!
//! ```text
//! SourceEntry[] (adapters)
//!     │
//!     ├──> WitnessSenseUnit[]   (extraction + normalization)
//!     │
//!     ├──> SimilarityMatrix     (pairwise token-set scores)
//!     │
//!     └──> SenseBucket[]        (single-linkage clustering)
//!            └─> ReductionResult { buckets, stats }
//! ```
//!
//! Everything here is a plain serializable value: a caller may cache or
//! transmit a [`ReductionResult`] as-is. The core defines no persisted
//! storage format of its own.

mod config;
mod error;
mod stats;
mod types;

pub use config::ReduceConfig;
pub use error::{ProtocolError, Result};
pub use stats::ReductionStats;
pub use types::{Mode, NormalizedGloss, ReductionResult, SenseBucket, WitnessSenseUnit};
