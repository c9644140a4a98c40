//! # Sensebank Normalize
//!
//! Turns raw gloss text into a comparable token form: language-aware
//! lower-casing, removal of non-semantic dictionary markers, tokenization
//! and lemmatization through an external collaborator.
//!
//! The lemmatizer is a soft dependency. When it is absent, errors out, or
//! exceeds its timeout, normalization falls back to raw lowercase tokens
//! and flags the result `degraded` — never a hard failure.

mod denylist;
mod error;
mod lemmatizer;
mod normalizer;

pub use denylist::Denylist;
pub use error::{LemmatizerError, Result};
pub use lemmatizer::{Lemmatizer, TableLemmatizer};
pub use normalizer::Normalizer;
