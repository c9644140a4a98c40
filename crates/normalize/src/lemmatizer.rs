use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// External lemmatization collaborator.
///
/// Implementations may be slow or unavailable; callers bound every call
/// with a timeout and fall back to the surface tokens on any failure.
#[async_trait]
pub trait Lemmatizer: Send + Sync {
    /// Map surface tokens to lemmas, preserving order and length.
    async fn lemmatize(&self, tokens: &[String], language: &str) -> Result<Vec<String>>;
}

/// In-memory lookup-table lemmatizer.
///
/// Enough for tests and offline batches; real morphology services plug in
/// through the [`Lemmatizer`] trait from adapter crates.
#[derive(Debug, Default)]
pub struct TableLemmatizer {
    /// language -> surface form -> lemma
    tables: HashMap<String, HashMap<String, String>>,
}

impl TableLemmatizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        language: impl Into<String>,
        surface: impl Into<String>,
        lemma: impl Into<String>,
    ) {
        self.tables
            .entry(language.into())
            .or_default()
            .insert(surface.into(), lemma.into());
    }

    /// Builder-style insert for test setup.
    #[must_use]
    pub fn with(mut self, language: &str, surface: &str, lemma: &str) -> Self {
        self.insert(language, surface, lemma);
        self
    }
}

#[async_trait]
impl Lemmatizer for TableLemmatizer {
    async fn lemmatize(&self, tokens: &[String], language: &str) -> Result<Vec<String>> {
        let table = self.tables.get(language);
        Ok(tokens
            .iter()
            .map(|token| {
                table
                    .and_then(|t| t.get(token))
                    .cloned()
                    .unwrap_or_else(|| token.clone())
            })
            .collect())
    }
}
