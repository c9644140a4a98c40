use crate::denylist::Denylist;
use crate::lemmatizer::Lemmatizer;
use sensebank_protocol::NormalizedGloss;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use unicode_segmentation::UnicodeSegmentation;

/// Turns raw gloss text into a comparable token form.
///
/// Stateless across calls; safe to share between concurrent reductions.
pub struct Normalizer {
    denylist: Denylist,
    lemmatizer: Option<Arc<dyn Lemmatizer>>,
    lemmatizer_timeout: Duration,
}

impl Normalizer {
    #[must_use]
    pub fn new(
        denylist: Denylist,
        lemmatizer: Option<Arc<dyn Lemmatizer>>,
        lemmatizer_timeout: Duration,
    ) -> Self {
        Self {
            denylist,
            lemmatizer,
            lemmatizer_timeout,
        }
    }

    /// Normalize one gloss fragment.
    ///
    /// Lemmatizer absence, error, or timeout falls back to the raw
    /// lowercase tokens with `degraded = true`; this never fails.
    pub async fn normalize(&self, text: &str, language: &str) -> NormalizedGloss {
        let lowered = lowercase(text, language);
        let cleaned_text = self.denylist.strip(language, &lowered);
        let raw_tokens: Vec<String> = cleaned_text
            .unicode_words()
            .map(ToString::to_string)
            .collect();

        let Some(lemmatizer) = &self.lemmatizer else {
            return NormalizedGloss {
                cleaned_text,
                tokens: raw_tokens,
                degraded: true,
            };
        };

        match timeout(
            self.lemmatizer_timeout,
            lemmatizer.lemmatize(&raw_tokens, language),
        )
        .await
        {
            Ok(Ok(lemmas)) => NormalizedGloss {
                cleaned_text,
                tokens: lemmas,
                degraded: false,
            },
            Ok(Err(e)) => {
                log::warn!("lemmatizer failed for '{language}' gloss, using raw tokens: {e}");
                NormalizedGloss {
                    cleaned_text,
                    tokens: raw_tokens,
                    degraded: true,
                }
            }
            Err(_) => {
                log::warn!(
                    "lemmatizer timed out after {}ms, using raw tokens",
                    self.lemmatizer_timeout.as_millis()
                );
                NormalizedGloss {
                    cleaned_text,
                    tokens: raw_tokens,
                    degraded: true,
                }
            }
        }
    }
}

/// Language-aware lower-casing. Greek folds final sigma so inflectional
/// position does not split token identity.
fn lowercase(text: &str, language: &str) -> String {
    let lowered = text.to_lowercase();
    if language == "grc" {
        lowered
            .chars()
            .map(|c| if c == 'ς' { 'σ' } else { c })
            .collect()
    } else {
        lowered
    }
}
