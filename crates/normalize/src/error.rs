use thiserror::Error;

pub type Result<T> = std::result::Result<T, LemmatizerError>;

/// Failures a lemmatization collaborator may report. All of them are
/// absorbed by the normalizer as degradation, never propagated.
#[derive(Error, Debug)]
pub enum LemmatizerError {
    #[error("Lemmatizer unavailable: {0}")]
    Unavailable(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Lemmatizer backend error: {0}")]
    Backend(String),
}
