use thiserror::Error;

/// Library-level error type.
///
/// Malformed *input* (empty text, missing job fields) is never an error —
/// every scoring stage substitutes a defined default instead. Errors are
/// reserved for resources the core cannot do without: the embedding model,
/// the vocabulary file, and the job-source wire.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Resume parsing error: {0}")]
    Resume(String),

    #[error("Job source error (status {status}): {message}")]
    Source { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LLM error: {0}")]
    Llm(String),
}
