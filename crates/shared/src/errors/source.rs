use thiserror::Error;

/// Failures talking to the external content source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Source request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid source payload: {0}")]
    Decode(String),
}
