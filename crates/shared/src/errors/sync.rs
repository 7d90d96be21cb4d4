use crate::errors::{repository::RepositoryError, source::SourceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),
}
