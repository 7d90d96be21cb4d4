mod error;
mod http;
mod repository;
mod service;
mod source;
mod sync;

pub use self::error::ErrorResponse;
pub use self::http::HttpError;
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
pub use self::source::SourceError;
pub use self::sync::SyncError;
