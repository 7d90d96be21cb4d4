use crate::domain::{requests::product::UpsertProductRequest, sync::UpsertOutcome};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    /// Inserts or overwrites by `external_id` in one atomic step, unless the
    /// existing row is soft-deleted.
    async fn upsert_product(
        &self,
        req: &UpsertProductRequest,
    ) -> Result<UpsertOutcome, RepositoryError>;

    /// Returns `true` only when a live row was flipped to deleted.
    async fn soft_delete_product(&self, external_id: &str) -> Result<bool, RepositoryError>;
}
