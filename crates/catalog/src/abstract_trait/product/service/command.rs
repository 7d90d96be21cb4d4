use crate::domain::response::product::DeleteProductResponse;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn soft_delete(&self, external_id: &str)
    -> Result<DeleteProductResponse, ServiceError>;
}
