use crate::domain::{requests::product::ListProductsRequest, response::product::ProductPage};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn list_products(&self, req: &ListProductsRequest) -> Result<ProductPage, ServiceError>;
}
