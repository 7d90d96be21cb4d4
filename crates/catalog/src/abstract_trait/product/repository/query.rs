use crate::{
    domain::filter::{PageWindow, ProductFilter},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_products(
        &self,
        filter: &ProductFilter,
        window: Option<PageWindow>,
    ) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn count_products(&self, filter: &ProductFilter) -> Result<i64, RepositoryError>;
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<ProductModel>, RepositoryError>;
}
