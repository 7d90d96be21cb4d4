use crate::domain::source::{SourcePage, SourceQuery};
use async_trait::async_trait;
use shared::errors::SourceError;
use std::sync::Arc;

pub type DynSourceClient = Arc<dyn SourceClientTrait + Send + Sync>;

#[async_trait]
pub trait SourceClientTrait {
    async fn fetch_page(&self, query: &SourceQuery) -> Result<SourcePage, SourceError>;
}
