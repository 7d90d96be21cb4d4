use crate::domain::{
    requests::report::{ExistingProductsRequest, StockSummaryRequest},
    response::report::{DeletedProductsReport, ExistingProductsReport, StockSummary},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynReportService = Arc<dyn ReportServiceTrait + Send + Sync>;

#[async_trait]
pub trait ReportServiceTrait {
    async fn deleted_percentage(&self) -> Result<DeletedProductsReport, ServiceError>;
    async fn existing_percentage(
        &self,
        req: &ExistingProductsRequest,
    ) -> Result<ExistingProductsReport, ServiceError>;
    async fn stock_summary(&self, req: &StockSummaryRequest)
    -> Result<StockSummary, ServiceError>;
}
