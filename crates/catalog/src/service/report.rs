use crate::{
    abstract_trait::{product::repository::DynProductQueryRepository, report::ReportServiceTrait},
    domain::{
        filter::{DeletedFilter, PricePresence, ProductFilter, Range},
        requests::report::{ExistingProductsRequest, StockSummaryRequest},
        response::report::{
            DeletedProductsReport, ExistingProductsReport, LowStockProduct, StockSummary,
        },
    },
    service::{non_blank, percentage},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer, parse_query_datetime},
};
use tracing::{error, info};

pub const LOW_STOCK_THRESHOLD: i64 = 5;

#[derive(Clone)]
pub struct ReportService {
    query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl ReportService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "report_service");

        Self {
            query,
            tracer: OperationTracer::new("report-service", metrics),
        }
    }
}

fn existing_filter(req: &ExistingProductsRequest) -> Result<ProductFilter, ServiceError> {
    let price_presence = match req.with_price.as_deref().map(str::trim) {
        Some("true") => Some(PricePresence::WithPrice),
        Some("false") => Some(PricePresence::WithoutPrice),
        _ => None,
    };

    let mut errors = Vec::new();
    let mut parse = |field: &str, value: &Option<String>| match non_blank(value) {
        Some(raw) => parse_query_datetime(&raw)
            .map_err(|e| errors.push(format!("{field}: {e}")))
            .ok(),
        None => None,
    };

    let start = parse("startDate", &req.start_date);
    let end = parse("endDate", &req.end_date);

    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    Ok(ProductFilter {
        price_presence,
        created_at: Range::new(start, end),
        ..Default::default()
    })
}

fn summarize_stock(products: &[crate::model::product::Product]) -> StockSummary {
    let total_stock: i64 = products.iter().map(|p| p.stock.unwrap_or(0)).sum();
    let average_stock = if products.is_empty() {
        0.0
    } else {
        total_stock as f64 / products.len() as f64
    };

    let low_stock_products = products
        .iter()
        .filter(|p| p.stock.unwrap_or(0) < LOW_STOCK_THRESHOLD)
        .map(LowStockProduct::from)
        .collect();

    StockSummary {
        total_stock,
        average_stock,
        low_stock_products,
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    async fn deleted_percentage(&self) -> Result<DeletedProductsReport, ServiceError> {
        info!("📊 Computing deleted products report");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "report_deleted_percentage",
            vec![
                KeyValue::new("component", "report"),
                KeyValue::new("operation", "deleted_percentage"),
            ],
        );

        let deleted = ProductFilter::default().with_deleted(DeletedFilter::OnlyDeleted);
        let all = ProductFilter::default().with_deleted(DeletedFilter::IncludeDeleted);

        let (deleted_products, total_products) = match tokio::try_join!(
            self.query.count_products(&deleted),
            self.query.count_products(&all)
        ) {
            Ok(res) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Deleted report computed");
                res
            }
            Err(e) => {
                let msg = format!("❌ Failed to compute deleted report: {e:?}");
                error!("{msg}");
                self.tracer.complete_error(&tracing_ctx, method, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        Ok(DeletedProductsReport {
            deleted_percentage: percentage(deleted_products, total_products),
            total_products,
            deleted_products,
        })
    }

    async fn existing_percentage(
        &self,
        req: &ExistingProductsRequest,
    ) -> Result<ExistingProductsReport, ServiceError> {
        info!(
            "📊 Computing existing products report | withPrice: {:?}, start: {:?}, end: {:?}",
            req.with_price, req.start_date, req.end_date
        );

        let filter = existing_filter(req)?;

        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "report_existing_percentage",
            vec![
                KeyValue::new("component", "report"),
                KeyValue::new("operation", "existing_percentage"),
            ],
        );

        let existing = filter.clone();
        let all = filter.with_deleted(DeletedFilter::IncludeDeleted);

        let (existing_products, total_products) = match tokio::try_join!(
            self.query.count_products(&existing),
            self.query.count_products(&all)
        ) {
            Ok(res) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Existing report computed");
                res
            }
            Err(e) => {
                let msg = format!("❌ Failed to compute existing report: {e:?}");
                error!("{msg}");
                self.tracer.complete_error(&tracing_ctx, method, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        Ok(ExistingProductsReport {
            existing_percentage: percentage(existing_products, total_products),
            total_products,
            existing_products,
        })
    }

    async fn stock_summary(
        &self,
        req: &StockSummaryRequest,
    ) -> Result<StockSummary, ServiceError> {
        info!(
            "📦 Computing stock summary | stock: {:?}..{:?}, category: {:?}",
            req.min_stock, req.max_stock, req.category
        );

        let filter = ProductFilter {
            category: non_blank(&req.category),
            stock: Range::new(req.min_stock, req.max_stock),
            ..Default::default()
        };

        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "report_stock_summary",
            vec![
                KeyValue::new("component", "report"),
                KeyValue::new("operation", "stock_summary"),
            ],
        );

        let products = match self.query.find_products(&filter, None).await {
            Ok(products) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Stock summary computed");
                products
            }
            Err(e) => {
                let msg = format!("❌ Failed to compute stock summary: {e:?}");
                error!("{msg}");
                self.tracer.complete_error(&tracing_ctx, method, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        Ok(summarize_stock(&products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_with_price_is_ignored() {
        let req = ExistingProductsRequest {
            with_price: Some("maybe".into()),
            ..Default::default()
        };
        assert_eq!(existing_filter(&req).unwrap().price_presence, None);

        let req = ExistingProductsRequest {
            with_price: Some("false".into()),
            ..Default::default()
        };
        assert_eq!(
            existing_filter(&req).unwrap().price_presence,
            Some(PricePresence::WithoutPrice)
        );
    }

    #[test]
    fn bad_dates_are_validation_errors() {
        let req = ExistingProductsRequest {
            start_date: Some("not-a-date".into()),
            end_date: Some("2024-13-45".into()),
            ..Default::default()
        };

        match existing_filter(&req) {
            Err(ServiceError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_stock_counts_as_zero_and_is_low() {
        let product = |id: &str, stock| crate::model::product::Product {
            id: 0,
            external_id: id.into(),
            sku: None,
            name: None,
            brand: None,
            model: None,
            category: None,
            color: None,
            price: None,
            currency: None,
            stock,
            created_at: None,
            updated_at: None,
            deleted: false,
        };

        let summary = summarize_stock(&[product("full", Some(10)), product("unknown", None)]);

        assert_eq!(summary.total_stock, 10);
        assert_eq!(summary.average_stock, 5.0);
        assert_eq!(summary.low_stock_products.len(), 1);
        assert_eq!(summary.low_stock_products[0].external_id, "unknown");
        assert_eq!(summary.low_stock_products[0].stock, None);
    }
}
