use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::{
        filter::{PageWindow, ProductFilter, Range},
        requests::product::ListProductsRequest,
        response::product::{ProductPage, ProductResponse},
    },
    service::non_blank,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use tracing::{error, info};

pub const PAGE_SIZE: i64 = 5;

#[derive(Clone)]
pub struct ProductQueryService {
    query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service");

        Self {
            query,
            tracer: OperationTracer::new("product-query-service", metrics),
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn list_products(&self, req: &ListProductsRequest) -> Result<ProductPage, ServiceError> {
        let page = req.page.filter(|p| *p >= 1).unwrap_or(1);

        info!(
            "🔍 Listing products | page: {page}, name: {:?}, category: {:?}, price: {:?}..{:?}",
            req.name, req.category, req.min_price, req.max_price
        );

        let filter = ProductFilter {
            name_contains: non_blank(&req.name),
            category: non_blank(&req.category),
            price: Range::new(req.min_price, req.max_price),
            ..Default::default()
        };
        let window = PageWindow {
            skip: (page - 1).saturating_mul(PAGE_SIZE),
            limit: PAGE_SIZE,
        };

        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "product_list",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "list"),
                KeyValue::new("page", page),
            ],
        );

        let (products, total) = match tokio::try_join!(
            self.query.find_products(&filter, Some(window)),
            self.query.count_products(&filter)
        ) {
            Ok(res) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Products retrieved");
                res
            }
            Err(e) => {
                let msg = format!("❌ Failed to list products: {e:?}");
                error!("{msg}");
                self.tracer.complete_error(&tracing_ctx, method, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        let total_pages = (total + PAGE_SIZE - 1) / PAGE_SIZE;
        let items: Vec<ProductResponse> =
            products.into_iter().map(ProductResponse::from).collect();

        info!("✅ Found {} products (total: {total})", items.len());

        Ok(ProductPage {
            items,
            total,
            page,
            page_size: PAGE_SIZE,
            total_pages,
        })
    }
}
