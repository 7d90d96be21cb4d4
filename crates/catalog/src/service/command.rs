use crate::{
    abstract_trait::product::{
        repository::DynProductCommandRepository, service::ProductCommandServiceTrait,
    },
    domain::response::product::DeleteProductResponse,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandService {
    command: DynProductCommandRepository,
    tracer: OperationTracer,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service");

        Self {
            command,
            tracer: OperationTracer::new("product-command-service", metrics),
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn soft_delete(
        &self,
        external_id: &str,
    ) -> Result<DeleteProductResponse, ServiceError> {
        info!("🗑️ Deleting product: {external_id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "product_soft_delete",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "soft_delete"),
                KeyValue::new("product.external_id", external_id.to_string()),
            ],
        );

        if external_id.trim().is_empty() {
            self.tracer
                .complete_error(&tracing_ctx, method, "Product not found");
            return Err(ServiceError::NotFound("Product not found".to_string()));
        }

        match self.command.soft_delete_product(external_id).await {
            Ok(true) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Product deleted");
                Ok(DeleteProductResponse {
                    message: "Product deleted".to_string(),
                })
            }
            Ok(false) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Product not found");
                Err(ServiceError::NotFound("Product not found".to_string()))
            }
            Err(e) => {
                let msg = format!("❌ Failed to delete product {external_id}: {e:?}");
                error!("{msg}");
                self.tracer.complete_error(&tracing_ctx, method, &msg);
                Err(ServiceError::Repo(e))
            }
        }
    }
}
