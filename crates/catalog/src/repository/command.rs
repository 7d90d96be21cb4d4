use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::{requests::product::UpsertProductRequest, sync::UpsertOutcome},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn upsert_product(
        &self,
        req: &UpsertProductRequest,
    ) -> Result<UpsertOutcome, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        // xmax = 0 only for a freshly inserted tuple; no row back means the
        // conflicting row is soft-deleted and the WHERE suppressed the update.
        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO products (
                external_id, sku, name, brand, model, category, color,
                price, currency, stock, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (external_id) DO UPDATE SET
                sku = EXCLUDED.sku,
                name = EXCLUDED.name,
                brand = EXCLUDED.brand,
                model = EXCLUDED.model,
                category = EXCLUDED.category,
                color = EXCLUDED.color,
                price = EXCLUDED.price,
                currency = EXCLUDED.currency,
                stock = EXCLUDED.stock,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at
            WHERE products.deleted = FALSE
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(&req.external_id)
        .bind(req.sku)
        .bind(&req.name)
        .bind(&req.brand)
        .bind(&req.model)
        .bind(&req.category)
        .bind(&req.color)
        .bind(req.price)
        .bind(&req.currency)
        .bind(req.stock)
        .bind(req.created_at)
        .bind(req.updated_at)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to upsert product {}: {:?}", req.external_id, e);
            RepositoryError::from(e)
        })?;

        let outcome = match inserted {
            Some(true) => UpsertOutcome::Created,
            Some(false) => UpsertOutcome::Updated,
            None => UpsertOutcome::SkippedDeleted,
        };

        debug!("💾 Upserted product {} -> {outcome:?}", req.external_id);

        Ok(outcome)
    }

    async fn soft_delete_product(&self, external_id: &str) -> Result<bool, RepositoryError> {
        info!("🗑️ Soft deleting product: {external_id}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let result = sqlx::query(
            "UPDATE products SET deleted = TRUE WHERE external_id = $1 AND deleted = FALSE",
        )
        .bind(external_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to soft delete product {external_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
