use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    domain::filter::{PageWindow, ProductFilter},
    model::product::Product as ProductModel,
    repository::filter::{PRODUCT_COLUMNS, push_product_filter},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_products(
        &self,
        filter: &ProductFilter,
        window: Option<PageWindow>,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching products | filter: {filter:?}, window: {window:?}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        push_product_filter(&mut builder, filter);
        builder.push(" ORDER BY id");

        if let Some(window) = window {
            builder
                .push(" OFFSET ")
                .push_bind(window.skip)
                .push(" LIMIT ")
                .push_bind(window.limit);
        }

        let products = builder
            .build_query_as::<ProductModel>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(products)
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<i64, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_product_filter(&mut builder, filter);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(total)
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by external id: {external_id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE external_id = $1"
        ))
        .bind(external_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }
}
