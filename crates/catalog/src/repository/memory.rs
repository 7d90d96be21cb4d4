use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    domain::{
        filter::{PageWindow, ProductFilter},
        requests::product::UpsertProductRequest,
        sync::UpsertOutcome,
    },
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<ProductModel>,
    next_id: i64,
}

/// In-process catalog store. Rows are kept in insertion order, which is the
/// natural order for reads. Check-and-write happens under one write lock.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    table: RwLock<Table>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds rows as-is; ids are reassigned in slice order.
    pub async fn with_products(products: Vec<ProductModel>) -> Self {
        let store = Self::new();
        {
            let mut table = store.table.write().await;
            for mut product in products {
                table.next_id += 1;
                product.id = table.next_id;
                table.rows.push(product);
            }
        }
        store
    }
}

fn apply(row: &mut ProductModel, req: &UpsertProductRequest) {
    row.sku = req.sku;
    row.name = req.name.clone();
    row.brand = req.brand.clone();
    row.model = req.model.clone();
    row.category = req.category.clone();
    row.color = req.color.clone();
    row.price = req.price;
    row.currency = req.currency.clone();
    row.stock = req.stock;
    row.created_at = req.created_at;
    row.updated_at = req.updated_at;
}

#[async_trait]
impl ProductCommandRepositoryTrait for MemoryProductStore {
    async fn upsert_product(
        &self,
        req: &UpsertProductRequest,
    ) -> Result<UpsertOutcome, RepositoryError> {
        let mut table = self.table.write().await;

        let existing = table
            .rows
            .iter()
            .position(|row| row.external_id == req.external_id);

        let outcome = match existing {
            Some(index) if table.rows[index].deleted => UpsertOutcome::SkippedDeleted,
            Some(index) => {
                apply(&mut table.rows[index], req);
                UpsertOutcome::Updated
            }
            None => {
                table.next_id += 1;
                let mut row = ProductModel {
                    id: table.next_id,
                    external_id: req.external_id.clone(),
                    sku: None,
                    name: None,
                    brand: None,
                    model: None,
                    category: None,
                    color: None,
                    price: None,
                    currency: None,
                    stock: None,
                    created_at: None,
                    updated_at: None,
                    deleted: false,
                };
                apply(&mut row, req);
                table.rows.push(row);
                UpsertOutcome::Created
            }
        };

        debug!("💾 Upserted product {} -> {outcome:?}", req.external_id);

        Ok(outcome)
    }

    async fn soft_delete_product(&self, external_id: &str) -> Result<bool, RepositoryError> {
        info!("🗑️ Soft deleting product: {external_id}");

        let mut table = self.table.write().await;

        match table
            .rows
            .iter_mut()
            .find(|row| row.external_id == external_id && !row.deleted)
        {
            Some(row) => {
                row.deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryProductStore {
    async fn find_products(
        &self,
        filter: &ProductFilter,
        window: Option<PageWindow>,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        let table = self.table.read().await;
        let matching = table.rows.iter().filter(|row| filter.matches(row));

        let products = match window {
            Some(window) => matching
                .skip(window.skip.max(0) as usize)
                .take(window.limit.max(0) as usize)
                .cloned()
                .collect(),
            None => matching.cloned().collect(),
        };

        Ok(products)
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<i64, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().filter(|row| filter.matches(row)).count() as i64)
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .find(|row| row.external_id == external_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::DeletedFilter;

    fn upsert(external_id: &str, name: &str) -> UpsertProductRequest {
        UpsertProductRequest {
            external_id: external_id.into(),
            sku: None,
            name: Some(name.into()),
            brand: None,
            model: None,
            category: None,
            color: None,
            price: Some(10.0),
            currency: None,
            stock: Some(1),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn upsert_creates_then_updates_in_place() {
        let store = MemoryProductStore::new();

        assert_eq!(
            store.upsert_product(&upsert("a", "first")).await.unwrap(),
            UpsertOutcome::Created
        );
        assert_eq!(
            store.upsert_product(&upsert("a", "second")).await.unwrap(),
            UpsertOutcome::Updated
        );

        let all = store
            .find_products(&ProductFilter::default(), None)
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn deleted_rows_are_never_overwritten() {
        let store = MemoryProductStore::new();
        store.upsert_product(&upsert("a", "first")).await.unwrap();
        assert!(store.soft_delete_product("a").await.unwrap());
        assert!(!store.soft_delete_product("a").await.unwrap());

        assert_eq!(
            store.upsert_product(&upsert("a", "second")).await.unwrap(),
            UpsertOutcome::SkippedDeleted
        );

        let row = store.find_by_external_id("a").await.unwrap().unwrap();
        assert!(row.deleted);
        assert_eq!(row.name.as_deref(), Some("first"));

        let include = ProductFilter::default().with_deleted(DeletedFilter::IncludeDeleted);
        assert_eq!(store.count_products(&include).await.unwrap(), 1);
        assert_eq!(
            store.count_products(&ProductFilter::default()).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn window_follows_insertion_order() {
        let store = MemoryProductStore::new();
        for id in ["a", "b", "c", "d"] {
            store.upsert_product(&upsert(id, id)).await.unwrap();
        }

        let page = store
            .find_products(
                &ProductFilter::default(),
                Some(PageWindow { skip: 1, limit: 2 }),
            )
            .await
            .unwrap();

        let ids: Vec<_> = page.iter().map(|p| p.external_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
