use crate::model::product::Product as ProductModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeletedProductsReport {
    #[serde(rename = "Deleted products %")]
    pub deleted_percentage: f64,
    #[serde(rename = "Total of products")]
    pub total_products: i64,
    #[serde(rename = "Total of deleted products")]
    pub deleted_products: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExistingProductsReport {
    #[serde(rename = "Existing products %")]
    pub existing_percentage: f64,
    #[serde(rename = "Total of products")]
    pub total_products: i64,
    #[serde(rename = "Total of existing products")]
    pub existing_products: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LowStockProduct {
    pub name: Option<String>,
    pub stock: Option<i64>,
    pub external_id: String,
}

impl From<&ProductModel> for LowStockProduct {
    fn from(value: &ProductModel) -> Self {
        Self {
            name: value.name.clone(),
            stock: value.stock,
            external_id: value.external_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total_stock: i64,
    pub average_stock: f64,
    pub low_stock_products: Vec<LowStockProduct>,
}
