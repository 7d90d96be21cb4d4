use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ExistingProductsRequest {
    /// `true` or `false`; any other value is ignored.
    pub with_price: Option<String>,

    /// ISO date or timestamp, inclusive lower bound on `createdAt`.
    pub start_date: Option<String>,

    /// ISO date or timestamp, inclusive upper bound on `createdAt`.
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StockSummaryRequest {
    #[validate(range(min = 0, message = "minStock cannot be negative"))]
    pub min_stock: Option<i64>,

    #[validate(range(min = 0, message = "maxStock cannot be negative"))]
    pub max_stock: Option<i64>,

    pub category: Option<String>,
}
