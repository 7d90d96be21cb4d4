use crate::domain::source::ExternalRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::IntoParams;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListProductsRequest {
    /// 1-based page number; missing, non-numeric or < 1 means 1.
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<i64>,

    /// Case-insensitive substring match on the product name.
    pub name: Option<String>,

    pub category: Option<String>,

    #[validate(range(min = 0.0, message = "minPrice cannot be negative"))]
    pub min_price: Option<f64>,

    #[validate(range(min = 0.0, message = "maxPrice cannot be negative"))]
    pub max_price: Option<f64>,
}

fn lenient_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|page| page.trim().parse().ok()))
}

/// Full field set written by a sync pass for one external entry.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertProductRequest {
    pub external_id: String,
    pub sku: Option<i64>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub stock: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&ExternalRecord> for UpsertProductRequest {
    fn from(record: &ExternalRecord) -> Self {
        let fields = record.fields.clone();

        Self {
            external_id: record.external_id().to_string(),
            sku: fields.sku,
            name: fields.name,
            brand: fields.brand,
            model: fields.model,
            category: fields.category,
            color: fields.color,
            price: fields.price,
            currency: fields.currency,
            stock: fields.stock,
            created_at: record.sys.created_at,
            updated_at: record.sys.updated_at,
        }
    }
}
