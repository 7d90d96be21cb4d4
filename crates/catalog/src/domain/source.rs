use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

pub const PRODUCT_CONTENT_TYPE: &str = "product";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    pub content_type: String,
    pub skip: i64,
    pub limit: i64,
}

impl SourceQuery {
    pub fn products(skip: i64, limit: i64) -> Self {
        Self {
            content_type: PRODUCT_CONTENT_TYPE.to_string(),
            skip,
            limit,
        }
    }
}

/// One page of entries plus the source's total at the time of the call.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourcePage {
    #[serde(default, deserialize_with = "decode_items")]
    pub items: Vec<ExternalRecord>,
    #[serde(default)]
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSys {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProductFields {
    #[serde(default, deserialize_with = "whole_number")]
    pub sku: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "whole_number")]
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExternalRecord {
    #[serde(default)]
    pub sys: ExternalSys,
    #[serde(default)]
    pub fields: ProductFields,
}

impl ExternalRecord {
    pub fn external_id(&self) -> &str {
        self.sys.id.trim()
    }
}

/// Decodes entries one by one. An entry that does not fit the product shape
/// becomes a blank record, which the reconciler rejects, so the rest of the
/// page still syncs.
fn decode_items<'de, D>(deserializer: D) -> Result<Vec<ExternalRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;

    Ok(raw
        .into_iter()
        .map(|value| {
            let id = value
                .pointer("/sys/id")
                .and_then(Value::as_str)
                .unwrap_or("<unknown>")
                .to_string();

            serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("⚠️ Malformed source entry {id}: {e}");
                ExternalRecord::default()
            })
        })
        .collect())
}

/// Contentful `Number` fields are decimals; integer columns take the rounded value.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;

    Ok(number.and_then(|n| {
        n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite())
                .map(|v| v.round() as i64)
        })
    }))
}
