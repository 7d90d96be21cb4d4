#![allow(dead_code)]

use async_trait::async_trait;
use catalog::{
    abstract_trait::source::SourceClientTrait,
    domain::source::{ExternalRecord, ExternalSys, ProductFields, SourcePage, SourceQuery},
    model::product::Product,
};
use chrono::{DateTime, TimeZone, Utc};
use shared::errors::SourceError;
use std::{collections::VecDeque, sync::Arc};
use tokio::sync::{Mutex, Notify};

pub fn record(id: &str, name: &str, stock: Option<i64>) -> ExternalRecord {
    ExternalRecord {
        sys: ExternalSys {
            id: id.to_string(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            updated_at: Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()),
        },
        fields: ProductFields {
            name: Some(name.to_string()),
            category: Some("Electronics".to_string()),
            price: Some(99.0),
            stock,
            ..Default::default()
        },
    }
}

pub fn page(items: Vec<ExternalRecord>, total: i64) -> SourcePage {
    SourcePage { items, total }
}

pub fn product(external_id: &str) -> Product {
    Product {
        id: 0,
        external_id: external_id.to_string(),
        sku: None,
        name: Some(external_id.to_string()),
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
    }
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Serves queued responses in order, then `fallback` forever. Records every query.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<SourcePage, SourceError>>>,
    fallback: SourcePage,
    pub queries: Mutex<Vec<SourceQuery>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<SourcePage, SourceError>>) -> Arc<Self> {
        Self::with_fallback(responses, SourcePage::default())
    }

    pub fn with_fallback(
        responses: Vec<Result<SourcePage, SourceError>>,
        fallback: SourcePage,
    ) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            fallback,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub async fn skips(&self) -> Vec<(i64, i64)> {
        self.queries
            .lock()
            .await
            .iter()
            .map(|q| (q.skip, q.limit))
            .collect()
    }
}

#[async_trait]
impl SourceClientTrait for ScriptedSource {
    async fn fetch_page(&self, query: &SourceQuery) -> Result<SourcePage, SourceError> {
        self.queries.lock().await.push(query.clone());
        match self.responses.lock().await.pop_front() {
            Some(response) => response,
            None => Ok(self.fallback.clone()),
        }
    }
}

/// Blocks every fetch until `release` is notified; `entered` fires when a fetch starts.
pub struct GatedSource {
    pub entered: Notify,
    pub release: Notify,
    pub calls: Mutex<u32>,
}

impl GatedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
            calls: Mutex::new(0),
        })
    }
}

#[async_trait]
impl SourceClientTrait for GatedSource {
    async fn fetch_page(&self, _query: &SourceQuery) -> Result<SourcePage, SourceError> {
        *self.calls.lock().await += 1;
        self.entered.notify_one();
        self.release.notified().await;
        Ok(SourcePage::default())
    }
}
