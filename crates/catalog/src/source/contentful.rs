use crate::{
    abstract_trait::source::SourceClientTrait,
    config::myconfig::ContentfulConfig,
    domain::source::{SourcePage, SourceQuery},
};
use async_trait::async_trait;
use reqwest::Client;
use shared::errors::SourceError;
use std::time::Duration;
use tracing::{error, info};

/// Content Delivery API client scoped to one space and environment.
#[derive(Clone)]
pub struct ContentfulClient {
    http: Client,
    base_url: String,
    space_id: String,
    environment: String,
    access_token: String,
}

impl ContentfulClient {
    pub fn new(config: &ContentfulConfig) -> Result<Self, SourceError> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            space_id: config.space_id.clone(),
            environment: config.environment.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn entries_url(&self) -> String {
        format!(
            "{}/spaces/{}/environments/{}/entries",
            self.base_url, self.space_id, self.environment
        )
    }
}

#[async_trait]
impl SourceClientTrait for ContentfulClient {
    async fn fetch_page(&self, query: &SourceQuery) -> Result<SourcePage, SourceError> {
        info!(
            "📥 Fetching {} entries | skip: {}, limit: {}",
            query.content_type, query.skip, query.limit
        );

        let response = self
            .http
            .get(self.entries_url())
            .bearer_auth(&self.access_token)
            .query(&[
                ("content_type", query.content_type.clone()),
                ("skip", query.skip.to_string()),
                ("limit", query.limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("❌ Contentful request failed: {e}");
                SourceError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("❌ Contentful responded with {status}");
            return Err(SourceError::Unavailable(format!("{status}: {body}")));
        }

        serde_json::from_str::<SourcePage>(&body).map_err(|e| {
            error!("❌ Failed to decode Contentful page: {e}");
            SourceError::Decode(e.to_string())
        })
    }
}
