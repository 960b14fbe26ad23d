use crate::service::config::GatewayConfig;
use crate::upstream::{feed, object};
use async_trait::async_trait;
use neocore::catalog::{NeoSummary, ObjectDetail};
use neocore::prelude::{CatalogError, CatalogResult, FeedWindow, ObjectSource};
use neocore::telemetry::LogManager;
use serde_json::Value;

/// HTTP client for the NASA NeoWs REST API.
pub struct NeoWsClient {
    http: reqwest::Client,
    base: String,
    api_key: String,
    logger: LogManager,
}

impl NeoWsClient {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: config.upstream_base.trim_end_matches('/').to_string(),
            api_key: config.resolved_api_key(),
            logger: LogManager::new(),
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)], resource: &str) -> CatalogResult<Value> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|err| CatalogError::Upstream(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(resource.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Upstream(format!(
                "{resource} returned {status}"
            )));
        }
        response
            .json::<Value>()
            .await
            .map_err(|err| CatalogError::MalformedPayload(err.to_string()))
    }
}

#[async_trait]
impl ObjectSource for NeoWsClient {
    async fn feed(&self, window: &FeedWindow) -> CatalogResult<Vec<NeoSummary>> {
        let url = format!("{}/feed", self.base);
        let raw = self
            .get_json(
                &url,
                &[
                    ("start_date", window.start_str()),
                    ("end_date", window.end_str()),
                    ("api_key", self.api_key.clone()),
                ],
                "feed",
            )
            .await?;
        let rows = feed::simplify_feed(&raw)?;
        self.logger
            .record(&format!("feed {}..{}: {} objects", window.start_str(), window.end_str(), rows.len()));
        Ok(rows)
    }

    async fn lookup(&self, identifier: &str) -> CatalogResult<ObjectDetail> {
        let url = format!("{}/neo/{}", self.base, identifier);
        let raw = self
            .get_json(&url, &[("api_key", self.api_key.clone())], identifier)
            .await?;
        let detail = object::structure_object(&raw)?;
        self.logger.record(&format!(
            "lookup {}: {} approaches, {} orbital solutions",
            identifier,
            detail.sorted_approaches.len(),
            detail.orbital_data.len()
        ));
        Ok(detail)
    }
}
