//! HTTP client for the dashboard backend using wreq.

use super::error::{ApiError, ApiResult};
use super::models::{BestsellerCatalog, ErrorBody, Item, ItemsResponse, ParserStatus, TriggerResponse};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

/// Server-side filters for `GET /items`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemsQuery {
    pub min_rating: Option<f32>,
    pub max_price: Option<f64>,
}

impl ItemsQuery {
    /// Renders the query string, including the leading `?` when non-empty.
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(rating) = self.min_rating {
            params.push(format!("min_rating={}", urlencoding::encode(&rating.to_string())));
        }
        if let Some(price) = self.max_price {
            params.push(format!("max_price={}", urlencoding::encode(&price.to_string())));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Trait for the dashboard backend - enables mocking for tests.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetches catalog items filtered server-side.
    async fn items(&self, query: &ItemsQuery) -> ApiResult<Vec<Item>>;

    /// Fetches the full bestseller snapshot.
    async fn bestsellers(&self) -> ApiResult<BestsellerCatalog>;

    /// Fetches the scraper status.
    async fn parser_status(&self) -> ApiResult<ParserStatus>;

    /// Asks the backend to re-run the bestseller scraper.
    async fn trigger_parser(&self) -> ApiResult<TriggerResponse>;
}

/// Dashboard backend HTTP client.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new client for the configured backend.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, config.base_url.clone())
    }

    /// Creates a new client against a custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> ApiResult<T> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Request { url: url.clone(), source })?;

        Self::read_json(url, response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, url: String) -> ApiResult<T> {
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Request { url: url.clone(), source })?;

        Self::read_json(url, response).await
    }

    async fn read_json<T: DeserializeOwned>(url: String, response: wreq::Response) -> ApiResult<T> {
        let status = response.status();
        debug!("Response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Request { url: url.clone(), source })?;

        if !status.is_success() {
            // Best effort: FastAPI errors carry {"detail": "..."}
            let detail = serde_json::from_str::<ErrorBody>(&body).ok().and_then(|b| b.detail);
            warn!("{} returned {}", url, status);
            return Err(ApiError::Status { status: status.as_u16(), detail });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn items(&self, query: &ItemsQuery) -> ApiResult<Vec<Item>> {
        let url = self.url(&format!("/items{}", query.to_query_string()));

        let response: ItemsResponse = self.get_json(url).await?;
        debug!("Fetched {} catalog items", response.items.len());
        Ok(response.items)
    }

    async fn bestsellers(&self) -> ApiResult<BestsellerCatalog> {
        let catalog: BestsellerCatalog = self.get_json(self.url("/api/bestsellers")).await?;
        debug!("Fetched {} bestseller categories", catalog.len());
        Ok(catalog)
    }

    async fn parser_status(&self) -> ApiResult<ParserStatus> {
        self.get_json(self.url("/api/parser-status")).await
    }

    async fn trigger_parser(&self) -> ApiResult<TriggerResponse> {
        info!("Triggering bestseller scraper");
        self.post_json(self.url("/api/trigger-parser")).await
    }
}
