//! News search API client

use crate::config::AssistantConfig;
use crate::error::{Result, StockError};
use crate::window::DateRange;
use async_trait::async_trait;
use reqwest::{Client, Request};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Article ordering requested from the search endpoint
const SORT_BY_PUBLISHED_AT: &str = "publishedAt";

/// Search for articles mentioning a symbol within a date range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub symbol: String,
    pub range: DateRange,
}

impl NewsQuery {
    pub fn new(symbol: impl Into<String>, range: DateRange) -> Self {
        Self {
            symbol: symbol.into(),
            range,
        }
    }

    /// Query string parameters, excluding the credential
    pub fn params(&self) -> [(&'static str, String); 4] {
        [
            ("q", self.symbol.clone()),
            ("from", self.range.start.to_string()),
            ("to", self.range.end.to_string()),
            ("sortBy", SORT_BY_PUBLISHED_AT.to_string()),
        ]
    }
}

/// News article as returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    /// ISO-8601 publish timestamp, e.g. `2024-05-02T10:00:00Z`
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

impl NewsArticle {
    pub fn new(title: impl Into<String>, published_at: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            published_at: published_at.into(),
        }
    }

    /// Calendar date portion of the publish timestamp (`YYYY-MM-DD`)
    pub fn publish_date(&self) -> &str {
        self.published_at
            .get(..10)
            .unwrap_or(self.published_at.as_str())
    }
}

/// Search response body
///
/// A missing or null `articles` field means no results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub articles: Option<Vec<NewsArticle>>,
}

impl NewsResponse {
    pub fn with_articles(articles: Vec<NewsArticle>) -> Self {
        Self {
            articles: Some(articles),
        }
    }

    /// Articles in the order the service returned them
    pub fn into_articles(self) -> Vec<NewsArticle> {
        self.articles.unwrap_or_default()
    }
}

/// Source of news articles
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Run a search; transport and authentication failures are errors
    async fn search(&self, query: &NewsQuery) -> Result<NewsResponse>;
}

/// Client for the `everything` search endpoint of a NewsAPI-compatible service
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `api_key` - NewsAPI key
    /// * `base_url` - Service root, e.g. `https://newsapi.org/v2`
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from configuration; fails when no API key is configured
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        let api_key = config.require_news_api_key()?;
        Ok(Self::new(api_key, config.news_api_base_url.clone()))
    }

    /// Build the HTTP request for a search without sending it
    pub fn build_request(&self, query: &NewsQuery) -> Result<Request> {
        let url = format!("{}/everything", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&query.params())
            .query(&[("apiKey", self.api_key.as_str())])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn search(&self, query: &NewsQuery) -> Result<NewsResponse> {
        let request = self.build_request(query)?;
        debug!(
            "Searching news for {} from {} to {}",
            query.symbol, query.range.start, query.range.end
        );

        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StockError::ApiError(format!(
                "News API error {status}: {body}"
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
