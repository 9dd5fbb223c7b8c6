//! Configuration for the stock assistant

use crate::error::{Result, StockError};
use agent_utils::env_var;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the news API credential
pub const NEWS_API_KEY_VAR: &str = "NEWS_API_KEY";

/// Environment variable overriding the news API base URL
pub const NEWS_API_BASE_URL_VAR: &str = "NEWS_API_BASE_URL";

/// Environment variable pointing at the TrueType font used for chart text
pub const CHART_FONT_PATH_VAR: &str = "CHART_FONT_PATH";

/// Default news search service
pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";

/// Font shipped by most Linux distributions
pub const DEFAULT_CHART_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

/// Configuration for the stock assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// News API key, required only when news is requested
    pub news_api_key: Option<String>,

    /// Base URL of the news search API
    pub news_api_base_url: String,

    /// Directory chart artifacts are written to
    pub output_dir: PathBuf,

    /// Font file used for chart captions, axis labels and annotations
    pub chart_font_path: PathBuf,

    /// Chart width in pixels
    pub chart_width: u32,

    /// Chart height in pixels
    pub chart_height: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            news_api_base_url: DEFAULT_NEWS_API_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            chart_font_path: PathBuf::from(DEFAULT_CHART_FONT_PATH),
            chart_width: 1500,
            chart_height: 800,
        }
    }
}

impl AssistantConfig {
    /// Create a new configuration builder
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }

    /// Build a configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(StockError::ConfigError(
                "chart dimensions must be greater than 0".to_string(),
            ));
        }

        if self.news_api_base_url.trim().is_empty() {
            return Err(StockError::ConfigError(
                "news API base URL must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The news API key, or a configuration error when none was supplied
    pub fn require_news_api_key(&self) -> Result<&str> {
        self.news_api_key.as_deref().ok_or_else(|| {
            StockError::ConfigError(format!(
                "{NEWS_API_KEY_VAR} is not set; a news API key is required to fetch news"
            ))
        })
    }
}

/// Builder for AssistantConfig
#[derive(Debug, Default)]
pub struct AssistantConfigBuilder {
    news_api_key: Option<String>,
    news_api_base_url: Option<String>,
    output_dir: Option<PathBuf>,
    chart_font_path: Option<PathBuf>,
    chart_width: Option<u32>,
    chart_height: Option<u32>,
}

impl AssistantConfigBuilder {
    /// Set the news API key
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// Set the news API base URL
    pub fn news_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.news_api_base_url = Some(url.into());
        self
    }

    /// Set the directory chart artifacts are written to
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the chart font file
    pub fn chart_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chart_font_path = Some(path.into());
        self
    }

    /// Set the chart size in pixels
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_width = Some(width);
        self.chart_height = Some(height);
        self
    }

    /// Fill unset values from the environment
    pub fn with_env(mut self) -> Self {
        if self.news_api_key.is_none() {
            self.news_api_key = env_var(NEWS_API_KEY_VAR);
        }
        if self.news_api_base_url.is_none() {
            self.news_api_base_url = env_var(NEWS_API_BASE_URL_VAR);
        }
        if self.chart_font_path.is_none() {
            self.chart_font_path = env_var(CHART_FONT_PATH_VAR).map(PathBuf::from);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AssistantConfig> {
        let defaults = AssistantConfig::default();

        let config = AssistantConfig {
            news_api_key: self.news_api_key,
            news_api_base_url: self
                .news_api_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.news_api_base_url),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            chart_font_path: self.chart_font_path.unwrap_or(defaults.chart_font_path),
            chart_width: self.chart_width.unwrap_or(defaults.chart_width),
            chart_height: self.chart_height.unwrap_or(defaults.chart_height),
        };

        config.validate()?;
        Ok(config)
    }
}
