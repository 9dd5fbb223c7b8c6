//! News search to date-grouped text report

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::api::{NewsApiClient, NewsArticle, NewsQuery, NewsSource};
use crate::config::AssistantConfig;
use crate::error::Result;
use crate::window::TimeWindowResolver;

/// Title lines grouped by publish date
///
/// Within a date, lines keep the order the articles arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateBuckets {
    buckets: BTreeMap<String, Vec<String>>,
}

impl DateBuckets {
    /// Place every article in the bucket for its publish date
    pub fn from_articles<'a>(articles: impl IntoIterator<Item = &'a NewsArticle>) -> Self {
        let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for article in articles {
            buckets
                .entry(article.publish_date().to_string())
                .or_default()
                .push(format!("- {}", article.title));
        }
        Self { buckets }
    }

    /// Lines for one date, if any article was published on it
    pub fn get(&self, date: &str) -> Option<&[String]> {
        self.buckets.get(date).map(Vec::as_slice)
    }

    /// Number of distinct dates
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if no article was bucketed
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of title lines across all dates
    pub fn line_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Dates with their lines, most recent first
    pub fn into_descending(self) -> Vec<(String, Vec<String>)> {
        self.buckets.into_iter().rev().collect()
    }
}

/// Date-grouped news report for one symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsReport {
    pub symbol: String,
    pub days: i64,
    /// Dates in descending order, each with its title lines
    pub entries: Vec<(String, Vec<String>)>,
}

impl NewsReport {
    pub fn new(symbol: impl Into<String>, days: i64, buckets: DateBuckets) -> Self {
        Self {
            symbol: symbol.into(),
            days,
            entries: buckets.into_descending(),
        }
    }
}

impl fmt::Display for NewsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Financial News for {} in the last {} days:",
            self.symbol, self.days
        )?;

        for (i, (date, lines)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "\n{date}:")?;
            for line in lines {
                write!(f, "\n{line}")?;
            }
        }
        Ok(())
    }
}

/// Searches recent news for a symbol and formats it by date
pub struct NewsPipeline {
    source: Arc<dyn NewsSource>,
    resolver: TimeWindowResolver,
}

impl NewsPipeline {
    /// Create a pipeline over a news source, anchored on today's local date
    pub fn new(source: Arc<dyn NewsSource>) -> Self {
        Self {
            source,
            resolver: TimeWindowResolver::new(),
        }
    }

    /// Use a specific resolver for the search window
    pub fn with_resolver(mut self, resolver: TimeWindowResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// NewsAPI-backed pipeline; fails when no API key is configured
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(NewsApiClient::from_config(config)?)))
    }

    /// Build the report for `symbol` covering the last `past_days` days
    ///
    /// An empty result set is reported in the returned string. Transport and
    /// authentication failures are returned as errors.
    pub async fn build_report(&self, symbol: &str, past_days: i64) -> Result<String> {
        let range = self.resolver.last_days(past_days)?;
        let query = NewsQuery::new(symbol, range);
        let articles = self.source.search(&query).await?.into_articles();

        if articles.is_empty() {
            info!("No news for {} in the last {} days", symbol, past_days);
            return Ok(format!(
                "No financial news found for {symbol} in the last {past_days} days."
            ));
        }

        let buckets = DateBuckets::from_articles(&articles);
        info!(
            "Grouped {} articles for {} into {} dates",
            buckets.line_count(),
            symbol,
            buckets.len()
        );

        Ok(NewsReport::new(symbol, past_days, buckets).to_string())
    }
}
