//! API clients for market data and news providers

pub mod news_api;
pub mod yahoo;

pub use news_api::{NewsApiClient, NewsArticle, NewsQuery, NewsResponse, NewsSource};
pub use yahoo::{MarketDataSource, PricePoint, YahooFinanceClient};
