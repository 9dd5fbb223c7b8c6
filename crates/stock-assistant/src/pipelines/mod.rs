//! Data-retrieval pipelines dispatched by the task router

pub mod market_data;
pub mod news;

pub use market_data::MarketDataPipeline;
pub use news::{DateBuckets, NewsPipeline, NewsReport};
