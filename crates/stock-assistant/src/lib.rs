//! Single-symbol financial assistant
//!
//! Given a ticker symbol, the assistant either charts its recent closing
//! prices or compiles a date-grouped report of recent news about it.
//!
//! - [`window`]: turns durations into period tokens and date ranges
//! - [`pipelines::MarketDataPipeline`]: price history to `{symbol}_stock.png`
//! - [`pipelines::NewsPipeline`]: news search to a text report, newest date first
//! - [`router::TaskRouter`]: picks exactly one pipeline per run
//! - [`router::FinancialAssistant`]: runs the router as a one-node workflow
//!
//! # Example
//!
//! ```rust,no_run
//! use stock_assistant::{AssistantConfig, FinancialAssistant, TaskParams, TaskSelector};
//!
//! # async fn example() -> stock_assistant::Result<()> {
//! let config = AssistantConfig::from_env()?;
//! let assistant = FinancialAssistant::from_config(&config, TaskSelector::News)?;
//!
//! let state = assistant
//!     .run("AAPL", TaskSelector::News, TaskParams::news("7"))
//!     .await?;
//! println!("{}", state.result().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod pipelines;
pub mod router;
pub mod state;
pub mod window;

pub use config::AssistantConfig;
pub use error::{Result, StockError};
pub use pipelines::{MarketDataPipeline, NewsPipeline};
pub use router::{FinancialAssistant, INVALID_CHOICE, TaskRouter};
pub use state::{TaskParams, TaskSelector, WorkflowState};
pub use window::{DateRange, Period, TimeWindowResolver};
