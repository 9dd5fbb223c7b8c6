//! Workflow state and task selection

use serde::{Deserialize, Serialize};

/// Record threaded through a workflow run
///
/// The symbol is fixed when the run starts. The result is empty on entry and
/// set by the node that handles the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    symbol: String,
    result: Option<String>,
}

impl WorkflowState {
    /// Initial state for `symbol`
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            result: None,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Same symbol, with the result filled in
    pub fn with_result(self, result: impl Into<String>) -> Self {
        Self {
            symbol: self.symbol,
            result: Some(result.into()),
        }
    }

    pub fn into_result(self) -> Option<String> {
        self.result
    }
}

/// Which pipeline a run dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskSelector {
    /// Price history chart (`1`)
    MarketData,
    /// Date-grouped news report (`2`)
    News,
    /// Anything else
    Invalid,
}

impl TaskSelector {
    /// Map raw menu input to a task; unrecognised input is `Invalid`
    pub fn from_input(raw: &str) -> Self {
        match raw.trim() {
            "1" => Self::MarketData,
            "2" => Self::News,
            _ => Self::Invalid,
        }
    }
}

/// Task-specific parameters supplied by the caller
///
/// Values are kept raw; each pipeline interprets the one it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParams {
    /// Period token for the market data task, e.g. `7d`
    pub period: Option<String>,
    /// Number of past days for the news task, as typed
    pub past_days: Option<String>,
}

impl TaskParams {
    pub fn market_data(period: impl Into<String>) -> Self {
        Self {
            period: Some(period.into()),
            past_days: None,
        }
    }

    pub fn news(past_days: impl Into<String>) -> Self {
        Self {
            period: None,
            past_days: Some(past_days.into()),
        }
    }
}
