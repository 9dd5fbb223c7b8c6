//! Error types for stock assistant operations

use thiserror::Error;

/// Stock assistant specific errors
///
/// Empty data sets and invalid task choices are not errors: they are reported
/// to the user as ordinary result strings. Everything here ends the run.
#[derive(Debug, Error)]
pub enum StockError {
    /// User input could not be parsed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A task was selected without the parameter it needs
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    /// API request returned an unsuccessful status
    #[error("API error: {0}")]
    ApiError(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Chart could not be drawn or encoded
    #[error("Chart error: {0}")]
    ChartError(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Workflow graph error
    #[error("Workflow error: {0}")]
    Workflow(agent_workflow::WorkflowError),
}

/// Result type alias for stock assistant operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Convert a workflow error back into the error a node failed with
///
/// Node failures that originated here are unwrapped so the caller sees the
/// same error the pipeline raised.
impl From<agent_workflow::WorkflowError> for StockError {
    fn from(err: agent_workflow::WorkflowError) -> Self {
        match err {
            agent_workflow::WorkflowError::NodeFailed { node, source } => {
                match source.downcast::<StockError>() {
                    Ok(stock_err) => *stock_err,
                    Err(source) => {
                        StockError::Workflow(agent_workflow::WorkflowError::NodeFailed {
                            node,
                            source,
                        })
                    }
                }
            }
            other => StockError::Workflow(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_workflow::WorkflowError;

    #[test]
    fn test_error_display() {
        let err = StockError::InvalidInput("day count 'abc' is not an integer".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid input: day count 'abc' is not an integer"
        );

        let err = StockError::MissingParameter("period");
        assert_eq!(err.to_string(), "Missing parameter: period");
    }

    #[test]
    fn test_node_failure_unwraps_to_original() {
        let err = WorkflowError::NodeFailed {
            node: "agent".to_string(),
            source: Box::new(StockError::ApiError("401 Unauthorized".to_string())),
        };

        match StockError::from(err) {
            StockError::ApiError(msg) => assert_eq!(msg, "401 Unauthorized"),
            other => panic!("Expected ApiError, got {other:?}"),
        }
    }

    #[test]
    fn test_foreign_node_failure_keeps_node_name() {
        let err = WorkflowError::NodeFailed {
            node: "agent".to_string(),
            source: "boom".into(),
        };

        match StockError::from(err) {
            StockError::Workflow(WorkflowError::NodeFailed { node, .. }) => {
                assert_eq!(node, "agent");
            }
            other => panic!("Expected wrapped NodeFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_graph_errors_are_wrapped() {
        let err = StockError::from(WorkflowError::MissingEntryPoint);
        assert!(matches!(
            err,
            StockError::Workflow(WorkflowError::MissingEntryPoint)
        ));
    }
}
