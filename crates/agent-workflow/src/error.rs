//! Error types for agent-workflow

use thiserror::Error;

/// Boxed error returned by node implementations
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for agent-workflow
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Error type for graph construction and execution
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// No entry point was set before compiling
    #[error("Workflow has no entry point")]
    MissingEntryPoint,

    /// A node name was referenced but never added
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// The same node name was added twice
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    /// A node was given more than one outgoing edge
    #[error("Node {0} already has an outgoing edge")]
    DuplicateEdge(String),

    /// Following edges from the entry point revisits a node
    #[error("Workflow contains a cycle through node {0}")]
    Cycle(String),

    /// A node returned an error while running
    #[error("Node {node} failed: {source}")]
    NodeFailed {
        node: String,
        #[source]
        source: BoxError,
    },
}
