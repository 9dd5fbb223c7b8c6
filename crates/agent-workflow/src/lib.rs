//! State-graph workflow execution
//!
//! A workflow is a set of named nodes, each of which receives the current
//! state record and returns the next one. Execution starts at the entry point
//! and follows edges until it reaches a node with no outgoing edge.
//!
//! # Example
//!
//! ```
//! use agent_workflow::{BoxError, StateGraph, node_fn};
//!
//! # tokio_test::block_on(async {
//! let workflow = StateGraph::new()
//!     .add_node("double", node_fn(|n: u32| async move { Ok::<_, BoxError>(n * 2) }))
//!     .set_entry_point("double")
//!     .compile()
//!     .unwrap();
//!
//! assert_eq!(workflow.invoke(21).await.unwrap(), 42);
//! # });
//! ```

pub mod error;
pub mod node;
pub mod workflow;

pub use error::{BoxError, Result, WorkflowError};
pub use node::{FnNode, Node, node_fn};
pub use workflow::{StateGraph, Workflow};
