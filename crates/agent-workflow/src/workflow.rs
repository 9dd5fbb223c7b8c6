//! Workflow definition and execution

use crate::error::{Result, WorkflowError};
use crate::node::Node;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Builder for a state graph
///
/// Nodes are registered by name, wired with at most one outgoing edge each,
/// and given an entry point. Construction problems are reported by
/// [`StateGraph::compile`], so the builder methods can be chained freely.
pub struct StateGraph<S: Send + 'static> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: HashMap<String, String>,
    entry: Option<String>,
    problem: Option<WorkflowError>,
}

impl<S: Send + 'static> StateGraph<S> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            entry: None,
            problem: None,
        }
    }

    /// Add a named node
    pub fn add_node(mut self, name: impl Into<String>, node: impl Node<S> + 'static) -> Self {
        let name = name.into();
        if self.nodes.contains_key(&name) {
            self.record_problem(WorkflowError::DuplicateNode(name));
        } else {
            self.nodes.insert(name, Arc::new(node));
        }
        self
    }

    /// Route the output of `from` into `to`
    pub fn add_edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        if self.edges.contains_key(&from) {
            self.record_problem(WorkflowError::DuplicateEdge(from));
        } else {
            self.edges.insert(from, to.into());
        }
        self
    }

    /// Keep the first construction problem; it is reported on compile
    fn record_problem(&mut self, problem: WorkflowError) {
        if self.problem.is_none() {
            self.problem = Some(problem);
        }
    }

    /// Set the node that receives the initial state
    pub fn set_entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry = Some(name.into());
        self
    }

    /// Validate the graph and produce an executable workflow
    pub fn compile(self) -> Result<Workflow<S>> {
        if let Some(problem) = self.problem {
            return Err(problem);
        }

        let entry = self.entry.ok_or(WorkflowError::MissingEntryPoint)?;
        if !self.nodes.contains_key(&entry) {
            return Err(WorkflowError::UnknownNode(entry));
        }

        for (from, to) in &self.edges {
            for name in [from, to] {
                if !self.nodes.contains_key(name) {
                    return Err(WorkflowError::UnknownNode(name.clone()));
                }
            }
        }

        let mut seen = HashSet::new();
        let mut current = Some(&entry);
        while let Some(name) = current {
            if !seen.insert(name) {
                return Err(WorkflowError::Cycle(name.clone()));
            }
            current = self.edges.get(name);
        }

        Ok(Workflow {
            nodes: self.nodes,
            edges: self.edges,
            entry,
        })
    }
}

impl<S: Send + 'static> Default for StateGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A compiled, validated workflow
pub struct Workflow<S: Send + 'static> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: HashMap<String, String>,
    entry: String,
}

impl<S: Send + 'static> Workflow<S> {
    /// Run the workflow from the entry point to its terminal node
    pub async fn invoke(&self, state: S) -> Result<S> {
        let mut state = state;
        let mut current = self.entry.as_str();

        loop {
            let node = self
                .nodes
                .get(current)
                .ok_or_else(|| WorkflowError::UnknownNode(current.to_string()))?;

            debug!("Running workflow node {}", current);
            state = node
                .run(state)
                .await
                .map_err(|source| WorkflowError::NodeFailed {
                    node: current.to_string(),
                    source,
                })?;

            match self.edges.get(current) {
                Some(next) => current = next.as_str(),
                None => return Ok(state),
            }
        }
    }

    /// Name of the entry node
    pub fn entry_point(&self) -> &str {
        &self.entry
    }

    /// Number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::node::node_fn;

    fn push(tag: &'static str) -> impl Node<Vec<&'static str>> {
        node_fn(move |mut trail: Vec<&'static str>| async move {
            trail.push(tag);
            Ok::<_, BoxError>(trail)
        })
    }

    #[tokio::test]
    async fn test_single_node_is_entry_and_terminal() {
        let workflow = StateGraph::new()
            .add_node("agent", push("agent"))
            .set_entry_point("agent")
            .compile()
            .unwrap();

        assert_eq!(workflow.entry_point(), "agent");
        assert_eq!(workflow.node_count(), 1);
        assert_eq!(workflow.invoke(Vec::new()).await.unwrap(), vec!["agent"]);
    }

    #[tokio::test]
    async fn test_edges_are_followed_in_order() {
        let workflow = StateGraph::new()
            .add_node("a", push("a"))
            .add_node("b", push("b"))
            .add_node("c", push("c"))
            .add_edge("a", "b")
            .add_edge("b", "c")
            .set_entry_point("a")
            .compile()
            .unwrap();

        assert_eq!(workflow.invoke(Vec::new()).await.unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_node_failure_stops_execution() {
        let workflow = StateGraph::new()
            .add_node(
                "fail",
                node_fn(|_: Vec<&'static str>| async { Err::<Vec<&'static str>, BoxError>("boom".into()) }),
            )
            .add_node("after", push("after"))
            .add_edge("fail", "after")
            .set_entry_point("fail")
            .compile()
            .unwrap();

        let err = workflow.invoke(Vec::new()).await.unwrap_err();
        match err {
            WorkflowError::NodeFailed { node, source } => {
                assert_eq!(node, "fail");
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("Expected NodeFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_requires_entry_point() {
        let result = StateGraph::new().add_node("agent", push("agent")).compile();
        assert!(matches!(result, Err(WorkflowError::MissingEntryPoint)));
    }

    #[test]
    fn test_compile_rejects_unknown_entry_point() {
        let result = StateGraph::<Vec<&'static str>>::new()
            .set_entry_point("missing")
            .compile();
        assert!(matches!(result, Err(WorkflowError::UnknownNode(name)) if name == "missing"));
    }

    #[test]
    fn test_compile_rejects_unknown_edge_target() {
        let result = StateGraph::new()
            .add_node("agent", push("agent"))
            .add_edge("agent", "nowhere")
            .set_entry_point("agent")
            .compile();
        assert!(matches!(result, Err(WorkflowError::UnknownNode(name)) if name == "nowhere"));
    }

    #[test]
    fn test_compile_rejects_duplicates() {
        let result = StateGraph::new()
            .add_node("agent", push("agent"))
            .add_node("agent", push("again"))
            .set_entry_point("agent")
            .compile();
        assert!(matches!(result, Err(WorkflowError::DuplicateNode(_))));

        let result = StateGraph::new()
            .add_node("a", push("a"))
            .add_node("b", push("b"))
            .add_edge("a", "b")
            .add_edge("a", "a")
            .set_entry_point("a")
            .compile();
        assert!(matches!(result, Err(WorkflowError::DuplicateEdge(_))));
    }

    #[test]
    fn test_compile_rejects_cycles() {
        let result = StateGraph::new()
            .add_node("a", push("a"))
            .add_node("b", push("b"))
            .add_edge("a", "b")
            .add_edge("b", "a")
            .set_entry_point("a")
            .compile();
        assert!(matches!(result, Err(WorkflowError::Cycle(_))));
    }
}
