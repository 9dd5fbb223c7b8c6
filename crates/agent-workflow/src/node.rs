//! Node trait definition

use crate::error::BoxError;
use async_trait::async_trait;
use std::future::Future;

/// A single step of a workflow
///
/// A node owns no state of its own between runs. It receives the state record
/// by value and returns the record the next node (or the caller) will see.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Send + 'static,
{
    /// Transform the state
    async fn run(&self, state: S) -> Result<S, BoxError>;
}

/// Node backed by an async closure
pub struct FnNode<F> {
    f: F,
}

/// Wrap an async closure as a [`Node`]
pub fn node_fn<F>(f: F) -> FnNode<F> {
    FnNode { f }
}

#[async_trait]
impl<S, F, Fut> Node<S> for FnNode<F>
where
    S: Send + 'static,
    F: Fn(S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<S, BoxError>> + Send + 'static,
{
    async fn run(&self, state: S) -> Result<S, BoxError> {
        (self.f)(state).await
    }
}
