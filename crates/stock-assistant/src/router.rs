//! Task routing and the single-node assistant workflow
//!
//! The router is the only decision point: it reads the symbol from the
//! workflow state, runs exactly one pipeline (or none, for an invalid
//! choice) and returns the state with its result filled in.

use std::sync::Arc;

use agent_workflow::{BoxError, Node, StateGraph, Workflow};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::AssistantConfig;
use crate::error::{Result, StockError};
use crate::pipelines::{MarketDataPipeline, NewsPipeline};
use crate::state::{TaskParams, TaskSelector, WorkflowState};
use crate::window::{TimeWindowResolver, parse_day_count};

/// Result for a task selection outside the menu
pub const INVALID_CHOICE: &str = "Invalid choice. Please select 1 or 2.";

/// Name of the router node in the assistant workflow
pub const AGENT_NODE: &str = "agent";

/// Dispatches a run to the market data or news pipeline
pub struct TaskRouter {
    market: MarketDataPipeline,
    news: Option<NewsPipeline>,
    resolver: TimeWindowResolver,
}

impl TaskRouter {
    /// Router with only the market data pipeline
    pub fn new(market: MarketDataPipeline) -> Self {
        Self {
            market,
            news: None,
            resolver: TimeWindowResolver::new(),
        }
    }

    /// Attach the news pipeline
    pub fn with_news(mut self, news: NewsPipeline) -> Self {
        self.news = Some(news);
        self
    }

    /// Build the pipelines a run of `selector` needs
    ///
    /// The news pipeline is only constructed for the news task, so a missing
    /// API key fails a news run up front and never affects chart runs.
    pub fn from_config(config: &AssistantConfig, selector: TaskSelector) -> Result<Self> {
        let router = Self::new(MarketDataPipeline::from_config(config));
        match selector {
            TaskSelector::News => Ok(router.with_news(NewsPipeline::from_config(config)?)),
            TaskSelector::MarketData | TaskSelector::Invalid => Ok(router),
        }
    }

    /// Run the selected task for the state's symbol
    pub async fn route(
        &self,
        state: WorkflowState,
        selector: TaskSelector,
        params: &TaskParams,
    ) -> Result<WorkflowState> {
        let symbol = state.symbol();
        info!("Routing {:?} task for {}", selector, symbol);

        let result = match selector {
            TaskSelector::MarketData => {
                let raw = params
                    .period
                    .as_deref()
                    .ok_or(StockError::MissingParameter("period"))?;
                let period = self.resolver.period(raw);
                self.market.render_chart(symbol, &period).await?
            }
            TaskSelector::News => {
                let raw = params
                    .past_days
                    .as_deref()
                    .ok_or(StockError::MissingParameter("past_days"))?;
                let days = parse_day_count(raw)?;
                let news = self.news.as_ref().ok_or_else(|| {
                    StockError::ConfigError("news pipeline is not configured".to_string())
                })?;
                news.build_report(symbol, days).await?
            }
            TaskSelector::Invalid => {
                warn!("Invalid task selection for {}", symbol);
                INVALID_CHOICE.to_string()
            }
        };

        Ok(state.with_result(result))
    }
}

/// The router bound to one run's task selection, as a workflow node
pub struct RouterNode {
    router: Arc<TaskRouter>,
    selector: TaskSelector,
    params: TaskParams,
}

impl RouterNode {
    pub fn new(router: Arc<TaskRouter>, selector: TaskSelector, params: TaskParams) -> Self {
        Self {
            router,
            selector,
            params,
        }
    }
}

#[async_trait]
impl Node<WorkflowState> for RouterNode {
    async fn run(&self, state: WorkflowState) -> std::result::Result<WorkflowState, BoxError> {
        Ok(self
            .router
            .route(state, self.selector, &self.params)
            .await?)
    }
}

/// Single-symbol financial assistant
///
/// Each run compiles a one-node graph whose router node is both entry point
/// and terminal, then invokes it once with a fresh state.
pub struct FinancialAssistant {
    router: Arc<TaskRouter>,
}

impl FinancialAssistant {
    pub fn new(router: TaskRouter) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    /// Assistant wired to the configured data sources for `selector`
    pub fn from_config(config: &AssistantConfig, selector: TaskSelector) -> Result<Self> {
        Ok(Self::new(TaskRouter::from_config(config, selector)?))
    }

    /// The workflow graph for one run
    pub fn workflow(
        &self,
        selector: TaskSelector,
        params: TaskParams,
    ) -> Result<Workflow<WorkflowState>> {
        let node = RouterNode::new(Arc::clone(&self.router), selector, params);
        let workflow = StateGraph::new()
            .add_node(AGENT_NODE, node)
            .set_entry_point(AGENT_NODE)
            .compile()?;
        debug!(
            "Compiled workflow with {} node(s), entry '{}'",
            workflow.node_count(),
            workflow.entry_point()
        );
        Ok(workflow)
    }

    /// Run one task for `symbol` and return the final state
    pub async fn run(
        &self,
        symbol: impl Into<String>,
        selector: TaskSelector,
        params: TaskParams,
    ) -> Result<WorkflowState> {
        let workflow = self.workflow(selector, params)?;
        Ok(workflow.invoke(WorkflowState::new(symbol)).await?)
    }
}
