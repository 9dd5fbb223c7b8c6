//! Price history to annotated chart artifact

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::api::{MarketDataSource, YahooFinanceClient};
use crate::chart::{ChartRenderer, PlottersRenderer, PriceChart};
use crate::config::AssistantConfig;
use crate::error::Result;
use crate::window::Period;

/// Fetches price history and writes it as a chart image
pub struct MarketDataPipeline {
    source: Arc<dyn MarketDataSource>,
    renderer: Arc<dyn ChartRenderer>,
    output_dir: PathBuf,
}

impl MarketDataPipeline {
    /// Create a pipeline from its collaborators
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        renderer: Arc<dyn ChartRenderer>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            renderer,
            output_dir: output_dir.into(),
        }
    }

    /// Yahoo Finance data rendered with plotters, as configured
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(
            Arc::new(YahooFinanceClient::new()),
            Arc::new(PlottersRenderer::new(
                config.chart_font_path.clone(),
                config.chart_width,
                config.chart_height,
            )),
            config.output_dir.clone(),
        )
    }

    /// File name of the chart written for `symbol`
    ///
    /// The name carries no timestamp, so a later run for the same symbol
    /// overwrites the earlier chart.
    pub fn artifact_name(symbol: &str) -> String {
        format!("{symbol}_stock.png")
    }

    /// Fetch closing prices for `symbol` over `period` and chart them
    ///
    /// Returns a status message. An empty history is reported in the message
    /// and no file is written.
    pub async fn render_chart(&self, symbol: &str, period: &Period) -> Result<String> {
        let points = self.source.price_history(symbol, period).await?;

        if points.is_empty() {
            info!("No price history for {} over {}", symbol, period);
            return Ok(format!("No data found for symbol: {symbol}"));
        }

        let filename = Self::artifact_name(symbol);
        let path = self.output_dir.join(&filename);
        let chart = PriceChart::new(symbol, period, points);

        self.renderer.render(&chart, &path)?;
        info!(
            "Wrote {} point chart for {} to {}",
            chart.points.len(),
            symbol,
            path.display()
        );

        Ok(format!(
            "Stock data visualization for last {period} days saved as {filename}"
        ))
    }
}
