//! Annotated price chart rendering

use crate::api::PricePoint;
use crate::error::{Result, StockError};
use crate::window::Period;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// Family name the chart font is registered under
const FONT_FAMILY: &str = "sans-serif";

/// Upper bound on date labels along the x axis
const MAX_DATE_LABELS: usize = 12;

/// Everything needed to draw a close-price line chart
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<PricePoint>,
}

impl PriceChart {
    /// Close price vs. date chart for `symbol` over `period`
    pub fn new(symbol: &str, period: &Period, points: Vec<PricePoint>) -> Self {
        Self {
            title: format!("{symbol} Stock Price (Last {period} Days)"),
            x_label: "Date".to_string(),
            y_label: "Close Price".to_string(),
            points,
        }
    }

    /// Per-point labels, each close rounded to two decimal places
    pub fn annotations(&self) -> Vec<String> {
        self.points.iter().map(|p| format_close(p.close)).collect()
    }

    /// Lowest and highest close, padded so no point sits on the frame
    pub fn value_range(&self) -> (f64, f64) {
        let low = self
            .points
            .iter()
            .map(|p| p.close)
            .fold(f64::INFINITY, f64::min);
        let high = self
            .points
            .iter()
            .map(|p| p.close)
            .fold(f64::NEG_INFINITY, f64::max);

        if !low.is_finite() || !high.is_finite() {
            return (0.0, 1.0);
        }

        let pad = if high > low { (high - low) * 0.05 } else { 1.0 };
        (low - pad, high + pad)
    }
}

/// Close price label text
pub fn format_close(close: f64) -> String {
    format!("{close:.2}")
}

/// Writes a chart to an image file
#[cfg_attr(test, mockall::automock)]
pub trait ChartRenderer: Send + Sync {
    /// Render `chart` to `path`, replacing any existing file
    fn render(&self, chart: &PriceChart, path: &Path) -> Result<()>;
}

/// PNG renderer backed by plotters
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    font_path: PathBuf,
    width: u32,
    height: u32,
}

impl PlottersRenderer {
    /// Create a renderer
    ///
    /// # Arguments
    /// * `font_path` - TrueType font used for every piece of chart text
    /// * `width`, `height` - Image size in pixels
    pub fn new(font_path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            font_path: font_path.into(),
            width,
            height,
        }
    }

    /// Register the chart font with plotters
    ///
    /// Registration is process-wide. The first renderer to register a font
    /// successfully decides which file is used; a failed attempt is retried
    /// on the next render.
    fn ensure_font(&self) -> Result<()> {
        static REGISTERED: OnceLock<()> = OnceLock::new();

        register_once(&REGISTERED, || {
            let bytes = std::fs::read(&self.font_path)
                .map_err(|e| format!("cannot read font {}: {e}", self.font_path.display()))?;
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            register_font(FONT_FAMILY, FontStyle::Normal, bytes)
                .map_err(|_| format!("invalid font file {}", self.font_path.display()))
        })
    }
}

/// Run `register` unless an earlier call succeeded; only success is remembered
fn register_once(
    done: &OnceLock<()>,
    register: impl FnOnce() -> std::result::Result<(), String>,
) -> Result<()> {
    if done.get().is_some() {
        return Ok(());
    }
    register().map_err(StockError::ChartError)?;
    let _ = done.set(());
    Ok(())
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, chart: &PriceChart, path: &Path) -> Result<()> {
        let points = &chart.points;
        if points.is_empty() {
            return Err(StockError::ChartError(
                "cannot draw a chart without data points".to_string(),
            ));
        }

        self.ensure_font()?;
        debug!("Drawing {} points to {}", points.len(), path.display());

        let (low, high) = chart.value_range();
        let x_max = points.len().saturating_sub(1).max(1);

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT_FAMILY, 32))
            .margin(24)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(0..x_max, low..high)
            .map_err(chart_error)?;

        let date_label = |idx: &usize| {
            points
                .get(*idx)
                .map(|p| p.date.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        let price_label = |value: &f64| format_close(*value);

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(points.len().min(MAX_DATE_LABELS))
            .x_label_formatter(&date_label)
            .y_label_formatter(&price_label)
            .label_style((FONT_FAMILY, 14))
            .axis_desc_style((FONT_FAMILY, 18))
            .draw()
            .map_err(chart_error)?;

        ctx.draw_series(LineSeries::new(
            points.iter().enumerate().map(|(i, p)| (i, p.close)),
            &BLUE,
        ))
        .map_err(chart_error)?;

        ctx.draw_series(
            points
                .iter()
                .enumerate()
                .map(|(i, p)| Circle::new((i, p.close), 4, BLUE.filled())),
        )
        .map_err(chart_error)?;

        ctx.draw_series(points.iter().enumerate().map(|(i, p)| {
            Text::new(
                format_close(p.close),
                (i, p.close),
                (FONT_FAMILY, 14).into_font(),
            )
        }))
        .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
        Ok(())
    }
}

fn chart_error(err: impl std::fmt::Display) -> StockError {
    StockError::ChartError(err.to_string())
}
