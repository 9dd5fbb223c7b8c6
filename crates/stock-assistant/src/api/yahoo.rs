//! Yahoo Finance API client

use crate::error::{Result, StockError};
use crate::window::Period;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Bar size requested from Yahoo; one closing price per trading day
const DAILY_INTERVAL: &str = "1d";

/// Closing price on a trading day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Source of historical closing prices
///
/// An empty series is a valid answer: the symbol has no data for the period.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Closing prices for `symbol` over `period`, oldest first
    async fn price_history(&self, symbol: &str, period: &Period) -> Result<Vec<PricePoint>>;
}

/// Yahoo Finance API client
#[derive(Debug, Clone, Default)]
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }
}

/// Error code Yahoo reports for a symbol it does not know
const UNKNOWN_SYMBOL_CODE: &str = "Not Found";

/// Check if Yahoo answered "nothing to chart" rather than failing
///
/// Unknown symbols and periods without trading days both mean the symbol
/// has no data, which callers report as a normal outcome.
fn is_missing_history(err: &yahoo::YahooError) -> bool {
    match err {
        yahoo::YahooError::NoResult | yahoo::YahooError::NoQuotes => true,
        yahoo::YahooError::ApiError(message) => is_unknown_symbol(message.code.as_deref()),
        _ => false,
    }
}

fn is_unknown_symbol(code: Option<&str>) -> bool {
    code == Some(UNKNOWN_SYMBOL_CODE)
}

fn yahoo_error(err: impl std::fmt::Display) -> StockError {
    StockError::YahooFinanceError(err.to_string())
}

/// Daily closing prices contained in a chart response, oldest first
///
/// A response without bars, or one that reports an unknown symbol, yields an
/// empty series. Any other error in the response is returned as an error.
pub fn price_points(response: &yahoo::YResponse) -> Result<Vec<PricePoint>> {
    match (&response.chart.result, &response.chart.error) {
        (None, Some(message)) if !is_unknown_symbol(message.code.as_deref()) => {
            return Err(yahoo_error(format!(
                "yahoo! finance returned api error: {} {}",
                message.code.as_deref().unwrap_or("unknown"),
                message.description.as_deref().unwrap_or_default()
            )));
        }
        _ => {}
    }

    let quotes = match response.quotes() {
        Ok(quotes) => quotes,
        Err(e) if is_missing_history(&e) => return Ok(Vec::new()),
        Err(e) => return Err(yahoo_error(e)),
    };

    quotes
        .iter()
        .map(|q| {
            let date = DateTime::from_timestamp(q.timestamp, 0)
                .ok_or_else(|| yahoo_error(format!("Invalid quote timestamp: {}", q.timestamp)))?
                .date_naive();
            Ok(PricePoint::new(date, q.close))
        })
        .collect()
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    async fn price_history(&self, symbol: &str, period: &Period) -> Result<Vec<PricePoint>> {
        let provider = yahoo::YahooConnector::new().map_err(yahoo_error)?;

        debug!("Requesting {} history for {}", period, symbol);
        let response = match provider
            .get_quote_range(symbol, DAILY_INTERVAL, period.as_str())
            .await
        {
            Ok(response) => response,
            Err(e) if is_missing_history(&e) => {
                debug!("No history for {}: {}", symbol, e);
                return Ok(Vec::new());
            }
            Err(e) => return Err(yahoo_error(e)),
        };

        price_points(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn period_info() -> Value {
        json!({"timezone": "EDT", "start": 1714636800, "end": 1714660200, "gmtoffset": -14400})
    }

    fn chart_body(timestamps: Vec<i64>, closes: Vec<f64>) -> Value {
        let volumes: Vec<u64> = closes.iter().map(|_| 1_000).collect();
        json!({
            "chart": {
                "result": [{
                    "meta": {
                        "currency": "USD",
                        "symbol": "AAPL",
                        "instrumentType": "EQUITY",
                        "exchangeName": "NMS",
                        "fullExchangeName": "NasdaqGS",
                        "gmtoffset": -14400,
                        "timezone": "EDT",
                        "exchangeTimezoneName": "America/New_York",
                        "hasPrePostMarketData": true,
                        "priceHint": 2,
                        "currentTradingPeriod": {
                            "pre": period_info(),
                            "regular": period_info(),
                            "post": period_info()
                        },
                        "dataGranularity": "1d",
                        "range": "7d",
                        "validRanges": ["1d", "5d", "1mo"]
                    },
                    "timestamp": timestamps,
                    "indicators": {
                        "quote": [{
                            "open": closes,
                            "high": closes,
                            "low": closes,
                            "close": closes,
                            "volume": volumes
                        }]
                    }
                }],
                "error": null
            }
        })
    }

    fn response(body: Value) -> yahoo::YResponse {
        yahoo::YResponse::from_json(body).unwrap()
    }

    #[test]
    fn test_price_point() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let point = PricePoint::new(date, 189.987);
        assert_eq!(point.date, date);
        assert!((point.close - 189.987).abs() < f64::EPSILON);
    }

    #[test]
    fn test_price_points_in_date_order() {
        // 2024-05-01 and 2024-05-02, 13:30 UTC
        let body = chart_body(vec![1714570200, 1714656600], vec![169.3, 173.03]);
        let points = price_points(&response(body)).unwrap();

        assert_eq!(
            points,
            vec![
                PricePoint::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), 169.3),
                PricePoint::new(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(), 173.03),
            ]
        );
    }

    #[test]
    fn test_price_points_without_bars() {
        let body = chart_body(Vec::new(), Vec::new());
        assert!(price_points(&response(body)).unwrap().is_empty());
    }

    #[test]
    fn test_price_points_unknown_symbol() {
        let body = json!({
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        });
        assert!(price_points(&response(body)).unwrap().is_empty());
    }

    #[test]
    fn test_price_points_other_api_error() {
        let body = json!({
            "chart": {
                "result": null,
                "error": {"code": "Bad Request", "description": "Invalid input - interval=1d is not supported"}
            }
        });
        assert!(matches!(
            price_points(&response(body)),
            Err(StockError::YahooFinanceError(_))
        ));
    }

    #[test]
    fn test_missing_history_classification() {
        let api_error = |code: &str| {
            let body = json!({"chart": {"result": null, "error": {"code": code, "description": null}}});
            let message = response(body).chart.error.unwrap();
            yahoo::YahooError::ApiError(message)
        };

        assert!(is_missing_history(&yahoo::YahooError::NoQuotes));
        assert!(is_missing_history(&yahoo::YahooError::NoResult));
        assert!(is_missing_history(&api_error("Not Found")));
        assert!(!is_missing_history(&api_error("Unauthorized")));
        assert!(!is_missing_history(&yahoo::YahooError::DataInconsistency));
        assert!(!is_missing_history(&yahoo::YahooError::Unauthorized));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_price_history() {
        let client = YahooFinanceClient::new();
        let points = client
            .price_history("AAPL", &Period::new("1mo"))
            .await
            .unwrap();

        assert!(!points.is_empty());
        assert!(points.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(points.iter().all(|p| p.close > 0.0));
    }
}
