//! Resolution of user-supplied durations into query windows
//!
//! The market data path takes a period token that is handed to the source
//! untouched. The news path needs a concrete date range ending today.

use crate::error::{Result, StockError};
use chrono::{Local, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative history window, passed verbatim to the market data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period(String);

impl Period {
    /// Wrap a raw period token such as `7d` or `1mo`
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The token as supplied
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The `days` days leading up to and including `end`
    ///
    /// A negative count puts `start` after `end`; the range is passed on as is.
    pub fn ending_on(end: NaiveDate, days: i64) -> Result<Self> {
        let start = TimeDelta::try_days(days)
            .and_then(|delta| end.checked_sub_signed(delta))
            .ok_or_else(|| {
                StockError::InvalidInput(format!("{days} days before {end} is out of range"))
            })?;
        Ok(Self { start, end })
    }
}

/// Parse the number of past days requested for a news search
///
/// Surrounding whitespace is ignored and the sign is not checked. Anything
/// that is not an integer is an input error for the invocation.
pub fn parse_day_count(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().map_err(|e| {
        StockError::InvalidInput(format!(
            "number of past days must be an integer, got '{trimmed}': {e}"
        ))
    })
}

/// Source of the current calendar date
pub type Clock = fn() -> NaiveDate;

/// Today's date in the local timezone
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Turns raw duration input into periods and date ranges
#[derive(Debug, Clone, Copy)]
pub struct TimeWindowResolver {
    clock: Clock,
}

impl TimeWindowResolver {
    /// Resolver anchored on the local date at the time of each call
    pub fn new() -> Self {
        Self { clock: local_today }
    }

    /// Resolver using a custom clock
    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    /// Period token for the market data source
    pub fn period(&self, raw: &str) -> Period {
        Period::new(raw)
    }

    /// Date range covering the last `days` days, ending today
    pub fn last_days(&self, days: i64) -> Result<DateRange> {
        DateRange::ending_on((self.clock)(), days)
    }
}

impl Default for TimeWindowResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    #[test]
    fn test_period_is_verbatim() {
        let resolver = TimeWindowResolver::new();
        let period = resolver.period("7d");
        assert_eq!(period.as_str(), "7d");
        assert_eq!(period.to_string(), "7d");

        assert_eq!(resolver.period(" 1mo ").as_str(), " 1mo ");
    }

    #[test]
    fn test_last_days() {
        let resolver = TimeWindowResolver::with_clock(fixed_today);
        let range = resolver.last_days(7).unwrap();
        assert_eq!(range.end, fixed_today());
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 4, 25).unwrap());
    }

    #[test]
    fn test_last_days_zero_is_today_only() {
        let resolver = TimeWindowResolver::with_clock(fixed_today);
        let range = resolver.last_days(0).unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_last_days_crosses_year_boundary() {
        let range = DateRange::ending_on(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), 5).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2023, 12, 29).unwrap());
    }

    #[test]
    fn test_last_days_out_of_range() {
        let result = DateRange::ending_on(NaiveDate::MIN, 1);
        assert!(matches!(result, Err(StockError::InvalidInput(_))));

        let result = DateRange::ending_on(fixed_today(), i64::MAX);
        assert!(matches!(result, Err(StockError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_day_count() {
        assert_eq!(parse_day_count("7").unwrap(), 7);
        assert_eq!(parse_day_count(" 30\n").unwrap(), 30);
        assert_eq!(parse_day_count("0").unwrap(), 0);
        assert_eq!(parse_day_count("-3").unwrap(), -3);
    }

    #[test]
    fn test_negative_day_count_starts_after_end() {
        let resolver = TimeWindowResolver::with_clock(fixed_today);
        let range = resolver.last_days(-3).unwrap();
        assert_eq!(range.end, fixed_today());
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 5, 5).unwrap());
    }

    #[test]
    fn test_parse_day_count_rejects_non_integers() {
        for raw in ["", "seven", "7d", "1.5", "- 3"] {
            let result = parse_day_count(raw);
            assert!(
                matches!(result, Err(StockError::InvalidInput(_))),
                "expected {raw:?} to be rejected"
            );
        }
    }
}
