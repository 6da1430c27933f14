use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DividendError, DividendResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One entry as the user typed it. Nothing is checked until [`StockRequest::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockRequest {
    pub symbol: String,
    pub start_date: String,
    pub end_date: String,
    pub shares: String,
}

/// An entry that passed validation and can be priced.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub shares: f64,
}

impl StockRequest {
    pub fn new(
        symbol: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        shares: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            shares: shares.into(),
        }
    }

    /// Share count first, then the symbol, then the date range.
    pub fn validate(&self) -> DividendResult<ValidRequest> {
        let shares = parse_shares(&self.shares)
            .ok_or_else(|| DividendError::validation(&self.symbol, "Invalid number of shares"))?;

        let symbol = normalize(&self.symbol);
        if symbol.is_empty() {
            return Err(DividendError::validation(&self.symbol, "symbol is empty"));
        }

        let start = parse_date(&self.symbol, "start date", &self.start_date)?;
        let end = parse_date(&self.symbol, "end date", &self.end_date)?;

        if start > end {
            return Err(DividendError::validation(
                &self.symbol,
                format!("start date {start} is after end date {end}"),
            ));
        }

        Ok(ValidRequest {
            symbol,
            start,
            end,
            shares,
        })
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

fn parse_shares(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

fn parse_date(symbol: &str, field: &str, raw: &str) -> DividendResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
        DividendError::validation(
            symbol,
            format!("{field} '{raw}' is not a YYYY-MM-DD date ({e})"),
        )
    })
}

/// A priced entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockResult {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub shares: f64,
    pub total_dividends: f64,
}

impl StockResult {
    pub fn new(request: &ValidRequest, total_dividends: f64) -> Self {
        Self {
            symbol: request.symbol.clone(),
            start_date: request.start,
            end_date: request.end,
            shares: request.shares,
            total_dividends,
        }
    }
}

impl fmt::Display for StockResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stock: {}", self.symbol)?;
        writeln!(
            f,
            "Date Range: {} to {}",
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT)
        )?;
        writeln!(f, "Shares: {}", self.shares)?;
        write!(f, "Total Dividends: ${:.2}", self.total_dividends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn request(shares: &str) -> StockRequest {
        StockRequest::new("aapl", "2023-01-01", "2023-12-31", shares)
    }

    #[test]
    fn accepts_valid_entry() {
        let valid = request("10").validate().unwrap();
        assert_eq!(valid.symbol, "AAPL");
        assert_eq!(valid.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(valid.end, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(valid.shares, 10.0);
    }

    #[test]
    fn accepts_fractional_shares() {
        assert_eq!(request("2.5").validate().unwrap().shares, 2.5);
    }

    #[test]
    fn rejects_bad_shares() {
        for shares in ["0", "-5", "abc", "", "NaN", "inf"] {
            let err = request(shares).validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "shares = {shares:?}");
            assert!(err.to_string().contains("aapl"));
        }
    }

    #[test]
    fn rejects_bad_dates() {
        let err = StockRequest::new("MSFT", "2023/01/01", "2023-12-31", "1")
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = StockRequest::new("MSFT", "2023-01-01", "2023-02-30", "1")
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn rejects_reversed_range() {
        let err = StockRequest::new("MSFT", "2024-01-01", "2023-01-01", "1")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("after"));
    }

    #[test]
    fn rejects_blank_symbol() {
        let err = StockRequest::new("  ", "2023-01-01", "2023-12-31", "1")
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Invalid entry: symbol is empty");
    }

    #[test]
    fn result_display() {
        let valid = request("10").validate().unwrap();
        let text = StockResult::new(&valid, 11.004).to_string();
        assert_eq!(
            text,
            "Stock: AAPL\nDate Range: 2023-01-01 to 2023-12-31\nShares: 10\nTotal Dividends: $11.00"
        );
    }
}
