//! Dividend discount model: a constant-growth share price `D1 / (r - g)`.
//!
//! Rates are given in percent, so `r = 8` means eight percent.

use crate::error::{DividendError, DividendResult};

const NOT_NUMERIC: &str = "Please enter valid numerical values.";
const RATE_NOT_ABOVE_GROWTH: &str = "Required return must be greater than the growth rate.";

/// Price of a share paying `d1` next period, discounted at `rate_pct` with
/// dividends growing at `growth_pct`.
pub fn price(d1: f64, rate_pct: f64, growth_pct: f64) -> DividendResult<f64> {
    if !(d1.is_finite() && rate_pct.is_finite() && growth_pct.is_finite()) {
        return Err(DividendError::validation("", NOT_NUMERIC));
    }

    let r = rate_pct / 100.0;
    let g = growth_pct / 100.0;

    if r <= g {
        return Err(DividendError::validation("", RATE_NOT_ABOVE_GROWTH));
    }

    Ok(d1 / (r - g))
}

/// Same as [`price`] for values as the user typed them.
pub fn price_from_text(d1: &str, rate_pct: &str, growth_pct: &str) -> DividendResult<f64> {
    let parse = |raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| DividendError::validation("", NOT_NUMERIC))
    };

    price(parse(d1)?, parse(rate_pct)?, parse(growth_pct)?)
}

pub fn render_price(price: f64) -> String {
    format!("Stock Price: ${price:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn constant_growth_price() {
        // 2 / (0.08 - 0.03)
        let p = price(2.0, 8.0, 3.0).unwrap();
        assert!((p - 40.0).abs() < 1e-9);
        assert_eq!(render_price(p), "Stock Price: $40.00");
    }

    #[test]
    fn renders_two_decimals() {
        assert_eq!(render_price(1.0 / 0.07), "Stock Price: $14.29");
    }

    #[test]
    fn rate_must_exceed_growth() {
        for (r, g) in [(5.0, 5.0), (3.0, 4.0)] {
            let err = price(1.0, r, g).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(
                err.to_string(),
                "Invalid entry: Required return must be greater than the growth rate."
            );
        }
    }

    #[test]
    fn rejects_non_numeric_text() {
        for (d1, r, g) in [("abc", "8", "3"), ("2", "", "3"), ("2", "8", "3%")] {
            let err = price_from_text(d1, r, g).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert!(err.to_string().contains(NOT_NUMERIC));
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = price_from_text("NaN", "8", "3").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn parses_text() {
        let p = price_from_text(" 2.5 ", "10", "5").unwrap();
        assert!((p - 50.0).abs() < 1e-9);
    }
}
