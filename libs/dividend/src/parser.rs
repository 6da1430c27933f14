//! Dividend CSV payloads.
//!
//! The download endpoint answers with a header line followed by one
//! `Date,Dividends` row per dividend event. Only the second non-empty field
//! matters; quotes are plain data. Rows that do not carry a usable amount are
//! skipped, never fatal.

use csv::{ReaderBuilder, StringRecord};
use tracing::trace;

use crate::error::{DividendError, DividendResult};

/// Sum of the dividend-per-share column of a raw response body.
///
/// Fails with [`DividendError::Format`] when the body is not UTF-8 or holds
/// nothing beyond the header line.
pub fn parse(body: &[u8]) -> DividendResult<f64> {
    let text = std::str::from_utf8(body)
        .map_err(|e| DividendError::Format(format!("response is not valid UTF-8: {e}")))?;

    sum_dividends(text)
}

pub fn sum_dividends(text: &str) -> DividendResult<f64> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut lines = 0usize;
    let mut total = 0.0;

    for (i, record) in reader.records().enumerate() {
        lines += 1;

        // header
        if i == 0 {
            continue;
        }

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                trace!(line = i, error = %e, "skipping unreadable row");
                continue;
            }
        };

        match amount_field(&record).and_then(parse_amount) {
            Some(amount) => total += amount,
            None => trace!(line = i, "skipping row without a dividend amount"),
        }
    }

    if lines <= 1 {
        return Err(DividendError::Format(
            "no dividend rows after the header".to_string(),
        ));
    }

    Ok(total)
}

/// Empty fields do not count, so `date,,0.5` still yields `0.5`.
fn amount_field(record: &StringRecord) -> Option<&str> {
    record.iter().filter(|f| !f.is_empty()).nth(1)
}

fn parse_amount(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sums_second_column() {
        let body = b"Date,Dividends\n2023-01-01,0.50\n2023-04-01,0.60\n";
        assert!(approx(parse(body).unwrap(), 1.10));
    }

    #[test]
    fn header_only_is_format_error() {
        let err = parse(b"Date,Dividends\n").unwrap_err();
        assert!(matches!(err, DividendError::Format(_)));
    }

    #[test]
    fn empty_body_is_format_error() {
        assert!(matches!(parse(b""), Err(DividendError::Format(_))));
    }

    #[test]
    fn invalid_utf8_is_format_error() {
        let body = [b'D', b'a', 0xff, 0xfe, b'\n', b'x'];
        assert!(matches!(parse(&body), Err(DividendError::Format(_))));
    }

    #[test]
    fn skips_malformed_rows() {
        let body = "Date,Dividends\n\
                    2023-01-01,0.25\n\
                    2023-02-01\n\
                    2023-03-01,n/a\n\
                    2023-04-01,NaN\n\
                    2023-05-01,0.75,extra\n";
        assert!(approx(sum_dividends(body).unwrap(), 1.0));
    }

    #[test]
    fn non_numeric_rows_sum_to_zero() {
        let body = "Date,Dividends\n2023-01-01,null\n2023-02-01,-\n";
        assert_eq!(sum_dividends(body).unwrap(), 0.0);
    }

    #[test]
    fn handles_crlf() {
        let body = "Date,Dividends\r\n2023-01-01,0.5\r\n2023-04-01,0.5\r\n";
        assert!(approx(sum_dividends(body).unwrap(), 1.0));
    }

    #[test]
    fn stray_quote_in_row_does_not_swallow_later_rows() {
        let body = "Date,Dividends\n2023-01-01,\"0.5\n2023-04-01,0.6\n2023-07-01,0.7\n";
        assert!(approx(sum_dividends(body).unwrap(), 1.3));
    }

    #[test]
    fn stray_quote_in_header() {
        let body = "Date,\"Dividends\n2023-01-01,0.5\n2023-04-01,0.6\n";
        assert!(approx(sum_dividends(body).unwrap(), 1.1));
    }

    #[test]
    fn empty_fields_are_ignored() {
        assert!(approx(sum_dividends("Date,Dividends\n2023-01-01,,0.5\n").unwrap(), 0.5));
        assert_eq!(sum_dividends("Date,Dividends\n,0.5\n").unwrap(), 0.0);
    }

    #[test]
    fn header_is_never_summed() {
        let body = "0,100\n2023-01-01,1.5\n";
        assert!(approx(sum_dividends(body).unwrap(), 1.5));
    }

    proptest! {
        #[test]
        fn same_payload_same_total(amounts in prop::collection::vec(0.0..10.0_f64, 1..20)) {
            let mut body = String::from("Date,Dividends\n");
            for (i, a) in amounts.iter().enumerate() {
                body.push_str(&format!("2023-01-{:02},{a}\n", i % 28 + 1));
            }

            let first = sum_dividends(&body).unwrap();
            let second = sum_dividends(&body).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn alphabetic_amounts_sum_to_zero(words in prop::collection::vec("[a-zA-Z]{1,8}", 1..20)) {
            // "inf"/"nan" spellings parse as floats but are filtered as non-finite
            let mut body = String::from("Date,Dividends\n");
            for w in &words {
                body.push_str(&format!("2023-01-01,{w}\n"));
            }

            prop_assert_eq!(sum_dividends(&body).unwrap(), 0.0);
        }
    }
}
