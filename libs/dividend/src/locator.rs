use chrono::{NaiveDate, NaiveTime};
use url::Url;

use crate::error::{DividendError, DividendResult};

pub const DEFAULT_BASE_API: &str = "https://query1.finance.yahoo.com/v7/finance/download";

const SECONDS_PER_DAY: i64 = 86_400;

/// Daily dividend-event download URL for `symbol` between `start` and `end`, both inclusive.
///
/// The symbol becomes one percent-encoded path segment. `period1` is the start
/// of `start` and `period2` the last second of `end`, as UTC epoch seconds.
pub fn dividend_url(
    base_api: &str,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> DividendResult<Url> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(DividendError::InvalidLocator("symbol is empty".to_string()));
    }
    // `push` silently drops dot segments
    if symbol == "." || symbol == ".." {
        return Err(DividendError::InvalidLocator(format!(
            "symbol '{symbol}' is not a path segment"
        )));
    }

    let mut url = Url::parse(base_api.trim_end_matches('/'))?;

    url.path_segments_mut()
        .map_err(|_| DividendError::InvalidLocator(format!("{base_api} cannot be a base URL")))?
        .pop_if_empty()
        .push(symbol);

    url.query_pairs_mut()
        .append_pair("period1", &day_start(start).to_string())
        .append_pair("period2", &day_end(end).to_string())
        .append_pair("interval", "1d")
        .append_pair("events", "div");

    Ok(url)
}

fn day_start(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn day_end(date: NaiveDate) -> i64 {
    day_start(date) + SECONDS_PER_DAY - 1
}
