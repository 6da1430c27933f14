//! Entry rows from the command line or a CSV file.
//!
//! Rows are only split into fields here. Share counts and dates are checked
//! by the batch runner so a bad row stops the batch at the right place.

use std::io::Read;

use anyhow::{Result, bail};
use csv::{ReaderBuilder, StringRecord, Trim};
use dividend::StockRequest;

/// `SYMBOL,START,END,SHARES`, as given to `--entry`.
pub fn parse_entry(raw: &str) -> Result<StockRequest> {
    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();

    let [symbol, start, end, shares] = fields.as_slice() else {
        bail!("expected SYMBOL,START,END,SHARES but got '{raw}'");
    };

    Ok(StockRequest::new(*symbol, *start, *end, *shares))
}

/// Rows of `symbol,start,end,shares`. A leading header row is skipped.
pub fn read_entries<R: Read>(reader: R) -> Result<Vec<StockRequest>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record?;

        if i == 0 && is_header(&record) {
            continue;
        }

        let (Some(symbol), Some(start), Some(end), Some(shares)) =
            (record.get(0), record.get(1), record.get(2), record.get(3))
        else {
            bail!("row {} has {} columns, expected 4", i + 1, record.len());
        };

        entries.push(StockRequest::new(symbol, start, end, shares));
    }

    Ok(entries)
}

fn is_header(record: &StringRecord) -> bool {
    record
        .get(0)
        .is_some_and(|f| f.eq_ignore_ascii_case("symbol"))
}
