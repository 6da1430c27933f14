//! Pricing a list of entries in one go.
//!
//! Entries are validated in order. Each valid entry is priced on its own task
//! as soon as it is seen; the first invalid entry stops the walk, so it and
//! everything after it are never attempted. Entries dispatched before the
//! rejection still complete.
//!
//! Tasks never touch the report. They send a [`Completion`] over a channel and
//! the runner, which owns the report, applies them one at a time.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use tracing_futures::Instrument;

use crate::{
    client::DividendClient,
    error::{DividendError, DividendResult, ErrorKind},
    request::{StockRequest, StockResult},
};

#[derive(Debug)]
pub struct Completion {
    pub index: usize,
    pub outcome: DividendResult<StockResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryError {
    pub index: usize,
    pub symbol: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl EntryError {
    fn new(index: usize, symbol: &str, err: &DividendError) -> Self {
        Self {
            index,
            symbol: symbol.to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Where one entry ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// Not reached: an earlier entry was rejected.
    Skipped,
    Pending,
    Rejected { error: EntryError },
    Succeeded { result: StockResult },
    Failed { error: EntryError },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Completion order, not input order.
    results: Vec<StockResult>,
    /// One slot per input entry.
    outcomes: Vec<EntryOutcome>,
    #[serde(skip)]
    symbols: Vec<String>,
}

impl BatchReport {
    fn new(requests: &[StockRequest]) -> Self {
        Self {
            results: Vec::with_capacity(requests.len()),
            outcomes: vec![EntryOutcome::Skipped; requests.len()],
            symbols: requests.iter().map(|r| r.symbol.clone()).collect(),
        }
    }

    fn reject(&mut self, index: usize, err: &DividendError) {
        let error = EntryError::new(index, &self.symbols[index], err);
        self.outcomes[index] = EntryOutcome::Rejected { error };
    }

    fn record(&mut self, completion: Completion) {
        let Completion { index, outcome } = completion;

        let Some(slot) = self.outcomes.get_mut(index) else {
            warn!(index, "completion for unknown entry");
            return;
        };

        *slot = match outcome {
            Ok(result) => {
                self.results.push(result.clone());
                EntryOutcome::Succeeded { result }
            }
            Err(err) => EntryOutcome::Failed {
                error: EntryError::new(index, &self.symbols[index], &err),
            },
        };
    }

    pub fn results(&self) -> &[StockResult] {
        &self.results
    }

    pub fn outcomes(&self) -> &[EntryOutcome] {
        &self.outcomes
    }

    /// The entry that stopped the batch, if any.
    pub fn rejection(&self) -> Option<&EntryError> {
        self.outcomes.iter().find_map(|o| match o {
            EntryOutcome::Rejected { error } => Some(error),
            _ => None,
        })
    }

    /// Every rejection and failure, in input order.
    pub fn errors(&self) -> Vec<&EntryError> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                EntryOutcome::Rejected { error } | EntryOutcome::Failed { error } => Some(error),
                _ => None,
            })
            .collect()
    }

    /// All errors as one message, one per line.
    pub fn error_message(&self) -> Option<String> {
        let errors = self.errors();
        if errors.is_empty() {
            return None;
        }

        Some(
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    pub fn grand_total(&self) -> f64 {
        self.results.iter().map(|r| r.total_dividends).sum()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o, EntryOutcome::Succeeded { .. }))
    }
}

pub struct BatchRunner {
    client: DividendClient,
    report: BatchReport,
}

impl BatchRunner {
    pub fn new(client: DividendClient) -> Self {
        Self {
            client,
            report: BatchReport::default(),
        }
    }

    pub fn report(&self) -> &BatchReport {
        &self.report
    }

    /// Discards the previous report, prices `requests` and waits for every
    /// dispatched entry to finish.
    #[instrument(name = "run_all", skip(self, requests), fields(total = requests.len()))]
    pub async fn run_all(&mut self, requests: &[StockRequest]) -> &BatchReport {
        self.report = BatchReport::new(requests);

        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
        let mut dispatched = 0usize;

        for (index, request) in requests.iter().enumerate() {
            let valid = match request.validate() {
                Ok(v) => v,
                Err(e) => {
                    warn!(index, symbol = %request.symbol, error = %e, "rejected entry, stopping batch");
                    self.report.reject(index, &e);
                    break;
                }
            };

            self.report.outcomes[index] = EntryOutcome::Pending;
            dispatched += 1;

            let client = self.client.clone();
            let tx = tx.clone();
            let span = tracing::info_span!("entry", index, symbol = %valid.symbol);

            tokio::spawn(
                async move {
                    let outcome = client.price(&valid).await;
                    match &outcome {
                        Ok(r) => debug!(total = r.total_dividends, "priced"),
                        Err(e) => warn!(error = %e, "pricing failed"),
                    }
                    // receiver outlives every sender
                    let _ = tx.send(Completion { index, outcome });
                }
                .instrument(span),
            );
        }

        drop(tx);
        debug!(dispatched, "waiting for completions");

        while let Some(completion) = rx.recv().await {
            self.report.record(completion);
        }

        info!(
            dispatched,
            succeeded = self.report.results.len(),
            errors = self.report.errors().len(),
            "batch finished"
        );

        &self.report
    }
}
