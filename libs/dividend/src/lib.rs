mod client;
mod error;
mod request;

pub mod batch;
pub mod ddm;
pub mod locator;
pub mod parser;

pub use batch::{BatchReport, BatchRunner, EntryError, EntryOutcome};
pub use client::{DividendClient, HttpTransport, Transport};
pub use error::{BoxError, DividendError, DividendResult, ErrorKind};
pub use request::{DATE_FORMAT, StockRequest, StockResult, ValidRequest};
