use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    error::{DividendError, DividendResult},
    locator::{self, DEFAULT_BASE_API},
    parser,
    request::{StockResult, ValidRequest},
};

/// The network exchange behind [`DividendClient`].
///
/// `Ok(None)` means the exchange succeeded without a body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> DividendResult<Option<Vec<u8>>>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// No timeout unless one is given; reqwest's defaults apply otherwise.
    pub fn new(user_agent: Option<&str>, timeout: Option<Duration>) -> DividendResult<Self> {
        let mut builder = Client::builder();

        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> DividendResult<Option<Vec<u8>>> {
        let bytes = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(Some(bytes.to_vec()))
    }
}

/// Prices one entry: build the URL, fetch, sum the dividends, scale by shares.
#[derive(Clone)]
pub struct DividendClient {
    transport: Arc<dyn Transport>,
    base_api: String,
}

impl DividendClient {
    pub fn new(transport: Arc<dyn Transport>, base_api: impl Into<String>) -> Self {
        Self {
            transport,
            base_api: base_api.into(),
        }
    }

    pub fn http(
        base_api: Option<String>,
        user_agent: Option<&str>,
        timeout: Option<Duration>,
    ) -> DividendResult<Self> {
        let transport = HttpTransport::new(user_agent, timeout)?;
        Ok(Self::new(
            Arc::new(transport),
            base_api.unwrap_or_else(|| DEFAULT_BASE_API.to_string()),
        ))
    }

    pub fn base_api(&self) -> &str {
        &self.base_api
    }

    /// Total dividends paid on `shares` shares of `symbol` between `start` and `end`.
    #[instrument(name = "fetch_dividends", skip(self), fields(base_api = %self.base_api))]
    pub async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        shares: f64,
    ) -> DividendResult<f64> {
        let url = locator::dividend_url(&self.base_api, symbol, start, end)?;
        debug!(%url, "requesting dividends");

        let body = match self.transport.get(&url).await? {
            Some(body) if !body.is_empty() => body,
            _ => {
                return Err(DividendError::NoData {
                    symbol: symbol.to_string(),
                });
            }
        };
        debug!(bytes = body.len(), "received payload");

        let per_share = parser::parse(&body)?;
        debug!(per_share, "summed dividends");

        Ok(per_share * shares)
    }

    pub async fn price(&self, request: &ValidRequest) -> DividendResult<StockResult> {
        let total = self
            .fetch(&request.symbol, request.start, request.end, request.shares)
            .await?;

        Ok(StockResult::new(request, total))
    }
}
