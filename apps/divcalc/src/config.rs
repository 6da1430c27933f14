use std::{env::var, time::Duration};

use anyhow::{Context, Result};
use dividend::locator::DEFAULT_BASE_API;

#[derive(Clone, Debug)]
pub struct Config {
    pub base_api: String,
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let timeout = match var("DIVIDEND_HTTP_TIMEOUT_SECS") {
            Ok(secs) => Some(Duration::from_secs(secs.trim().parse().with_context(|| {
                format!("DIVIDEND_HTTP_TIMEOUT_SECS is not a number of seconds: {secs}")
            })?)),
            Err(_) => None,
        };

        Ok(Self {
            base_api: var("DIVIDEND_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_API.to_string()),
            user_agent: var("DIVIDEND_USER_AGENT").ok(),
            timeout,
        })
    }
}
