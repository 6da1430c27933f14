pub type DividendResult<T> = Result<T, DividendError>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum DividendError {
    #[error("Invalid entry{}: {}", entry_label(.symbol), .message)]
    Validation { symbol: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidLocator(String),

    /// Whatever the transport reported, shown as-is.
    #[error("{0}")]
    Transport(#[source] BoxError),

    #[error("No data returned for {symbol}")]
    NoData { symbol: String },

    #[error("Invalid response format: {0}")]
    Format(String),
}

fn entry_label(symbol: &str) -> String {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        String::new()
    } else {
        format!(" for {symbol}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    InvalidLocator,
    Transport,
    NoData,
    Format,
}

impl DividendError {
    pub fn validation(symbol: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            symbol: symbol.to_string(),
            message: message.into(),
        }
    }

    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::InvalidLocator(_) => ErrorKind::InvalidLocator,
            Self::Transport(_) => ErrorKind::Transport,
            Self::NoData { .. } => ErrorKind::NoData,
            Self::Format(_) => ErrorKind::Format,
        }
    }
}

impl From<url::ParseError> for DividendError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidLocator(err.to_string())
    }
}

impl From<reqwest::Error> for DividendError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}
