use ::scraper::error::SelectorErrorKind;

/// All errors that can occur during a sync run.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    /// Required configuration is missing or empty.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// A document could not be serialized for the store.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The document store rejected a read or a batched write.
    #[error("store operation failed: {0}")]
    Store(String),
}

impl<'a> From<SelectorErrorKind<'a>> for SyncError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        SyncError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
