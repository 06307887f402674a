use std::fmt;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::types::Page;

/// Errors that can occur while fetching a page.
#[derive(Debug)]
pub enum FetchError {
    /// Source misconfigured (bad URL, missing path).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The server answered with a non-success status.
    Api { status: u16, message: String },
    /// Failed to parse the source's response.
    Parse(String),
    /// Local I/O failure.
    Io(std::io::Error),
    /// The source observed the cancellation signal and stopped.
    Cancelled,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Config(msg) => write!(f, "config error: {msg}"),
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
            FetchError::Io(e) => write!(f, "I/O error: {e}"),
            FetchError::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Io(e)
    }
}

/// A paged data source the list loader pulls from.
///
/// Implementations are expected to watch `cancel` and return promptly
/// (usually with [`FetchError::Cancelled`]) once it fires. The loader discards
/// results from superseded fetches either way.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    /// Text shown in the status row while the first page loads.
    fn label(&self) -> &str;

    /// Fetches the page beginning at `start_index`.
    async fn fetch(
        &self,
        start_index: usize,
        cancel: &CancellationToken,
    ) -> Result<Page<T>, FetchError>;
}
