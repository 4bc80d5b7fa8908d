use thiserror::Error;

/// Errors starting or running the HTTP server.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// A ledger call made on behalf of a request failed.
///
/// The text is logged, never returned to the HTTP client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct LedgerError(pub String);
