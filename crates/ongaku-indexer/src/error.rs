use thiserror::Error;

/// Failure classification for indexer API responses.
///
/// The carried strings are the tracker's documented messages so callers can
/// surface them as provider-health signals without re-deriving them.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// API key rejected by the tracker.
    #[error("auth rejected: {0}")]
    Auth(String),

    /// Per-hour request budget exhausted.
    #[error("request limit reached: {0}")]
    RateLimited(String),

    /// Endpoint no longer where it used to be; the API shape likely changed.
    #[error("indexer API drifted: {0}")]
    ProtocolDrift(String),

    /// Body was not a usable JSON-RPC envelope or carried an error object.
    #[error("bad response payload: {0}")]
    Payload(String),

    /// Any other non-success status code.
    #[error("unexpected status code [{0}]")]
    UnexpectedStatus(u16),
}
