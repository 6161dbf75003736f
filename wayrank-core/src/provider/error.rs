use thiserror::Error;

/// Errors from [`MatrixProvider`](super::MatrixProvider),
/// [`RouteProvider`](super::RouteProvider) and [`Geocoder`](super::Geocoder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No points were provided.
    ///
    /// Callers should pre-filter input to avoid this condition.
    #[error("at least one point is required")]
    EmptyInput,
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },
    /// The request never produced an HTTP response.
    #[error("network error contacting {url}: {message}")]
    NetworkError { url: String, message: String },
    /// The provider answered with a non-success status.
    #[error("{url} returned HTTP {status}: {message}")]
    HttpError {
        url: String,
        status: u16,
        message: String,
    },
    /// The routing service reported a non-`Ok` code in its body.
    #[error("routing service returned {code}: {message}")]
    ServiceError { code: String, message: String },
    /// The response body could not be decoded.
    #[error("failed to parse provider response: {message}")]
    ParseError { message: String },
    /// The provider refused this client's identity (HTTP 403).
    #[error("provider at {url} rejected this client")]
    Blocked { url: String },
    /// Every attempt failed with a retryable condition.
    #[error("provider unavailable after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
    /// The caller's retry deadline would have been overrun by the next wait.
    #[error("retry deadline of {deadline_ms}ms reached after {attempts} attempts: {last_error}")]
    DeadlineExceeded {
        deadline_ms: u128,
        attempts: u32,
        last_error: String,
    },
}

/// Coarse classification of a [`ProviderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was unusable; nothing was sent.
    InvalidInput,
    /// The provider explicitly rejected the client.
    Blocked,
    /// The provider could not serve the request.
    Unavailable,
}

impl ProviderError {
    /// Classify the error.
    ///
    /// # Examples
    /// ```
    /// use wayrank_core::{ErrorKind, ProviderError};
    ///
    /// let err = ProviderError::Blocked { url: "https://example.com/search".into() };
    /// assert_eq!(err.kind(), ErrorKind::Blocked);
    /// assert_eq!(ProviderError::EmptyInput.kind(), ErrorKind::InvalidInput);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::InvalidInput,
            Self::Blocked { .. } => ErrorKind::Blocked,
            _ => ErrorKind::Unavailable,
        }
    }

    /// Whether a retrying client may try the request again.
    ///
    /// Transport failures, timeouts, HTTP 429 and HTTP 503 are transient;
    /// everything else is final.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::NetworkError { .. } => true,
            Self::HttpError { status, .. } => matches!(*status, 429 | 503),
            _ => false,
        }
    }
}
