//! Transport seam.
//!
//! The client never opens connections itself. An embedder supplies a
//! [`Transport`] that executes one HTTP request and returns the raw
//! response; connection pooling, TLS, authentication, timeouts, and retries
//! all live behind this trait. Implementations must report non-success
//! statuses as [`TransportError::Status`] so callers can tell transport
//! failures apart from payload-decoding failures.

use bytes::Bytes;

/// A fully assembled HTTP request, ready for a transport to execute.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: http::Method,
    /// Absolute URL, including the container prefix.
    pub url: String,
    /// Request headers (dispatch headers already applied).
    pub headers: http::HeaderMap,
    /// Request body; empty for plain GET/DELETE.
    pub body: Bytes,
}

/// A raw HTTP response as the transport received it.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: http::StatusCode,
    /// Raw response body bytes.
    pub body: Bytes,
}

/// Failures raised by the transport collaborator.
///
/// These are propagated to callers unchanged; this layer never retries.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: http::StatusCode,
        /// The response body or reason phrase, as available.
        message: String,
    },

    /// An I/O failure while sending or receiving.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Executes one request and returns the raw response.
///
/// Calls are sequential from this client's point of view; a conforming
/// implementation may still be shared across containers.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request`, returning the raw response.
    ///
    /// # Errors
    ///
    /// Connection, timeout, I/O, and non-2xx outcomes surface as
    /// [`TransportError`].
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
