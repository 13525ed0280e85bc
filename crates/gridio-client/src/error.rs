//! Client error taxonomy.

use gridio_model::CodecError;

use crate::transport::TransportError;

/// Errors surfaced by container operations.
///
/// The variants separate the four failure classes callers need to tell
/// apart: the request never left (`Encode`, `Serialize`), the transport
/// failed (`Transport`), the service answered something this client cannot
/// parse (`MalformedResponse`), or a cursor already hit a terminal failure
/// (`CursorPoisoned`).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The transport collaborator failed; propagated verbatim, not retried.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Attribute encoding failed locally; nothing was sent.
    #[error("failed to encode request attributes: {0}")]
    Encode(#[from] CodecError),

    /// A request body failed to serialize; nothing was sent.
    #[error("failed to serialize {operation} request body")]
    Serialize {
        /// Operation whose body failed to serialize.
        operation: &'static str,
        /// The underlying serializer failure.
        #[source]
        source: serde_json::Error,
    },

    /// The response arrived but its body does not match the operation's
    /// expected shape. The request already happened; it is not retried.
    #[error("malformed {operation} response")]
    MalformedResponse {
        /// Operation whose response could not be decoded.
        operation: &'static str,
        /// The underlying parse or codec failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The cursor hit a terminal failure on an earlier advance and will not
    /// issue further requests. Create a new cursor to retry.
    #[error("items cursor previously failed and will not re-fetch")]
    CursorPoisoned,
}

impl ClientError {
    /// A body-serialization failure for `operation`.
    pub(crate) fn serialize(operation: &'static str, source: serde_json::Error) -> Self {
        Self::Serialize { operation, source }
    }

    /// A malformed-response failure for `operation`.
    pub(crate) fn malformed(
        operation: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::MalformedResponse {
            operation,
            source: Box::new(source),
        }
    }
}
