//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `InvalidInput` get dedicated variants because callers
//! render them differently from "the server returned something unexpected."
//! `UpstreamUnavailable` is never produced by the parse methods; it is
//! reserved for the host's transport when the round-trip itself fails.

/// Errors returned by `TodoClient` methods and by transports executing its
/// requests.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("todo not found")]
    NotFound,

    /// The server returned 422 and rejected the payload.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request never produced a response (connect failure, timeout).
    #[error("todo API unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The server returned any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
