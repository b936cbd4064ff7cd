//! Defines the app level error type.

use crate::transaction::TransactionId;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A full refresh against the remote source failed.
    ///
    /// The authoritative collection is left unchanged so the user keeps
    /// seeing the last good data; retrying is manual via the next focus
    /// event or an explicit refresh.
    #[error("could not fetch transactions: {0}")]
    FetchFailed(String),

    /// The remote source rejected a delete that was already applied
    /// optimistically.
    ///
    /// The controller restores the removed record before returning this
    /// error, so callers only need to surface the message to the user.
    #[error("could not delete transaction {id}: {reason}")]
    DeleteFailed {
        /// The ID of the transaction the server refused to delete.
        id: TransactionId,
        /// Why the delete failed, for display to the user.
        reason: String,
    },

    /// Tried to delete a transaction that is not in the collection.
    #[error("tried to delete a transaction that is not in the collection")]
    DeleteMissingTransaction,

    /// The access token was missing, expired, or rejected by the server.
    #[error("the server rejected the access token")]
    Unauthorized,

    /// The requested resource was not found on the server.
    ///
    /// Clients should check that the ID is correct and that the record has
    /// not already been deleted elsewhere.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The server reported an internal error.
    #[error("the server reported an internal error (HTTP {0})")]
    ServerError(u16),

    /// The server returned a status code with no specific handling.
    #[error("unexpected HTTP status {0}: {1}")]
    HttpError(u16, String),

    /// The request never produced a response, e.g. the network is down or
    /// the host cannot be resolved.
    #[error("the request could not be sent: {0}")]
    RequestFailed(String),

    /// The response body could not be parsed in the expected shape.
    #[error("could not parse the server response: {0}")]
    InvalidResponse(String),

    /// The access token contains characters that cannot be used in an HTTP
    /// header.
    #[error("the access token cannot be used in an HTTP header")]
    InvalidAuthToken,
}
