//! Contains the trait and implementations for remote transaction sources.

mod http;

pub use http::HttpTransactionSource;

use async_trait::async_trait;

use crate::{
    Error,
    transaction::{Transaction, TransactionDraft, TransactionId},
};

/// A bearer token identifying the user to the remote API.
///
/// Deliberately does not implement `Display` so the token cannot end up in
/// logs by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token string.
    pub fn new(token: &str) -> Self {
        Self(token.to_owned())
    }

    /// The raw token string, for building request headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Handles fetching and mutating transactions on the remote backend.
#[async_trait]
pub trait TransactionSource {
    /// Fetch the full set of transactions owned by the token's user.
    ///
    /// # Errors
    /// Returns an [Error] from the remote taxonomy ([Error::Unauthorized],
    /// [Error::ServerError], [Error::RequestFailed], ...) when the fetch
    /// cannot be completed.
    async fn fetch_all(&self, token: &AuthToken) -> Result<Vec<Transaction>, Error>;

    /// Delete a single transaction by its ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the server does not know the ID, or
    /// another remote-taxonomy error.
    async fn delete_one(&self, id: TransactionId, token: &AuthToken) -> Result<(), Error>;

    /// Create a new transaction (`draft.id == None`) or update an existing
    /// one, returning the record as stored by the server.
    ///
    /// This is driven by the external editor; the list controller only
    /// merges the returned record back into its collection.
    async fn create_or_update(
        &self,
        draft: &TransactionDraft,
        token: &AuthToken,
    ) -> Result<Transaction, Error>;
}
