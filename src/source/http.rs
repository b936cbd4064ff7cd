//! The HTTP implementation of the transaction source, speaking to the
//! backend REST API.

use async_trait::async_trait;
use reqwest::{
    Client as HttpClient, Response, StatusCode,
    header::{AUTHORIZATION, HeaderValue},
};

use crate::{
    Error,
    transaction::{Transaction, TransactionDraft, TransactionId},
};

use super::{AuthToken, TransactionSource};

/// Talks to the expense API over HTTP with bearer-token authentication.
#[derive(Debug, Clone)]
pub struct HttpTransactionSource {
    http_client: HttpClient,
    base_url: String,
}

impl HttpTransactionSource {
    /// Create a source that talks to the API at `base_url`, e.g.
    /// `"https://api.example.com"`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn expenses_url(&self) -> String {
        format!("{}/expenses", self.base_url)
    }

    fn expense_url(&self, id: TransactionId) -> String {
        format!("{}/expenses/{}", self.base_url, id)
    }

    fn auth_header(token: &AuthToken) -> Result<HeaderValue, Error> {
        HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| Error::InvalidAuthToken)
    }

    async fn check_status(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        Err(error_for_status(status, body))
    }
}

/// Map a non-success HTTP status to the crate error taxonomy.
fn error_for_status(status: StatusCode, body: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized,
        StatusCode::NOT_FOUND => Error::NotFound,
        status if status.is_server_error() => Error::ServerError(status.as_u16()),
        status => Error::HttpError(status.as_u16(), body),
    }
}

/// Parse a batch of raw API records, skipping the malformed ones.
///
/// One record the server mangled must not hide the rest of the history, so
/// records that fail to deserialize are logged and dropped rather than
/// failing the whole fetch.
fn parse_transaction_batch(values: Vec<serde_json::Value>) -> Vec<Transaction> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Transaction>(value) {
            Ok(transaction) => Some(transaction),
            Err(error) => {
                tracing::warn!("skipping malformed transaction record: {error}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl TransactionSource for HttpTransactionSource {
    async fn fetch_all(&self, token: &AuthToken) -> Result<Vec<Transaction>, Error> {
        let response = self
            .http_client
            .get(self.expenses_url())
            .header(AUTHORIZATION, Self::auth_header(token)?)
            .send()
            .await
            .map_err(|error| Error::RequestFailed(error.to_string()))?;
        let response = Self::check_status(response).await?;

        let values = response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|error| Error::InvalidResponse(error.to_string()))?;

        Ok(parse_transaction_batch(values))
    }

    async fn delete_one(&self, id: TransactionId, token: &AuthToken) -> Result<(), Error> {
        let response = self
            .http_client
            .delete(self.expense_url(id))
            .header(AUTHORIZATION, Self::auth_header(token)?)
            .send()
            .await
            .map_err(|error| Error::RequestFailed(error.to_string()))?;
        Self::check_status(response).await?;

        Ok(())
    }

    async fn create_or_update(
        &self,
        draft: &TransactionDraft,
        token: &AuthToken,
    ) -> Result<Transaction, Error> {
        let request = match draft.id {
            Some(id) => self.http_client.patch(self.expense_url(id)),
            None => self.http_client.post(self.expenses_url()),
        };

        let response = request
            .header(AUTHORIZATION, Self::auth_header(token)?)
            .json(draft)
            .send()
            .await
            .map_err(|error| Error::RequestFailed(error.to_string()))?;
        let response = Self::check_status(response).await?;

        response
            .json::<Transaction>()
            .await
            .map_err(|error| Error::InvalidResponse(error.to_string()))
    }
}
