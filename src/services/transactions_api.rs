//! Transactions CRUD collaborator for Tizim Scan.
//!
//! Defines the [`TransactionsGateway`] seam the action router submits
//! expense records through, and an HTTP implementation targeting the
//! backend's `/api/transactions` endpoint (enabled by the `network`
//! feature).

use crate::types::errors::TransactionError;
use crate::types::transaction::{NewTransaction, TransactionRecord};

/// Trait defining the transaction creation contract.
///
/// Implementations perform a single-shot call that either resolves with
/// the created record or fails; the router never retries.
pub trait TransactionsGateway {
    fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<TransactionRecord, TransactionError>;
}

/// HTTP client for the backend transactions API.
#[cfg(feature = "network")]
pub struct HttpTransactionsApi {
    base_url: String,
    auth_token: Option<String>,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "network")]
impl HttpTransactionsApi {
    /// Creates a client for the given backend base URL (no trailing slash).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Attaches a bearer token sent with every request.
    pub fn with_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }
}

#[cfg(feature = "network")]
impl TransactionsGateway for HttpTransactionsApi {
    fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<TransactionRecord, TransactionError> {
        let url = format!("{}/api/transactions", self.base_url);

        let mut request = self.client.post(&url).json(transaction);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| TransactionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(TransactionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<TransactionRecord>()
            .map_err(|e| TransactionError::Network(e.to_string()))
    }
}
