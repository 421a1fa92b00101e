//! `reqwest` client for the bookkeeping backend.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tally_core::ledger::{StoredTransaction, TransactionPayload};
use tally_core::reference::{Account, Category, Classification, Currency, TransactionSummary};
use tally_shared::AppResult;
use tally_shared::config::ApiConfig;
use tally_shared::types::{AccountId, ClassificationId, TransactionId};
use tracing::debug;

use crate::response::{decode, decode_list, read_body, transport_error};

/// A page of the transaction listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionList {
    /// Most recent transactions first.
    pub transactions: Vec<TransactionSummary>,
    /// Number of rows returned.
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Deserialize)]
struct Created {
    #[serde(alias = "transaction_id")]
    id: TransactionId,
}

#[derive(Debug, Deserialize)]
struct Greeting {
    message: String,
}

/// HTTP client for the backend API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    root_url: String,
}

impl ApiClient {
    /// Creates a client from API configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the base URL does not parse or the HTTP
    /// client cannot be built.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let mut root = reqwest::Url::parse(&config.base_url).map_err(|e| {
            tally_shared::AppError::Config(format!("Invalid base URL {}: {e}", config.base_url))
        })?;
        // The greeting is served at the origin, outside the API prefix.
        root.set_path("/");
        root.set_query(None);
        root.set_fragment(None);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| tally_shared::AppError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            root_url: root.into(),
        })
    }

    /// Returns the base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the backend origin, where the greeting lives.
    #[must_use]
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "Backend request");
        self.http.request(method, url)
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> AppResult<Value> {
        let response = request.send().await.map_err(|e| transport_error(&e))?;
        read_body(response).await
    }

    pub(crate) async fn get(&self, path: &str) -> AppResult<Value> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<Value> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<Value> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    /// Checks connectivity, returning the backend greeting.
    ///
    /// # Errors
    ///
    /// Returns a transport or backend error.
    pub async fn ping(&self) -> AppResult<String> {
        debug!(url = %self.root_url, "Backend ping");
        let request = self.http.get(&self.root_url);
        let greeting: Greeting = decode(self.send(request).await?)?;
        Ok(greeting.message)
    }

    /// Lists accounts.
    ///
    /// # Errors
    ///
    /// Returns a transport, backend, or decode error.
    pub async fn accounts(&self) -> AppResult<Vec<Account>> {
        decode_list(self.get("/accounts").await?, "accounts")
    }

    /// Lists currencies.
    ///
    /// # Errors
    ///
    /// Returns a transport, backend, or decode error.
    pub async fn currencies(&self) -> AppResult<Vec<Currency>> {
        decode_list(self.get("/currencies").await?, "currencies")
    }

    /// Lists account categories.
    ///
    /// # Errors
    ///
    /// Returns a transport, backend, or decode error.
    pub async fn categories(&self) -> AppResult<Vec<Category>> {
        decode_list(self.get("/categories").await?, "categories")
    }

    /// Lists every classification.
    ///
    /// # Errors
    ///
    /// Returns a transport, backend, or decode error.
    pub async fn classifications(&self) -> AppResult<Vec<Classification>> {
        decode_list(self.get("/classifications").await?, "classifications")
    }

    /// Lists classifications linked to an account.
    ///
    /// # Errors
    ///
    /// Returns a transport, backend, or decode error.
    pub async fn classifications_of(&self, account_id: AccountId) -> AppResult<Vec<Classification>> {
        decode_list(
            self.get(&format!("/accounts/{account_id}/classifications")).await?,
            "classifications",
        )
    }

    /// Links a classification to an account.
    ///
    /// # Errors
    ///
    /// Returns a transport or backend error.
    pub async fn link_classification(
        &self,
        account_id: AccountId,
        classification_id: ClassificationId,
    ) -> AppResult<()> {
        self.post(
            &format!("/accounts/{account_id}/classifications"),
            &json!({ "classification_id": classification_id }),
        )
        .await?;
        Ok(())
    }

    /// Unlinks a classification from an account.
    ///
    /// # Errors
    ///
    /// Returns a transport or backend error.
    pub async fn unlink_classification(
        &self,
        account_id: AccountId,
        classification_id: ClassificationId,
    ) -> AppResult<()> {
        let path = format!("/accounts/{account_id}/classifications/{classification_id}");
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    /// Lists recent transactions.
    ///
    /// # Errors
    ///
    /// Returns a transport, backend, or decode error.
    pub async fn transactions(&self) -> AppResult<TransactionList> {
        decode(self.get("/transactions").await?)
    }

    /// Fetches one transaction with its lines.
    ///
    /// # Errors
    ///
    /// Returns a transport, backend, or decode error.
    pub async fn transaction(&self, id: TransactionId) -> AppResult<StoredTransaction> {
        decode(self.get(&format!("/transactions/{id}")).await?)
    }

    /// Creates a transaction.
    ///
    /// # Errors
    ///
    /// Returns a transport, backend, or decode error.
    pub async fn create(&self, payload: &TransactionPayload) -> AppResult<TransactionId> {
        let created: Created = decode(self.post("/transactions", payload).await?)?;
        Ok(created.id)
    }

    /// Replaces a transaction.
    ///
    /// # Errors
    ///
    /// Returns a transport or backend error.
    pub async fn update(&self, id: TransactionId, payload: &TransactionPayload) -> AppResult<()> {
        self.put(&format!("/transactions/{id}"), payload).await?;
        Ok(())
    }
}
