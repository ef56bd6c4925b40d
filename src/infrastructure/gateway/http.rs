//! # HTTP Gateway Adapter
//!
//! `reqwest` implementation of [`GatewayApi`] over the gateway's REST
//! endpoints.
//!
//! Every request carries the client's fixed timeout (10 seconds by
//! default); a timeout surfaces as a transient [`GatewayError::Timeout`]
//! and is never distinguished from other network failures by callers.

use crate::domain::entities::{BlockDetail, BlockSummary, Transaction, TransactionReceipt};
use crate::domain::value_objects::{Address, BlockHeight, TxHash};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::client::{GatewayApi, NetworkStats};
use super::error::{GatewayError, GatewayResult};

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// HTTP client for the chain-data gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    /// Inner reqwest client.
    client: Client,
    /// Base URL of the gateway, without a trailing slash.
    base_url: String,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

/// Balance payload of the account and token balance endpoints.
#[derive(Debug, Deserialize)]
struct BalanceResponse {
    balance: u128,
}

impl HttpGateway {
    /// Creates a gateway client with the default 10s timeout.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Internal` if the HTTP client cannot be
    /// created.
    pub fn new(base_url: impl Into<String>) -> GatewayResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_MS)
    }

    /// Creates a gateway client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Internal` if the HTTP client cannot be
    /// created.
    pub fn with_timeout(base_url: impl Into<String>, timeout_ms: u64) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                GatewayError::internal(format!("failed to create HTTP client: {}", e))
            })?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            timeout_ms,
        })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Makes a GET request and deserializes the JSON response.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> GatewayResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                GatewayError::decode(format!("failed to parse response: {}", e))
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &body))
        }
    }

    /// Maps a reqwest error to a GatewayError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::timeout(format!("request timed out after {}ms", self.timeout_ms))
        } else if error.is_connect() {
            GatewayError::connection(format!("connection failed: {}", error))
        } else {
            GatewayError::connection(format!("HTTP request failed: {}", error))
        }
    }
}

/// Maps an HTTP status code to a GatewayError.
fn map_status_error(status: StatusCode, body: &str) -> GatewayError {
    match status {
        StatusCode::NOT_FOUND => GatewayError::not_found(format!("resource not found: {}", body)),
        StatusCode::BAD_REQUEST => {
            GatewayError::invalid_request(format!("bad request: {}", body))
        }
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            GatewayError::server(format!("server error ({}): {}", status, body))
        }
        _ => GatewayError::invalid_request(format!("HTTP error ({}): {}", status, body)),
    }
}

#[async_trait]
impl GatewayApi for HttpGateway {
    async fn latest_blocks(&self, count: usize) -> GatewayResult<Vec<BlockSummary>> {
        self.get(&format!("/api/blocks/latest/{}", count)).await
    }

    async fn block_by_number(&self, height: BlockHeight) -> GatewayResult<BlockDetail> {
        self.get(&format!("/api/blocks/{}", height)).await
    }

    async fn latest_transactions(&self, count: usize) -> GatewayResult<Vec<Transaction>> {
        self.get(&format!("/api/transactions/latest/{}", count)).await
    }

    async fn transaction(&self, hash: &TxHash) -> GatewayResult<Transaction> {
        self.get(&format!("/api/transactions/{}", hash)).await
    }

    async fn transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> GatewayResult<Option<TransactionReceipt>> {
        match self
            .get::<TransactionReceipt>(&format!("/api/transactions/{}/receipt", hash))
            .await
        {
            Ok(receipt) => Ok(Some(receipt)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn account_balance(&self, address: &Address) -> GatewayResult<u128> {
        let response: BalanceResponse = self
            .get(&format!("/api/accounts/{}/balance", address))
            .await?;
        Ok(response.balance)
    }

    async fn token_balance(&self, token: &Address, wallet: &Address) -> GatewayResult<u128> {
        let response: BalanceResponse = self
            .get(&format!("/api/tokens/{}/balances/{}", token, wallet))
            .await?;
        Ok(response.balance)
    }

    async fn network_stats(&self) -> GatewayResult<NetworkStats> {
        self.get("/api/stats").await
    }
}
