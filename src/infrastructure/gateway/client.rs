//! # Gateway Client Trait
//!
//! Port definition for the chain-data gateway's request/response surface.
//!
//! The gateway itself is an external collaborator; this module fixes only
//! the interface the engine depends on. [`HttpGateway`] is the production
//! adapter; tests substitute their own implementations.
//!
//! [`HttpGateway`]: super::http::HttpGateway

use crate::domain::entities::{BlockDetail, BlockSummary, Transaction, TransactionReceipt};
use crate::domain::value_objects::{Address, BlockHeight, TxHash};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::GatewayResult;

/// Network statistics snapshot from the gateway's `/api/stats` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    /// Height of the most recent block.
    pub latest_block_number: u64,
    /// Timestamp of the most recent block in unix seconds.
    pub latest_block_timestamp: i64,
    /// Transaction count of the most recent block.
    pub latest_block_tx_count: u32,
    /// Current gas price in gwei.
    pub gas_price_gwei: f64,
    /// Average block time over the recent window, in seconds.
    pub avg_block_time: f64,
}

/// Trait for chain-data gateway operations.
///
/// Every method is a single request/response call; streaming channels
/// live behind [`StreamSource`](super::stream::StreamSource).
#[async_trait]
pub trait GatewayApi: Send + Sync + fmt::Debug {
    /// Fetches the most recent `count` block summaries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// decoded.
    async fn latest_blocks(&self, count: usize) -> GatewayResult<Vec<BlockSummary>>;

    /// Fetches the full detail of one block by height.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`](super::GatewayError::NotFound)
    /// if no block exists at `height`, or a transport error otherwise.
    async fn block_by_number(&self, height: BlockHeight) -> GatewayResult<BlockDetail>;

    /// Fetches the most recent `count` transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// decoded.
    async fn latest_transactions(&self, count: usize) -> GatewayResult<Vec<Transaction>>;

    /// Fetches one transaction by hash.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`](super::GatewayError::NotFound)
    /// if the transaction is unknown, or a transport error otherwise.
    async fn transaction(&self, hash: &TxHash) -> GatewayResult<Transaction>;

    /// Fetches the receipt of one transaction, if it exists yet.
    ///
    /// A missing receipt is a valid state (the transaction is pending)
    /// and maps to `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request itself fails.
    async fn transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> GatewayResult<Option<TransactionReceipt>>;

    /// Fetches the native-coin balance of an account in wei.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn account_balance(&self, address: &Address) -> GatewayResult<u128>;

    /// Fetches a token balance for a wallet in the token's smallest unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn token_balance(&self, token: &Address, wallet: &Address) -> GatewayResult<u128>;

    /// Fetches the current network statistics snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// decoded.
    async fn network_stats(&self) -> GatewayResult<NetworkStats>;
}
