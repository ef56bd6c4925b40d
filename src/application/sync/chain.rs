//! # Chain List Sources
//!
//! Block and transaction sources for the [`ListSynchronizer`], plus the
//! validated manual-lookup paths.
//!
//! Manual lookups validate user input locally first; malformed input is
//! rejected with the offending field named and issues zero gateway
//! calls.

use crate::domain::entities::{BlockDetail, BlockSummary, Transaction, TransactionReceipt};
use crate::domain::value_objects::{BlockHeight, TxHash, ValidationError};
use crate::infrastructure::gateway::{GatewayApi, GatewayResult};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use super::synchronizer::{DetailOutcome, ListSource, ListSynchronizer};

/// Default number of rows kept in a synchronized list.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Error type for manual lookups: local validation or gateway failure.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The input was rejected locally; no network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The gateway call failed.
    #[error(transparent)]
    Gateway(#[from] crate::infrastructure::gateway::GatewayError),
}

/// [`ListSource`] over the latest-blocks endpoint.
#[derive(Debug, Clone)]
pub struct BlockSource {
    gateway: Arc<dyn GatewayApi>,
    page_size: usize,
}

impl BlockSource {
    /// Creates a block source fetching `page_size` rows per refresh.
    #[must_use]
    pub fn new(gateway: Arc<dyn GatewayApi>, page_size: usize) -> Self {
        Self { gateway, page_size }
    }
}

#[async_trait]
impl ListSource for BlockSource {
    type Item = BlockSummary;
    type Key = BlockHeight;
    type Detail = BlockDetail;

    async fn fetch_list(&self) -> GatewayResult<Vec<BlockSummary>> {
        self.gateway.latest_blocks(self.page_size).await
    }

    async fn fetch_detail(&self, key: &BlockHeight) -> GatewayResult<BlockDetail> {
        self.gateway.block_by_number(*key).await
    }
}

/// A selected transaction together with its receipt, when one exists.
///
/// A missing receipt means the transaction is pending; that is a
/// displayable state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetail {
    /// The transaction itself.
    pub transaction: Transaction,
    /// Its execution receipt, if already available.
    pub receipt: Option<TransactionReceipt>,
}

/// [`ListSource`] over the latest-transactions endpoint.
#[derive(Debug, Clone)]
pub struct TransactionSource {
    gateway: Arc<dyn GatewayApi>,
    page_size: usize,
}

impl TransactionSource {
    /// Creates a transaction source fetching `page_size` rows per
    /// refresh.
    #[must_use]
    pub fn new(gateway: Arc<dyn GatewayApi>, page_size: usize) -> Self {
        Self { gateway, page_size }
    }
}

#[async_trait]
impl ListSource for TransactionSource {
    type Item = Transaction;
    type Key = TxHash;
    type Detail = TransactionDetail;

    async fn fetch_list(&self) -> GatewayResult<Vec<Transaction>> {
        self.gateway.latest_transactions(self.page_size).await
    }

    async fn fetch_detail(&self, key: &TxHash) -> GatewayResult<TransactionDetail> {
        let transaction = self.gateway.transaction(key).await?;

        // A receipt fetch failure degrades to "no receipt yet" rather
        // than failing the whole detail.
        let receipt = match self.gateway.transaction_receipt(key).await {
            Ok(receipt) => receipt,
            Err(error) => {
                warn!(error = %error, hash = %key, "receipt fetch failed; showing transaction as pending");
                None
            }
        };

        Ok(TransactionDetail {
            transaction,
            receipt,
        })
    }
}

/// Synchronizer over the latest-blocks list.
pub type BlockSynchronizer = ListSynchronizer<BlockSource>;

/// Synchronizer over the latest-transactions list.
pub type TransactionSynchronizer = ListSynchronizer<TransactionSource>;

impl BlockSynchronizer {
    /// Looks up a block from free-form user input.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Validation`] without any network call
    /// unless the input parses as a non-negative block height, and
    /// [`LookupError::Gateway`] if the subsequent fetch fails.
    pub async fn lookup_block(&self, query: &str) -> Result<DetailOutcome, LookupError> {
        let height = BlockHeight::parse(query)?;
        Ok(self.select_detail(height).await?)
    }
}

impl TransactionSynchronizer {
    /// Looks up a transaction from free-form user input.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Validation`] without any network call
    /// unless the input is `0x` followed by 64 hex digits, and
    /// [`LookupError::Gateway`] if the subsequent fetch fails.
    pub async fn lookup_transaction(&self, query: &str) -> Result<DetailOutcome, LookupError> {
        let hash = TxHash::parse(query)?;
        Ok(self.select_detail(hash).await?)
    }
}
