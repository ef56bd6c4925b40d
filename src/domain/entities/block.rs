//! # Block Entities
//!
//! Block list rows and full block details.
//!
//! A [`BlockSummary`] is what the periodic list refresh carries; a
//! [`BlockDetail`] is resolved independently for the currently selected
//! block and is not touched by the list's refresh cycle.

use crate::domain::value_objects::{Address, TxHash};
use serde::{Deserialize, Serialize};

/// One row of the latest-blocks list.
///
/// Immutable once fetched. Within one synchronizer snapshot, `number`
/// values are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    /// Block height.
    pub number: u64,
    /// Block timestamp in unix seconds.
    pub timestamp: i64,
    /// Number of transactions included in the block.
    pub transaction_count: u32,
    /// Total gas used by the block.
    pub gas_used: u64,
    /// Address of the block's miner.
    pub miner: Address,
}

/// A reference to a transaction inside a block detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRef {
    /// Transaction hash.
    pub hash: TxHash,
    /// Sender address.
    pub from: Address,
    /// Recipient address; absent for contract creation.
    #[serde(default)]
    pub to: Option<Address>,
    /// Transferred value in wei.
    #[serde(default)]
    pub value: u128,
}

/// Full detail of one selected block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDetail {
    /// The summary fields of the block.
    #[serde(flatten)]
    pub summary: BlockSummary,
    /// Block hash (32-byte hex).
    pub hash: String,
    /// Parent block hash (32-byte hex).
    pub parent_hash: String,
    /// Gas limit of the block.
    pub gas_limit: u64,
    /// Block size in bytes.
    pub size: u64,
    /// Mining difficulty.
    pub difficulty: u128,
    /// Block nonce.
    pub nonce: String,
    /// Transactions included in the block, in block order.
    #[serde(default)]
    pub transactions: Vec<TransactionRef>,
}

impl BlockDetail {
    /// Returns the block height.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.summary.number
    }
}
