//! # Transaction Entities
//!
//! Transactions, execution receipts, and their classification.
//!
//! A receipt is fetched only on demand for a selected transaction, and its
//! absence is a displayable state, not an error: the transaction is then
//! pending.

use crate::domain::value_objects::{Address, TxHash};
use serde::{Deserialize, Serialize};

/// A transaction as listed or selected in the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction hash (unique).
    pub hash: TxHash,
    /// Sender address.
    pub from: Address,
    /// Recipient address; absent for contract creation.
    #[serde(default)]
    pub to: Option<Address>,
    /// Transferred value in wei.
    #[serde(default)]
    pub value: u128,
    /// Gas limit supplied by the sender.
    pub gas: u64,
    /// Gas price in wei.
    pub gas_price: u64,
    /// Sender nonce.
    pub nonce: u64,
    /// Call data as `0x`-prefixed hex; `0x` for plain transfers.
    #[serde(default = "empty_input")]
    pub input: String,
    /// Height of the containing block.
    pub block_number: u64,
    /// Timestamp of the containing block in unix seconds.
    pub timestamp: i64,
}

fn empty_input() -> String {
    "0x".to_string()
}

/// Classification of a transaction by destination and payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Plain value transfer.
    Transfer,
    /// Call into an existing contract (non-empty input).
    ContractCall,
    /// Contract creation (no recipient).
    ContractCreation,
}

impl Transaction {
    /// Classifies the transaction.
    #[must_use]
    pub fn kind(&self) -> TransactionKind {
        if self.to.is_none() {
            TransactionKind::ContractCreation
        } else if self.input != "0x" && !self.input.is_empty() {
            TransactionKind::ContractCall
        } else {
            TransactionKind::Transfer
        }
    }
}

/// Execution status of a transaction.
///
/// An explicit tri-state: gateway status code `1` is success, `0` is
/// failure, anything else (including an absent code) means the
/// transaction is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    /// Execution succeeded.
    Success,
    /// Execution reverted or ran out of gas.
    Failure,
    /// Not yet confirmed.
    Pending,
}

impl ReceiptStatus {
    /// Maps a gateway status code to the tri-state.
    #[must_use]
    pub const fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::Success,
            Some(0) => Self::Failure,
            _ => Self::Pending,
        }
    }

    /// Returns the wire code for this status.
    #[must_use]
    pub const fn to_code(self) -> Option<i64> {
        match self {
            Self::Success => Some(1),
            Self::Failure => Some(0),
            Self::Pending => None,
        }
    }

    /// Returns true for [`ReceiptStatus::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

mod receipt_status_codec {
    //! Serde codec mapping [`super::ReceiptStatus`] to its wire code.

    use super::ReceiptStatus;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        status: &ReceiptStatus,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match status.to_code() {
            Some(code) => serializer.serialize_some(&code),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<ReceiptStatus, D::Error> {
        let code = Option::<i64>::deserialize(deserializer)?;
        Ok(ReceiptStatus::from_code(code))
    }
}

/// One log entry emitted during transaction execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Emitting contract address.
    pub address: Address,
    /// Indexed topics, in emission order.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Unindexed data as hex.
    #[serde(default)]
    pub data: String,
}

/// Execution receipt of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Hash of the transaction this receipt belongs to.
    pub transaction_hash: TxHash,
    /// Execution status.
    #[serde(default = "pending", with = "receipt_status_codec")]
    pub status: ReceiptStatus,
    /// Gas used by this transaction.
    pub gas_used: u64,
    /// Cumulative gas used in the block up to this transaction.
    pub cumulative_gas_used: u64,
    /// Address of the created contract, when the transaction deployed one.
    #[serde(default)]
    pub contract_address: Option<Address>,
    /// Logs emitted during execution, in emission order.
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

const fn pending() -> ReceiptStatus {
    ReceiptStatus::Pending
}
