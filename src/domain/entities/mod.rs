//! # Domain Entities
//!
//! Chain data as delivered by the gateway, plus the contract descriptors
//! the user saves locally.
//!
//! ## Entities
//!
//! - [`BlockSummary`], [`BlockDetail`]: list row and full block
//! - [`Transaction`], [`TransactionReceipt`]: transfer data and its
//!   optional execution receipt
//! - [`ContractDescriptor`]: a saved (address, interface description) pair
//!
//! Fetched chain data is immutable; entities carry no behavior beyond
//! classification helpers.

pub mod block;
pub mod contract;
pub mod transaction;

pub use block::{BlockDetail, BlockSummary, TransactionRef};
pub use contract::ContractDescriptor;
pub use transaction::{LogEntry, ReceiptStatus, Transaction, TransactionKind, TransactionReceipt};
