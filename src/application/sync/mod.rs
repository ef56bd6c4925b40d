//! # List Synchronization
//!
//! Periodic refresh of ordered list data with an independently resolved
//! detail selection.
//!
//! ## Available Components
//!
//! - [`ListSynchronizer`]: generic poll-driven refresh controller
//! - [`ListSource`]: fetch operations the synchronizer is generic over
//! - [`chain`]: block and transaction sources plus validated manual
//!   lookups

pub mod chain;
pub mod synchronizer;

pub use chain::{
    BlockSource, BlockSynchronizer, LookupError, TransactionDetail, TransactionSource,
    TransactionSynchronizer,
};
pub use synchronizer::{DetailOutcome, ListSource, ListSynchronizer, RefreshOutcome, SyncConfig};
