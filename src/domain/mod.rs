//! # Domain Layer
//!
//! Value objects and entities of the explorer engine.
//!
//! - [`value_objects`]: validated identifiers (addresses, hashes, block
//!   heights), timestamps, and unit formatting
//! - [`entities`]: blocks, transactions, receipts, and contract
//!   descriptors as delivered by the chain-data gateway

pub mod entities;
pub mod value_objects;
