//! # Chainscope
//!
//! Client-side chain-data synchronization and contract-interaction engine
//! for a ledger explorer.
//!
//! The crate keeps block and transaction lists fresh against a remote
//! chain-data gateway, reduces an irregular gas-price feed to a bounded
//! time series, parses contract interface descriptions into a typed
//! function catalog, and dispatches validated function calls through an
//! injected signing provider.
//!
//! ## Architecture
//!
//! The crate follows a layered architecture:
//!
//! - **Domain Layer** (`domain`): Value objects and entities (addresses,
//!   hashes, blocks, transactions, receipts, contract descriptors)
//! - **Application Layer** (`application`): List synchronization, gas
//!   history, ABI catalog, call dispatch, descriptor registry, wallet
//!   session
//! - **Infrastructure Layer** (`infrastructure`): Gateway, signing
//!   provider, and persistent store adapters
//!
//! ## Example
//!
//! ```rust,ignore
//! use chainscope::application::sync::{ListSynchronizer, SyncConfig};
//! use chainscope::application::sync::chain::BlockSource;
//! use chainscope::infrastructure::gateway::HttpGateway;
//! use std::sync::Arc;
//!
//! let gateway = Arc::new(HttpGateway::new("http://localhost:8000")?);
//! let blocks = ListSynchronizer::new(BlockSource::new(gateway, 20), SyncConfig::default());
//! blocks.activate();
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
