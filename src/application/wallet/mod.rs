//! # Wallet Session
//!
//! Account session over the signing provider: connect/disconnect,
//! balance lookups, value transfers, and account-change handling.

pub mod manager;

pub use manager::{WalletError, WalletSession};
