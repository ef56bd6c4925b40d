//! # Application Layer
//!
//! The engine's use cases:
//!
//! - [`sync`]: poll-driven list synchronization with independent detail
//!   selection
//! - [`gas`]: bounded gas-price time series fed by polling and a push
//!   stream
//! - [`contracts`]: ABI catalog, call dispatch, and the descriptor
//!   registry
//! - [`wallet`]: account session over the signing provider

pub mod contracts;
pub mod gas;
pub mod sync;
pub mod wallet;
