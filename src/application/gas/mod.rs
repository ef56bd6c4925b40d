//! # Gas Price History
//!
//! Bounded time series of gas prices, fed by a periodic statistics poll
//! and by the gateway's push stream.
//!
//! ## Available Components
//!
//! - [`GasHistoryBuffer`]: fixed-capacity FIFO series
//! - [`GasSample`]: one labelled price point
//! - [`GasCollector`]: wires the two producers to the buffer

pub mod collector;
pub mod history;

pub use collector::{GasCollector, GasCollectorConfig};
pub use history::{synthetic_seed, GasHistoryBuffer, GasSample, GAS_HISTORY_CAPACITY};
