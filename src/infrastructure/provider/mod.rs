//! # Signing Provider
//!
//! The externally injected signing capability.
//!
//! The provider is a capability object, not a class hierarchy: the engine
//! depends on the narrow [`SigningProvider`] trait and receives an
//! implementation by injection. [`SimulatedProvider`] substitutes for a
//! real provider in environments where none is present.
//!
//! ## Available Components
//!
//! - [`SigningProvider`]: account listing, balance query, value transfer,
//!   contract call execution, account-change notifications
//! - [`AccountWatch`]: explicit subscription handle for account changes
//! - [`SimulatedProvider`]: local simulation
//! - [`ProviderError`]: provider failures, surfaced verbatim

pub mod simulated;
pub mod traits;

pub use simulated::SimulatedProvider;
pub use traits::{
    AccountWatch, FunctionCallRequest, ProviderError, ProviderResult, SigningProvider,
};
