//! # Signing Provider Trait
//!
//! Port definition for the user-controlled signing provider.
//!
//! The engine never holds keys and never encodes call data; it hands a
//! validated [`FunctionCallRequest`] to the provider and consumes the
//! provider's answer. Provider-supplied failure messages are preserved
//! verbatim so the user sees exactly what their wallet reported.

use crate::domain::value_objects::{Address, TxHash};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use tokio::sync::broadcast;

/// Error type for signing-provider operations.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// No provider is installed or injected.
    #[error("no signing provider available")]
    Absent,

    /// The provider is present but locked.
    #[error("signing provider is locked")]
    Locked,

    /// The provider rejected the request.
    #[error("{message}")]
    Rejected {
        /// Provider-supplied message, verbatim.
        message: String,
    },

    /// Transport failure between the engine and the provider.
    #[error("provider transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },
}

impl ProviderError {
    /// Creates a rejection carrying the provider's message verbatim.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A validated contract function call handed to the provider.
///
/// Arguments are positional strings aligned 1:1 with the function's
/// declared inputs; the provider performs the binary encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCallRequest {
    /// Target contract address.
    pub contract: Address,
    /// Function name from the parsed catalog.
    pub function: String,
    /// Positional arguments as entered by the user.
    pub arguments: Vec<String>,
    /// Account issuing the call.
    pub caller: Address,
}

/// Subscription handle for account-change notifications.
///
/// Obtained from [`SigningProvider::subscribe_accounts`] at activation
/// and dropped at deactivation; dropping the handle unregisters the
/// subscription. No module-level callback state exists.
#[derive(Debug)]
pub struct AccountWatch {
    receiver: broadcast::Receiver<Vec<Address>>,
}

impl AccountWatch {
    /// Wraps a broadcast receiver of account lists.
    #[must_use]
    pub fn new(receiver: broadcast::Receiver<Vec<Address>>) -> Self {
        Self { receiver }
    }

    /// Waits for the next account change.
    ///
    /// Returns `None` once the provider side is gone. A lagged receiver
    /// skips to the most recent notification rather than erroring: only
    /// the latest account set matters.
    pub async fn changed(&mut self) -> Option<Vec<Address>> {
        loop {
            match self.receiver.recv().await {
                Ok(accounts) => return Some(accounts),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Trait for signing-provider capabilities.
#[async_trait]
pub trait SigningProvider: Send + Sync + fmt::Debug {
    /// Returns the accounts already authorized for this client.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is absent or unreachable.
    async fn list_accounts(&self) -> ProviderResult<Vec<Address>>;

    /// Prompts the user to authorize accounts and returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is absent, locked, or the user
    /// rejects the prompt.
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>>;

    /// Returns the balance of an account in wei.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the query.
    async fn balance(&self, address: &Address) -> ProviderResult<u128>;

    /// Transfers `amount_wei` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects or fails to submit the
    /// transfer.
    async fn send_value(
        &self,
        from: &Address,
        to: &Address,
        amount_wei: u128,
    ) -> ProviderResult<TxHash>;

    /// Executes a read-only function call and returns the hex-encoded
    /// result.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the call.
    async fn call_function(&self, request: &FunctionCallRequest) -> ProviderResult<String>;

    /// Submits a state-changing function call and returns its transaction
    /// hash. The transaction is pending until separately confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects or fails to submit the
    /// transaction.
    async fn submit_function(&self, request: &FunctionCallRequest) -> ProviderResult<TxHash>;

    /// Subscribes to account-change notifications.
    fn subscribe_accounts(&self) -> AccountWatch;
}
