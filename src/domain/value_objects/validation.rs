//! # Input Validation Errors
//!
//! Error type for free-form user input rejected before any network call.
//!
//! Every variant names the offending field and the expected shape, so a
//! caller can surface the failure without further classification.

use thiserror::Error;

/// Error type for locally rejected user input.
///
/// Validation happens entirely on the client; input that fails here never
/// reaches the gateway or the signing provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Malformed account or contract address.
    #[error("invalid address `{input}`: expected 0x followed by 40 hex digits")]
    Address {
        /// The rejected input.
        input: String,
    },

    /// Malformed transaction hash.
    #[error("invalid transaction hash `{input}`: expected 0x followed by 64 hex digits")]
    TransactionHash {
        /// The rejected input.
        input: String,
    },

    /// Malformed block height.
    #[error("invalid block height `{input}`: expected a non-negative integer")]
    BlockHeight {
        /// The rejected input.
        input: String,
    },

    /// Malformed or non-positive amount.
    #[error("invalid amount `{input}`: expected a positive decimal number")]
    Amount {
        /// The rejected input.
        input: String,
    },

    /// A required field was left empty.
    #[error("{field} must not be empty")]
    Empty {
        /// Name of the empty field.
        field: &'static str,
    },
}

impl ValidationError {
    /// Creates an address validation error.
    #[must_use]
    pub fn address(input: impl Into<String>) -> Self {
        Self::Address {
            input: input.into(),
        }
    }

    /// Creates a transaction hash validation error.
    #[must_use]
    pub fn transaction_hash(input: impl Into<String>) -> Self {
        Self::TransactionHash {
            input: input.into(),
        }
    }

    /// Creates a block height validation error.
    #[must_use]
    pub fn block_height(input: impl Into<String>) -> Self {
        Self::BlockHeight {
            input: input.into(),
        }
    }

    /// Creates an amount validation error.
    #[must_use]
    pub fn amount(input: impl Into<String>) -> Self {
        Self::Amount {
            input: input.into(),
        }
    }

    /// Creates an empty-field validation error.
    #[must_use]
    pub const fn empty(field: &'static str) -> Self {
        Self::Empty { field }
    }
}

/// Result type for local input validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
