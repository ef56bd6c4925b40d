//! # Store Trait
//!
//! Port definition for the persistent key-value store.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing storage is unavailable or failed.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
    },

    /// A value could not be written or read back.
    #[error("store i/o error: {message}")]
    Io {
        /// Error message.
        message: String,
    },
}

impl StoreError {
    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates an i/o error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for the host's persistent key-value store.
///
/// Values are opaque strings; serialization is the caller's concern.
/// Writes replace the slot wholesale.
#[async_trait]
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Reads a slot; `None` if the slot was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    async fn read(&self, slot: &str) -> StoreResult<Option<String>>;

    /// Writes a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    async fn write(&self, slot: &str, value: &str) -> StoreResult<()>;

    /// Removes a slot; a missing slot is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    async fn remove(&self, slot: &str) -> StoreResult<()>;
}
