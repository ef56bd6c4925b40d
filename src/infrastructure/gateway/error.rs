//! # Gateway Errors
//!
//! Error types for chain-data gateway operations.
//!
//! Timeouts are shaped identically to any other transient network
//! failure: the synchronizer treats both as "keep the previous data and
//! surface a dismissible message".
//!
//! # Examples
//!
//! ```
//! use chainscope::infrastructure::gateway::GatewayError;
//!
//! let error = GatewayError::timeout("request timed out after 10000ms");
//! assert!(error.is_retryable());
//!
//! let error = GatewayError::not_found("block 999999999");
//! assert!(!error.is_retryable());
//! assert!(error.is_not_found());
//! ```

use thiserror::Error;

/// Error type for gateway operations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Request timed out.
    #[error("gateway timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection error.
    #[error("gateway connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Requested entity does not exist.
    #[error("gateway resource not found: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// The gateway rejected the request as malformed.
    #[error("gateway rejected request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// The gateway failed server-side.
    #[error("gateway server error: {message}")]
    Server {
        /// Error message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("gateway response decode error: {message}")]
    Decode {
        /// Error message.
        message: String,
    },

    /// Internal client error.
    #[error("gateway client internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl GatewayError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates an invalid-request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a server error.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::Server { .. }
        )
    }

    /// Returns true if this is a not-found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_retryable() {
        let error = GatewayError::timeout("test");
        assert!(error.is_retryable());
        assert!(!error.is_not_found());
    }

    #[test]
    fn connection_is_retryable() {
        assert!(GatewayError::connection("test").is_retryable());
    }

    #[test]
    fn server_is_retryable() {
        assert!(GatewayError::server("502").is_retryable());
    }

    #[test]
    fn not_found_is_not_retryable() {
        let error = GatewayError::not_found("block 42");
        assert!(!error.is_retryable());
        assert!(error.is_not_found());
    }

    #[test]
    fn decode_is_not_retryable() {
        assert!(!GatewayError::decode("bad json").is_retryable());
    }

    #[test]
    fn display_format() {
        let error = GatewayError::timeout("request timed out");
        assert!(error.to_string().contains("timeout"));
        assert!(error.to_string().contains("request timed out"));
    }
}
