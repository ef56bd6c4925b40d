//! # Address and Hash Types
//!
//! Hex identifier newtypes for accounts, contracts, and transactions.
//!
//! Two construction paths exist on purpose: `new` wraps gateway-supplied
//! text unchecked, while `parse` validates free-form user input and is the
//! required entry point before a lookup or dispatch is attempted.

use super::validation::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of hex digits in an address (20 bytes).
const ADDRESS_HEX_DIGITS: usize = 40;

/// Number of hex digits in a transaction hash (32 bytes).
const TX_HASH_HEX_DIGITS: usize = 64;

/// A 20-byte account or contract address in `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wraps an address string without validation.
    ///
    /// Intended for gateway payloads; user input goes through
    /// [`Address::parse`].
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Parses and validates free-form user input as an address.
    ///
    /// Input is trimmed first. The result is the trimmed original text;
    /// case is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Address`] unless the input is `0x`
    /// followed by exactly 40 hex digits.
    pub fn parse(input: &str) -> ValidationResult<Self> {
        let trimmed = input.trim();
        if is_prefixed_hex(trimmed, ADDRESS_HEX_DIGITS) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::address(trimmed))
        }
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a shortened display form: `0xabcd...1234`.
    #[must_use]
    pub fn short(&self) -> String {
        shorten_hex(&self.0, 4)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A 32-byte transaction hash in `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Wraps a transaction hash string without validation.
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Parses and validates free-form user input as a transaction hash.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TransactionHash`] unless the input is
    /// `0x` followed by exactly 64 hex digits.
    pub fn parse(input: &str) -> ValidationResult<Self> {
        let trimmed = input.trim();
        if is_prefixed_hex(trimmed, TX_HASH_HEX_DIGITS) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::transaction_hash(trimmed))
        }
    }

    /// Returns the hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a shortened display form with 8 leading hex digits.
    #[must_use]
    pub fn short(&self) -> String {
        shorten_hex(&self.0, 8)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TxHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Returns true if `input` is `0x` followed by exactly `digits` hex digits.
fn is_prefixed_hex(input: &str, digits: usize) -> bool {
    let Some(body) = input.strip_prefix("0x") else {
        return false;
    };
    body.len() == digits && body.chars().all(|c| c.is_ascii_hexdigit())
}

/// Shortens a hex string to `0x` + `chars` leading digits, an ellipsis,
/// and the trailing 4 digits. Strings too short to shorten are returned
/// unchanged.
#[must_use]
pub fn shorten_hex(value: &str, chars: usize) -> String {
    let head = chars + 2;
    if value.len() <= head + 4 {
        return value.to_string();
    }
    let lead = value.get(..head).unwrap_or(value);
    let tail = value.get(value.len() - 4..).unwrap_or("");
    format!("{}...{}", lead, tail)
}
