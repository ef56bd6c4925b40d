//! # Block Height
//!
//! Non-negative block number with validated parsing from user input.

use super::validation::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative block number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Creates a block height from a raw number.
    #[must_use]
    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    /// Parses free-form user input as a block height.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlockHeight`] unless the trimmed input
    /// is a plain base-10 non-negative integer.
    pub fn parse(input: &str) -> ValidationResult<Self> {
        let trimmed = input.trim();
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::block_height(trimmed))
    }

    /// Returns the height as a `u64`.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        Self(height)
    }
}
