//! # Contract Descriptor
//!
//! A saved (address, interface description) pair.
//!
//! The raw interface text is what gets persisted; the function catalog is
//! always recomputed from it on load, never stored.

use crate::domain::value_objects::{Address, Timestamp};
use serde::{Deserialize, Serialize};

/// A contract the user has saved for later interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDescriptor {
    /// Contract address; unique key within the registry.
    pub address: Address,
    /// Raw JSON text of the interface description.
    pub interface_text: String,
    /// Generated display name (`Contract N`).
    pub display_name: String,
    /// When the descriptor was saved.
    pub saved_at: Timestamp,
}

impl ContractDescriptor {
    /// Creates a descriptor saved at the current moment.
    #[must_use]
    pub fn new(
        address: Address,
        interface_text: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            address,
            interface_text: interface_text.into(),
            display_name: display_name.into(),
            saved_at: Timestamp::now(),
        }
    }
}
