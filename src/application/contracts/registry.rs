//! # Contract Descriptor Registry
//!
//! CRUD over saved contract descriptors, backed by one slot of the
//! host's persistent store.
//!
//! Persistence is eager and whole-collection: every mutation serializes
//! the full current set and rewrites the slot. The registry is the
//! slot's only writer. A corrupt or unreadable persisted collection at
//! startup degrades to an empty registry; activation never fails for
//! that reason.

use crate::domain::entities::ContractDescriptor;
use crate::domain::value_objects::{Address, ValidationError};
use crate::infrastructure::store::{KeyValueStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Store slot holding the serialized descriptor collection.
pub const DESCRIPTOR_SLOT: &str = "saved_contracts";

/// Error type for registry mutations.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// A required field was empty.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The collection could not be serialized.
    #[error("failed to serialize descriptors: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

/// Result of an [`ContractRegistry::add`] call.
///
/// A duplicate address is a reported condition, not an error: the
/// registry is left unchanged and the caller branches on the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The descriptor was appended and persisted.
    Added(ContractDescriptor),
    /// A descriptor with this address already exists; nothing changed.
    Duplicate,
}

impl AddOutcome {
    /// Returns true for [`AddOutcome::Duplicate`].
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate)
    }
}

/// Registry of saved contract descriptors.
#[derive(Debug)]
pub struct ContractRegistry {
    store: Arc<dyn KeyValueStore>,
    slot: String,
    descriptors: RwLock<Vec<ContractDescriptor>>,
}

impl ContractRegistry {
    /// Creates a registry over the standard descriptor slot.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_slot(store, DESCRIPTOR_SLOT)
    }

    /// Creates a registry over a custom slot name.
    #[must_use]
    pub fn with_slot(store: Arc<dyn KeyValueStore>, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
            descriptors: RwLock::new(Vec::new()),
        }
    }

    /// Loads the persisted collection, once, at activation.
    ///
    /// A missing slot yields an empty registry; an unreadable or corrupt
    /// slot is logged and likewise degrades to empty rather than failing
    /// activation.
    pub async fn activate(&self) {
        let loaded = match self.store.read(&self.slot).await {
            Ok(Some(text)) => match serde_json::from_str::<Vec<ContractDescriptor>>(&text) {
                Ok(descriptors) => descriptors,
                Err(error) => {
                    warn!(error = %error, "persisted descriptors are corrupt; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(error = %error, "persisted descriptors are unreadable; starting empty");
                Vec::new()
            }
        };

        info!(count = loaded.len(), "contract registry activated");
        *self.descriptors.write().await = loaded;
    }

    /// Saves a new descriptor.
    ///
    /// The display name is generated as `Contract N`, with N the 1-based
    /// insertion index. The updated collection is persisted wholesale
    /// before the call returns.
    ///
    /// # Errors
    ///
    /// Returns a validation error when either field is empty (trimmed),
    /// and a store or serialization error when persisting fails; the
    /// in-memory collection is rolled back in that case.
    pub async fn add(
        &self,
        address: &str,
        interface_text: &str,
    ) -> Result<AddOutcome, RegistryError> {
        let address = address.trim();
        let interface_text = interface_text.trim();
        if address.is_empty() {
            return Err(ValidationError::empty("contract address").into());
        }
        if interface_text.is_empty() {
            return Err(ValidationError::empty("interface description").into());
        }

        let mut descriptors = self.descriptors.write().await;
        if descriptors.iter().any(|d| d.address.as_str() == address) {
            return Ok(AddOutcome::Duplicate);
        }

        let descriptor = ContractDescriptor::new(
            Address::new(address),
            interface_text,
            format!("Contract {}", descriptors.len() + 1),
        );
        descriptors.push(descriptor.clone());

        if let Err(error) = self.persist(&descriptors).await {
            descriptors.pop();
            return Err(error);
        }
        Ok(AddOutcome::Added(descriptor))
    }

    /// Removes a descriptor by exact address match.
    ///
    /// Returns true when a descriptor was removed; a missing address is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns a store or serialization error when persisting fails.
    pub async fn remove(&self, address: &str) -> Result<bool, RegistryError> {
        let mut descriptors = self.descriptors.write().await;
        let before = descriptors.len();
        descriptors.retain(|d| d.address.as_str() != address);

        if descriptors.len() == before {
            return Ok(false);
        }
        self.persist(&descriptors).await?;
        Ok(true)
    }

    /// Returns the stored descriptor for an address, for re-parsing by
    /// the caller. Does not itself invoke the parser.
    pub async fn load(&self, address: &str) -> Option<ContractDescriptor> {
        self.descriptors
            .read()
            .await
            .iter()
            .find(|d| d.address.as_str() == address)
            .cloned()
    }

    /// Returns all descriptors in insertion order.
    pub async fn all(&self) -> Vec<ContractDescriptor> {
        self.descriptors.read().await.clone()
    }

    /// Returns the number of saved descriptors.
    pub async fn len(&self) -> usize {
        self.descriptors.read().await.len()
    }

    /// Returns true if no descriptors are saved.
    pub async fn is_empty(&self) -> bool {
        self.descriptors.read().await.is_empty()
    }

    /// Serializes and writes the whole collection to the store slot.
    async fn persist(&self, descriptors: &[ContractDescriptor]) -> Result<(), RegistryError> {
        let json = serde_json::to_string(descriptors).map_err(|e| {
            RegistryError::Serialization {
                message: e.to_string(),
            }
        })?;
        self.store.write(&self.slot, &json).await?;
        Ok(())
    }
}
