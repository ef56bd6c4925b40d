//! # Contract Session
//!
//! The user's working state against one contract: address text, raw
//! interface text, the parsed catalog, a selected function, and one
//! argument slot per declared input.
//!
//! A selection is a reference into the current catalog, so every
//! successful re-parse wholly replaces the catalog and clears the
//! selection and arguments; a failed parse changes nothing.

use crate::domain::entities::ContractDescriptor;
use thiserror::Error;

use super::abi::{AbiCatalog, AbiFunctionEntry, AbiParseError};

/// Error type for session state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The selected index does not exist in the current catalog.
    #[error("no function at index {index} in a catalog of {len}")]
    InvalidSelection {
        /// Requested index.
        index: usize,
        /// Catalog length.
        len: usize,
    },

    /// The argument index does not match the selected function's inputs.
    #[error("no argument slot {index} for the selected function")]
    ArgumentOutOfRange {
        /// Requested slot index.
        index: usize,
    },
}

/// Working state for inspecting and calling one contract.
#[derive(Debug, Clone, Default)]
pub struct ContractSession {
    address_text: String,
    interface_text: String,
    catalog: AbiCatalog,
    selected: Option<usize>,
    arguments: Vec<String>,
}

impl ContractSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the contract address text.
    pub fn set_address_text(&mut self, address: impl Into<String>) {
        self.address_text = address.into();
    }

    /// Returns the contract address text.
    #[must_use]
    pub fn address_text(&self) -> &str {
        &self.address_text
    }

    /// Sets the raw interface description text.
    pub fn set_interface_text(&mut self, text: impl Into<String>) {
        self.interface_text = text.into();
    }

    /// Returns the raw interface description text.
    #[must_use]
    pub fn interface_text(&self) -> &str {
        &self.interface_text
    }

    /// Parses the current interface text into a fresh catalog.
    ///
    /// On success the catalog is replaced and the previous selection and
    /// arguments are cleared. On failure the previous catalog, selection,
    /// and arguments all stay intact.
    ///
    /// Returns the number of callable functions found.
    ///
    /// # Errors
    ///
    /// Returns [`AbiParseError`] when the interface text is not a valid
    /// JSON element array.
    pub fn parse_interface(&mut self) -> Result<usize, AbiParseError> {
        let catalog = AbiCatalog::parse(&self.interface_text)?;
        let count = catalog.len();
        self.catalog = catalog;
        self.selected = None;
        self.arguments.clear();
        Ok(count)
    }

    /// Loads a stored descriptor and re-parses its interface text.
    ///
    /// # Errors
    ///
    /// Returns [`AbiParseError`] when the stored interface text no longer
    /// parses; the session then keeps its previous catalog but has the
    /// descriptor's address and text loaded.
    pub fn load_descriptor(
        &mut self,
        descriptor: &ContractDescriptor,
    ) -> Result<usize, AbiParseError> {
        self.address_text = descriptor.address.to_string();
        self.interface_text = descriptor.interface_text.clone();
        self.parse_interface()
    }

    /// Returns the current catalog.
    #[must_use]
    pub fn catalog(&self) -> &AbiCatalog {
        &self.catalog
    }

    /// Selects a function by catalog index, resetting the argument slots
    /// to one empty slot per declared input.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidSelection`] when the index is out
    /// of range for the current catalog.
    pub fn select_function(&mut self, index: usize) -> Result<&AbiFunctionEntry, SessionError> {
        let entry = self
            .catalog
            .get(index)
            .ok_or(SessionError::InvalidSelection {
                index,
                len: self.catalog.len(),
            })?;
        self.selected = Some(index);
        self.arguments = vec![String::new(); entry.inputs.len()];
        Ok(entry)
    }

    /// Returns the selected function, if any.
    #[must_use]
    pub fn selected_function(&self) -> Option<&AbiFunctionEntry> {
        self.catalog.get(self.selected?)
    }

    /// Sets one positional argument of the selected function.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ArgumentOutOfRange`] when no such slot
    /// exists.
    pub fn set_argument(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        match self.arguments.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(SessionError::ArgumentOutOfRange { index }),
        }
    }

    /// Returns the argument slots, aligned 1:1 with the selected
    /// function's inputs.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Address;

    const TOKEN_ABI: &str = r#"[
        {"type": "function", "name": "balanceOf", "stateMutability": "view",
         "inputs": [{"name": "owner", "type": "address"}]},
        {"type": "function", "name": "transfer", "stateMutability": "nonpayable",
         "inputs": [{"name": "to", "type": "address"}, {"name": "value", "type": "uint256"}]}
    ]"#;

    fn parsed_session() -> ContractSession {
        let mut session = ContractSession::new();
        session.set_address_text("0xe9e7cea3dedca5984780bafc599bd69add087d56");
        session.set_interface_text(TOKEN_ABI);
        session.parse_interface().unwrap();
        session
    }

    #[test]
    fn parse_builds_catalog_and_reports_count() {
        let session = parsed_session();
        assert_eq!(session.catalog().len(), 2);
        assert!(session.selected_function().is_none());
    }

    #[test]
    fn select_function_sizes_argument_slots() {
        let mut session = parsed_session();
        let entry = session.select_function(1).unwrap();
        assert_eq!(entry.name, "transfer");
        assert_eq!(session.arguments().len(), 2);
        assert!(session.arguments().iter().all(String::is_empty));
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let mut session = parsed_session();
        let error = session.select_function(9).unwrap_err();
        assert_eq!(error, SessionError::InvalidSelection { index: 9, len: 2 });
    }

    #[test]
    fn set_argument_fills_slot() {
        let mut session = parsed_session();
        session.select_function(1).unwrap();
        session.set_argument(0, "0x01").unwrap();
        assert_eq!(session.arguments(), ["0x01", ""]);

        assert!(session.set_argument(5, "x").is_err());
    }

    #[test]
    fn reparse_clears_selection_and_arguments() {
        let mut session = parsed_session();
        session.select_function(1).unwrap();
        session.set_argument(0, "0x01").unwrap();

        session.set_interface_text(
            r#"[{"type": "function", "name": "name", "stateMutability": "view", "inputs": []}]"#,
        );
        let count = session.parse_interface().unwrap();
        assert_eq!(count, 1);
        assert!(session.selected_function().is_none());
        assert!(session.arguments().is_empty());
    }

    #[test]
    fn failed_parse_is_non_destructive() {
        let mut session = parsed_session();
        session.select_function(0).unwrap();

        session.set_interface_text("{broken");
        assert!(session.parse_interface().is_err());

        // Previous catalog and selection survive.
        assert_eq!(session.catalog().len(), 2);
        assert_eq!(session.selected_function().unwrap().name, "balanceOf");
    }

    #[test]
    fn load_descriptor_roundtrip() {
        let descriptor = ContractDescriptor::new(
            Address::new("0xe9e7cea3dedca5984780bafc599bd69add087d56"),
            TOKEN_ABI,
            "Contract 1",
        );

        let mut session = ContractSession::new();
        let count = session.load_descriptor(&descriptor).unwrap();
        assert_eq!(count, 2);
        assert_eq!(session.address_text(), descriptor.address.as_str());

        // The recomputed catalog matches a direct parse of the stored text.
        assert_eq!(
            session.catalog(),
            &AbiCatalog::parse(&descriptor.interface_text).unwrap()
        );
    }
}
