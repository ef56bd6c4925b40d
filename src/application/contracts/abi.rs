//! # ABI Catalog
//!
//! Parses a raw interface description into a typed function catalog.
//!
//! The input is the JSON array a contract author publishes: a sequence
//! of interface elements of mixed kinds. Only `function` elements reach
//! the catalog, in their original relative order; constructors, events,
//! fallback, and receive elements are dropped.
//!
//! Parsing is non-destructive: a failure leaves any previously built
//! catalog untouched (the caller replaces its catalog only on success).

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Error type for interface-description parsing.
#[derive(Debug, Clone, Error)]
pub enum AbiParseError {
    /// The text is not valid JSON or not an array of elements.
    #[error("interface description is not valid JSON: {cause}")]
    InvalidJson {
        /// Human-readable parse failure.
        cause: String,
    },
}

impl AbiParseError {
    /// Creates an invalid-JSON error.
    #[must_use]
    pub fn invalid_json(cause: impl Into<String>) -> Self {
        Self::InvalidJson {
            cause: cause.into(),
        }
    }
}

/// State mutability of a catalog function.
///
/// Legacy interface dialects omit `stateMutability` and flag read-only
/// functions with `constant: true`; normalization maps those to
/// [`Mutability::View`] and everything else unmarked to
/// [`Mutability::Nonpayable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// Read-only; routed to the call path.
    View,
    /// State-changing and payable.
    Payable,
    /// State-changing, not payable.
    Nonpayable,
}

impl Mutability {
    /// Normalizes the declared markers of one interface element.
    #[must_use]
    fn from_markers(state_mutability: Option<&str>, constant: Option<bool>) -> Self {
        match state_mutability {
            Some("view") => Self::View,
            Some("payable") => Self::Payable,
            Some(_) => Self::Nonpayable,
            None => {
                if constant == Some(true) {
                    Self::View
                } else {
                    Self::Nonpayable
                }
            }
        }
    }

    /// Returns true if invoking this function cannot change state.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::View)
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View => write!(f, "view"),
            Self::Payable => write!(f, "payable"),
            Self::Nonpayable => write!(f, "nonpayable"),
        }
    }
}

/// One declared input of a catalog function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiParameter {
    /// Parameter name; may be empty in the source interface.
    pub name: String,
    /// Declared Solidity type, e.g. `uint256` or `address`.
    pub solidity_type: String,
}

impl AbiParameter {
    /// Returns the parameter name, or a positional placeholder when the
    /// interface leaves it unnamed.
    #[must_use]
    pub fn display_name(&self, position: usize) -> String {
        if self.name.is_empty() {
            format!("arg{}", position)
        } else {
            self.name.clone()
        }
    }
}

/// One callable function from a parsed interface description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiFunctionEntry {
    /// Function name.
    pub name: String,
    /// Declared inputs, in order.
    pub inputs: Vec<AbiParameter>,
    /// Normalized mutability.
    pub mutability: Mutability,
}

impl AbiFunctionEntry {
    /// Renders a display signature: `transfer(address to, uint256 value)`.
    #[must_use]
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .inputs
            .iter()
            .map(|p| format!("{} {}", p.solidity_type, p.name).trim_end().to_string())
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// Raw wire shape of one interface element.
#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<RawParameter>,
    #[serde(rename = "stateMutability", default)]
    state_mutability: Option<String>,
    #[serde(default)]
    constant: Option<bool>,
}

/// Raw wire shape of one declared input.
#[derive(Debug, Deserialize)]
struct RawParameter {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    solidity_type: String,
}

/// The typed function catalog of one parsed interface description.
///
/// Rebuilt wholesale on every successful parse and never merged;
/// selections into an old catalog are invalid against a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbiCatalog {
    functions: Vec<AbiFunctionEntry>,
}

impl AbiCatalog {
    /// Returns an empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a raw interface description.
    ///
    /// # Errors
    ///
    /// Returns [`AbiParseError::InvalidJson`] when the text is not a
    /// JSON array of interface elements. The error carries the parser's
    /// human-readable cause.
    pub fn parse(raw: &str) -> Result<Self, AbiParseError> {
        let elements: Vec<RawElement> = serde_json::from_str(raw)
            .map_err(|e| AbiParseError::invalid_json(e.to_string()))?;

        let functions = elements
            .into_iter()
            .filter(|element| element.kind == "function")
            .map(|element| AbiFunctionEntry {
                name: element.name,
                inputs: element
                    .inputs
                    .into_iter()
                    .map(|input| AbiParameter {
                        name: input.name,
                        solidity_type: input.solidity_type,
                    })
                    .collect(),
                mutability: Mutability::from_markers(
                    element.state_mutability.as_deref(),
                    element.constant,
                ),
            })
            .collect();

        Ok(Self { functions })
    }

    /// Returns the catalog entries in interface order.
    #[must_use]
    pub fn functions(&self) -> &[AbiFunctionEntry] {
        &self.functions
    }

    /// Returns one entry by catalog index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AbiFunctionEntry> {
        self.functions.get(index)
    }

    /// Returns the number of callable functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if the catalog holds no functions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const MIXED_ABI: &str = r#"[
        {"type": "constructor", "inputs": [{"name": "supply", "type": "uint256"}]},
        {"type": "function", "name": "balanceOf", "stateMutability": "view",
         "inputs": [{"name": "owner", "type": "address"}]},
        {"type": "event", "name": "Transfer", "inputs": []},
        {"type": "function", "name": "transfer", "stateMutability": "nonpayable",
         "inputs": [{"name": "to", "type": "address"}, {"name": "value", "type": "uint256"}]},
        {"type": "fallback"}
    ]"#;

    #[test]
    fn keeps_only_functions_in_order() {
        let catalog = AbiCatalog::parse(MIXED_ABI).unwrap();
        assert_eq!(catalog.len(), 2);

        let names: Vec<&str> = catalog.functions().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["balanceOf", "transfer"]);
    }

    #[test]
    fn normalizes_explicit_mutability() {
        let catalog = AbiCatalog::parse(MIXED_ABI).unwrap();
        assert_eq!(catalog.get(0).unwrap().mutability, Mutability::View);
        assert_eq!(catalog.get(1).unwrap().mutability, Mutability::Nonpayable);
    }

    #[test]
    fn legacy_constant_maps_to_view() {
        let catalog = AbiCatalog::parse(
            r#"[
                {"type": "function", "name": "totalSupply", "constant": true, "inputs": []},
                {"type": "function", "name": "mint", "inputs": []}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.get(0).unwrap().mutability, Mutability::View);
        assert_eq!(catalog.get(1).unwrap().mutability, Mutability::Nonpayable);
    }

    #[test]
    fn payable_is_recognized() {
        let catalog = AbiCatalog::parse(
            r#"[{"type": "function", "name": "deposit", "stateMutability": "payable", "inputs": []}]"#,
        )
        .unwrap();
        let entry = catalog.get(0).unwrap();
        assert_eq!(entry.mutability, Mutability::Payable);
        assert!(!entry.mutability.is_read_only());
    }

    #[test]
    fn invalid_json_reports_cause() {
        let error = AbiCatalog::parse("{not json").unwrap_err();
        assert!(error.to_string().contains("not valid JSON"));
    }

    #[test]
    fn object_instead_of_array_is_rejected() {
        assert!(AbiCatalog::parse(r#"{"type": "function"}"#).is_err());
    }

    #[test]
    fn empty_array_yields_empty_catalog() {
        let catalog = AbiCatalog::parse("[]").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn signature_rendering() {
        let catalog = AbiCatalog::parse(MIXED_ABI).unwrap();
        assert_eq!(
            catalog.get(1).unwrap().signature(),
            "transfer(address to, uint256 value)"
        );
        assert_eq!(catalog.get(0).unwrap().signature(), "balanceOf(address owner)");
    }

    #[test]
    fn unnamed_parameter_gets_positional_placeholder() {
        let parameter = AbiParameter {
            name: String::new(),
            solidity_type: "uint256".to_string(),
        };
        assert_eq!(parameter.display_name(1), "arg1");
    }
}
