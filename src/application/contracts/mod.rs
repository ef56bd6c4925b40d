//! # Contract Interaction
//!
//! From a raw interface description to an executed call:
//!
//! - [`abi`]: parses interface JSON into a typed function catalog
//! - [`session`]: holds the user's catalog, selection, and argument
//!   slots
//! - [`dispatcher`]: validates an invocation, classifies it as read or
//!   write, and delegates to the signing provider
//! - [`registry`]: persists saved (address, interface) descriptors

pub mod abi;
pub mod dispatcher;
pub mod registry;
pub mod session;

pub use abi::{AbiCatalog, AbiFunctionEntry, AbiParameter, AbiParseError, Mutability};
pub use dispatcher::{CallDispatcher, CallOutcome, DispatchError};
pub use registry::{AddOutcome, ContractRegistry, RegistryError, DESCRIPTOR_SLOT};
pub use session::{ContractSession, SessionError};
