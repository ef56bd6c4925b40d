//! # Contract Call Dispatcher
//!
//! Validates a function invocation, classifies it as read or write, and
//! delegates execution to the signing provider.
//!
//! Every invocation resolves to a uniform [`CallOutcome`] envelope:
//! exactly one of payload or error message is present, selected by the
//! success flag, and every outcome is timestamped at completion. Failed
//! preconditions are reported individually — a missing-argument failure
//! enumerates the specific parameter names — and never reach the
//! provider.

use crate::domain::value_objects::{Address, Timestamp, ValidationError};
use crate::infrastructure::provider::{
    FunctionCallRequest, ProviderError, SigningProvider, SimulatedProvider,
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::abi::AbiFunctionEntry;

/// Uniform result envelope of one dispatched call.
///
/// Exactly one of `payload` and `error_message` is present, selected by
/// `succeeded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    /// Whether the call succeeded.
    pub succeeded: bool,
    /// Hex result of a read, or the transaction hash of a write.
    pub payload: Option<String>,
    /// Failure message; provider messages are carried verbatim.
    pub error_message: Option<String>,
    /// When the outcome was produced, regardless of success.
    pub completed_at: Timestamp,
}

impl CallOutcome {
    /// Creates a success outcome completed now.
    #[must_use]
    pub fn success(payload: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            payload: Some(payload.into()),
            error_message: None,
            completed_at: Timestamp::now(),
        }
    }

    /// Creates a failure outcome completed now.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            payload: None,
            error_message: Some(message.into()),
            completed_at: Timestamp::now(),
        }
    }
}

/// Error type for invocation preconditions and execution.
///
/// Each precondition is a distinct variant so failures are reported
/// independently.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// No caller account; the provider is not connected.
    #[error("no caller account: connect the signing provider first")]
    NoCallerAccount,

    /// The target address is empty.
    #[error("contract address must not be empty")]
    EmptyAddress,

    /// The target address is malformed.
    #[error(transparent)]
    InvalidAddress(#[from] ValidationError),

    /// No function is selected from the current catalog.
    #[error("no function selected from the current catalog")]
    NoFunctionSelected,

    /// One or more argument slots are empty.
    #[error("missing arguments for parameters: {}", missing.join(", "))]
    MissingArguments {
        /// Names of the unfilled parameters, in declaration order.
        missing: Vec<String>,
    },

    /// The provider failed or rejected the request.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Classification of a validated invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallPath {
    /// Read-only; executed synchronously against the provider.
    Read,
    /// State-changing; submitted as a transaction, pending until
    /// separately confirmed.
    Write,
}

/// Dispatches validated contract calls to a signing provider.
pub struct CallDispatcher {
    provider: Arc<dyn SigningProvider>,
}

impl fmt::Debug for CallDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallDispatcher").finish_non_exhaustive()
    }
}

impl CallDispatcher {
    /// Creates a dispatcher over an injected provider.
    #[must_use]
    pub fn new(provider: Arc<dyn SigningProvider>) -> Self {
        Self { provider }
    }

    /// Creates a dispatcher over the local simulation, for environments
    /// with no real provider.
    #[must_use]
    pub fn simulated() -> Self {
        Self::new(Arc::new(SimulatedProvider::new()))
    }

    /// Validates and executes one function invocation.
    ///
    /// Preconditions checked in order, each independently reported: a
    /// caller account is present; the address text is non-empty and
    /// well-formed; a function is selected; every positional argument
    /// slot is filled. Validation failures produce a failure outcome
    /// without any provider call.
    ///
    /// A `view` (or legacy constant) function routes to the read path
    /// and yields its result payload; any other mutability routes to the
    /// write path and yields the pending transaction's hash.
    pub async fn invoke(
        &self,
        address_text: &str,
        entry: Option<&AbiFunctionEntry>,
        arguments: &[String],
        caller: Option<&Address>,
    ) -> CallOutcome {
        let (request, path) = match Self::validate(address_text, entry, arguments, caller) {
            Ok(prepared) => prepared,
            Err(error) => return CallOutcome::failure(error.to_string()),
        };

        debug!(
            function = %request.function,
            contract = %request.contract,
            path = ?path,
            "dispatching contract call"
        );

        let result = match path {
            CallPath::Read => self.provider.call_function(&request).await,
            CallPath::Write => self
                .provider
                .submit_function(&request)
                .await
                .map(|hash| hash.to_string()),
        };

        match result {
            Ok(payload) => CallOutcome::success(payload),
            Err(error) => CallOutcome::failure(error.to_string()),
        }
    }

    /// Checks every precondition and assembles the provider request.
    fn validate(
        address_text: &str,
        entry: Option<&AbiFunctionEntry>,
        arguments: &[String],
        caller: Option<&Address>,
    ) -> Result<(FunctionCallRequest, CallPath), DispatchError> {
        let caller = caller.ok_or(DispatchError::NoCallerAccount)?;

        let address_text = address_text.trim();
        if address_text.is_empty() {
            return Err(DispatchError::EmptyAddress);
        }
        let contract = Address::parse(address_text)?;

        let entry = entry.ok_or(DispatchError::NoFunctionSelected)?;

        let missing: Vec<String> = entry
            .inputs
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                arguments
                    .get(*i)
                    .is_none_or(|value| value.trim().is_empty())
            })
            .map(|(i, input)| input.display_name(i))
            .collect();
        if !missing.is_empty() {
            return Err(DispatchError::MissingArguments { missing });
        }

        let path = if entry.mutability.is_read_only() {
            CallPath::Read
        } else {
            CallPath::Write
        };

        Ok((
            FunctionCallRequest {
                contract,
                function: entry.name.clone(),
                arguments: arguments.to_vec(),
                caller: caller.clone(),
            },
            path,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::contracts::abi::{AbiParameter, Mutability};
    use crate::domain::value_objects::TxHash;
    use crate::infrastructure::provider::{AccountWatch, ProviderResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::broadcast;

    const CONTRACT: &str = "0xe9e7cea3dedca5984780bafc599bd69add087d56";

    fn caller() -> Address {
        Address::new(format!("0x{}", "11".repeat(20)))
    }

    fn view_entry() -> AbiFunctionEntry {
        AbiFunctionEntry {
            name: "allowance".to_string(),
            inputs: vec![
                AbiParameter {
                    name: "owner".to_string(),
                    solidity_type: "address".to_string(),
                },
                AbiParameter {
                    name: "spender".to_string(),
                    solidity_type: "address".to_string(),
                },
            ],
            mutability: Mutability::View,
        }
    }

    fn write_entry() -> AbiFunctionEntry {
        AbiFunctionEntry {
            name: "transfer".to_string(),
            inputs: vec![AbiParameter {
                name: "to".to_string(),
                solidity_type: "address".to_string(),
            }],
            mutability: Mutability::Nonpayable,
        }
    }

    /// Provider double that counts calls and can be told to reject.
    #[derive(Debug, Default)]
    struct ScriptedProvider {
        calls: AtomicUsize,
        reject_with: Option<String>,
    }

    impl ScriptedProvider {
        fn rejecting(message: &str) -> Self {
            Self {
                reject_with: Some(message.to_string()),
                ..Self::default()
            }
        }

        fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn check(&self) -> ProviderResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reject_with {
                Some(message) => Err(ProviderError::rejected(message.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl SigningProvider for ScriptedProvider {
        async fn list_accounts(&self) -> ProviderResult<Vec<Address>> {
            Ok(vec![caller()])
        }
        async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
            Ok(vec![caller()])
        }
        async fn balance(&self, _address: &Address) -> ProviderResult<u128> {
            Ok(0)
        }
        async fn send_value(
            &self,
            _from: &Address,
            _to: &Address,
            _amount_wei: u128,
        ) -> ProviderResult<TxHash> {
            self.check()?;
            Ok(TxHash::new("0xdd"))
        }
        async fn call_function(&self, _request: &FunctionCallRequest) -> ProviderResult<String> {
            self.check()?;
            Ok("0x2a".to_string())
        }
        async fn submit_function(
            &self,
            _request: &FunctionCallRequest,
        ) -> ProviderResult<TxHash> {
            self.check()?;
            Ok(TxHash::new(format!("0x{}", "ee".repeat(32))))
        }
        fn subscribe_accounts(&self) -> AccountWatch {
            let (tx, _) = broadcast::channel(1);
            AccountWatch::new(tx.subscribe())
        }
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[tokio::test]
    async fn view_call_with_all_arguments_succeeds() {
        let dispatcher = CallDispatcher::new(Arc::new(ScriptedProvider::default()));
        let outcome = dispatcher
            .invoke(
                CONTRACT,
                Some(&view_entry()),
                &args(&["0x01", "0x02"]),
                Some(&caller()),
            )
            .await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.payload.as_deref(), Some("0x2a"));
        assert!(outcome.error_message.is_none());
    }

    #[tokio::test]
    async fn write_call_yields_transaction_hash() {
        let dispatcher = CallDispatcher::new(Arc::new(ScriptedProvider::default()));
        let outcome = dispatcher
            .invoke(CONTRACT, Some(&write_entry()), &args(&["0x01"]), Some(&caller()))
            .await;

        assert!(outcome.succeeded);
        let payload = outcome.payload.unwrap();
        assert_eq!(payload.len(), 66);
    }

    #[tokio::test]
    async fn missing_argument_names_the_parameter_and_skips_provider() {
        let provider = Arc::new(ScriptedProvider::default());
        let dispatcher = CallDispatcher::new(Arc::clone(&provider) as Arc<dyn SigningProvider>);

        let outcome = dispatcher
            .invoke(
                CONTRACT,
                Some(&view_entry()),
                &args(&["0x01", ""]),
                Some(&caller()),
            )
            .await;

        assert!(!outcome.succeeded);
        let message = outcome.error_message.unwrap();
        assert!(message.contains("spender"));
        assert!(!message.contains("owner"));
        assert_eq!(provider.count(), 0);
    }

    #[tokio::test]
    async fn short_argument_list_enumerates_all_missing() {
        let dispatcher = CallDispatcher::new(Arc::new(ScriptedProvider::default()));
        let outcome = dispatcher
            .invoke(CONTRACT, Some(&view_entry()), &[], Some(&caller()))
            .await;

        let message = outcome.error_message.unwrap();
        assert!(message.contains("owner"));
        assert!(message.contains("spender"));
    }

    #[tokio::test]
    async fn no_caller_account_is_its_own_failure() {
        let dispatcher = CallDispatcher::new(Arc::new(ScriptedProvider::default()));
        let outcome = dispatcher
            .invoke(CONTRACT, Some(&view_entry()), &args(&["0x01", "0x02"]), None)
            .await;

        assert!(!outcome.succeeded);
        assert!(outcome.error_message.unwrap().contains("no caller account"));
    }

    #[tokio::test]
    async fn empty_address_is_its_own_failure() {
        let dispatcher = CallDispatcher::new(Arc::new(ScriptedProvider::default()));
        let outcome = dispatcher
            .invoke("  ", Some(&view_entry()), &args(&["a", "b"]), Some(&caller()))
            .await;

        assert!(outcome.error_message.unwrap().contains("must not be empty"));
    }

    #[tokio::test]
    async fn malformed_address_is_rejected_locally() {
        let provider = Arc::new(ScriptedProvider::default());
        let dispatcher = CallDispatcher::new(Arc::clone(&provider) as Arc<dyn SigningProvider>);

        let outcome = dispatcher
            .invoke("0x1234", Some(&view_entry()), &args(&["a", "b"]), Some(&caller()))
            .await;

        assert!(!outcome.succeeded);
        assert!(outcome.error_message.unwrap().contains("invalid address"));
        assert_eq!(provider.count(), 0);
    }

    #[tokio::test]
    async fn no_selected_function_is_its_own_failure() {
        let dispatcher = CallDispatcher::new(Arc::new(ScriptedProvider::default()));
        let outcome = dispatcher.invoke(CONTRACT, None, &[], Some(&caller())).await;

        assert!(outcome.error_message.unwrap().contains("no function selected"));
    }

    #[tokio::test]
    async fn provider_rejection_is_surfaced_verbatim() {
        let dispatcher = CallDispatcher::new(Arc::new(ScriptedProvider::rejecting(
            "User denied transaction signature.",
        )));
        let outcome = dispatcher
            .invoke(CONTRACT, Some(&write_entry()), &args(&["0x01"]), Some(&caller()))
            .await;

        assert!(!outcome.succeeded);
        assert_eq!(
            outcome.error_message.as_deref(),
            Some("User denied transaction signature.")
        );
        assert!(outcome.payload.is_none());
    }

    #[tokio::test]
    async fn simulated_dispatcher_serves_reads_and_writes() {
        let dispatcher = CallDispatcher::simulated();
        let account = caller();

        let read = dispatcher
            .invoke(
                CONTRACT,
                Some(&view_entry()),
                &args(&["0x01", "0x02"]),
                Some(&account),
            )
            .await;
        assert!(read.succeeded);
        assert!(read.payload.unwrap().starts_with("0x"));

        let write = dispatcher
            .invoke(CONTRACT, Some(&write_entry()), &args(&["0x01"]), Some(&account))
            .await;
        assert!(write.succeeded);
        assert_eq!(write.payload.unwrap().len(), 66);
    }

    #[tokio::test]
    async fn outcome_is_timestamped_on_failure_too() {
        let dispatcher = CallDispatcher::new(Arc::new(ScriptedProvider::default()));
        let before = Timestamp::now();
        let outcome = dispatcher.invoke(CONTRACT, None, &[], Some(&caller())).await;
        assert!(outcome.completed_at >= before);
        assert!(outcome.completed_at <= Timestamp::now());
    }
}
