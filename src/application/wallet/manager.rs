//! # Wallet Session
//!
//! Tracks the active provider account and drives the value-transfer and
//! balance-lookup flows.
//!
//! Account-change notifications arrive through an explicit
//! [`AccountWatch`] handle taken at activation and dropped at
//! deactivation; the session itself holds no global callback state. An
//! empty account list from the provider means the user disconnected the
//! wallet.

use crate::domain::value_objects::units::{parse_to_wei, NATIVE_DECIMALS};
use crate::domain::value_objects::{Address, TxHash, ValidationError};
use crate::infrastructure::gateway::{GatewayApi, GatewayError};
use crate::infrastructure::provider::{AccountWatch, ProviderError, SigningProvider};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Error type for wallet operations.
#[derive(Debug, Clone, Error)]
pub enum WalletError {
    /// No account is connected.
    #[error("no wallet connected")]
    NotConnected,

    /// The provider returned no accounts.
    #[error("the signing provider returned no accounts")]
    NoAccounts,

    /// Locally rejected user input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider failed or rejected a request.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A gateway query failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Connection state of the session.
#[derive(Debug, Clone, Default)]
struct WalletState {
    account: Option<Address>,
    balance_wei: Option<u128>,
}

/// Account session over an injected signing provider.
pub struct WalletSession {
    provider: Arc<dyn SigningProvider>,
    gateway: Arc<dyn GatewayApi>,
    state: RwLock<WalletState>,
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession").finish_non_exhaustive()
    }
}

impl WalletSession {
    /// Creates a disconnected session.
    #[must_use]
    pub fn new(provider: Arc<dyn SigningProvider>, gateway: Arc<dyn GatewayApi>) -> Self {
        Self {
            provider,
            gateway,
            state: RwLock::new(WalletState::default()),
        }
    }

    /// Requests account authorization and connects the first account.
    ///
    /// The account's balance is fetched from the provider; a balance
    /// failure leaves the balance unknown but the connection
    /// established.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::Provider`] when the provider is absent,
    /// locked, or rejects the prompt, and [`WalletError::NoAccounts`]
    /// when authorization yields an empty list.
    pub async fn connect(&self) -> Result<Address, WalletError> {
        let accounts = self.provider.request_accounts().await?;
        let Some(account) = accounts.into_iter().next() else {
            return Err(WalletError::NoAccounts);
        };

        let balance = match self.provider.balance(&account).await {
            Ok(balance) => Some(balance),
            Err(error) => {
                warn!(error = %error, "balance query failed after connect");
                None
            }
        };

        info!(account = %account.short(), "wallet connected");
        let mut state = self.state.write().await;
        state.account = Some(account.clone());
        state.balance_wei = balance;
        Ok(account)
    }

    /// Clears the session state.
    ///
    /// The caller drops its [`AccountWatch`] alongside, which
    /// unregisters the change subscription.
    pub async fn disconnect(&self) {
        let mut state = self.state.write().await;
        state.account = None;
        state.balance_wei = None;
        info!("wallet disconnected");
    }

    /// Takes the account-change subscription handle.
    ///
    /// Register at activation, feed received account lists to
    /// [`Self::apply_account_change`], and drop the handle at
    /// deactivation.
    #[must_use]
    pub fn watch_accounts(&self) -> AccountWatch {
        self.provider.subscribe_accounts()
    }

    /// Applies one account-change notification.
    ///
    /// An empty list disconnects the session; otherwise the first
    /// account becomes active and its balance is refreshed.
    pub async fn apply_account_change(&self, accounts: Vec<Address>) {
        match accounts.into_iter().next() {
            None => {
                warn!("wallet disconnected by the provider");
                self.disconnect().await;
            }
            Some(account) => {
                let balance = match self.provider.balance(&account).await {
                    Ok(balance) => Some(balance),
                    Err(error) => {
                        warn!(error = %error, "balance query failed after account switch");
                        None
                    }
                };
                info!(account = %account.short(), "active account switched");
                let mut state = self.state.write().await;
                state.account = Some(account);
                state.balance_wei = balance;
            }
        }
    }

    /// Returns the active account, if connected.
    pub async fn account(&self) -> Option<Address> {
        self.state.read().await.account.clone()
    }

    /// Returns the active account's last known balance in wei.
    pub async fn balance_wei(&self) -> Option<u128> {
        self.state.read().await.balance_wei
    }

    /// Looks up the gateway balance of an arbitrary address.
    ///
    /// # Errors
    ///
    /// Returns a validation error (no network call) for a malformed
    /// address, or a gateway error when the query fails.
    pub async fn lookup_balance(&self, address_text: &str) -> Result<u128, WalletError> {
        let address = Address::parse(address_text)?;
        Ok(self.gateway.account_balance(&address).await?)
    }

    /// Looks up a token balance held by a wallet address.
    ///
    /// # Errors
    ///
    /// Returns a validation error (no network call) when either address
    /// is malformed, or a gateway error when the query fails.
    pub async fn lookup_token_balance(
        &self,
        token_text: &str,
        wallet_text: &str,
    ) -> Result<u128, WalletError> {
        let token = Address::parse(token_text)?;
        let wallet = Address::parse(wallet_text)?;
        Ok(self.gateway.token_balance(&token, &wallet).await?)
    }

    /// Sends native value from the active account.
    ///
    /// The recipient and the decimal coin amount are validated locally
    /// before the provider is asked to sign; the amount is scaled to wei
    /// with the native 18 decimals.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::NotConnected`] without provider contact
    /// when no account is active, a validation error for malformed
    /// input, or the provider's error verbatim when signing fails.
    pub async fn send_value(
        &self,
        recipient_text: &str,
        amount_text: &str,
    ) -> Result<TxHash, WalletError> {
        let from = self
            .state
            .read()
            .await
            .account
            .clone()
            .ok_or(WalletError::NotConnected)?;
        let to = Address::parse(recipient_text)?;
        let amount_wei = parse_to_wei(amount_text, NATIVE_DECIMALS)?;

        let hash = self.provider.send_value(&from, &to, amount_wei).await?;
        info!(hash = %hash.short(), "value transfer submitted");

        // Refresh the sender balance opportunistically.
        if let Ok(balance) = self.provider.balance(&from).await {
            self.state.write().await.balance_wei = Some(balance);
        }
        Ok(hash)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{BlockDetail, BlockSummary, Transaction, TransactionReceipt};
    use crate::domain::value_objects::BlockHeight;
    use crate::infrastructure::gateway::{GatewayResult, NetworkStats};
    use crate::infrastructure::provider::SimulatedProvider;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Gateway double serving balances and counting calls.
    #[derive(Debug, Default)]
    struct BalanceGateway {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GatewayApi for BalanceGateway {
        async fn latest_blocks(&self, _count: usize) -> GatewayResult<Vec<BlockSummary>> {
            Err(GatewayError::internal("not served"))
        }
        async fn block_by_number(&self, _height: BlockHeight) -> GatewayResult<BlockDetail> {
            Err(GatewayError::internal("not served"))
        }
        async fn latest_transactions(&self, _count: usize) -> GatewayResult<Vec<Transaction>> {
            Err(GatewayError::internal("not served"))
        }
        async fn transaction(&self, _hash: &TxHash) -> GatewayResult<Transaction> {
            Err(GatewayError::internal("not served"))
        }
        async fn transaction_receipt(
            &self,
            _hash: &TxHash,
        ) -> GatewayResult<Option<TransactionReceipt>> {
            Err(GatewayError::internal("not served"))
        }
        async fn account_balance(&self, _address: &Address) -> GatewayResult<u128> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(42 * 10u128.pow(18))
        }
        async fn token_balance(
            &self,
            _token: &Address,
            _wallet: &Address,
        ) -> GatewayResult<u128> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(1_000)
        }
        async fn network_stats(&self) -> GatewayResult<NetworkStats> {
            Err(GatewayError::internal("not served"))
        }
    }

    fn address(byte: &str) -> Address {
        Address::new(format!("0x{}", byte.repeat(20)))
    }

    fn session_with(provider: SimulatedProvider) -> (WalletSession, Arc<BalanceGateway>) {
        let gateway = Arc::new(BalanceGateway::default());
        let session =
            WalletSession::new(Arc::new(provider), Arc::clone(&gateway) as Arc<dyn GatewayApi>);
        (session, gateway)
    }

    #[tokio::test]
    async fn connect_picks_first_account_and_balance() {
        let account = address("11");
        let (session, _) = session_with(SimulatedProvider::with_accounts(vec![account.clone()]));

        let connected = session.connect().await.unwrap();
        assert_eq!(connected, account);
        assert_eq!(session.account().await, Some(account));
        assert!(session.balance_wei().await.unwrap() > 0);
    }

    #[tokio::test]
    async fn disconnect_clears_state() {
        let (session, _) = session_with(SimulatedProvider::new());
        session.connect().await.unwrap();

        session.disconnect().await;
        assert!(session.account().await.is_none());
        assert!(session.balance_wei().await.is_none());
    }

    #[tokio::test]
    async fn empty_account_change_disconnects() {
        let (session, _) = session_with(SimulatedProvider::new());
        session.connect().await.unwrap();

        session.apply_account_change(vec![]).await;
        assert!(session.account().await.is_none());
    }

    #[tokio::test]
    async fn account_change_switches_active_account() {
        let first = address("11");
        let second = address("22");
        let provider = SimulatedProvider::with_accounts(vec![first.clone()]);
        let (session, _) = session_with(provider);
        session.connect().await.unwrap();

        session.apply_account_change(vec![second.clone(), first]).await;
        assert_eq!(session.account().await, Some(second));
    }

    #[tokio::test]
    async fn watch_receives_provider_changes() {
        let provider = SimulatedProvider::new();
        let watch_provider = provider.clone();
        let (session, _) = session_with(provider);
        let mut watch = session.watch_accounts();

        let replacement = address("33");
        watch_provider.set_accounts(vec![replacement.clone()]).await;

        let accounts = watch.changed().await.unwrap();
        session.apply_account_change(accounts).await;
        assert_eq!(session.account().await, Some(replacement));
    }

    #[tokio::test]
    async fn lookup_balance_validates_locally_first() {
        let (session, gateway) = session_with(SimulatedProvider::new());

        let error = session.lookup_balance("0xnothex").await.unwrap_err();
        assert!(matches!(error, WalletError::Validation(_)));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);

        let balance = session
            .lookup_balance(address("44").as_str())
            .await
            .unwrap();
        assert_eq!(balance, 42 * 10u128.pow(18));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn token_balance_lookup() {
        let (session, _) = session_with(SimulatedProvider::new());
        let balance = session
            .lookup_token_balance(address("55").as_str(), address("66").as_str())
            .await
            .unwrap();
        assert_eq!(balance, 1_000);
    }

    #[tokio::test]
    async fn send_value_requires_connection() {
        let (session, _) = session_with(SimulatedProvider::new());
        let error = session
            .send_value(address("22").as_str(), "1.5")
            .await
            .unwrap_err();
        assert!(matches!(error, WalletError::NotConnected));
    }

    #[tokio::test]
    async fn send_value_validates_amount_locally() {
        let (session, _) = session_with(SimulatedProvider::new());
        session.connect().await.unwrap();

        for bad in ["", "0", "-1", "abc"] {
            let error = session
                .send_value(address("22").as_str(), bad)
                .await
                .unwrap_err();
            assert!(matches!(error, WalletError::Validation(_)), "{}", bad);
        }
    }

    #[tokio::test]
    async fn send_value_submits_and_refreshes_balance() {
        let account = address("11");
        let provider = SimulatedProvider::with_accounts(vec![account.clone()]);
        let (session, _) = session_with(provider);
        session.connect().await.unwrap();
        let before = session.balance_wei().await.unwrap();

        let hash = session
            .send_value(address("22").as_str(), "1")
            .await
            .unwrap();
        assert_eq!(hash.as_str().len(), 66);
        assert_eq!(
            session.balance_wei().await.unwrap(),
            before - 10u128.pow(18)
        );
    }
}
