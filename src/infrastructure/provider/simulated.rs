//! # Simulated Provider
//!
//! Local stand-in for the signing provider.
//!
//! Used when no real provider is injected: reads produce a small hex
//! word, writes produce a pseudo transaction hash, and value transfers
//! move balances inside the simulator. Account changes can be pushed
//! through [`SimulatedProvider::set_accounts`], which makes the account
//! subscription contract testable without a wallet.

use crate::domain::value_objects::{Address, TxHash};
use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use super::traits::{
    AccountWatch, FunctionCallRequest, ProviderError, ProviderResult, SigningProvider,
};

/// Starting balance of generated accounts: 10 coins.
const DEFAULT_BALANCE_WEI: u128 = 10 * 10u128.pow(18);

/// Capacity of the account-change notification channel.
const NOTIFY_CAPACITY: usize = 16;

/// Local simulation of a signing provider.
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    accounts: Arc<RwLock<Vec<Address>>>,
    balances: Arc<RwLock<HashMap<Address, u128>>>,
    notify: broadcast::Sender<Vec<Address>>,
}

impl SimulatedProvider {
    /// Creates a simulator holding one generated account with a seeded
    /// balance.
    #[must_use]
    pub fn new() -> Self {
        Self::with_accounts(vec![random_address()])
    }

    /// Creates a simulator holding the given accounts, each with the
    /// default balance.
    #[must_use]
    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        let balances = accounts
            .iter()
            .map(|a| (a.clone(), DEFAULT_BALANCE_WEI))
            .collect();
        let (notify, _) = broadcast::channel(NOTIFY_CAPACITY);
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
            balances: Arc::new(RwLock::new(balances)),
            notify,
        }
    }

    /// Replaces the account list and notifies subscribers.
    ///
    /// An empty list simulates the user disconnecting the wallet.
    pub async fn set_accounts(&self, accounts: Vec<Address>) {
        {
            // Lock order is accounts then balances, everywhere.
            let mut current = self.accounts.write().await;
            let mut balances = self.balances.write().await;
            for account in &accounts {
                balances.entry(account.clone()).or_insert(DEFAULT_BALANCE_WEI);
            }
            *current = accounts.clone();
        }
        let _ = self.notify.send(accounts);
    }

    /// Sets the balance of one account.
    pub async fn set_balance(&self, address: Address, balance_wei: u128) {
        self.balances.write().await.insert(address, balance_wei);
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SigningProvider for SimulatedProvider {
    async fn list_accounts(&self) -> ProviderResult<Vec<Address>> {
        Ok(self.accounts.read().await.clone())
    }

    async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
        let mut accounts = self.accounts.write().await;
        if accounts.is_empty() {
            let generated = random_address();
            self.balances
                .write()
                .await
                .insert(generated.clone(), DEFAULT_BALANCE_WEI);
            accounts.push(generated);
        }
        Ok(accounts.clone())
    }

    async fn balance(&self, address: &Address) -> ProviderResult<u128> {
        Ok(self.balances.read().await.get(address).copied().unwrap_or(0))
    }

    async fn send_value(
        &self,
        from: &Address,
        to: &Address,
        amount_wei: u128,
    ) -> ProviderResult<TxHash> {
        if !self.accounts.read().await.contains(from) {
            return Err(ProviderError::rejected(format!(
                "unknown account {}",
                from.short()
            )));
        }

        let mut balances = self.balances.write().await;
        let available = balances.get(from).copied().unwrap_or(0);
        if available < amount_wei {
            return Err(ProviderError::rejected("insufficient funds for transfer"));
        }
        balances.insert(from.clone(), available - amount_wei);
        let credited = balances.get(to).copied().unwrap_or(0);
        balances.insert(to.clone(), credited + amount_wei);

        Ok(random_tx_hash())
    }

    async fn call_function(&self, _request: &FunctionCallRequest) -> ProviderResult<String> {
        let word: u64 = rand::rng().random_range(0..0x0010_0000);
        Ok(format!("0x{:x}", word))
    }

    async fn submit_function(&self, _request: &FunctionCallRequest) -> ProviderResult<TxHash> {
        Ok(random_tx_hash())
    }

    fn subscribe_accounts(&self) -> AccountWatch {
        AccountWatch::new(self.notify.subscribe())
    }
}

/// Generates a pseudo-random 20-byte address.
fn random_address() -> Address {
    Address::new(format!("0x{}", random_hex_bytes(20)))
}

/// Generates a pseudo-random 32-byte transaction hash.
fn random_tx_hash() -> TxHash {
    TxHash::new(format!("0x{}", random_hex_bytes(32)))
}

/// Generates `n` random bytes as lowercase hex.
fn random_hex_bytes(n: usize) -> String {
    let mut rng = rand::rng();
    (0..n).map(|_| format!("{:02x}", rng.random::<u8>())).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(caller: &Address) -> FunctionCallRequest {
        FunctionCallRequest {
            contract: Address::new("0xe9e7cea3dedca5984780bafc599bd69add087d56"),
            function: "balanceOf".to_string(),
            arguments: vec!["0x01".to_string()],
            caller: caller.clone(),
        }
    }

    #[tokio::test]
    async fn new_simulator_has_one_funded_account() {
        let provider = SimulatedProvider::new();
        let accounts = provider.list_accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
        let account = accounts.first().unwrap();
        assert_eq!(account.as_str().len(), 42);
        assert_eq!(
            provider.balance(account).await.unwrap(),
            DEFAULT_BALANCE_WEI
        );
    }

    #[tokio::test]
    async fn request_accounts_generates_when_empty() {
        let provider = SimulatedProvider::with_accounts(vec![]);
        let accounts = provider.request_accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
    }

    #[tokio::test]
    async fn call_function_returns_hex_word() {
        let provider = SimulatedProvider::new();
        let caller = provider.list_accounts().await.unwrap().remove(0);
        let payload = provider.call_function(&request(&caller)).await.unwrap();
        assert!(payload.starts_with("0x"));
        assert!(payload.len() > 2);
    }

    #[tokio::test]
    async fn submit_function_returns_pseudo_hash() {
        let provider = SimulatedProvider::new();
        let caller = provider.list_accounts().await.unwrap().remove(0);
        let hash = provider.submit_function(&request(&caller)).await.unwrap();
        assert_eq!(hash.as_str().len(), 66);
    }

    #[tokio::test]
    async fn send_value_moves_balance() {
        let from = Address::new(format!("0x{}", "11".repeat(20)));
        let to = Address::new(format!("0x{}", "22".repeat(20)));
        let provider = SimulatedProvider::with_accounts(vec![from.clone()]);

        provider
            .send_value(&from, &to, 10u128.pow(18))
            .await
            .unwrap();
        assert_eq!(
            provider.balance(&from).await.unwrap(),
            DEFAULT_BALANCE_WEI - 10u128.pow(18)
        );
        assert_eq!(provider.balance(&to).await.unwrap(), 10u128.pow(18));
    }

    #[tokio::test]
    async fn send_value_rejects_overdraft() {
        let from = Address::new(format!("0x{}", "11".repeat(20)));
        let to = Address::new(format!("0x{}", "22".repeat(20)));
        let provider = SimulatedProvider::with_accounts(vec![from.clone()]);

        let error = provider
            .send_value(&from, &to, DEFAULT_BALANCE_WEI + 1)
            .await
            .unwrap_err();
        assert!(error.to_string().contains("insufficient funds"));
    }

    #[tokio::test]
    async fn account_changes_reach_subscribers() {
        let provider = SimulatedProvider::new();
        let mut watch = provider.subscribe_accounts();

        let replacement = Address::new(format!("0x{}", "33".repeat(20)));
        provider.set_accounts(vec![replacement.clone()]).await;

        let accounts = watch.changed().await.unwrap();
        assert_eq!(accounts, vec![replacement]);
    }
}
