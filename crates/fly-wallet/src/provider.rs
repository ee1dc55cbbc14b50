//! [`WalletProvider`] adapters.
//!
//! A real host wallet is outside this crate. These adapters cover the
//! deterministic cases: a wallet that always returns a fixed account list,
//! and one that always fails.

use async_trait::async_trait;

use fly_core::constants::CONNECTION_FAILED_MESSAGE;
use fly_core::error::ConnectionError;
use fly_core::traits::WalletProvider;
use fly_core::types::AccountId;

/// Provider returning a fixed list of accounts. An empty list models a
/// wallet the user never unlocked.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    accounts: Vec<AccountId>,
}

impl StaticProvider {
    pub fn new(accounts: Vec<AccountId>) -> Self {
        Self { accounts }
    }

    /// Provider exposing a single account.
    pub fn single(account: impl Into<String>) -> Self {
        Self::new(vec![AccountId::new(account)])
    }
}

#[async_trait]
impl WalletProvider for StaticProvider {
    async fn request_accounts(&self) -> Result<Vec<AccountId>, ConnectionError> {
        Ok(self.accounts.clone())
    }
}

/// Provider whose request always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingProvider {
    message: String,
}

impl FailingProvider {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingProvider {
    fn default() -> Self {
        Self::new(CONNECTION_FAILED_MESSAGE)
    }
}

#[async_trait]
impl WalletProvider for FailingProvider {
    async fn request_accounts(&self) -> Result<Vec<AccountId>, ConnectionError> {
        Err(ConnectionError::Provider(self.message.clone()))
    }
}
