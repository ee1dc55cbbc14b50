//! Wallet session: the single connected account of a booking client.
//!
//! The [`WalletSession`] starts disconnected. [`connect`](WalletSession::connect)
//! asks the host provider for accounts when one is available and otherwise
//! hands out a placeholder account. [`disconnect`](WalletSession::disconnect)
//! clears everything.

use rand::RngCore;
use serde::Serialize;
use tracing::{info, warn};

use fly_core::constants::CONNECTION_FAILED_MESSAGE;
use fly_core::error::ConnectionError;
use fly_core::traits::WalletProvider;
use fly_core::types::AccountId;

use crate::placeholder;

/// Notice surfaced when a placeholder account stands in for a real wallet.
pub const SIMULATED_ACCOUNT_NOTICE: &str = "No wallet provider detected - using demo account";

/// Where a connected account came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountSource {
    /// Returned by the host wallet provider.
    Provider,
    /// Drawn from the built-in placeholder pool.
    Placeholder,
}

/// Result of a successful connect.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectOutcome {
    pub account: AccountId,
    pub source: AccountSource,
    /// Non-fatal notice for the user, set when a placeholder account is used.
    pub notice: Option<&'static str>,
}

/// At most one connected account per client.
///
/// `account` is `Some` iff the session is connected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WalletSession {
    account: Option<AccountId>,
    source: Option<AccountSource>,
    /// Demo balance in ETH, sampled on connect.
    balance: Option<f64>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn account(&self) -> Option<&AccountId> {
        self.account.as_ref()
    }

    pub fn source(&self) -> Option<AccountSource> {
        self.source
    }

    pub fn balance(&self) -> Option<f64> {
        self.balance
    }

    /// Connect to `provider`, or to a placeholder account when `provider` is
    /// `None`.
    ///
    /// On error the session is left exactly as it was.
    pub async fn connect<R>(
        &mut self,
        provider: Option<&dyn WalletProvider>,
        rng: &mut R,
    ) -> Result<ConnectOutcome, ConnectionError>
    where
        R: RngCore + Send + ?Sized,
    {
        let (account, source, notice) = match provider {
            Some(provider) => {
                let accounts = provider
                    .request_accounts()
                    .await
                    .map_err(|e| match e {
                        ConnectionError::Provider(msg) if msg.trim().is_empty() => {
                            ConnectionError::Provider(CONNECTION_FAILED_MESSAGE.to_string())
                        }
                        other => other,
                    })
                    .inspect_err(|e| {
                        warn!(error = %e, "wallet provider request failed");
                    })?;
                let first = accounts.into_iter().next().ok_or_else(|| {
                    warn!("wallet provider returned no accounts");
                    ConnectionError::NoAccounts
                })?;
                (first, AccountSource::Provider, None)
            }
            None => {
                let account = placeholder::pick_account(rng);
                warn!(account = %account, "{SIMULATED_ACCOUNT_NOTICE}");
                (account, AccountSource::Placeholder, Some(SIMULATED_ACCOUNT_NOTICE))
            }
        };

        self.account = Some(account.clone());
        self.source = Some(source);
        self.balance = Some(placeholder::demo_balance(rng));
        info!(account = %account.abbreviated(), ?source, "wallet connected");

        Ok(ConnectOutcome {
            account,
            source,
            notice,
        })
    }

    /// Clear the session. Idempotent.
    pub fn disconnect(&mut self) {
        if let Some(account) = self.account.take() {
            info!(account = %account.abbreviated(), "wallet disconnected");
        }
        self.source = None;
        self.balance = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{FailingProvider, StaticProvider};
    use fly_core::constants::MOCK_ACCOUNTS;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn new_session_is_disconnected() {
        let s = WalletSession::new();
        assert!(!s.is_connected());
        assert!(s.account().is_none());
        assert!(s.balance().is_none());
    }

    #[tokio::test]
    async fn connect_adopts_first_provider_account() {
        let provider = StaticProvider::new(vec!["0xfirst".into(), "0xsecond".into()]);
        let mut s = WalletSession::new();
        let out = s.connect(Some(&provider), &mut rng()).await.unwrap();
        assert_eq!(out.account, AccountId::new("0xfirst"));
        assert_eq!(out.source, AccountSource::Provider);
        assert_eq!(out.notice, None);
        assert!(s.is_connected());
        assert_eq!(s.account(), Some(&AccountId::new("0xfirst")));
        assert!(s.balance().is_some());
    }

    #[tokio::test]
    async fn empty_provider_leaves_session_disconnected() {
        let provider = StaticProvider::default();
        let mut s = WalletSession::new();
        let err = s.connect(Some(&provider), &mut rng()).await.unwrap_err();
        assert_eq!(err, ConnectionError::NoAccounts);
        assert!(!s.is_connected());
        assert_eq!(s, WalletSession::new());
    }

    #[tokio::test]
    async fn provider_error_is_converted() {
        let provider = FailingProvider::new("User rejected the request.");
        let mut s = WalletSession::new();
        let err = s.connect(Some(&provider), &mut rng()).await.unwrap_err();
        assert_eq!(err.to_string(), "User rejected the request.");
        assert!(!s.is_connected());
    }

    #[tokio::test]
    async fn blank_provider_error_gets_generic_message() {
        let mut s = WalletSession::new();
        for blank in ["", "   "] {
            let err = s
                .connect(Some(&FailingProvider::new(blank)), &mut rng())
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Connection failed. Please try again.");
        }
        assert!(!s.is_connected());
    }

    #[test]
    fn placeholder_notice_text() {
        assert_eq!(
            SIMULATED_ACCOUNT_NOTICE,
            "No wallet provider detected - using demo account"
        );
    }

    #[tokio::test]
    async fn no_provider_uses_placeholder_with_notice() {
        let mut s = WalletSession::new();
        let out = s.connect(None, &mut rng()).await.unwrap();
        assert!(MOCK_ACCOUNTS.contains(&out.account.as_str()));
        assert_eq!(out.source, AccountSource::Placeholder);
        assert_eq!(out.notice, Some(SIMULATED_ACCOUNT_NOTICE));
        assert_eq!(s.source(), Some(AccountSource::Placeholder));
    }

    #[tokio::test]
    async fn placeholder_pick_is_seed_deterministic() {
        let mut a = WalletSession::new();
        let mut b = WalletSession::new();
        let oa = a.connect(None, &mut StdRng::seed_from_u64(11)).await.unwrap();
        let ob = b.connect(None, &mut StdRng::seed_from_u64(11)).await.unwrap();
        assert_eq!(oa, ob);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn failed_reconnect_keeps_existing_account() {
        let mut s = WalletSession::new();
        s.connect(Some(&StaticProvider::single("0xkeep")), &mut rng())
            .await
            .unwrap();
        let before = s.clone();
        assert!(s.connect(Some(&FailingProvider::default()), &mut rng()).await.is_err());
        assert_eq!(s, before);
    }

    #[tokio::test]
    async fn disconnect_clears_everything() {
        let mut s = WalletSession::new();
        s.connect(None, &mut rng()).await.unwrap();
        s.disconnect();
        assert!(!s.is_connected());
        assert!(s.account().is_none());
        assert!(s.source().is_none());
        assert!(s.balance().is_none());
    }

    #[test]
    fn disconnect_is_idempotent() {
        let mut s = WalletSession::new();
        s.disconnect();
        s.disconnect();
        assert_eq!(s, WalletSession::new());
    }
}
