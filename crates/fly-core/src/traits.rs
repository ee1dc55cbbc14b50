//! Trait seams between the simulator and its host.
//!
//! - [`Clock`] — time source for simulated latencies (fly-booking implements
//!   a tokio-backed clock and a virtual clock)
//! - [`WalletProvider`] — optional host wallet exposing one request-accounts
//!   call (fly-wallet provides adapters)

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ConnectionError;
use crate::types::AccountId;

/// Monotonic time source used to pace simulated phases.
///
/// Times are offsets from an arbitrary epoch fixed when the clock is created.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's epoch.
    fn now(&self) -> Duration;

    /// Suspend until [`now`](Self::now) is at or past `deadline`.
    ///
    /// Returns immediately if the deadline has already passed.
    async fn sleep_until(&self, deadline: Duration);

    /// Suspend for `duration`.
    ///
    /// Default implementation delegates to [`sleep_until`](Self::sleep_until).
    async fn sleep(&self, duration: Duration) {
        let deadline = self.now().saturating_add(duration);
        self.sleep_until(deadline).await;
    }
}

/// A host-provided wallet, e.g. a browser extension.
///
/// Implementations should return the accounts the user authorised, most
/// preferred first. Failures are reported as [`ConnectionError`].
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet for the user's accounts.
    async fn request_accounts(&self) -> Result<Vec<AccountId>, ConnectionError>;
}
