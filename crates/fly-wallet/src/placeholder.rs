//! Placeholder accounts used when no wallet provider is available.

use rand::{Rng, RngCore};

use fly_core::constants::{DEMO_BALANCE_MAX, DEMO_BALANCE_MIN, MOCK_ACCOUNTS};
use fly_core::types::AccountId;

/// Pick one of the [`MOCK_ACCOUNTS`] uniformly at random.
pub fn pick_account<R: RngCore + ?Sized>(rng: &mut R) -> AccountId {
    let index = rng.gen_range(0..MOCK_ACCOUNTS.len());
    AccountId::new(MOCK_ACCOUNTS[index])
}

/// Sample a demo balance in `[DEMO_BALANCE_MIN, DEMO_BALANCE_MAX)` ETH,
/// rounded to two decimals.
pub fn demo_balance<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    let raw = rng.gen_range(DEMO_BALANCE_MIN..DEMO_BALANCE_MAX);
    (raw * 100.0).floor() / 100.0
}
