//! # fly-wallet — mock wallet session for FlyAnyTrip.
//!
//! Connects to an optional host wallet provider, falling back to a pool of
//! placeholder accounts when none is present.
//!
//! # Modules
//!
//! - [`placeholder`] — placeholder account pool and demo balances
//! - [`provider`] — ready-made [`WalletProvider`](fly_core::traits::WalletProvider) adapters
//! - [`session`] — `WalletSession` connect/disconnect

pub mod placeholder;
pub mod provider;
pub mod session;

pub use provider::{FailingProvider, StaticProvider};
pub use session::{AccountSource, ConnectOutcome, WalletSession, SIMULATED_ACCOUNT_NOTICE};
