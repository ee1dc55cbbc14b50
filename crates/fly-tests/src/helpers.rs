//! Shared helpers for integration tests.

use std::sync::Arc;

use fly_booking::{BookingCoordinator, SimulatorConfig, VirtualClock};
use fly_core::catalog::Catalog;
use fly_core::traits::WalletProvider;

/// Coordinator over the default catalog on a fresh virtual clock.
pub fn virtual_coordinator(seed: u64) -> (BookingCoordinator, Arc<VirtualClock>) {
    let clock = Arc::new(VirtualClock::new());
    let coordinator = BookingCoordinator::seeded(
        Catalog::default(),
        SimulatorConfig::default(),
        clock.clone(),
        seed,
    );
    (coordinator, clock)
}

/// Like [`virtual_coordinator`], with a wallet provider attached.
pub fn virtual_coordinator_with(
    seed: u64,
    provider: Arc<dyn WalletProvider>,
) -> (BookingCoordinator, Arc<VirtualClock>) {
    let (coordinator, clock) = virtual_coordinator(seed);
    (coordinator.with_provider(provider), clock)
}
