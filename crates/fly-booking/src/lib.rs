//! # fly-booking — payment simulation and booking composition.
//!
//! # Modules
//!
//! - [`clock`] — tokio-backed and virtual [`Clock`](fly_core::traits::Clock) implementations
//! - [`config`] — `SimulatorConfig` phase latencies
//! - [`simulator`] — the transaction phase state machine
//! - [`coordinator`] — `BookingCoordinator`, the composition root

pub mod clock;
pub mod config;
pub mod coordinator;
pub mod simulator;

pub use clock::{TokioClock, VirtualClock};
pub use config::{ConfigError, SimulatorConfig};
pub use coordinator::{BookingCoordinator, BookingSummary};
pub use simulator::{PhaseTransition, TransactionSimulator};
