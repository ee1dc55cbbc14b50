//! Simulated latencies for the wallet handshake and payment phases.
//!
//! [`SimulatorConfig::default`] reproduces the tracker timings. Each delay
//! can be overridden from the environment in whole milliseconds:
//!
//! | Variable | Default |
//! |---|---|
//! | `FLY_CONNECT_DELAY_MS` | 1000 |
//! | `FLY_APPROVE_DELAY_MS` | 2000 |
//! | `FLY_PROCESS_DELAY_MS` | 3000 |
//! | `FLY_CONFIRM_DELAY_MS` | 2500 |
//!
//! Values above [`MAX_DELAY_MS`] are rejected.

use std::time::Duration;

use thiserror::Error;

use fly_core::constants::{APPROVE_DELAY, CONFIRM_DELAY, CONNECT_DELAY, PROCESS_DELAY};
use fly_core::types::Phase;

pub const ENV_CONNECT_DELAY: &str = "FLY_CONNECT_DELAY_MS";
pub const ENV_APPROVE_DELAY: &str = "FLY_APPROVE_DELAY_MS";
pub const ENV_PROCESS_DELAY: &str = "FLY_PROCESS_DELAY_MS";
pub const ENV_CONFIRM_DELAY: &str = "FLY_CONFIRM_DELAY_MS";

/// Largest delay accepted from the environment (one hour).
pub const MAX_DELAY_MS: u64 = 3_600_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds up to {}, got {value:?}", MAX_DELAY_MS)]
    InvalidDelay { var: &'static str, value: String },
}

/// Latencies used by the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Wallet handshake.
    pub connect_delay: Duration,
    /// Time spent in `approving`.
    pub approve_delay: Duration,
    /// Time spent in `processing`.
    pub process_delay: Duration,
    /// Time spent in `confirming`.
    pub confirm_delay: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            connect_delay: CONNECT_DELAY,
            approve_delay: APPROVE_DELAY,
            process_delay: PROCESS_DELAY,
            confirm_delay: CONFIRM_DELAY,
        }
    }
}

impl SimulatorConfig {
    /// All delays zero.
    pub fn instant() -> Self {
        Self {
            connect_delay: Duration::ZERO,
            approve_delay: Duration::ZERO,
            process_delay: Duration::ZERO,
            confirm_delay: Duration::ZERO,
        }
    }

    /// Defaults overridden by any `FLY_*_DELAY_MS` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |var: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(var) {
                None => Ok(default),
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|ms| *ms <= MAX_DELAY_MS)
                    .map(Duration::from_millis)
                    .ok_or(ConfigError::InvalidDelay { var, value }),
            }
        };

        Ok(Self {
            connect_delay: read(ENV_CONNECT_DELAY, defaults.connect_delay)?,
            approve_delay: read(ENV_APPROVE_DELAY, defaults.approve_delay)?,
            process_delay: read(ENV_PROCESS_DELAY, defaults.process_delay)?,
            confirm_delay: read(ENV_CONFIRM_DELAY, defaults.confirm_delay)?,
        })
    }

    /// How long `phase` lasts before its timer fires. `None` for phases
    /// without a timer.
    pub fn phase_delay(&self, phase: Phase) -> Option<Duration> {
        match phase {
            Phase::Approving => Some(self.approve_delay),
            Phase::Processing => Some(self.process_delay),
            Phase::Confirming => Some(self.confirm_delay),
            Phase::Idle | Phase::Success | Phase::Error => None,
        }
    }

    /// Total time from start to success. Saturates at [`Duration::MAX`].
    pub fn payment_duration(&self) -> Duration {
        self.approve_delay
            .saturating_add(self.process_delay)
            .saturating_add(self.confirm_delay)
    }
}
