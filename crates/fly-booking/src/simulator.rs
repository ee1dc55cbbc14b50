//! Transaction simulator: the payment phase state machine.
//!
//! ```text
//!            start (connected)
//!   Idle ─────────────────────▶ Approving ──D1──▶ Processing ──D2──▶ Confirming ──D3──▶ Success
//!    │                              │                  │                   │
//!    │ start (disconnected)         └──────── fail ────┴───────────────────┴──────────▶ Error
//!    └─────────────────────────────────────────────────────────────────────────────────▶ Error
//!
//!   Success / Error ── reset ──▶ Idle
//! ```
//!
//! The machine does no I/O. Callers pass the current time into
//! [`start`](TransactionSimulator::start) and
//! [`advance`](TransactionSimulator::advance); [`run`](TransactionSimulator::run)
//! drives a started payment to completion against a [`Clock`].
//!
//! Each phase's timer counts from the instant the phase was *scheduled* to
//! begin, not from when `advance` happened to observe it, so a late call to
//! `advance` applies every overdue transition in order.

use std::time::Duration;

use rand::RngCore;
use tracing::{debug, info, warn};

use fly_core::error::TransactionError;
use fly_core::traits::Clock;
use fly_core::types::{Phase, TxHash};

use crate::config::SimulatorConfig;

/// One applied state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    /// Clock time at which `to` was entered.
    pub at: Duration,
}

/// Payment state machine. At most one payment is in flight at a time.
#[derive(Debug, Clone)]
pub struct TransactionSimulator {
    config: SimulatorConfig,
    phase: Phase,
    /// When the current phase was entered.
    entered_at: Duration,
    /// Set iff `phase == Success`.
    tx_hash: Option<TxHash>,
    /// Set iff `phase == Error`.
    error: Option<TransactionError>,
    /// Phases entered since the last start, in order.
    visited: Vec<Phase>,
}

impl Default for TransactionSimulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl TransactionSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            entered_at: Duration::ZERO,
            tx_hash: None,
            error: None,
            visited: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        self.tx_hash
    }

    pub fn error(&self) -> Option<&TransactionError> {
        self.error.as_ref()
    }

    /// Phases entered by the current run, starting with the first phase after
    /// `Idle`. Empty while idle.
    pub fn visited(&self) -> &[Phase] {
        &self.visited
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase.is_in_flight()
    }

    /// Clock time at which the current phase's timer fires, if it has one.
    pub fn deadline(&self) -> Option<Duration> {
        self.config
            .phase_delay(self.phase)
            .map(|delay| self.entered_at.saturating_add(delay))
    }

    /// Begin a payment at time `now`.
    ///
    /// Only valid from `Idle`; any other phase is rejected with
    /// [`TransactionError::NotIdle`] and nothing changes. Starting without a
    /// connected wallet moves straight to `Error` and returns
    /// [`TransactionError::WalletNotConnected`].
    pub fn start(
        &mut self,
        wallet_connected: bool,
        now: Duration,
    ) -> Result<PhaseTransition, TransactionError> {
        if self.phase != Phase::Idle {
            debug!(phase = %self.phase, "rejected start: payment already started");
            return Err(TransactionError::NotIdle { phase: self.phase });
        }

        if !wallet_connected {
            let err = TransactionError::WalletNotConnected;
            self.enter(Phase::Error, now);
            warn!(error = %err, "payment failed before start");
            self.error = Some(err.clone());
            return Err(err);
        }

        Ok(self.enter(Phase::Approving, now))
    }

    /// Apply every phase change whose timer has fired by `now`, in order.
    ///
    /// `rng` supplies the synthetic transaction hash on reaching `Success`.
    /// Returns the applied transitions; empty if nothing was due.
    pub fn advance<R>(&mut self, now: Duration, rng: &mut R) -> Vec<PhaseTransition>
    where
        R: RngCore + ?Sized,
    {
        let mut applied = Vec::new();
        while let Some(deadline) = self.deadline() {
            if now < deadline {
                break;
            }
            let Some(next) = self.phase.next() else {
                break;
            };
            if next == Phase::Success {
                self.tx_hash = Some(TxHash::random(rng));
            }
            applied.push(self.enter(next, deadline));
        }
        applied
    }

    /// Abort an in-flight payment at time `now`.
    ///
    /// Returns `None` (and changes nothing) unless a payment is in flight.
    /// Nothing in the booking flow calls this; it exists so that an in-flight
    /// failure has a defined outcome.
    pub fn fail(&mut self, now: Duration) -> Option<PhaseTransition> {
        if !self.is_in_flight() {
            return None;
        }
        let err = TransactionError::Failed;
        warn!(phase = %self.phase, error = %err, "payment failed in flight");
        let transition = self.enter(Phase::Error, now);
        self.error = Some(err);
        Some(transition)
    }

    /// Return to `Idle`, clearing the hash, error and visited phases.
    ///
    /// Rejected with [`TransactionError::NotTerminal`] while a payment is in
    /// flight. A no-op when already idle.
    pub fn reset(&mut self) -> Result<(), TransactionError> {
        if self.is_in_flight() {
            return Err(TransactionError::NotTerminal { phase: self.phase });
        }
        if self.phase != Phase::Idle {
            debug!(from = %self.phase, "transaction reset");
        }
        self.phase = Phase::Idle;
        self.tx_hash = None;
        self.error = None;
        self.visited.clear();
        Ok(())
    }

    /// Drive a started payment to its terminal state, sleeping on `clock`
    /// between phases.
    ///
    /// Returns the transaction hash on success or the recorded error. Calling
    /// this while idle returns [`TransactionError::NotStarted`].
    pub async fn run<R>(&mut self, clock: &dyn Clock, rng: &mut R) -> Result<TxHash, TransactionError>
    where
        R: RngCore + Send + ?Sized,
    {
        self.run_with(clock, rng, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `observe` for every applied transition.
    ///
    /// Once `sleep_until` returns, the deadline counts as reached even if the
    /// clock cannot represent it, so every run ends after three sleeps.
    pub async fn run_with<R, F>(
        &mut self,
        clock: &dyn Clock,
        rng: &mut R,
        mut observe: F,
    ) -> Result<TxHash, TransactionError>
    where
        R: RngCore + Send + ?Sized,
        F: FnMut(&PhaseTransition) + Send,
    {
        while let Some(deadline) = self.deadline() {
            clock.sleep_until(deadline).await;
            for transition in self.advance(clock.now().max(deadline), rng) {
                observe(&transition);
            }
        }
        self.outcome()
    }

    /// Terminal result of the current run.
    pub fn outcome(&self) -> Result<TxHash, TransactionError> {
        match (self.phase, self.tx_hash, &self.error) {
            (Phase::Success, Some(hash), _) => Ok(hash),
            (Phase::Error, _, Some(err)) => Err(err.clone()),
            (Phase::Idle, _, _) => Err(TransactionError::NotStarted),
            (phase, _, _) => Err(TransactionError::NotIdle { phase }),
        }
    }

    fn enter(&mut self, to: Phase, at: Duration) -> PhaseTransition {
        let from = self.phase;
        self.phase = to;
        self.entered_at = at;
        self.visited.push(to);
        match (to, self.tx_hash) {
            (Phase::Success, Some(hash)) => {
                info!(%hash, at_ms = at.as_millis() as u64, "payment confirmed")
            }
            _ => info!(%from, %to, at_ms = at.as_millis() as u64, "transaction phase"),
        }
        PhaseTransition { from, to, at }
    }
}
