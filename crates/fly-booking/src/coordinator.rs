//! Booking coordinator: the composition root.
//!
//! Owns the catalog, the selected flight, the wallet session, the speed tier
//! and the transaction simulator, plus the clock, randomness and optional
//! wallet provider they are driven by. Every mutator takes `&mut self`, so a
//! coordinator has exactly one writer at a time.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use fly_core::catalog::Catalog;
use fly_core::error::{ConnectionError, FlyError, TransactionError};
use fly_core::fees::{self, FeeBreakdown};
use fly_core::traits::{Clock, WalletProvider};
use fly_core::types::{AccountId, FlightOffer, Phase, Speed, TxHash};
use fly_wallet::{AccountSource, ConnectOutcome, WalletSession};

use crate::clock::TokioClock;
use crate::config::SimulatorConfig;
use crate::simulator::{PhaseTransition, TransactionSimulator};

/// Read-only projection of a booking for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSummary {
    pub flight: Option<FlightOffer>,
    pub connected: bool,
    pub account: Option<AccountId>,
    pub account_source: Option<AccountSource>,
    pub balance: Option<f64>,
    pub speed: Speed,
    pub fees: Option<FeeBreakdown>,
    pub phase: Phase,
    pub progress: u8,
    pub tx_hash: Option<TxHash>,
    pub error: Option<String>,
}

/// Mediates between catalog, wallet session, fee estimator and simulator.
pub struct BookingCoordinator {
    catalog: Catalog,
    selected: Option<FlightOffer>,
    wallet: WalletSession,
    speed: Speed,
    simulator: TransactionSimulator,
    clock: Arc<dyn Clock>,
    provider: Option<Arc<dyn WalletProvider>>,
    rng: StdRng,
}

impl BookingCoordinator {
    /// Coordinator on wall-clock time with OS-seeded randomness and no wallet
    /// provider. Requires a tokio runtime for payments.
    pub fn new(catalog: Catalog, config: SimulatorConfig) -> Self {
        Self::with_parts(
            catalog,
            config,
            Arc::new(TokioClock::new()),
            StdRng::from_entropy(),
        )
    }

    /// Coordinator with an explicit clock and random source.
    pub fn with_parts(
        catalog: Catalog,
        config: SimulatorConfig,
        clock: Arc<dyn Clock>,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog,
            selected: None,
            wallet: WalletSession::new(),
            speed: Speed::default(),
            simulator: TransactionSimulator::new(config),
            clock,
            provider: None,
            rng,
        }
    }

    /// Coordinator on `clock` with randomness seeded from `seed`.
    pub fn seeded(catalog: Catalog, config: SimulatorConfig, clock: Arc<dyn Clock>, seed: u64) -> Self {
        Self::with_parts(catalog, config, clock, StdRng::seed_from_u64(seed))
    }

    /// Attach a host wallet provider. Without one, connect hands out
    /// placeholder accounts.
    pub fn with_provider(mut self, provider: Arc<dyn WalletProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected(&self) -> Option<&FlightOffer> {
        self.selected.as_ref()
    }

    pub fn wallet(&self) -> &WalletSession {
        &self.wallet
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn simulator(&self) -> &TransactionSimulator {
        &self.simulator
    }

    pub fn phase(&self) -> Phase {
        self.simulator.phase()
    }

    /// Select the catalog offer with `id`.
    ///
    /// Rejected while a payment is in flight.
    pub fn select_flight(&mut self, id: u32) -> Result<&FlightOffer, FlyError> {
        if self.simulator.is_in_flight() {
            return Err(TransactionError::NotIdle {
                phase: self.simulator.phase(),
            }
            .into());
        }
        let offer = self.catalog.require(id)?.clone();
        info!(id, route = %offer.route(), price = offer.price, token = %offer.token, "flight selected");
        Ok(&*self.selected.insert(offer))
    }

    pub fn set_speed(&mut self, speed: Speed) {
        if speed != self.speed {
            debug!(%speed, "speed tier changed");
        }
        self.speed = speed;
    }

    /// Connect the wallet after the configured handshake latency.
    pub async fn connect(&mut self) -> Result<ConnectOutcome, ConnectionError> {
        self.clock.sleep(self.simulator.config().connect_delay).await;
        let provider = self.provider.as_deref();
        self.wallet.connect(provider, &mut self.rng).await
    }

    pub fn disconnect(&mut self) {
        self.wallet.disconnect();
    }

    /// Fees for the selected flight at the current tier. `None` without a
    /// selection.
    pub fn fee_breakdown(&self) -> Option<FeeBreakdown> {
        self.selected
            .as_ref()
            .map(|f| fees::estimate(f.price, f.token, self.speed))
    }

    /// Begin paying for the selected flight.
    pub fn start_payment(&mut self) -> Result<PhaseTransition, TransactionError> {
        let Some(flight) = &self.selected else {
            return Err(TransactionError::NoFlightSelected);
        };
        let transition = self
            .simulator
            .start(self.wallet.is_connected(), self.clock.now())?;
        info!(
            id = flight.id,
            amount = flight.price,
            token = %flight.token,
            speed = %self.speed,
            "payment started"
        );
        Ok(transition)
    }

    /// Start a payment and drive it to a terminal state.
    pub async fn pay(&mut self) -> Result<TxHash, TransactionError> {
        self.pay_with(|_| {}).await
    }

    /// Like [`pay`](Self::pay), calling `observe` for every phase change,
    /// including the initial one.
    pub async fn pay_with<F>(&mut self, mut observe: F) -> Result<TxHash, TransactionError>
    where
        F: FnMut(&PhaseTransition) + Send,
    {
        match self.start_payment() {
            Ok(transition) => observe(&transition),
            Err(TransactionError::WalletNotConnected) => {
                observe(&PhaseTransition {
                    from: Phase::Idle,
                    to: Phase::Error,
                    at: self.clock.now(),
                });
                return Err(TransactionError::WalletNotConnected);
            }
            Err(e) => return Err(e),
        }
        self.simulator
            .run_with(self.clock.as_ref(), &mut self.rng, observe)
            .await
    }

    /// Apply any phase changes due at the clock's current time without
    /// waiting.
    pub fn poll_payment(&mut self) -> Vec<PhaseTransition> {
        self.simulator.advance(self.clock.now(), &mut self.rng)
    }

    /// Drive an already started payment to a terminal state.
    pub async fn await_payment(&mut self) -> Result<TxHash, TransactionError> {
        self.simulator
            .run(self.clock.as_ref(), &mut self.rng)
            .await
    }

    /// Acknowledge a finished payment and return to idle.
    pub fn reset_transaction(&mut self) -> Result<(), TransactionError> {
        self.simulator.reset()
    }

    pub fn summary(&self) -> BookingSummary {
        let phase = self.simulator.phase();
        BookingSummary {
            flight: self.selected.clone(),
            connected: self.wallet.is_connected(),
            account: self.wallet.account().cloned(),
            account_source: self.wallet.source(),
            balance: self.wallet.balance(),
            speed: self.speed,
            fees: self.fee_breakdown(),
            phase,
            progress: phase.progress(),
            tx_hash: self.simulator.tx_hash(),
            error: self.simulator.error().map(ToString::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;
    use fly_core::error::CatalogError;
    use fly_wallet::{FailingProvider, StaticProvider};
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Log sink shared between a test and its subscriber.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn logged<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buf = LogBuffer::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        (out, buf.contents())
    }

    fn coordinator() -> (BookingCoordinator, Arc<VirtualClock>) {
        let clock = Arc::new(VirtualClock::new());
        let c = BookingCoordinator::seeded(
            Catalog::default(),
            SimulatorConfig::default(),
            clock.clone(),
            1,
        );
        (c, clock)
    }

    #[test]
    fn fresh_summary_is_empty() {
        let (c, _) = coordinator();
        let s = c.summary();
        assert!(s.flight.is_none());
        assert!(!s.connected);
        assert!(s.fees.is_none());
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.progress, 0);
        assert_eq!(s.speed, Speed::Average);
    }

    #[test]
    fn select_unknown_flight_fails() {
        let (mut c, _) = coordinator();
        let err = c.select_flight(99).unwrap_err();
        assert_eq!(err, FlyError::Catalog(CatalogError::UnknownFlight(99)));
        assert!(c.selected().is_none());
    }

    #[test]
    fn fee_breakdown_follows_selection_and_speed() {
        let (mut c, _) = coordinator();
        c.select_flight(1).unwrap();
        let avg = c.fee_breakdown().unwrap();
        assert_eq!(avg.speed, Speed::Average);
        assert!((avg.total - 0.852225).abs() < 1e-12);

        c.set_speed(Speed::Fast);
        let fast = c.fee_breakdown().unwrap();
        assert_eq!(fast.gas_price, 0.000032);
        assert!(fast.total > avg.total);
    }

    #[test]
    fn start_without_flight_is_rejected() {
        let (mut c, _) = coordinator();
        assert_eq!(c.start_payment(), Err(TransactionError::NoFlightSelected));
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn connect_waits_for_handshake() {
        let (mut c, clock) = coordinator();
        let out = c.connect().await.unwrap();
        assert_eq!(out.source, AccountSource::Placeholder);
        assert_eq!(clock.now(), Duration::from_millis(1_000));
        assert!(c.wallet().is_connected());
    }

    #[tokio::test]
    async fn connect_uses_provider_when_present() {
        let (c, _) = coordinator();
        let mut c = c.with_provider(Arc::new(StaticProvider::single("0xProvided")));
        let out = c.connect().await.unwrap();
        assert_eq!(out.account, AccountId::new("0xProvided"));
        assert_eq!(c.summary().account_source, Some(AccountSource::Provider));
    }

    #[tokio::test]
    async fn connect_failure_leaves_disconnected() {
        let (c, _) = coordinator();
        let mut c = c.with_provider(Arc::new(FailingProvider::default()));
        assert!(c.connect().await.is_err());
        assert!(!c.summary().connected);
    }

    #[tokio::test]
    async fn only_accepted_starts_are_logged_as_started() {
        let (mut c, _) = coordinator();
        c.select_flight(1).unwrap();

        let (res, logs) = logged(|| c.start_payment());
        assert_eq!(res, Err(TransactionError::WalletNotConnected));
        assert!(!logs.contains("payment started"), "{logs}");

        c.reset_transaction().unwrap();
        c.connect().await.unwrap();
        let (res, logs) = logged(|| c.start_payment());
        assert!(res.is_ok());
        assert!(logs.contains("payment started"), "{logs}");

        let (res, logs) = logged(|| c.start_payment());
        assert_eq!(res, Err(TransactionError::NotIdle { phase: Phase::Approving }));
        assert!(!logs.contains("payment started"), "{logs}");
    }

    #[tokio::test]
    async fn pay_disconnected_reports_error_phase() {
        let (mut c, clock) = coordinator();
        c.select_flight(2).unwrap();
        let mut seen = Vec::new();
        let err = c.pay_with(|t| seen.push(t.to)).await.unwrap_err();
        assert_eq!(err, TransactionError::WalletNotConnected);
        assert_eq!(seen, vec![Phase::Error]);
        let s = c.summary();
        assert_eq!(s.phase, Phase::Error);
        assert_eq!(s.error.as_deref(), Some("Please connect your wallet first"));
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[tokio::test]
    async fn pay_connected_reaches_success() {
        let (mut c, clock) = coordinator();
        c.select_flight(2).unwrap();
        c.connect().await.unwrap();

        let mut seen = Vec::new();
        let hash = c.pay_with(|t| seen.push(t.to)).await.unwrap();
        assert_eq!(
            seen,
            vec![Phase::Approving, Phase::Processing, Phase::Confirming, Phase::Success]
        );
        assert_eq!(clock.now(), Duration::from_millis(8_500));

        let s = c.summary();
        assert_eq!(s.phase, Phase::Success);
        assert_eq!(s.progress, 100);
        assert_eq!(s.tx_hash, Some(hash));
        assert!(s.error.is_none());
    }

    #[tokio::test]
    async fn select_rejected_while_in_flight() {
        let (mut c, _) = coordinator();
        c.select_flight(1).unwrap();
        c.connect().await.unwrap();
        c.start_payment().unwrap();
        assert_eq!(
            c.select_flight(3).unwrap_err(),
            FlyError::Transaction(TransactionError::NotIdle { phase: Phase::Approving })
        );
        assert_eq!(c.selected().unwrap().id, 1);
    }

    #[tokio::test]
    async fn reset_after_success_allows_new_payment() {
        let (mut c, _) = coordinator();
        c.select_flight(3).unwrap();
        c.connect().await.unwrap();
        let first = c.pay().await.unwrap();
        c.reset_transaction().unwrap();
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.summary().tx_hash.is_none());
        let second = c.pay().await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn disconnect_keeps_selection() {
        let (mut c, _) = coordinator();
        c.select_flight(1).unwrap();
        c.connect().await.unwrap();
        c.disconnect();
        let s = c.summary();
        assert!(!s.connected);
        assert!(s.account.is_none());
        assert_eq!(s.flight.unwrap().id, 1);
    }

    #[test]
    fn summary_serializes_to_json() {
        let (mut c, _) = coordinator();
        c.select_flight(2).unwrap();
        let json = serde_json::to_value(c.summary()).unwrap();
        assert_eq!(json["phase"], "idle");
        assert_eq!(json["speed"], "average");
        assert_eq!(json["flight"]["token"], "USDC");
        assert_eq!(json["fees"]["reward"], 4);
    }
}
