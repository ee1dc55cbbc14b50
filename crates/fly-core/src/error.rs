//! Error types for the FlyAnyTrip simulator.
use thiserror::Error;

use crate::types::Phase;

/// Wallet connection failures. Non-fatal: the session stays disconnected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("wallet provider returned no accounts")] NoAccounts,
    #[error("{0}")] Provider(String),
}

/// Payment failures and rejected transaction-simulator calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Please connect your wallet first")] WalletNotConnected,
    #[error("Transaction failed. Please try again.")] Failed,
    #[error("payment already started: {phase}")] NotIdle { phase: Phase },
    #[error("cannot reset while {phase}")] NotTerminal { phase: Phase },
    #[error("no payment in progress")] NotStarted,
    #[error("no flight selected")] NoFlightSelected,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown flight: {0}")] UnknownFlight(u32),
    #[error("duplicate flight id: {0}")] DuplicateId(u32),
    #[error("invalid price for flight {id}")] InvalidPrice { id: u32 },
    #[error("parse: {0}")] Parse(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlyError {
    #[error(transparent)] Connection(#[from] ConnectionError),
    #[error(transparent)] Transaction(#[from] TransactionError),
    #[error(transparent)] Catalog(#[from] CatalogError),
}
