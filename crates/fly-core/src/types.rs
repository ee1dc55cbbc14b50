//! Domain types: tokens, speed tiers, transaction phases, flight offers,
//! account identifiers, and synthetic transaction hashes.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::{GAS_PRICE_AVERAGE, GAS_PRICE_FAST, GAS_PRICE_SLOW, TX_HASH_LEN};

/// Payment token a flight is priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Token {
    Eth,
    Usdc,
}

impl Token {
    /// Ticker symbol, e.g. `"ETH"`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Usdc => "USDC",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Token {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ETH" => Ok(Self::Eth),
            "USDC" => Ok(Self::Usdc),
            other => Err(format!("unknown token: {other}")),
        }
    }
}

/// Transaction speed tier selecting a fixed gas price point.
///
/// # Examples
///
/// ```
/// use fly_core::types::Speed;
/// assert_eq!(Speed::default(), Speed::Average);
/// assert!(Speed::Slow.gas_price() < Speed::Fast.gas_price());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Average,
    Fast,
}

impl Speed {
    /// All tiers, cheapest first.
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Average, Speed::Fast];

    /// Gas price charged at this tier.
    pub fn gas_price(&self) -> f64 {
        match self {
            Self::Slow => GAS_PRICE_SLOW,
            Self::Average => GAS_PRICE_AVERAGE,
            Self::Fast => GAS_PRICE_FAST,
        }
    }

    /// Expected confirmation window shown next to the tier.
    pub fn eta_label(&self) -> &'static str {
        match self {
            Self::Slow => "~5-10 minutes • Cheapest",
            Self::Average => "~2-5 minutes • Recommended",
            Self::Fast => "~1-2 minutes • Priority",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Average => "average",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Speed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "average" => Ok(Self::Average),
            "fast" => Ok(Self::Fast),
            other => Err(format!("unknown speed tier: {other}")),
        }
    }
}

/// Phase of a simulated payment.
///
/// The happy path is `Idle → Approving → Processing → Confirming → Success`.
/// `Error` is reachable from `Idle` (wallet not connected) and from any
/// in-flight phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Approving,
    Processing,
    Confirming,
    Success,
    Error,
}

impl Phase {
    /// `true` for the three timed phases between start and a terminal state.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Approving | Self::Processing | Self::Confirming)
    }

    /// `true` for `Success` and `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    /// Phase entered when this phase's timer elapses. `None` outside the
    /// in-flight phases.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Self::Approving => Some(Self::Processing),
            Self::Processing => Some(Self::Confirming),
            Self::Confirming => Some(Self::Success),
            _ => None,
        }
    }

    /// Progress bar position, 0–100.
    pub fn progress(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Approving => 33,
            Self::Processing => 66,
            Self::Confirming => 90,
            Self::Success | Self::Error => 100,
        }
    }

    /// Tracker step label for in-flight phases.
    pub fn step_label(&self) -> Option<&'static str> {
        match self {
            Self::Approving => Some("Approve Spending"),
            Self::Processing => Some("Process Payment"),
            Self::Confirming => Some("Confirm Booking"),
            _ => None,
        }
    }

    /// Tracker step description for in-flight phases.
    pub fn step_description(&self) -> Option<&'static str> {
        match self {
            Self::Approving => Some("Allow contract to spend your tokens"),
            Self::Processing => Some("Transfer tokens to FlyAnyTrip"),
            Self::Confirming => Some("Secure your flight on blockchain"),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Approving => "approving",
            Self::Processing => "processing",
            Self::Confirming => "confirming",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable flight. Immutable once loaded into a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: u32,
    /// Origin airport code.
    pub from: String,
    /// Destination airport code.
    pub to: String,
    /// Ticket price in `token` units.
    pub price: f64,
    pub token: Token,
    pub airline: String,
    /// Human-readable flight time, e.g. `"5h 45m"`.
    pub duration: String,
}

impl FlightOffer {
    pub fn new(
        id: u32,
        from: &str,
        to: &str,
        price: f64,
        token: Token,
        airline: &str,
        duration: &str,
    ) -> Self {
        Self {
            id,
            from: from.to_string(),
            to: to.to_string(),
            price,
            token,
            airline: airline.to_string(),
            duration: duration.to_string(),
        }
    }

    /// Route label, e.g. `"JFK → LAX"`.
    pub fn route(&self) -> String {
        format!("{} → {}", self.from, self.to)
    }
}

/// A wallet account identifier as returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form keeping the first six and last four characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use fly_core::types::AccountId;
    /// let a = AccountId::new("0x71C7656EC7ab88b098defB751B7401B5f6d8976F");
    /// assert_eq!(a.abbreviated(), "0x71C7...976F");
    /// ```
    pub fn abbreviated(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Synthetic transaction identifier. Random bytes, not a real hash; uniqueness
/// is probabilistic only.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash(pub [u8; TX_HASH_LEN]);

impl TxHash {
    /// Draw a fresh identifier from `rng`.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; TX_HASH_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TX_HASH_LEN] {
        &self.0
    }

    /// `0x` followed by the first and last four bytes, e.g.
    /// `0x1a2b3c4d...5e6f7a8b`.
    pub fn abbreviated(&self) -> String {
        format!(
            "0x{}...{}",
            hex::encode(&self.0[..4]),
            hex::encode(&self.0[TX_HASH_LEN - 4..])
        )
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self.abbreviated())
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
