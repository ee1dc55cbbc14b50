//! Simulation constants. Monetary values are in whole token units.

use std::time::Duration;

/// Gas price charged at the `slow` speed tier.
pub const GAS_PRICE_SLOW: f64 = 0.000_020;

/// Gas price charged at the `average` speed tier.
pub const GAS_PRICE_AVERAGE: f64 = 0.000_025;

/// Gas price charged at the `fast` speed tier.
pub const GAS_PRICE_FAST: f64 = 0.000_032;

/// Share of the principal charged as network gas (0.2%).
pub const GAS_COST_RATE: f64 = 0.002;

/// Flat FlyAnyTrip network fee, independent of amount and tier.
pub const NETWORK_FEE: f64 = 0.000_5;

/// Mock ETH→USD reference rate used for the fiat total.
///
/// Applied to every token symbol; there is no per-asset price feed.
pub const ETH_USD_RATE: f64 = 2_500.0;

/// FAT reward tokens earned per unit of principal.
pub const REWARD_MULTIPLIER: f64 = 10.0;

/// Symbol of the loyalty reward token.
pub const REWARD_TOKEN_SYMBOL: &str = "FAT";

/// Simulated wallet handshake latency.
pub const CONNECT_DELAY: Duration = Duration::from_millis(1_000);

/// Time spent in the `approving` phase.
pub const APPROVE_DELAY: Duration = Duration::from_millis(2_000);

/// Time spent in the `processing` phase.
pub const PROCESS_DELAY: Duration = Duration::from_millis(3_000);

/// Time spent in the `confirming` phase.
pub const CONFIRM_DELAY: Duration = Duration::from_millis(2_500);

/// Placeholder accounts handed out when no wallet provider is present.
pub const MOCK_ACCOUNTS: [&str; 3] = [
    "0x71C7656EC7ab88b098defB751B7401B5f6d8976F",
    "0xAb5801a7D398351b8bE11C439e05C5B3259aec9B",
    "0x4B20993Bc481177ec7E8f571ceCaE8A9e22C02db",
];

/// Lower bound of the demo balance shown for a connected account, in ETH.
pub const DEMO_BALANCE_MIN: f64 = 0.5;

/// Upper bound (exclusive) of the demo balance, in ETH.
pub const DEMO_BALANCE_MAX: f64 = 5.5;

/// Shown when a wallet provider fails without a message of its own.
pub const CONNECTION_FAILED_MESSAGE: &str = "Connection failed. Please try again.";

/// Size in bytes of a synthetic transaction hash.
pub const TX_HASH_LEN: usize = 32;
