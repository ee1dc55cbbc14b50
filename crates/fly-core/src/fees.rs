//! Gas and fee estimation.
//!
//! Every figure is derived from the principal and the speed tier:
//!
//! - gas cost: `amount × GAS_COST_RATE`, independent of tier
//! - gas price: fixed per tier (see [`Speed::gas_price`])
//! - network fee: [`NETWORK_FEE`], independent of amount and tier
//! - total: `amount + gas cost + gas price + network fee`
//! - fiat total: `total × ETH_USD_RATE`
//! - reward: `round(amount × REWARD_MULTIPLIER)` FAT tokens
//!
//! Amounts are not validated. A zero or negative principal yields
//! proportionally reduced fees.

use serde::Serialize;

use crate::constants::{ETH_USD_RATE, GAS_COST_RATE, NETWORK_FEE, REWARD_MULTIPLIER};
use crate::types::{Speed, Token};

/// Fee breakdown for one payment. Recomputed on every read, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeeBreakdown {
    /// Ticket price.
    pub amount: f64,
    pub token: Token,
    pub speed: Speed,
    /// Percentage-of-principal gas charge.
    pub gas_cost: f64,
    /// Tier-dependent gas price.
    pub gas_price: f64,
    pub network_fee: f64,
    /// Everything the payer is charged.
    pub total: f64,
    /// `total` converted at the reference ETH→USD rate.
    pub total_usd: f64,
    /// FAT reward tokens earned.
    pub reward: i64,
}

impl FeeBreakdown {
    /// Sum of all charges on top of the principal.
    pub fn total_fees(&self) -> f64 {
        self.gas_cost + self.gas_price + self.network_fee
    }
}

/// Gas charge on `amount`, independent of tier.
pub fn gas_cost(amount: f64) -> f64 {
    amount * GAS_COST_RATE
}

/// FAT reward for paying `amount`, rounded half away from zero.
pub fn reward_tokens(amount: f64) -> i64 {
    (amount * REWARD_MULTIPLIER).round() as i64
}

/// Estimate fees for paying `amount` of `token` at `speed`.
///
/// # Examples
///
/// ```
/// use fly_core::fees::estimate;
/// use fly_core::types::{Speed, Token};
///
/// let fees = estimate(0.85, Token::Eth, Speed::Average);
/// assert!((fees.total - 0.852225).abs() < 1e-12);
/// assert_eq!(fees.reward, 9);
/// ```
pub fn estimate(amount: f64, token: Token, speed: Speed) -> FeeBreakdown {
    let gas_cost = gas_cost(amount);
    let gas_price = speed.gas_price();
    let total = amount + gas_cost + gas_price + NETWORK_FEE;

    FeeBreakdown {
        amount,
        token,
        speed,
        gas_cost,
        gas_price,
        network_fee: NETWORK_FEE,
        total,
        total_usd: total * ETH_USD_RATE,
        reward: reward_tokens(amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn worked_example_average_eth() {
        let f = estimate(0.85, Token::Eth, Speed::Average);
        assert!((f.gas_cost - 0.0017).abs() < EPS);
        assert_eq!(f.gas_price, 0.000025);
        assert_eq!(f.network_fee, 0.0005);
        assert!((f.total - 0.852225).abs() < EPS);
        assert!((f.total_usd - 2130.5625).abs() < 1e-8);
        assert_eq!(f.reward, 9);
    }

    #[test]
    fn usdc_flight_reward_rounds_up() {
        let f = estimate(0.42, Token::Usdc, Speed::Fast);
        assert_eq!(f.reward, 4);
        assert_eq!(f.token, Token::Usdc);
        assert!((f.total - (0.42 + 0.00084 + 0.000032 + 0.0005)).abs() < EPS);
    }

    #[test]
    fn tier_only_changes_gas_price() {
        let slow = estimate(1.25, Token::Eth, Speed::Slow);
        let fast = estimate(1.25, Token::Eth, Speed::Fast);
        assert_eq!(slow.gas_cost, fast.gas_cost);
        assert_eq!(slow.network_fee, fast.network_fee);
        assert!((fast.total - slow.total - (0.000032 - 0.000020)).abs() < EPS);
    }

    #[test]
    fn zero_amount_pays_only_fixed_fees() {
        let f = estimate(0.0, Token::Eth, Speed::Slow);
        assert_eq!(f.gas_cost, 0.0);
        assert_eq!(f.reward, 0);
        assert!((f.total - (0.000020 + 0.0005)).abs() < EPS);
    }

    #[test]
    fn negative_amount_is_not_validated() {
        let f = estimate(-1.0, Token::Eth, Speed::Average);
        assert!(f.gas_cost < 0.0);
        assert_eq!(f.reward, -10);
    }

    #[test]
    fn total_fees_excludes_principal() {
        let f = estimate(0.85, Token::Eth, Speed::Average);
        assert!((f.total - f.amount - f.total_fees()).abs() < EPS);
    }

    fn any_speed() -> impl Strategy<Value = Speed> {
        prop_oneof![Just(Speed::Slow), Just(Speed::Average), Just(Speed::Fast)]
    }

    proptest! {
        #[test]
        fn total_is_sum_of_parts(amount in -1_000.0f64..1_000.0, speed in any_speed()) {
            let f = estimate(amount, Token::Eth, speed);
            prop_assert_eq!(f.gas_cost, amount * 0.002);
            prop_assert_eq!(f.gas_price, speed.gas_price());
            prop_assert_eq!(f.total, amount + amount * 0.002 + speed.gas_price() + 0.0005);
        }

        #[test]
        fn estimate_is_pure(amount in 0.0f64..100.0, speed in any_speed()) {
            let a = estimate(amount, Token::Usdc, speed);
            let b = estimate(amount, Token::Usdc, speed);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn reward_is_rounded_tenfold(amount in 0.0f64..10_000.0) {
            let f = estimate(amount, Token::Eth, Speed::Average);
            prop_assert_eq!(f.reward, (amount * 10.0).round() as i64);
        }

        #[test]
        fn faster_tier_never_cheaper(amount in 0.0f64..100.0) {
            let slow = estimate(amount, Token::Eth, Speed::Slow).total;
            let avg = estimate(amount, Token::Eth, Speed::Average).total;
            let fast = estimate(amount, Token::Eth, Speed::Fast).total;
            prop_assert!(slow <= avg && avg <= fast);
        }
    }
}
