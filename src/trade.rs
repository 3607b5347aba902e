//! Trade arithmetic: crypto P&L and stock-split rebasing

use serde::{Deserialize, Serialize};

use crate::numeric::{finite_or, non_negative};

/// A completed round-trip crypto trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CryptoTrade {
    pub buy_price: f64,
    pub sell_price: f64,
    pub quantity: f64,
    /// Exchange fee per trade side, in percent
    pub fee_pct: f64,
}

/// Realized profit and loss for a crypto trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CryptoPnl {
    pub buy_fee: f64,
    pub sell_fee: f64,
    /// Purchase outlay including the buy-side fee
    pub cost: f64,
    /// Sale receipts net of the sell-side fee
    pub proceeds: f64,
    pub pnl: f64,
    /// Return on cost; 0 when there was no cost
    pub roi: f64,
    /// Sell price at which the trade nets exactly zero; 0 when undefined
    pub break_even: f64,
}

/// Compute fees, net P&L, return on cost, and the break-even sell price.
///
/// The break-even price solves `price * (1 - f) = buy_price * (1 + f)`. It
/// is undefined (reported as 0) for a zero quantity, or when the fee rate
/// reaches 100% and eats any sale outright.
pub fn crypto_pnl(trade: &CryptoTrade) -> CryptoPnl {
    let buy_price = finite_or(trade.buy_price, 0.0);
    let sell_price = finite_or(trade.sell_price, 0.0);
    let quantity = finite_or(trade.quantity, 0.0);
    let fee_rate = non_negative(trade.fee_pct) / 100.0;

    let buy_fee = buy_price * quantity * fee_rate;
    let sell_fee = sell_price * quantity * fee_rate;
    let cost = buy_price * quantity + buy_fee;
    let proceeds = sell_price * quantity - sell_fee;
    let pnl = proceeds - cost;
    let roi = if cost > 0.0 { pnl / cost } else { 0.0 };
    let break_even = if quantity > 0.0 && fee_rate < 1.0 {
        buy_price * (1.0 + fee_rate) / (1.0 - fee_rate)
    } else {
        0.0
    };

    CryptoPnl {
        buy_fee,
        sell_fee,
        cost,
        proceeds,
        pnl,
        roi,
        break_even,
    }
}

/// Share and price rebasing after a stock split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitResult {
    /// New shares per old share (A / B for an A-for-B split)
    pub factor: f64,
    pub new_shares: f64,
    pub new_price: f64,
}

/// Rebase a position through an A-for-B split. Ratio legs below 1 are
/// clamped up to 1, so a degenerate ratio leaves the position unchanged.
/// Total position value is preserved.
pub fn stock_split(shares: f64, price: f64, ratio_a: f64, ratio_b: f64) -> SplitResult {
    let shares = finite_or(shares, 0.0);
    let price = finite_or(price, 0.0);
    let a = finite_or(ratio_a, 1.0).max(1.0);
    let b = finite_or(ratio_b, 1.0).max(1.0);

    let factor = a / b;
    SplitResult {
        factor,
        new_shares: shares * factor,
        new_price: price / factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_profitable_trade() {
        let result = crypto_pnl(&CryptoTrade {
            buy_price: 100.0,
            sell_price: 130.0,
            quantity: 2.0,
            fee_pct: 1.0,
        });

        assert_abs_diff_eq!(result.buy_fee, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.sell_fee, 2.6, epsilon = 1e-12);
        assert_abs_diff_eq!(result.cost, 202.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.proceeds, 257.4, epsilon = 1e-12);
        assert_abs_diff_eq!(result.pnl, 55.4, epsilon = 1e-12);
        assert_abs_diff_eq!(result.roi, 55.4 / 202.0, epsilon = 1e-12);
    }

    #[test]
    fn test_selling_at_break_even_nets_zero() {
        for fee_pct in [0.0, 0.25, 1.0, 2.5] {
            let quote = crypto_pnl(&CryptoTrade {
                buy_price: 40_000.0,
                sell_price: 0.0,
                quantity: 0.5,
                fee_pct,
            });
            let result = crypto_pnl(&CryptoTrade {
                buy_price: 40_000.0,
                sell_price: quote.break_even,
                quantity: 0.5,
                fee_pct,
            });
            assert_abs_diff_eq!(result.pnl, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_break_even_undefined_cases() {
        let zero_quantity = crypto_pnl(&CryptoTrade {
            buy_price: 100.0,
            sell_price: 110.0,
            quantity: 0.0,
            fee_pct: 1.0,
        });
        assert_eq!(zero_quantity.break_even, 0.0);
        assert_eq!(zero_quantity.roi, 0.0);

        let confiscatory_fee = crypto_pnl(&CryptoTrade {
            buy_price: 100.0,
            sell_price: 110.0,
            quantity: 1.0,
            fee_pct: 100.0,
        });
        assert_eq!(confiscatory_fee.break_even, 0.0);
    }

    #[test]
    fn test_zero_fee_break_even_is_buy_price() {
        let result = crypto_pnl(&CryptoTrade {
            buy_price: 123.45,
            sell_price: 0.0,
            quantity: 1.0,
            fee_pct: 0.0,
        });
        assert_eq!(result.break_even, 123.45);
    }

    #[test]
    fn test_split_preserves_position_value() {
        let cases = [(2.0, 1.0), (3.0, 2.0), (7.0, 1.0), (1.0, 1.0), (10.0, 3.0)];
        for (a, b) in cases {
            let result = stock_split(120.0, 87.5, a, b);
            assert_relative_eq!(
                result.new_shares * result.new_price,
                120.0 * 87.5,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_forward_split_rebases() {
        let result = stock_split(100.0, 50.0, 2.0, 1.0);
        assert_eq!(result.factor, 2.0);
        assert_eq!(result.new_shares, 200.0);
        assert_eq!(result.new_price, 25.0);
    }

    #[test]
    fn test_ratio_legs_clamp_to_one() {
        let result = stock_split(100.0, 50.0, 0.0, -3.0);
        assert_eq!(result.factor, 1.0);
        assert_eq!(result.new_shares, 100.0);
        assert_eq!(result.new_price, 50.0);
    }
}
