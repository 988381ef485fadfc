//! 订单金额计算
//!
//! 所有金额运算走 [`rust_decimal`]，避免 f64 累积误差。
//! 手续费按买家的 fee_ratio 百分比计算，四舍五入到分 (2 位小数)，
//! 在下单时一次性冻结到订单上。

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Convert f64 to Decimal for precise arithmetic
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal back to f64 for storage
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Frozen price breakdown for a new order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderQuote {
    pub price: f64,
    pub fee: f64,
    pub total: f64,
}

/// Compute fee and total for a purchase.
///
/// `fee = round2(price * fee_ratio / 100)`, `total = price + fee`.
/// The result is captured on the order at creation time and never
/// recomputed, even if the buyer's fee ratio changes later.
pub fn quote(price: f64, fee_ratio: f64) -> OrderQuote {
    let price_d = to_decimal(price);
    let fee_d = (price_d * to_decimal(fee_ratio) / Decimal::ONE_HUNDRED).round_dp(2);
    let total_d = (price_d + fee_d).round_dp(2);

    OrderQuote {
        price,
        fee: to_f64(fee_d),
        total: to_f64(total_d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_quote_basic() {
        // price=100, ratio=5% -> fee=5, total=105
        let q = quote(100.0, 5.0);
        assert_eq!(q.fee, 5.0);
        assert_eq!(q.total, 105.0);
    }

    #[test]
    fn test_quote_zero_ratio() {
        let q = quote(49.9, 0.0);
        assert_eq!(q.fee, 0.0);
        assert_eq!(q.total, 49.9);
    }

    #[test]
    fn test_quote_rounds_to_cents() {
        // 9.99 * 7.5% = 0.74925 -> 0.75 (banker's rounding on the half-cent)
        let q = quote(9.99, 7.5);
        assert_eq!(q.fee, 0.75);
        assert_eq!(q.total, 10.74);
    }

    #[test]
    fn test_quote_fractional_price() {
        // 33.33 * 3% = 0.9999 -> 1.00
        let q = quote(33.33, 3.0);
        assert_eq!(q.fee, 1.0);
        assert_eq!(q.total, 34.33);
    }
}
