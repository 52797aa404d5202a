//! Fixed-point money helpers.
//!
//! All monetary values are [`Decimal`]s in Turkish lira. Values keep full
//! precision through a calculation and are rounded with [`round2`] only where
//! they leave it (final prices, line totals, order totals).

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol used for display.
pub const CURRENCY_SYMBOL: &str = "₺";

/// Round a monetary amount to 2 decimal places, midpoint away from zero.
///
/// ```
/// use pazar_core::round2;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round2(Decimal::new(172_505, 3)), Decimal::new(17_251, 2));
/// ```
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as Turkish lira (tr-TR style, e.g. `₺1.234,56`).
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = round2(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let fixed = format!("{:.2}", rounded.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!("{sign}{CURRENCY_SYMBOL}{},{fraction}", group_thousands(whole))
}

/// Format a commission rate (`0.30`) as a whole percentage (`%30`).
#[must_use]
pub fn format_commission_rate(rate: Decimal) -> String {
    format!("%{}", format_percentage(rate * Decimal::ONE_HUNDRED))
}

/// Render a percentage value rounded to a whole number, without the sign.
#[must_use]
pub fn format_percentage(percentage: Decimal) -> String {
    percentage
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_round2_midpoint_away_from_zero() {
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round2(dec!(172.5)), dec!(172.50));
    }

    #[test]
    fn test_format_price_small_amounts() {
        assert_eq!(format_price(dec!(5)), "₺5,00");
        assert_eq!(format_price(dec!(0)), "₺0,00");
        assert_eq!(format_price(dec!(150.5)), "₺150,50");
    }

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(dec!(1234.56)), "₺1.234,56");
        assert_eq!(format_price(dec!(1234567.891)), "₺1.234.567,89");
        assert_eq!(format_price(dec!(100000)), "₺100.000,00");
    }

    #[test]
    fn test_format_price_negative() {
        assert_eq!(format_price(dec!(-5)), "-₺5,00");
        assert_eq!(format_price(dec!(-0.001)), "₺0,00");
    }

    #[test]
    fn test_format_commission_rate() {
        assert_eq!(format_commission_rate(dec!(0.30)), "%30");
        assert_eq!(format_commission_rate(dec!(0.5)), "%50");
        assert_eq!(format_commission_rate(dec!(0.125)), "%13");
    }
}
