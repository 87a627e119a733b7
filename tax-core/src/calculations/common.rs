//! Common utility functions for tax calculations.
//!
//! Rounding and flooring helpers shared by the liability calculator and
//! the assessment, plus the bound every input amount must respect.

use rust_decimal::Decimal;

use crate::error::AmountOutOfRange;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a value at zero.
///
/// Taxable income goes through this before slab evaluation so deductions
/// larger than income produce zero tax rather than a negative base.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(-5000)), dec!(0));
/// assert_eq!(floor_at_zero(dec!(5000)), dec!(5000));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Largest magnitude accepted for a single income or deduction amount
/// (₹10^15). Sums and differences of bounded amounts stay far inside the
/// range of [`Decimal`].
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Passes `amount` through when its magnitude is within [`MAX_AMOUNT`].
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::check_amount;
///
/// assert_eq!(check_amount("Salary", dec!(1200000)), Ok(dec!(1200000)));
/// assert!(check_amount("Salary", Decimal::MAX).is_err());
/// ```
pub fn check_amount(
    label: &str,
    amount: Decimal,
) -> Result<Decimal, AmountOutOfRange> {
    if amount.abs() > MAX_AMOUNT {
        return Err(AmountOutOfRange {
            label: label.to_string(),
            amount,
        });
    }
    Ok(amount)
}
