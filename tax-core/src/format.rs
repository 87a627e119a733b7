//! Display formatting for rupee amounts.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Formats an amount as rupees with comma thousands separators and two
/// decimal places, e.g. `₹1,234,567.80`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format::format_rupees;
///
/// assert_eq!(format_rupees(dec!(117000)), "₹117,000.00");
/// assert_eq!(format_rupees(dec!(-1234.5)), "-₹1,234.50");
/// ```
pub fn format_rupees(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.2}", rounded.abs());
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!("{sign}₹{}.{fraction}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_rupees(dec!(0)), "₹0.00");
    }

    #[test]
    fn formats_without_separator_below_thousand() {
        assert_eq!(format_rupees(dec!(999.5)), "₹999.50");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_rupees(dec!(1000)), "₹1,000.00");
        assert_eq!(format_rupees(dec!(114400)), "₹114,400.00");
        assert_eq!(format_rupees(dec!(1234567.891)), "₹1,234,567.89");
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(format_rupees(dec!(0.005)), "₹0.01");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_rupees(dec!(-0.001)), "₹0.00");
    }
}
