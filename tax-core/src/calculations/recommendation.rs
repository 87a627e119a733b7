use rust_decimal::Decimal;

use crate::models::Regime;

/// Picks the regime to recommend.
///
/// Old wins only when strictly cheaper; a tie goes to the new regime.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{Regime, recommend};
///
/// assert_eq!(recommend(dec!(100), dec!(200)), Regime::Old);
/// assert_eq!(recommend(dec!(200), dec!(200)), Regime::New);
/// ```
pub fn recommend(
    old_tax: Decimal,
    new_tax: Decimal,
) -> Regime {
    if old_tax < new_tax {
        Regime::Old
    } else {
        Regime::New
    }
}
