//! Progressive tax liability under the old and new regimes.
//!
//! # Calculation Steps
//!
//! | Step | Old regime | New regime |
//! |------|------------|------------|
//! | 1    | Taxable income = GTI − total deductions, floored at 0 | Taxable income = GTI, floored at 0 |
//! | 2    | Slab total from the old-regime schedule | Slab total from the new-regime schedule |
//! | 3    | Slab total × (1 + cess), rounded to 2 dp | Slab total × (1 + cess), rounded to 2 dp |
//!
//! Deductions never affect the new regime.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{DeductionSet, compute_tax};
//!
//! let result = compute_tax(dec!(1000000), &DeductionSet::new().with("d", dec!(0)));
//!
//! assert_eq!(result.old_regime_tax, dec!(117000));
//! assert_eq!(result.new_regime_tax, dec!(114400));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{floor_at_zero, round_half_up};
use crate::models::{DeductionSet, Regime, TaxResult, TaxRules};

/// Computes both regimes' liability using the built-in rules.
///
/// Pure and infallible: negative income or deductions larger than income
/// yield zero tax, never an error. Amounts are expected to be within
/// [`MAX_AMOUNT`](crate::MAX_AMOUNT); see [`IncomeProfile::validate`] and
/// [`DeductionSet::validate`].
///
/// [`IncomeProfile::validate`]: crate::IncomeProfile::validate
/// [`DeductionSet::validate`]: crate::DeductionSet::validate
pub fn compute_tax(
    gti: Decimal,
    deductions: &DeductionSet,
) -> TaxResult {
    TaxCalculator::new(&TaxRules::default()).compute(gti, deductions)
}

/// Calculator bound to a particular rule set.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    rules: &'a TaxRules,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(rules: &'a TaxRules) -> Self {
        Self { rules }
    }

    /// Computes old- and new-regime liability for `gti` and `deductions`.
    pub fn compute(
        &self,
        gti: Decimal,
        deductions: &DeductionSet,
    ) -> TaxResult {
        let old_taxable_income = self.taxable_income(Regime::Old, gti, deductions);
        let new_taxable_income = self.taxable_income(Regime::New, gti, deductions);

        let old_regime_tax = self.regime_tax(Regime::Old, old_taxable_income);
        let new_regime_tax = self.regime_tax(Regime::New, new_taxable_income);

        debug!(
            %gti,
            deductions = %deductions.total(),
            %old_taxable_income,
            %new_taxable_income,
            %old_regime_tax,
            %new_regime_tax,
            "computed tax liability"
        );

        TaxResult {
            old_taxable_income,
            new_taxable_income,
            old_regime_tax,
            new_regime_tax,
        }
    }

    /// Taxable income under `regime`, floored at zero.
    fn taxable_income(
        &self,
        regime: Regime,
        gti: Decimal,
        deductions: &DeductionSet,
    ) -> Decimal {
        if regime.allows_deductions() {
            floor_at_zero(gti - deductions.total())
        } else {
            floor_at_zero(gti)
        }
    }

    /// Slab total for `taxable` plus cess, rounded to two decimal places.
    fn regime_tax(
        &self,
        regime: Regime,
        taxable: Decimal,
    ) -> Decimal {
        let slab_total = self.rules.schedule(regime).tax_on(taxable);
        round_half_up(slab_total * self.rules.cess_multiplier())
    }
}
