use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::TaxCalculator;
use crate::models::{DeductionSet, IncomeProfile, Regime, TaxResult, TaxRules};

/// Everything shown to the user after a calculation: GTI, both regimes'
/// liability and the recommended regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub gross_total_income: Decimal,
    pub total_deductions: Decimal,
    pub result: TaxResult,
    pub recommended: Regime,
}

impl Assessment {
    pub fn assess(
        profile: &IncomeProfile,
        deductions: &DeductionSet,
        rules: &TaxRules,
    ) -> Self {
        let gross_total_income = profile.gross_total_income();
        let result = TaxCalculator::new(rules).compute(gross_total_income, deductions);
        let recommended = result.recommended_regime();

        Self {
            gross_total_income,
            total_deductions: deductions.total(),
            result,
            recommended,
        }
    }

    pub fn old_regime_tax(&self) -> Decimal {
        self.result.old_regime_tax
    }

    pub fn new_regime_tax(&self) -> Decimal {
        self.result.new_regime_tax
    }
}
