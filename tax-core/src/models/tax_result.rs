use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Regime;
use crate::calculations::recommend;

/// Cess-inclusive liability under both regimes for one set of inputs.
///
/// Produced fresh by each calculation; nothing updates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Old-regime taxable income after deductions, floored at zero.
    pub old_taxable_income: Decimal,
    /// New-regime taxable income; equals GTI, floored at zero.
    pub new_taxable_income: Decimal,
    pub old_regime_tax: Decimal,
    pub new_regime_tax: Decimal,
}

impl TaxResult {
    pub fn tax_for(
        &self,
        regime: Regime,
    ) -> Decimal {
        match regime {
            Regime::Old => self.old_regime_tax,
            Regime::New => self.new_regime_tax,
        }
    }

    pub fn recommended_regime(&self) -> Regime {
        recommend(self.old_regime_tax, self.new_regime_tax)
    }

    /// Amount saved by choosing the cheaper regime.
    pub fn savings(&self) -> Decimal {
        (self.old_regime_tax - self.new_regime_tax).abs()
    }
}
