use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Regime, SlabSchedule};
use crate::error::RulesError;

/// Slab schedules for both regimes plus the flat cess applied on top.
///
/// The [`Default`] rules are the built-in old and new regime slabs with a
/// 4% cess. Custom rules are validated on construction and on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTaxRules")]
pub struct TaxRules {
    cess_rate: Decimal,
    old_regime: SlabSchedule,
    new_regime: SlabSchedule,
}

#[derive(Deserialize)]
struct RawTaxRules {
    cess_rate: Decimal,
    old_regime: SlabSchedule,
    new_regime: SlabSchedule,
}

impl TaxRules {
    /// # Errors
    ///
    /// Returns [`RulesError::NegativeCess`] if `cess_rate` is below zero and
    /// [`RulesError::ExcessiveCess`] if it is above one.
    pub fn new(
        cess_rate: Decimal,
        old_regime: SlabSchedule,
        new_regime: SlabSchedule,
    ) -> Result<Self, RulesError> {
        if cess_rate < Decimal::ZERO {
            return Err(RulesError::NegativeCess(cess_rate));
        }
        if cess_rate > Decimal::ONE {
            return Err(RulesError::ExcessiveCess(cess_rate));
        }

        Ok(Self {
            cess_rate,
            old_regime,
            new_regime,
        })
    }

    pub fn cess_rate(&self) -> Decimal {
        self.cess_rate
    }

    /// Multiplier applied to a slab total to include cess (1.04 by default).
    pub fn cess_multiplier(&self) -> Decimal {
        Decimal::ONE + self.cess_rate
    }

    pub fn schedule(
        &self,
        regime: Regime,
    ) -> &SlabSchedule {
        match regime {
            Regime::Old => &self.old_regime,
            Regime::New => &self.new_regime,
        }
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self {
            cess_rate: Decimal::new(4, 2),
            old_regime: SlabSchedule::old_regime(),
            new_regime: SlabSchedule::new_regime(),
        }
    }
}

impl TryFrom<RawTaxRules> for TaxRules {
    type Error = RulesError;

    fn try_from(raw: RawTaxRules) -> Result<Self, Self::Error> {
        Self::new(raw.cess_rate, raw.old_regime, raw.new_regime)
    }
}
