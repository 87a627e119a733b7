use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::check_amount;
use crate::error::AmountOutOfRange;

/// Income figures collected from the user, one field per source.
///
/// Gross Total Income is derived on demand and never stored, so it always
/// reflects the current field values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeProfile {
    /// Salary or pension income.
    pub salary: Decimal,
    pub rental: Decimal,
    /// Business or professional income.
    pub business: Decimal,
    /// Income declared under presumptive taxation.
    pub presumptive: Decimal,
    pub capital_gains: Decimal,
    pub foreign: Decimal,
    pub crypto: Decimal,
}

impl IncomeProfile {
    /// Sum of every income source (GTI).
    pub fn gross_total_income(&self) -> Decimal {
        self.sources().into_iter().map(|(_, amount)| amount).sum()
    }

    /// Rejects any source whose magnitude exceeds
    /// [`MAX_AMOUNT`](crate::MAX_AMOUNT).
    pub fn validate(&self) -> Result<(), AmountOutOfRange> {
        for (label, amount) in self.sources() {
            check_amount(label, amount)?;
        }
        Ok(())
    }

    /// Each income source paired with a display label, in form order.
    pub fn sources(&self) -> [(&'static str, Decimal); 7] {
        [
            ("Salary/Pension Income", self.salary),
            ("Rental Income", self.rental),
            ("Business/Professional Income", self.business),
            ("Presumptive Income", self.presumptive),
            ("Capital Gains", self.capital_gains),
            ("Foreign Income", self.foreign),
            ("Crypto Income", self.crypto),
        ]
    }
}
