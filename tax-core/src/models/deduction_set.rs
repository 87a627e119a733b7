use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::check_amount;
use crate::error::AmountOutOfRange;

/// Section 80C investments (PPF, ELSS, etc.).
pub const SECTION_80C: &str = "80C (PPF, ELSS, etc.)";
/// Section 80D health insurance premiums.
pub const SECTION_80D: &str = "80D (Health Insurance)";
/// Section 24(b) home loan interest.
pub const HOME_LOAN_INTEREST: &str = "Home Loan Interest (Sec 24B)";
/// Defense personnel only.
pub const GALLANTRY_AWARD: &str = "Gallantry Award Exemption";
/// Defense personnel only.
pub const DISABILITY_PENSION: &str = "Disability Pension Exemption";

/// Deduction amounts keyed by category label.
///
/// Only the old regime honors these. No caps are enforced here; callers
/// that want statutory limits apply them before inserting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeductionSet {
    entries: BTreeMap<String, Decimal>,
}

impl DeductionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three fixed categories at their form defaults:
    /// 80C 1,50,000, 80D 50,000 and home loan interest 2,00,000.
    pub fn standard() -> Self {
        Self::new()
            .with(SECTION_80C, Decimal::from(150_000))
            .with(SECTION_80D, Decimal::from(50_000))
            .with(HOME_LOAN_INTEREST, Decimal::from(200_000))
    }

    /// Adds the two defense-personnel exemption categories.
    pub fn with_defense_exemptions(
        self,
        gallantry_award: Decimal,
        disability_pension: Decimal,
    ) -> Self {
        self.with(GALLANTRY_AWARD, gallantry_award)
            .with(DISABILITY_PENSION, disability_pension)
    }

    /// Builder form of [`DeductionSet::insert`].
    pub fn with(
        mut self,
        label: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        self.insert(label, amount);
        self
    }

    /// Sets the amount for `label`, returning the previous amount if any.
    pub fn insert(
        &mut self,
        label: impl Into<String>,
        amount: Decimal,
    ) -> Option<Decimal> {
        self.entries.insert(label.into(), amount)
    }

    pub fn get(
        &self,
        label: &str,
    ) -> Option<Decimal> {
        self.entries.get(label).copied()
    }

    /// Sum of every deduction amount.
    pub fn total(&self) -> Decimal {
        self.entries.values().copied().sum()
    }

    /// Rejects any entry whose magnitude exceeds
    /// [`MAX_AMOUNT`](crate::MAX_AMOUNT).
    pub fn validate(&self) -> Result<(), AmountOutOfRange> {
        for (label, amount) in self.iter() {
            check_amount(label, amount)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries
            .iter()
            .map(|(label, amount)| (label.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(L, Decimal)> for DeductionSet {
    fn from_iter<I: IntoIterator<Item = (L, Decimal)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(label, amount)| (label.into(), amount))
                .collect(),
        }
    }
}
