use std::fmt;

use serde::{Deserialize, Serialize};

/// The two mutually exclusive tax-computation policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Higher nominal rates, deductions honored.
    Old,
    /// Lower nominal rates, deductions ignored.
    New,
}

impl Regime {
    pub fn all() -> &'static [Regime] {
        &[Regime::Old, Regime::New]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Regime::Old => "Old",
            Regime::New => "New",
        }
    }

    /// Whether deductions reduce taxable income under this regime.
    pub fn allows_deductions(&self) -> bool {
        matches!(self, Regime::Old)
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} Tax Regime", self.label())
    }
}
