//! Plain-text and JSON rendering of a calculation.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::format::format_rupees;
use tax_core::{Assessment, DeductionSet, IncomeProfile, Regime};

/// One labelled amount in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub label: String,
    pub amount: Decimal,
}

/// Everything printed after a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub income: Vec<LineItem>,
    pub deductions: Vec<LineItem>,
    pub assessment: Assessment,
    /// Advisory text, absent when advice was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

impl Report {
    pub fn new(
        income: &IncomeProfile,
        deductions: &DeductionSet,
        assessment: Assessment,
    ) -> Self {
        Self {
            income: income
                .sources()
                .into_iter()
                .map(|(label, amount)| LineItem {
                    label: label.to_string(),
                    amount,
                })
                .collect(),
            deductions: deductions
                .iter()
                .map(|(label, amount)| LineItem {
                    label: label.to_string(),
                    amount,
                })
                .collect(),
            assessment,
            advice: None,
        }
    }

    pub fn with_advice(
        mut self,
        advice: String,
    ) -> Self {
        self.advice = Some(advice);
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn amount_row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    amount: Decimal,
) -> fmt::Result {
    writeln!(f, "  {label:<32} {:>18}", format_rupees(amount))
}

impl fmt::Display for Report {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let a = &self.assessment;

        writeln!(f, "Income")?;
        for item in &self.income {
            amount_row(f, &item.label, item.amount)?;
        }
        amount_row(f, "Gross Total Income (GTI)", a.gross_total_income)?;

        writeln!(f, "\nDeductions (old regime only)")?;
        if self.deductions.is_empty() {
            writeln!(f, "  none")?;
        }
        for item in &self.deductions {
            amount_row(f, &item.label, item.amount)?;
        }
        amount_row(f, "Total", a.total_deductions)?;

        writeln!(f, "\nTax Liability (incl. 4% cess)")?;
        for regime in Regime::all() {
            amount_row(f, &regime.to_string(), a.result.tax_for(*regime))?;
        }

        write!(f, "\nRecommended: {}", a.recommended)?;
        match a.result.savings() {
            savings if savings.is_zero() => writeln!(f, " (both regimes cost the same)")?,
            savings => writeln!(f, " (saves {})", format_rupees(savings))?,
        }

        if let Some(advice) = &self.advice {
            writeln!(f, "\nAI Recommendation\n{}", advice.trim_end())?;
        }

        Ok(())
    }
}
