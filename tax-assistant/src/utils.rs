use rust_decimal::Decimal;
use tax_core::{AmountOutOfRange, check_amount};
use thiserror::Error;

/// Error returned when an amount typed on the command line is unusable.
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error(transparent)]
    OutOfRange(#[from] AmountOutOfRange),
}

/// Error returned when a `LABEL=AMOUNT` deduction entry is malformed.
#[derive(Debug, Error)]
pub enum DeductionEntryError {
    #[error("expected LABEL=AMOUNT, got '{0}'")]
    MissingSeparator(String),

    #[error("deduction label is empty in '{0}'")]
    EmptyLabel(String),

    #[error(transparent)]
    Amount(#[from] ParseDecimalError),
}

/// Parses a rupee amount as typed into the form.
///
/// A leading `₹` and comma grouping in either style (`1,50,000` or
/// `150,000`) are accepted. Blank input reads as 0. Amounts beyond
/// [`tax_core::MAX_AMOUNT`] are rejected.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let digits: String = s
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let amount = match digits.as_str() {
        "" => Decimal::ZERO,
        text => text.parse().map_err(|source| ParseDecimalError::Invalid {
            input: s.to_string(),
            source,
        })?,
    };

    Ok(check_amount("amount", amount)?)
}

/// Parses a `LABEL=AMOUNT` pair for an additional deduction category.
pub fn parse_deduction_entry(s: &str) -> Result<(String, Decimal), DeductionEntryError> {
    let (label, amount) = s
        .rsplit_once('=')
        .ok_or_else(|| DeductionEntryError::MissingSeparator(s.to_string()))?;

    let label = label.trim();
    if label.is_empty() {
        return Err(DeductionEntryError::EmptyLabel(s.to_string()));
    }

    Ok((label.to_string(), parse_decimal(amount)?))
}
