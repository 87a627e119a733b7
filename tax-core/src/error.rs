use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::MAX_AMOUNT;

/// Errors raised while building a slab schedule or a rule set.
///
/// The calculator itself never fails; these only surface when custom rules
/// are constructed or loaded from a file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    /// A schedule must contain at least one slab.
    #[error("slab schedule is empty")]
    EmptySchedule,

    /// The first slab must begin at zero income.
    #[error("first slab starts at {0}, expected 0")]
    DoesNotStartAtZero(Decimal),

    /// A slab's lower bound does not meet the previous slab's upper bound.
    #[error("slab {index} starts at {found}, expected {expected}")]
    NonContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// Only the final slab may be open-ended.
    #[error("slab {0} is unbounded but is not the last slab")]
    UnboundedBeforeLast(usize),

    /// The final slab must be open-ended so every income is covered.
    #[error("last slab has an upper bound of {0}; it must be unbounded")]
    LastSlabBounded(Decimal),

    /// A slab's upper bound is not above its lower bound.
    #[error("slab {index} has upper bound {upper} not above lower bound {lower}")]
    InvalidBounds {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("slab {index} has negative rate {rate}")]
    NegativeRate { index: usize, rate: Decimal },

    /// Rates are fractions of one, so 30% is `0.30`.
    #[error("slab {index} has rate {rate} above 1")]
    ExcessiveRate { index: usize, rate: Decimal },

    #[error("cess rate {0} is negative")]
    NegativeCess(Decimal),

    #[error("cess rate {0} is above 1")]
    ExcessiveCess(Decimal),
}

/// An income or deduction amount beyond [`MAX_AMOUNT`] in magnitude.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{label}: amount {amount} exceeds the supported maximum of {max}", max = MAX_AMOUNT)]
pub struct AmountOutOfRange {
    pub label: String,
    pub amount: Decimal,
}
