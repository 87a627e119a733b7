//! Indicative Indian income-tax liability under the old and new regimes.
//!
//! Pure business logic with no I/O: income profiles, deduction sets, slab
//! schedules, the liability calculator and the regime recommendation.

pub mod calculations;
pub mod error;
pub mod format;
pub mod models;

pub use calculations::common::{MAX_AMOUNT, check_amount};
pub use calculations::{Assessment, TaxCalculator, compute_tax, recommend};
pub use error::{AmountOutOfRange, RulesError};
pub use models::*;
