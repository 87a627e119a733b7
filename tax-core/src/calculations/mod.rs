//! Tax liability calculations.
//!
//! Pure functions only: slab evaluation, cess, the regime comparison and
//! the assessment that bundles them for presentation.

pub mod assessment;
pub mod common;
pub mod liability;
pub mod recommendation;

pub use assessment::Assessment;
pub use liability::{TaxCalculator, compute_tax};
pub use recommendation::recommend;
