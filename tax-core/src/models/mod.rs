mod deduction_set;
mod income_profile;
mod regime;
mod slab;
mod tax_result;
mod tax_rules;

pub use deduction_set::{
    DISABILITY_PENSION, DeductionSet, GALLANTRY_AWARD, HOME_LOAN_INTEREST, SECTION_80C,
    SECTION_80D,
};
pub use income_profile::IncomeProfile;
pub use regime::Regime;
pub use slab::{Slab, SlabSchedule};
pub use tax_result::TaxResult;
pub use tax_rules::TaxRules;
