//! Form input loaded from TOML files.
//!
//! A profile file carries everything the interactive form would collect:
//!
//! ```toml
//! language = "Hindi"
//! template = "compact"
//!
//! [income]
//! salary = 1200000
//! rental = 180000
//!
//! [deductions]
//! "80C (PPF, ELSS, etc.)" = 150000
//!
//! [defense]
//! gallantry_award = 25000
//!
//! [filer]
//! entity_type = "Individual"
//! company_director = true
//! ```
//!
//! A missing `[deductions]` table means the standard three categories at
//! their defaults; an empty table means no deductions.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_advisor::{FilerDetails, Language, PromptOptions, PromptTemplate};
use tax_core::{AmountOutOfRange, DeductionSet, IncomeProfile, TaxRules};

/// Defense-personnel exemptions, added on top of the other deductions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseExemptions {
    pub gallantry_award: Decimal,
    pub disability_pension: Decimal,
}

/// Everything the form collects for one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub income: IncomeProfile,
    #[serde(default = "DeductionSet::standard")]
    pub deductions: DeductionSet,
    #[serde(default)]
    pub defense: Option<DefenseExemptions>,
    #[serde(default)]
    pub filer: Option<FilerDetails>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub template: PromptTemplate,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            income: IncomeProfile::default(),
            deductions: DeductionSet::standard(),
            defense: None,
            filer: None,
            language: Language::default(),
            template: PromptTemplate::default(),
        }
    }
}

impl FormInput {
    /// Deductions as the calculator sees them, including defense
    /// exemptions when present.
    pub fn effective_deductions(&self) -> DeductionSet {
        match &self.defense {
            Some(defense) => self
                .deductions
                .clone()
                .with_defense_exemptions(defense.gallantry_award, defense.disability_pension),
            None => self.deductions.clone(),
        }
    }

    /// Checks every income and deduction amount, defense exemptions
    /// included, against [`tax_core::MAX_AMOUNT`].
    pub fn validate(&self) -> Result<(), AmountOutOfRange> {
        self.income.validate()?;
        self.effective_deductions().validate()
    }

    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            template: self.template,
            language: self.language,
            filer: self.filer.clone(),
        }
    }
}

/// Reads a [`FormInput`] from a TOML file and checks its amounts.
pub fn load_profile(path: &Path) -> Result<FormInput> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile: {}", path.display()))?;
    let form: FormInput = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse profile: {}", path.display()))?;
    form.validate()
        .with_context(|| format!("Invalid amount in profile: {}", path.display()))?;
    Ok(form)
}

/// Reads custom [`TaxRules`] from a TOML file. Slabs are validated while
/// parsing.
pub fn load_rules(path: &Path) -> Result<TaxRules> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tax rules: {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse tax rules: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_advisor::EntityType;
    use tax_core::{GALLANTRY_AWARD, SECTION_80C};

    use super::*;

    #[test]
    fn empty_profile_uses_form_defaults() {
        let form: FormInput = toml::from_str("").unwrap();

        assert_eq!(form, FormInput::default());
        assert_eq!(form.effective_deductions().total(), dec!(400000));
    }

    #[test]
    fn empty_deductions_table_means_none() {
        let form: FormInput = toml::from_str("[deductions]").unwrap();

        assert!(form.effective_deductions().is_empty());
    }

    #[test]
    fn defense_exemptions_are_added() {
        let form: FormInput = toml::from_str(
            r#"
            [defense]
            gallantry_award = 25000
            "#,
        )
        .unwrap();

        let deductions = form.effective_deductions();

        assert_eq!(deductions.get(GALLANTRY_AWARD), Some(dec!(25000)));
        assert_eq!(deductions.get(SECTION_80C), Some(dec!(150000)));
        assert_eq!(deductions.total(), dec!(425000));
    }

    #[test]
    fn prompt_options_carry_language_and_filer() {
        let form: FormInput = toml::from_str(
            r#"
            language = "French"
            template = "compact"

            [filer]
            entity_type = "Company"
            "#,
        )
        .unwrap();

        let options = form.prompt_options();

        assert_eq!(options.language, Language::French);
        assert_eq!(options.template, PromptTemplate::Compact);
        assert_eq!(
            options.filer.map(|f| f.entity_type),
            Some(EntityType::Company)
        );
    }

    #[test]
    fn validate_covers_defense_exemptions() {
        let form: FormInput = toml::from_str(
            r#"
            [defense]
            disability_pension = "79228162514264337593543950335"
            "#,
        )
        .unwrap();

        let err = form.validate().unwrap_err();

        assert_eq!(err.label, tax_core::DISABILITY_PENSION);
    }

    #[test]
    fn profile_options_are_case_insensitive() {
        let form: FormInput = toml::from_str(
            r#"
            language = "hindi"
            template = "TABULAR"

            [filer]
            entity_type = "company"
            "#,
        )
        .unwrap();

        assert_eq!(form.language, Language::Hindi);
        assert_eq!(form.template, PromptTemplate::Tabular);
        assert_eq!(form.filer.map(|f| f.entity_type), Some(EntityType::Company));
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(toml::from_str::<FormInput>(r#"language = "Klingon""#).is_err());
    }
}
