//! Prompt construction for advisory text requests.
//!
//! Templates are plain constants; the builder fills in GTI and both regime
//! totals, then appends filer context and a language instruction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tax_core::Assessment;
use tax_core::format::format_rupees;
use thiserror::Error;

/// Single-paragraph request for three summary tables.
pub const COMPACT_INSTRUCTIONS: &str = "Recommend the appropriate ITR form and suggest tax-saving investments. \
    Present the answer as professional tables with minimal words but informative content. \
    Also give a table comparing the new and old tax regimes for the given inputs, \
    and a table of deduction sections such as 80C, 80D and 80E with actual amounts \
    and the percentage of tax saved. Include the GTI.";

/// Four explicit markdown table skeletons for the model to fill.
pub const TABULAR_INSTRUCTIONS: &str = "Recommend the appropriate ITR form and suggest tax-saving investments.
Generate structured tables with the following details:

1. **Tax Saving Investments Table**
| Tax Category | Investment Options | Maximum Limit | Benefits | Special Conditions |
|--------------|--------------------|---------------|----------|--------------------|
(Fill with applicable tax-saving options)

2. **Old vs New Tax Regime Comparison**
| Income Slab | Old Regime Tax (₹) | New Regime Tax (₹) | Difference (₹) | Recommendation |
|-------------|--------------------|--------------------|----------------|----------------|
(Fill with computed values based on user input)

3. **Tax Deductions Analysis**
| Deduction Type | Section | Amount (₹) | Percentage Saved | Impact on Tax |
|----------------|---------|------------|------------------|---------------|
(Include 80C, 80D, 80E, etc., with actual savings impact)

4. **Final Tax Savings Strategies**
| Strategy | Estimated Savings (₹) | Additional Benefits | Applicability |
|----------|-----------------------|---------------------|---------------|
(Provide personalized tax-saving strategies based on computed data)

Ensure the data is based on actual calculations rather than assumptions. \
Keep the response concise, professional, and informative.";

/// Error for unrecognised option strings (template, language, entity type).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'; expected one of: {expected}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseOptionError {
    fn new(
        kind: &'static str,
        value: &str,
        expected: &'static str,
    ) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Which set of formatting instructions to send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PromptTemplate {
    Compact,
    #[default]
    Tabular,
}

impl PromptTemplate {
    pub fn instructions(&self) -> &'static str {
        match self {
            PromptTemplate::Compact => COMPACT_INSTRUCTIONS,
            PromptTemplate::Tabular => TABULAR_INSTRUCTIONS,
        }
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            PromptTemplate::Compact => "compact",
            PromptTemplate::Tabular => "tabular",
        })
    }
}

impl FromStr for PromptTemplate {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "tabular" => Ok(Self::Tabular),
            _ => Err(ParseOptionError::new("template", s, "compact, tabular")),
        }
    }
}

/// Language the advice should be written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Spanish,
    French,
}

impl Language {
    /// Sentence appended to prompts, or `None` for English.
    pub fn instruction(&self) -> Option<String> {
        match self {
            Language::English => None,
            other => Some(format!("Respond in {other}.")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Spanish => "Spanish",
            Language::French => "French",
        };
        f.write_str(name)
    }
}

impl FromStr for Language {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "hindi" | "hi" => Ok(Self::Hindi),
            "spanish" | "es" => Ok(Self::Spanish),
            "french" | "fr" => Ok(Self::French),
            _ => Err(ParseOptionError::new(
                "language",
                s,
                "English, Hindi, Spanish, French",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EntityType {
    #[default]
    Individual,
    Firm,
    Company,
}

impl fmt::Display for EntityType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            EntityType::Individual => "Individual",
            EntityType::Firm => "Firm",
            EntityType::Company => "Company",
        };
        f.write_str(name)
    }
}

impl FromStr for EntityType {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "individual" => Ok(Self::Individual),
            "firm" => Ok(Self::Firm),
            "company" => Ok(Self::Company),
            _ => Err(ParseOptionError::new(
                "entity type",
                s,
                "Individual, Firm, Company",
            )),
        }
    }
}

// Profile files go through the same case-insensitive parsing as the CLI.
macro_rules! serde_via_str {
    ($($ty:ty),+) => {$(
        impl TryFrom<String> for $ty {
            type Error = ParseOptionError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.to_string()
            }
        }
    )+};
}

serde_via_str!(PromptTemplate, Language, EntityType);

/// Filing circumstances that steer which ITR form applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilerDetails {
    pub entity_type: EntityType,
    pub company_director: bool,
    pub unlisted_equity_shares: bool,
    /// Trust claiming the Section 11 exemption.
    pub section_11_exemption: bool,
    /// Filing under Sec 139(4A), 139(4B) and similar.
    pub special_filing: bool,
}

impl FilerDetails {
    fn context_lines(&self) -> Vec<String> {
        vec![
            format!("Entity type: {}.", self.entity_type),
            format!("Director in a company: {}.", yes_no(self.company_director)),
            format!(
                "Holds unlisted equity shares: {}.",
                yes_no(self.unlisted_equity_shares)
            ),
            format!(
                "Section 11 exemption (trusts): {}.",
                yes_no(self.section_11_exemption)
            ),
            format!(
                "Special filing (Sec 139(4A), 139(4B), etc.): {}.",
                yes_no(self.special_filing)
            ),
        ]
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Options that shape the advice prompt beyond the computed figures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptOptions {
    pub template: PromptTemplate,
    pub language: Language,
    pub filer: Option<FilerDetails>,
}

/// Builds the advice prompt for an assessment.
///
/// The first two lines always carry GTI and both regime totals formatted as
/// rupees; the template's instructions follow.
pub fn advice_prompt(
    assessment: &Assessment,
    options: &PromptOptions,
) -> String {
    let mut lines = vec![
        format!(
            "User's Gross Total Income: {}.",
            format_rupees(assessment.gross_total_income)
        ),
        format!(
            "Old Regime Tax: {}, New Regime Tax: {}.",
            format_rupees(assessment.old_regime_tax()),
            format_rupees(assessment.new_regime_tax())
        ),
    ];

    if let Some(filer) = &options.filer {
        lines.extend(filer.context_lines());
    }

    lines.push(options.template.instructions().to_string());

    if let Some(instruction) = options.language.instruction() {
        lines.push(instruction);
    }

    lines.join("\n")
}

/// Builds the prompt for a free-text question. The question is sent as
/// typed, followed by the language instruction when one applies.
pub fn question_prompt(
    question: &str,
    language: Language,
) -> String {
    match language.instruction() {
        Some(instruction) => format!("{}\n{instruction}", question.trim()),
        None => question.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{DeductionSet, IncomeProfile, TaxRules};

    use super::*;

    fn ten_lakh_assessment() -> Assessment {
        let profile = IncomeProfile {
            salary: dec!(1000000),
            ..Default::default()
        };
        Assessment::assess(&profile, &DeductionSet::new(), &TaxRules::default())
    }

    #[test]
    fn prompt_leads_with_income_and_both_taxes() {
        let prompt = advice_prompt(&ten_lakh_assessment(), &PromptOptions::default());
        let mut lines = prompt.lines();

        assert_eq!(
            lines.next(),
            Some("User's Gross Total Income: ₹1,000,000.00.")
        );
        assert_eq!(
            lines.next(),
            Some("Old Regime Tax: ₹117,000.00, New Regime Tax: ₹114,400.00.")
        );
    }

    #[test]
    fn default_template_is_tabular() {
        let prompt = advice_prompt(&ten_lakh_assessment(), &PromptOptions::default());

        assert!(prompt.contains("**Old vs New Tax Regime Comparison**"));
        assert!(!prompt.contains("Respond in"));
    }

    #[test]
    fn compact_template_omits_table_skeletons() {
        let options = PromptOptions {
            template: PromptTemplate::Compact,
            ..Default::default()
        };

        let prompt = advice_prompt(&ten_lakh_assessment(), &options);

        assert!(prompt.ends_with("Include the GTI."));
        assert!(!prompt.contains("| Strategy |"));
    }

    #[test]
    fn language_instruction_is_appended() {
        let options = PromptOptions {
            language: Language::Hindi,
            ..Default::default()
        };

        let prompt = advice_prompt(&ten_lakh_assessment(), &options);

        assert!(prompt.ends_with("Respond in Hindi."));
    }

    #[test]
    fn filer_details_are_included() {
        let options = PromptOptions {
            filer: Some(FilerDetails {
                entity_type: EntityType::Firm,
                company_director: true,
                ..Default::default()
            }),
            ..Default::default()
        };

        let prompt = advice_prompt(&ten_lakh_assessment(), &options);

        assert!(prompt.contains("Entity type: Firm."));
        assert!(prompt.contains("Director in a company: Yes."));
        assert!(prompt.contains("Holds unlisted equity shares: No."));
    }

    #[test]
    fn question_prompt_passes_english_through() {
        assert_eq!(
            question_prompt("  Is ELSS better than PPF?  ", Language::English),
            "Is ELSS better than PPF?"
        );
    }

    #[test]
    fn question_prompt_adds_language() {
        assert_eq!(
            question_prompt("What is 80D?", Language::French),
            "What is 80D?\nRespond in French."
        );
    }

    #[test]
    fn options_parse_case_insensitively() {
        assert_eq!("COMPACT".parse::<PromptTemplate>(), Ok(PromptTemplate::Compact));
        assert_eq!("hindi".parse::<Language>(), Ok(Language::Hindi));
        assert_eq!("es".parse::<Language>(), Ok(Language::Spanish));
        assert_eq!("company".parse::<EntityType>(), Ok(EntityType::Company));
    }

    #[test]
    fn options_deserialize_case_insensitively() {
        let filer: FilerDetails = serde_json::from_str(r#"{"entity_type":"firm"}"#).unwrap();
        let language: Language = serde_json::from_str(r#""hindi""#).unwrap();
        let template: PromptTemplate = serde_json::from_str(r#""Compact""#).unwrap();

        assert_eq!(filer.entity_type, EntityType::Firm);
        assert_eq!(language, Language::Hindi);
        assert_eq!(template, PromptTemplate::Compact);
    }

    #[test]
    fn options_serialize_to_canonical_names() {
        assert_eq!(serde_json::to_string(&Language::Hindi).unwrap(), r#""Hindi""#);
        assert_eq!(serde_json::to_string(&PromptTemplate::Tabular).unwrap(), r#""tabular""#);
        assert_eq!(serde_json::to_string(&EntityType::Company).unwrap(), r#""Company""#);
    }

    #[test]
    fn unknown_option_lists_expected_values() {
        let err = "klingon".parse::<Language>().unwrap_err();

        assert_eq!(
            err.to_string(),
            "unknown language 'klingon'; expected one of: English, Hindi, Spanish, French"
        );
    }
}
