use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tax_advisor::{AdvisorConfig, EntityType, FilerDetails, Language, PromptTemplate};
use tax_core::{HOME_LOAN_INTEREST, SECTION_80C, SECTION_80D};

use crate::profile::{DefenseExemptions, FormInput};
use crate::utils::{parse_decimal, parse_deduction_entry};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income-tax assistant.
///
/// Compares liability under the old and new regimes, recommends the cheaper
/// one, and asks a text-generation service for investment advice.
#[derive(Debug, Parser)]
#[command(name = "tax-assistant")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log filter, e.g. `debug` or `info,tax_advisor=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append plain-text logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute both regimes' tax and request investment advice.
    Calculate(CalculateArgs),
    /// Send a free-text question to the advisory service.
    Ask(AskArgs),
}

// ─── calculate ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CalculateArgs {
    /// Read the whole form from a TOML file. Flags given alongside override it.
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Custom slab schedules and cess rate (TOML).
    #[arg(long)]
    pub rules: Option<PathBuf>,

    #[command(flatten)]
    pub income: IncomeArgs,

    #[command(flatten)]
    pub deductions: DeductionArgs,

    #[command(flatten)]
    pub filer: FilerArgs,

    /// Language for the advice (English, Hindi, Spanish, French).
    #[arg(long)]
    pub language: Option<Language>,

    /// Prompt template: `compact` or `tabular`.
    #[arg(long)]
    pub template: Option<PromptTemplate>,

    /// Skip the advisory service and print only the calculation.
    #[arg(long, default_value_t = false)]
    pub no_advice: bool,

    /// Print the report as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub advisor: AdvisorArgs,
}

/// Income sources. Amounts accept `1,50,000` or `150,000`.
#[derive(Debug, Args)]
pub struct IncomeArgs {
    /// Salary or pension income.
    #[arg(long, value_parser = parse_decimal)]
    pub salary: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub rental: Option<Decimal>,

    /// Business or professional income.
    #[arg(long, value_parser = parse_decimal)]
    pub business: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub presumptive: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub capital_gains: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub foreign: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub crypto: Option<Decimal>,
}

/// Old-regime deductions. Without a profile the three fixed categories
/// start at 1,50,000 / 50,000 / 2,00,000.
#[derive(Debug, Args)]
pub struct DeductionArgs {
    #[arg(long = "deduction-80c", value_parser = parse_decimal)]
    pub section_80c: Option<Decimal>,

    #[arg(long = "deduction-80d", value_parser = parse_decimal)]
    pub section_80d: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub home_loan_interest: Option<Decimal>,

    /// Additional category as `LABEL=AMOUNT`. Repeatable.
    #[arg(long = "extra-deduction", value_parser = parse_deduction_entry)]
    pub extra: Vec<(String, Decimal)>,

    /// Defense personnel: enables the two exemption categories.
    #[arg(long, default_value_t = false)]
    pub defense: bool,

    #[arg(long, value_parser = parse_decimal, requires = "defense")]
    pub gallantry: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal, requires = "defense")]
    pub disability: Option<Decimal>,
}

/// Filing circumstances passed to the advisor as context.
///
/// Yes/no flags take an optional value: `--company-director` sets it,
/// `--company-director=false` clears a value set by the profile.
#[derive(Debug, Args)]
pub struct FilerArgs {
    /// Individual, Firm or Company.
    #[arg(long)]
    pub entity_type: Option<EntityType>,

    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub company_director: Option<bool>,

    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub unlisted_equity: Option<bool>,

    /// Trust claiming the Section 11 exemption.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub section_11: Option<bool>,

    /// Filing under Sec 139(4A), 139(4B) and similar.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub special_filing: Option<bool>,
}

impl FilerArgs {
    fn any_given(&self) -> bool {
        self.entity_type.is_some()
            || self.company_director.is_some()
            || self.unlisted_equity.is_some()
            || self.section_11.is_some()
            || self.special_filing.is_some()
    }

    fn apply_to(
        &self,
        filer: &mut FilerDetails,
    ) {
        if let Some(entity_type) = self.entity_type {
            filer.entity_type = entity_type;
        }
        let switches = [
            (&mut filer.company_director, self.company_director),
            (&mut filer.unlisted_equity_shares, self.unlisted_equity),
            (&mut filer.section_11_exemption, self.section_11),
            (&mut filer.special_filing, self.special_filing),
        ];
        for (field, value) in switches {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

impl CalculateArgs {
    /// Applies every flag the user gave on top of `form`.
    pub fn apply_to(
        &self,
        mut form: FormInput,
    ) -> FormInput {
        let income = &mut form.income;
        let overrides = [
            (&mut income.salary, self.income.salary),
            (&mut income.rental, self.income.rental),
            (&mut income.business, self.income.business),
            (&mut income.presumptive, self.income.presumptive),
            (&mut income.capital_gains, self.income.capital_gains),
            (&mut income.foreign, self.income.foreign),
            (&mut income.crypto, self.income.crypto),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        let fixed = [
            (SECTION_80C, self.deductions.section_80c),
            (SECTION_80D, self.deductions.section_80d),
            (HOME_LOAN_INTEREST, self.deductions.home_loan_interest),
        ];
        for (label, value) in fixed {
            if let Some(value) = value {
                form.deductions.insert(label, value);
            }
        }
        for (label, amount) in &self.deductions.extra {
            form.deductions.insert(label.clone(), *amount);
        }

        if self.deductions.defense {
            let defense = form.defense.get_or_insert_with(DefenseExemptions::default);
            if let Some(amount) = self.deductions.gallantry {
                defense.gallantry_award = amount;
            }
            if let Some(amount) = self.deductions.disability {
                defense.disability_pension = amount;
            }
        }

        if self.filer.any_given() {
            self.filer
                .apply_to(form.filer.get_or_insert_with(FilerDetails::default));
        }

        if let Some(language) = self.language {
            form.language = language;
        }
        if let Some(template) = self.template {
            form.template = template;
        }

        form
    }
}

// ─── ask ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AskArgs {
    /// The question, e.g. "Is ELSS better than PPF for me?"
    pub question: String,

    #[arg(long, default_value = "English")]
    pub language: Language,

    #[command(flatten)]
    pub advisor: AdvisorArgs,
}

// ─── advisory service ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AdvisorArgs {
    /// Advisory backend: `ollama` or `gemini`.
    #[arg(long, env = "TAX_ASSISTANT_BACKEND", default_value = "ollama")]
    pub backend: String,

    /// Model name; defaults to the backend's own default.
    #[arg(long)]
    pub model: Option<String>,

    /// Service base URL; defaults to the backend's own default.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Ollama server URL, used when `--endpoint` is not given.
    #[arg(long, env = "OLLAMA_HOST", hide_env_values = true)]
    pub ollama_host: Option<String>,

    /// API key for hosted backends.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (at least 1).
    #[arg(
        long,
        default_value_t = AdvisorConfig::DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,
}

impl AdvisorArgs {
    pub fn to_config(&self) -> AdvisorConfig {
        let endpoint = self.endpoint.clone().or_else(|| {
            if self.backend.eq_ignore_ascii_case("ollama") {
                self.ollama_host.clone()
            } else {
                None
            }
        });

        AdvisorConfig {
            backend: self.backend.to_ascii_lowercase(),
            model: self.model.clone(),
            endpoint,
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
