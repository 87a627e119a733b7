use anyhow::{Context, Result};
use tax_advisor::{
    AdvisorConfig, AdvisorRegistry, advice_prompt, question_prompt, request_advice,
};
use tax_core::{Assessment, TaxRules};
use tracing::{debug, error, info};

use crate::cli::{AskArgs, CalculateArgs};
use crate::profile::{FormInput, load_profile, load_rules};
use crate::report::Report;

/// Registry with every backend this binary knows about.
pub fn build_registry() -> AdvisorRegistry {
    AdvisorRegistry::with_builtin()
}

/// Runs the calculator over a completed form.
pub fn assess_form(
    form: &FormInput,
    rules: &TaxRules,
) -> Assessment {
    Assessment::assess(&form.income, &form.effective_deductions(), rules)
}

/// Sends `prompt` to the configured backend and returns displayable text.
///
/// Never fails: a backend that cannot be built yields an
/// `"Advisor Error: ..."` line, and request failures are turned into
/// diagnostics by [`request_advice`].
pub async fn advisory_text(
    registry: &AdvisorRegistry,
    config: &AdvisorConfig,
    prompt: &str,
) -> String {
    match registry.create(config) {
        Ok(backend) => request_advice(backend.as_ref(), prompt).await,
        Err(e) => {
            error!(backend = %config.backend, error = %e, "cannot create advisory backend");
            format!("Advisor Error: {e}")
        }
    }
}

/// Collects the form from the profile file and flags.
pub fn collect_form(args: &CalculateArgs) -> Result<FormInput> {
    let base = match &args.profile {
        Some(path) => {
            debug!(path = %path.display(), "loading profile");
            load_profile(path)?
        }
        None => FormInput::default(),
    };
    let form = args.apply_to(base);
    form.validate().context("Invalid amount in form")?;
    Ok(form)
}

/// Built-in rules, or the ones in `--rules` when given.
pub fn collect_rules(args: &CalculateArgs) -> Result<TaxRules> {
    match &args.rules {
        Some(path) => {
            debug!(path = %path.display(), "loading tax rules");
            load_rules(path)
        }
        None => Ok(TaxRules::default()),
    }
}

/// `calculate`: build the report and, unless skipped, the advice.
pub async fn run_calculate(
    registry: &AdvisorRegistry,
    args: &CalculateArgs,
) -> Result<String> {
    let form = collect_form(args)?;
    let rules = collect_rules(args)?;

    let deductions = form.effective_deductions();
    let assessment = assess_form(&form, &rules);
    info!(
        gti = %assessment.gross_total_income,
        old_tax = %assessment.old_regime_tax(),
        new_tax = %assessment.new_regime_tax(),
        recommended = assessment.recommended.label(),
        "assessment complete"
    );

    let mut report = Report::new(&form.income, &deductions, assessment);

    if !args.no_advice {
        let config = args.advisor.to_config();
        debug!(?config, "requesting investment advice");
        let prompt = advice_prompt(&report.assessment, &form.prompt_options());
        let advice = advisory_text(registry, &config, &prompt).await;
        report = report.with_advice(advice);
    }

    if args.json {
        report.to_json().context("Failed to serialize report")
    } else {
        Ok(report.to_string())
    }
}

/// `ask`: forward a free-text question and return the answer.
pub async fn run_ask(
    registry: &AdvisorRegistry,
    args: &AskArgs,
) -> String {
    let config = args.advisor.to_config();
    debug!(?config, "forwarding question");
    let prompt = question_prompt(&args.question, args.language);
    advisory_text(registry, &config, &prompt).await
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_advisor::{AdviceBackend, AdvisorError, AdvisorFactory};
    use tax_core::Regime;

    use super::*;

    struct CannedBackend;

    #[async_trait]
    impl AdviceBackend for CannedBackend {
        fn name(&self) -> &'static str {
            "Canned"
        }

        async fn generate(
            &self,
            prompt: &str,
        ) -> Result<String, AdvisorError> {
            Ok(format!("advice for: {}", prompt.lines().next().unwrap_or("")))
        }
    }

    struct CannedFactory;

    impl AdvisorFactory for CannedFactory {
        fn backend_name(&self) -> &'static str {
            "canned"
        }

        fn create(
            &self,
            _config: &AdvisorConfig,
        ) -> Result<Box<dyn AdviceBackend>, AdvisorError> {
            Ok(Box::new(CannedBackend))
        }
    }

    fn canned_registry() -> AdvisorRegistry {
        let mut registry = AdvisorRegistry::new();
        registry.register(Box::new(CannedFactory));
        registry
    }

    #[test]
    fn default_form_applies_standard_deductions() {
        let mut form = FormInput::default();
        form.income.salary = dec!(1000000);

        let assessment = assess_form(&form, &TaxRules::default());

        assert_eq!(assessment.old_regime_tax(), dec!(33800));
        assert_eq!(assessment.new_regime_tax(), dec!(114400));
        assert_eq!(assessment.recommended, Regime::Old);
    }

    #[tokio::test]
    async fn advisory_text_uses_registered_backend() {
        let text =
            advisory_text(&canned_registry(), &AdvisorConfig::new("canned"), "hello\nworld").await;

        assert_eq!(text, "advice for: hello");
    }

    #[tokio::test]
    async fn unknown_backend_becomes_diagnostic() {
        let text = advisory_text(&canned_registry(), &AdvisorConfig::new("openai"), "hi").await;

        assert!(text.starts_with("Advisor Error: "));
        assert!(text.contains("openai"));
    }

    #[tokio::test]
    async fn gemini_without_key_becomes_diagnostic() {
        let text = advisory_text(&build_registry(), &AdvisorConfig::new("gemini"), "hi").await;

        assert!(text.starts_with("Advisor Error: "));
        assert!(!text.trim().is_empty());
    }
}
