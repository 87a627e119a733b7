use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_advisor::{AdvisorRegistry, EntityType, Language, PromptTemplate};
use tax_assistant::app::{assess_form, collect_rules, run_calculate};
use tax_assistant::cli::{CalculateArgs, Cli, Command};
use tax_assistant::profile::load_profile;
use tax_core::{GALLANTRY_AWARD, Regime, TaxRules};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn calculate_args(args: &[&str]) -> CalculateArgs {
    let argv = ["tax-assistant", "calculate"]
        .into_iter()
        .chain(args.iter().copied());
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Calculate(args) => args,
        other => panic!("expected calculate, got {other:?}"),
    }
}

#[test]
fn profile_fixture_loads_every_section() {
    let form = load_profile(&fixture("profile.toml")).unwrap();

    assert_eq!(form.income.gross_total_income(), dec!(1380000));
    assert_eq!(form.language, Language::Hindi);
    assert_eq!(form.template, PromptTemplate::Compact);
    assert_eq!(
        form.filer.as_ref().map(|f| f.entity_type),
        Some(EntityType::Individual)
    );

    let deductions = form.effective_deductions();
    assert_eq!(deductions.get(GALLANTRY_AWARD), Some(dec!(25000)));
    assert_eq!(deductions.total(), dec!(200000));
}

#[test]
fn profile_fixture_assessment() {
    let form = load_profile(&fixture("profile.toml")).unwrap();

    let assessment = assess_form(&form, &TaxRules::default());

    // Old taxable 1180000: 12500 + 100000 + 54000 = 166500 -> 173160
    assert_eq!(assessment.old_regime_tax(), dec!(173160));
    // New: 15000 + 30000 + 45000 + 36000 = 126000 -> 131040
    assert_eq!(assessment.new_regime_tax(), dec!(131040));
    assert_eq!(assessment.recommended, Regime::New);
}

#[test]
fn missing_profile_names_the_file() {
    let err = load_profile(&fixture("no_such_profile.toml")).unwrap_err();

    assert!(format!("{err:#}").contains("no_such_profile.toml"));
}

#[test]
fn invalid_rules_are_rejected_on_load() {
    let path = fixture("rules_gap.toml");
    let args = calculate_args(&["--rules", path.to_str().unwrap()]);

    let err = collect_rules(&args).unwrap_err();

    assert!(format!("{err:#}").contains("expected 250000"));
}

#[tokio::test]
async fn flags_override_profile_without_advice() {
    let path = fixture("profile.toml");
    let args = calculate_args(&[
        "--profile",
        path.to_str().unwrap(),
        "--salary",
        "8,20,000",
        "--no-advice",
    ]);

    let output = run_calculate(&AdvisorRegistry::new(), &args).await.unwrap();

    // GTI 1000000, old taxable 800000: 72500 -> 75400; new 114400
    assert!(output.contains("₹1,000,000.00"));
    assert!(output.contains("₹75,400.00"));
    assert!(output.contains("₹114,400.00"));
    assert!(output.contains("Recommended: Old Tax Regime (saves ₹39,000.00)"));
    assert!(!output.contains("AI Recommendation"));
}

#[tokio::test]
async fn oversized_profile_amount_is_an_error_not_a_crash() {
    let path = fixture("profile_overflow.toml");
    let args = calculate_args(&["--profile", path.to_str().unwrap(), "--no-advice"]);

    let err = run_calculate(&AdvisorRegistry::new(), &args)
        .await
        .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("profile_overflow.toml"));
    assert!(message.contains("Salary/Pension Income"));
    assert!(message.contains("exceeds the supported maximum"));
}

#[tokio::test]
async fn largest_accepted_amounts_still_compute() {
    let args = calculate_args(&[
        "--salary",
        "1,000,000,000,000,000",
        "--rental",
        "1,000,000,000,000,000",
        "--no-advice",
    ]);

    let output = run_calculate(&AdvisorRegistry::new(), &args).await.unwrap();

    assert!(output.contains("₹2,000,000,000,000,000.00"));
}

#[tokio::test]
async fn unreachable_backend_still_produces_report() {
    let args = calculate_args(&["--salary", "1000000", "--backend", "openai"]);

    let output = run_calculate(&AdvisorRegistry::with_builtin(), &args)
        .await
        .unwrap();

    assert!(output.contains("AI Recommendation\nAdvisor Error: "));
}

#[tokio::test]
async fn json_output_parses() {
    let args = calculate_args(&["--salary", "1000000", "--no-advice", "--json"]);

    let output = run_calculate(&AdvisorRegistry::new(), &args).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["assessment"]["recommended"], "old");
}
