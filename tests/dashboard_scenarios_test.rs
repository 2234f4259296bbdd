use blackbelt_pricing::app::HourForm;
use blackbelt_pricing::domain::model::{ProposalDraft, RiskAssessment, RiskLevel};
use blackbelt_pricing::{
    handle, render, OutputFormat, Page, Panel, PricingConfig, PricingError, Request, ViewState,
};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn submit(request: Request, config: &PricingConfig) -> blackbelt_pricing::Result<String> {
    let view = ViewState::new(request.page());
    let panel = handle(&request, config, today())?;
    render(&view, &panel)
}

fn hour_form(fixed: f64, draw: f64, hours: u32, regime: &str) -> Request {
    Request::TechnicalHour(HourForm {
        fixed_costs: Some(fixed),
        desired_draw: Some(draw),
        productive_hours: Some(hours),
        tax_regime: Some(regime.to_string()),
    })
}

#[test]
fn test_default_form_with_mei_prints_87_75() {
    let output = submit(hour_form(5000.0, 8000.0, 160, "MEI"), &PricingConfig::new()).unwrap();

    assert!(output.contains("Technical hour: R$ 87.75"));
    assert!(output.contains("- Base hour: R$ 81.25"));
    assert!(output.contains("- Tax rate (MEI): 8%"));
}

#[test]
fn test_zero_costs_print_zero() {
    let output = submit(
        hour_form(0.0, 0.0, 1, "Simples Nacional"),
        &PricingConfig::new(),
    )
    .unwrap();
    assert!(output.contains("Technical hour: R$ 0.00"));
}

#[test]
fn test_unknown_regime_fails_loudly_unless_configured() {
    let strict = submit(hour_form(5000.0, 8000.0, 160, "Lucro Real"), &PricingConfig::new());
    assert!(matches!(strict, Err(PricingError::UnsupportedRegime { .. })));

    let lenient = PricingConfig::from_toml_str(
        r#"
[pricing]
unknown_regime = "zero_rate"
"#,
    )
    .unwrap();
    let output = submit(hour_form(5000.0, 8000.0, 160, "Lucro Real"), &lenient).unwrap();
    assert!(output.contains("Technical hour: R$ 81.25"));
    assert!(output.contains("- Tax rate (Lucro Real): 0%"));
}

#[test]
fn test_proposal_validation_scenarios() {
    let config = PricingConfig::new();

    let missing_client = Request::NewProposal(ProposalDraft {
        client_name: String::new(),
        title: "X".to_string(),
        ..Default::default()
    });
    let err = submit(missing_client, &config).unwrap_err();
    assert!(matches!(err, PricingError::MissingRequiredField { .. }));
    assert!(err.user_friendly_message().contains("required"));

    let valid = Request::NewProposal(ProposalDraft {
        client_name: "Acme".to_string(),
        title: "Y".to_string(),
        description: String::new(),
        discount_percent: 100.0,
        displacement_fee: 999.0,
    });
    let output = submit(valid, &config).unwrap();
    assert!(output.contains("Proposal created successfully!"));
}

#[test]
fn test_risk_assessment_high_is_orange() {
    let request = Request::RiskAssessment(RiskAssessment {
        client: "Acme".to_string(),
        sector: "Ops".to_string(),
        risk_level: RiskLevel::High,
        ..Default::default()
    });

    let panel = handle(&request, &PricingConfig::new(), today()).unwrap();
    match &panel {
        Panel::RiskSaved(outcome) => assert_eq!(outcome.indicator.symbol(), "🟠"),
        other => panic!("unexpected panel: {:?}", other),
    }

    let text = render(&ViewState::new(Page::RiskAssessments), &panel).unwrap();
    assert!(text.starts_with("Risk Assessments (NR-01)"));
    assert!(text.contains("🟠 Risk level: High"));
}

#[test]
fn test_risk_assessment_missing_client() {
    let request = Request::RiskAssessment(RiskAssessment {
        sector: "Ops".to_string(),
        ..Default::default()
    });
    assert!(submit(request, &PricingConfig::new()).is_err());
}

#[test]
fn test_dashboard_and_empty_list_json() {
    let config = PricingConfig::new();

    let panel = handle(&Request::Dashboard, &config, today()).unwrap();
    let json = render(
        &ViewState::new(Page::Dashboard).with_format(OutputFormat::Json),
        &panel,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["panel"], "dashboard");
    assert_eq!(value["total_proposals"], 0);
    assert_eq!(value["backend_url"], "http://localhost:3001");

    let list = submit(Request::ListProposals, &config).unwrap();
    assert!(list.contains("No proposals found"));
}
