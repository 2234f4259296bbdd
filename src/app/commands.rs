use crate::app::render::{DashboardMetrics, Page, Panel};
use crate::config::toml_config::PricingConfig;
use crate::core::pricing::calculate_technical_hour;
use crate::core::proposal::build_quote;
use crate::core::risk;
use crate::domain::model::{PricingInput, ProposalDraft, QuoteRequest, RegimeSelection, RiskAssessment};
use crate::utils::error::{PricingError, Result};
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Technical-hour form as submitted. Blank fields fall back to the
/// configured defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourForm {
    pub fixed_costs: Option<f64>,
    pub desired_draw: Option<f64>,
    pub productive_hours: Option<u32>,
    pub tax_regime: Option<String>,
}

impl HourForm {
    pub fn resolve(&self, config: &PricingConfig) -> Result<PricingInput> {
        let defaults = &config.pricing;
        let tax_regime = match (&self.tax_regime, defaults.tax_regime) {
            (Some(raw), _) => RegimeSelection::parse(raw),
            (None, Some(regime)) => regime.into(),
            (None, None) => return Err(PricingError::missing("tax_regime")),
        };

        Ok(PricingInput {
            fixed_costs: self.fixed_costs.unwrap_or(defaults.fixed_costs),
            desired_draw: self.desired_draw.unwrap_or(defaults.desired_draw),
            productive_hours: self.productive_hours.unwrap_or(defaults.productive_hours),
            tax_regime,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Dashboard,
    TechnicalHour(HourForm),
    NewProposal(ProposalDraft),
    ListProposals,
    RiskAssessment(RiskAssessment),
    Quote { file: PathBuf },
}

impl Request {
    pub fn page(&self) -> Page {
        match self {
            Request::Dashboard => Page::Dashboard,
            Request::TechnicalHour(_) => Page::TechnicalHour,
            Request::NewProposal(_) | Request::ListProposals | Request::Quote { .. } => {
                Page::Proposals
            }
            Request::RiskAssessment(_) => Page::RiskAssessments,
        }
    }
}

/// One submission: computes the panel for `request`. Nothing is kept
/// between calls.
pub fn handle(request: &Request, config: &PricingConfig, today: NaiveDate) -> Result<Panel> {
    tracing::debug!(page = ?request.page(), "Handling request");
    match request {
        Request::Dashboard => Ok(dashboard(config)),
        Request::TechnicalHour(form) => {
            let input = form.resolve(config)?;
            Ok(Panel::TechnicalHour(calculate_technical_hour(&input, config)?))
        }
        Request::NewProposal(draft) => new_proposal(draft),
        Request::ListProposals => Ok(Panel::ProposalList { rows: Vec::new() }),
        Request::RiskAssessment(assessment) => Ok(Panel::RiskSaved(risk::evaluate(assessment)?)),
        Request::Quote { file } => {
            let request = load_quote_request(file)?;
            let costs = HourForm {
                tax_regime: Some(request.tax_regime.label().to_string()),
                ..Default::default()
            }
            .resolve(config)?;
            Ok(Panel::Quote(build_quote(&request, &costs, config, today)?))
        }
    }
}

pub fn dashboard(config: &PricingConfig) -> Panel {
    Panel::Dashboard(DashboardMetrics {
        total_proposals: 0,
        active_clients: 0,
        total_value: 0.0,
        backend_url: config.backend_url().to_string(),
    })
}

/// Validates and acknowledges a draft. Discount and fee ranges are enforced
/// where the values are entered. The draft is discarded afterwards.
pub fn new_proposal(draft: &ProposalDraft) -> Result<Panel> {
    draft.validate()?;
    tracing::info!(client = %draft.client_name, title = %draft.title, "Proposal draft accepted");

    Ok(Panel::ProposalCreated {
        client_name: draft.client_name.clone(),
        title: draft.title.clone(),
    })
}

pub fn load_quote_request(path: &Path) -> Result<QuoteRequest> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| PricingError::invalid_input(
        "quote_file",
        format!("{}: {}", path.display(), e),
    ))
}
