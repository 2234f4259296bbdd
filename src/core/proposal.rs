use crate::core::pricing::{calculate_technical_hour, price_item, proposal_total};
use crate::domain::model::{PricingInput, ProposalDraft, Quote, QuoteRequest};
use crate::domain::ports::PricingParameters;
use crate::utils::error::{PricingError, Result};
use crate::utils::validation::{validate_non_negative, validate_range, validate_required_text, Validate};
use chrono::{Days, NaiveDate};

/// Only the client name and title are required. Discount and fee ranges are
/// checked where the values are entered, not here.
impl Validate for ProposalDraft {
    fn validate(&self) -> Result<()> {
        validate_required_text("client_name", &self.client_name)?;
        validate_required_text("title", &self.title)?;
        Ok(())
    }
}

/// Range checks for the numeric proposal fields, applied at input time.
pub fn check_proposal_amounts(discount_percent: f64, displacement_fee: f64) -> Result<()> {
    validate_range("discount_percent", discount_percent, 0.0, 100.0)?;
    validate_non_negative("displacement_fee", displacement_fee)
}

pub fn quote_number(explicit: Option<&str>, issued_on: NaiveDate) -> String {
    match explicit.map(str::trim).filter(|n| !n.is_empty()) {
        Some(number) => number.to_string(),
        None => format!("PROP-{}", issued_on.format("%Y%m%d")),
    }
}

/// Prices a full proposal. `costs` supplies fixed costs, desired draw and
/// productive hours; the request's regime replaces the one in `costs`.
pub fn build_quote<P: PricingParameters + ?Sized>(
    request: &QuoteRequest,
    costs: &PricingInput,
    params: &P,
    issued_on: NaiveDate,
) -> Result<Quote> {
    let draft = &request.draft;
    draft.validate()?;
    check_proposal_amounts(draft.discount_percent, draft.displacement_fee)?;

    let pricing_input = PricingInput {
        tax_regime: request.tax_regime.clone(),
        ..costs.clone()
    };
    let hourly_rate = calculate_technical_hour(&pricing_input, params)?;

    let items = request
        .items
        .iter()
        .map(|item| price_item(item, hourly_rate.final_hour, params))
        .collect::<Result<Vec<_>>>()?;

    let items_total: f64 = items.iter().map(|item| item.total).sum();
    let total = proposal_total(items_total, draft.discount_percent, draft.displacement_fee);

    let validity_days = request.validity_days.unwrap_or_else(|| params.validity_days());
    if validity_days == 0 {
        return Err(PricingError::invalid_input(
            "validity_days",
            "must be at least 1",
        ));
    }
    let valid_until = issued_on
        .checked_add_days(Days::new(u64::from(validity_days)))
        .ok_or_else(|| PricingError::invalid_input("validity_days", "date out of range"))?;

    let number = quote_number(request.number.as_deref(), issued_on);
    tracing::info!(
        number = %number,
        items = items.len(),
        total,
        "Quote built"
    );

    Ok(Quote {
        number,
        client_name: draft.client_name.clone(),
        title: draft.title.clone(),
        description: draft.description.clone(),
        issued_on,
        valid_until,
        hourly_rate,
        items,
        items_total,
        discount_percent: draft.discount_percent,
        discount_amount: items_total * draft.discount_percent / 100.0,
        displacement_fee: draft.displacement_fee,
        total,
    })
}
