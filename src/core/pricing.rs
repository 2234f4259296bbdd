//! Technical-hour and proposal arithmetic.
//!
//! All amounts are `f64`; rounding happens only when a value is displayed.

use crate::domain::model::{
    PricedItem, PricingInput, ProposalItem, RegimeSelection, TechnicalHour, UnknownRegimePolicy,
};
use crate::domain::ports::{AdjustmentKind, PricingParameters};
use crate::utils::error::{PricingError, Result};
use crate::utils::validation::{validate_non_negative, validate_range};

/// Resolves the tax multiplier for a regime selection.
///
/// Unrecognised text fails with [`PricingError::UnsupportedRegime`] unless the
/// parameters explicitly opt into the zero-rate fallback.
pub fn tax_rate_for<P: PricingParameters + ?Sized>(
    selection: &RegimeSelection,
    params: &P,
) -> Result<f64> {
    match selection {
        RegimeSelection::Known(regime) => Ok(params.tax_rate(*regime)),
        RegimeSelection::Unrecognised(raw) => match params.unknown_regime_policy() {
            UnknownRegimePolicy::Reject => Err(PricingError::UnsupportedRegime {
                value: raw.clone(),
            }),
            UnknownRegimePolicy::ZeroRate => {
                tracing::warn!(regime = %raw, "Unrecognised tax regime, applying zero tax rate");
                Ok(0.0)
            }
        },
    }
}

/// `(fixed_costs + desired_draw) / productive_hours * (1 + margin) * (1 + tax)`.
pub fn calculate_technical_hour<P: PricingParameters + ?Sized>(
    input: &PricingInput,
    params: &P,
) -> Result<TechnicalHour> {
    validate_non_negative("fixed_costs", input.fixed_costs)?;
    validate_non_negative("desired_draw", input.desired_draw)?;
    if input.productive_hours == 0 {
        return Err(PricingError::invalid_input(
            "productive_hours",
            "must be at least 1",
        ));
    }

    let tax_rate = tax_rate_for(&input.tax_regime, params)?;
    let margin_rate = params.contingency_margin();

    let base_hour = (input.fixed_costs + input.desired_draw) / f64::from(input.productive_hours);
    let final_hour = base_hour * (1.0 + margin_rate) * (1.0 + tax_rate);

    tracing::debug!(
        regime = %input.tax_regime.label(),
        base_hour,
        tax_rate,
        final_hour,
        "Technical hour calculated"
    );

    Ok(TechnicalHour {
        regime: input.tax_regime.label().to_string(),
        base_hour,
        margin_rate,
        tax_rate,
        final_hour,
    })
}

/// Prices one proposal line at the given hourly rate.
pub fn price_item<P: PricingParameters + ?Sized>(
    item: &ProposalItem,
    hourly_rate: f64,
    params: &P,
) -> Result<PricedItem> {
    if item.service.trim().is_empty() {
        return Err(PricingError::missing("items.service"));
    }
    if item.quantity == 0 {
        return Err(PricingError::invalid_input(
            "items.quantity",
            "must be at least 1",
        ));
    }
    if !(item.estimated_hours.is_finite() && item.estimated_hours > 0.0) {
        return Err(PricingError::invalid_input(
            "items.estimated_hours",
            "must be greater than 0",
        ));
    }

    let mut multiplier = 1.0;
    for (kind, percent) in [
        (AdjustmentKind::Customization, item.customization),
        (AdjustmentKind::Risk, item.risk),
        (AdjustmentKind::Seniority, item.seniority),
    ] {
        let bounds = params.adjustment_bounds(kind);
        validate_range(kind.field_name(), percent, bounds.min, bounds.max)?;
        multiplier *= 1.0 + percent / 100.0;
    }

    let volume_discount = params.volume_discount_percent(item.quantity);
    let unit_price = hourly_rate * item.estimated_hours;
    let total = unit_price * f64::from(item.quantity) * multiplier * (1.0 - volume_discount / 100.0);

    Ok(PricedItem {
        service: item.service.clone(),
        quantity: item.quantity,
        estimated_hours: item.estimated_hours,
        unit_price,
        volume_discount,
        total,
    })
}

/// `items_total * (1 - discount%) + displacement_fee`.
pub fn proposal_total(items_total: f64, discount_percent: f64, displacement_fee: f64) -> f64 {
    items_total * (1.0 - discount_percent / 100.0) + displacement_fee
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::PricingConfig;
    use crate::domain::model::TaxRegime;

    fn input(fixed: f64, draw: f64, hours: u32, regime: &str) -> PricingInput {
        PricingInput {
            fixed_costs: fixed,
            desired_draw: draw,
            productive_hours: hours,
            tax_regime: RegimeSelection::parse(regime),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_form_values_with_mei() {
        let config = PricingConfig::new();
        let hour = calculate_technical_hour(&input(5000.0, 8000.0, 160, "MEI"), &config).unwrap();

        assert!(approx(hour.base_hour, 81.25));
        assert!(approx(hour.final_hour, 87.75));
        assert_eq!(hour.regime, "MEI");
    }

    #[test]
    fn test_zero_costs_give_zero_rate() {
        let config = PricingConfig::new();
        let hour =
            calculate_technical_hour(&input(0.0, 0.0, 1, "Simples Nacional"), &config).unwrap();
        assert_eq!(hour.final_hour, 0.0);
    }

    #[test]
    fn test_formula_holds_for_every_regime() {
        let config = PricingConfig::new();
        for regime in TaxRegime::ALL {
            let hour = calculate_technical_hour(
                &PricingInput {
                    fixed_costs: 1200.0,
                    desired_draw: 2400.0,
                    productive_hours: 90,
                    tax_regime: regime.into(),
                },
                &config,
            )
            .unwrap();
            let expected = 3600.0 / 90.0 * (1.0 + config.tax_rate(regime));
            assert!(approx(hour.final_hour, expected), "{}", regime);
        }
    }

    #[test]
    fn test_unknown_regime_rejected_by_default() {
        let config = PricingConfig::new();
        let result = calculate_technical_hour(&input(5000.0, 8000.0, 160, "Lucro Real"), &config);
        assert!(matches!(
            result,
            Err(PricingError::UnsupportedRegime { ref value }) if value == "Lucro Real"
        ));
    }

    #[test]
    fn test_unknown_regime_zero_rate_fallback() {
        let mut config = PricingConfig::new();
        config.pricing.unknown_regime = UnknownRegimePolicy::ZeroRate;

        let hour =
            calculate_technical_hour(&input(5000.0, 8000.0, 160, "Lucro Real"), &config).unwrap();
        assert_eq!(hour.tax_rate, 0.0);
        assert!(approx(hour.final_hour, hour.base_hour));
    }

    #[test]
    fn test_contingency_margin_applies_before_tax() {
        let mut config = PricingConfig::new();
        config.pricing.contingency_margin = 0.10;

        let hour = calculate_technical_hour(&input(5000.0, 8000.0, 160, "MEI"), &config).unwrap();
        assert!(approx(hour.final_hour, 81.25 * 1.10 * 1.08));
    }

    #[test]
    fn test_zero_hours_rejected() {
        let config = PricingConfig::new();
        assert!(calculate_technical_hour(&input(1.0, 1.0, 0, "MEI"), &config).is_err());
    }

    #[test]
    fn test_volume_discount_boundaries() {
        let config = PricingConfig::new();
        let cases = [(1, 0.0), (5, 0.0), (6, 5.0), (15, 5.0), (16, 10.0), (30, 10.0), (31, 15.0)];
        for (quantity, expected) in cases {
            assert_eq!(config.volume_discount_percent(quantity), expected, "qty {}", quantity);
        }
    }

    #[test]
    fn test_price_item_with_adjustments_and_volume() {
        let config = PricingConfig::new();
        let item = ProposalItem {
            service: "Workshop".to_string(),
            quantity: 10,
            estimated_hours: 2.0,
            customization: 10.0,
            risk: 0.0,
            seniority: 20.0,
        };

        let priced = price_item(&item, 100.0, &config).unwrap();

        assert!(approx(priced.unit_price, 200.0));
        assert_eq!(priced.volume_discount, 5.0);
        assert!(approx(priced.total, 200.0 * 10.0 * 1.1 * 1.2 * 0.95));
    }

    #[test]
    fn test_price_item_rejects_out_of_band_adjustment() {
        let config = PricingConfig::new();
        let item = ProposalItem {
            service: "Audit".to_string(),
            quantity: 1,
            estimated_hours: 4.0,
            customization: 0.0,
            risk: 45.0,
            seniority: 0.0,
        };

        let err = price_item(&item, 100.0, &config).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInputError { ref field, .. } if field == "risk"));
    }

    #[test]
    fn test_proposal_total() {
        assert!(approx(proposal_total(1000.0, 10.0, 150.0), 1050.0));
        assert!(approx(proposal_total(0.0, 50.0, 80.0), 80.0));
        assert!(approx(proposal_total(999.0, 0.0, 0.0), 999.0));
    }
}
