use crate::domain::model::{TaxRegime, UnknownRegimePolicy};
use serde::{Deserialize, Serialize};

/// Inclusive percentage band for an item adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentBounds {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentKind {
    Customization,
    Risk,
    Seniority,
}

impl AdjustmentKind {
    pub fn field_name(&self) -> &'static str {
        match self {
            AdjustmentKind::Customization => "customization",
            AdjustmentKind::Risk => "risk",
            AdjustmentKind::Seniority => "seniority",
        }
    }
}

/// Rate tables the calculators read from. Implemented by the loaded
/// configuration; tests can supply their own.
pub trait PricingParameters {
    /// Multiplier fraction, e.g. 0.08 for 8 %.
    fn tax_rate(&self, regime: TaxRegime) -> f64;
    fn unknown_regime_policy(&self) -> UnknownRegimePolicy;
    fn contingency_margin(&self) -> f64;
    /// Percentage, e.g. 5.0 for 5 %.
    fn volume_discount_percent(&self, quantity: u32) -> f64;
    fn adjustment_bounds(&self, kind: AdjustmentKind) -> AdjustmentBounds;
    fn validity_days(&self) -> u32;
}
