use crate::domain::model::{PricingInput, TaxRegime, UnknownRegimePolicy};
use crate::domain::ports::{AdjustmentBounds, AdjustmentKind, PricingParameters};
use crate::utils::error::{PricingError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub backend: BackendConfig,
    pub pricing: PricingDefaults,
    pub tax_rates: TaxRates,
    pub volume_discounts: Vec<VolumeTier>,
    pub adjustments: AdjustmentConfig,
    pub proposals: ProposalConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            pricing: PricingDefaults::default(),
            tax_rates: TaxRates::default(),
            volume_discounts: default_volume_tiers(),
            adjustments: AdjustmentConfig::default(),
            proposals: ProposalConfig::default(),
        }
    }
}

/// Declared for a future backend; nothing in this crate calls it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingDefaults {
    pub fixed_costs: f64,
    pub desired_draw: f64,
    pub productive_hours: u32,
    pub tax_regime: Option<TaxRegime>,
    pub contingency_margin: f64,
    pub unknown_regime: UnknownRegimePolicy,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        Self {
            fixed_costs: PricingInput::DEFAULT_FIXED_COSTS,
            desired_draw: PricingInput::DEFAULT_DESIRED_DRAW,
            productive_hours: PricingInput::DEFAULT_PRODUCTIVE_HOURS,
            tax_regime: None,
            contingency_margin: 0.0,
            unknown_regime: UnknownRegimePolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRates {
    pub mei: f64,
    pub simples_nacional: f64,
    pub lucro_presumido: f64,
    pub autonomo: f64,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            mei: 0.08,
            simples_nacional: 0.15,
            lucro_presumido: 0.25,
            autonomo: 0.20,
        }
    }
}

impl TaxRates {
    pub fn rate(&self, regime: TaxRegime) -> f64 {
        match regime {
            TaxRegime::Mei => self.mei,
            TaxRegime::SimplesNacional => self.simples_nacional,
            TaxRegime::LucroPresumido => self.lucro_presumido,
            TaxRegime::Autonomo => self.autonomo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeTier {
    pub min_quantity: u32,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentConfig {
    pub customization: AdjustmentBounds,
    pub risk: AdjustmentBounds,
    pub seniority: AdjustmentBounds,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            customization: AdjustmentBounds { min: 0.0, max: 30.0 },
            risk: AdjustmentBounds { min: 0.0, max: 20.0 },
            seniority: AdjustmentBounds { min: 0.0, max: 25.0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalConfig {
    pub validity_days: u32,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self { validity_days: 30 }
    }
}

pub fn default_volume_tiers() -> Vec<VolumeTier> {
    vec![
        VolumeTier {
            min_quantity: 6,
            percent: 5.0,
        },
        VolumeTier {
            min_quantity: 16,
            percent: 10.0,
        },
        VolumeTier {
            min_quantity: 31,
            percent: 15.0,
        },
    ]
}

impl PricingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PricingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text. Omitted sections keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let config: PricingConfig =
            toml::from_str(&processed_content).map_err(|e| PricingError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        tracing::debug!(
            base_url = %config.backend.base_url,
            tiers = config.volume_discounts.len(),
            "Pricing configuration parsed"
        );
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value, leaving unknown names as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PricingError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("backend.base_url", &self.backend.base_url)?;

        let pricing = &self.pricing;
        for (field, value) in [
            ("pricing.fixed_costs", pricing.fixed_costs),
            ("pricing.desired_draw", pricing.desired_draw),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PricingError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: value.to_string(),
                    reason: "Value must be a non-negative number".to_string(),
                });
            }
        }
        if pricing.productive_hours == 0 {
            return Err(PricingError::InvalidConfigValueError {
                field: "pricing.productive_hours".to_string(),
                value: "0".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }
        validation::validate_config_range(
            "pricing.contingency_margin",
            pricing.contingency_margin,
            0.0,
            1.0,
        )?;

        for (field, rate) in [
            ("tax_rates.mei", self.tax_rates.mei),
            ("tax_rates.simples_nacional", self.tax_rates.simples_nacional),
            ("tax_rates.lucro_presumido", self.tax_rates.lucro_presumido),
            ("tax_rates.autonomo", self.tax_rates.autonomo),
        ] {
            validation::validate_config_range(field, rate, 0.0, 1.0)?;
        }

        let mut previous = 0;
        for tier in &self.volume_discounts {
            if tier.min_quantity <= previous {
                return Err(PricingError::InvalidConfigValueError {
                    field: "volume_discounts.min_quantity".to_string(),
                    value: tier.min_quantity.to_string(),
                    reason: "Tiers must have strictly ascending quantities above 0".to_string(),
                });
            }
            validation::validate_config_range(
                "volume_discounts.percent",
                tier.percent,
                0.0,
                100.0,
            )?;
            previous = tier.min_quantity;
        }

        for (name, band) in [
            ("adjustments.customization", self.adjustments.customization),
            ("adjustments.risk", self.adjustments.risk),
            ("adjustments.seniority", self.adjustments.seniority),
        ] {
            if !(band.min <= band.max) {
                return Err(PricingError::InvalidConfigValueError {
                    field: name.to_string(),
                    value: format!("{}..{}", band.min, band.max),
                    reason: "min must not exceed max".to_string(),
                });
            }
        }

        if self.proposals.validity_days == 0 {
            return Err(PricingError::InvalidConfigValueError {
                field: "proposals.validity_days".to_string(),
                value: "0".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    pub fn backend_url(&self) -> &str {
        &self.backend.base_url
    }
}

impl PricingParameters for PricingConfig {
    fn tax_rate(&self, regime: TaxRegime) -> f64 {
        self.tax_rates.rate(regime)
    }

    fn unknown_regime_policy(&self) -> UnknownRegimePolicy {
        self.pricing.unknown_regime
    }

    fn contingency_margin(&self) -> f64 {
        self.pricing.contingency_margin
    }

    fn volume_discount_percent(&self, quantity: u32) -> f64 {
        self.volume_discounts
            .iter()
            .rev()
            .find(|tier| quantity >= tier.min_quantity)
            .map(|tier| tier.percent)
            .unwrap_or(0.0)
    }

    fn adjustment_bounds(&self, kind: AdjustmentKind) -> AdjustmentBounds {
        match kind {
            AdjustmentKind::Customization => self.adjustments.customization,
            AdjustmentKind::Risk => self.adjustments.risk,
            AdjustmentKind::Seniority => self.adjustments.seniority,
        }
    }

    fn validity_days(&self) -> u32 {
        self.proposals.validity_days
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
