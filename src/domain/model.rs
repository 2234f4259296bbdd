use crate::utils::error::PricingError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaxRegime {
    Mei,
    SimplesNacional,
    LucroPresumido,
    Autonomo,
}

impl TaxRegime {
    pub const ALL: [TaxRegime; 4] = [
        TaxRegime::Mei,
        TaxRegime::SimplesNacional,
        TaxRegime::LucroPresumido,
        TaxRegime::Autonomo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaxRegime::Mei => "MEI",
            TaxRegime::SimplesNacional => "Simples Nacional",
            TaxRegime::LucroPresumido => "Lucro Presumido",
            TaxRegime::Autonomo => "Autônomo",
        }
    }

    fn normalize(raw: &str) -> String {
        raw.trim()
            .chars()
            .map(|c| match c {
                'ô' | 'Ô' => 'o',
                '_' | '-' => ' ',
                other => other.to_ascii_lowercase(),
            })
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaxRegime {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::normalize(s).as_str() {
            "mei" => Ok(TaxRegime::Mei),
            "simples nacional" | "simples" => Ok(TaxRegime::SimplesNacional),
            "lucro presumido" => Ok(TaxRegime::LucroPresumido),
            "autonomo" => Ok(TaxRegime::Autonomo),
            _ => Err(PricingError::UnsupportedRegime {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for TaxRegime {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaxRegime> for String {
    fn from(regime: TaxRegime) -> Self {
        regime.label().to_string()
    }
}

/// A regime as typed by the user. Unrecognised text is kept so the
/// calculator can decide how to treat it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegimeSelection {
    Known(TaxRegime),
    Unrecognised(String),
}

impl RegimeSelection {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<TaxRegime>() {
            Ok(regime) => RegimeSelection::Known(regime),
            Err(_) => RegimeSelection::Unrecognised(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RegimeSelection::Known(regime) => regime.label(),
            RegimeSelection::Unrecognised(raw) => raw,
        }
    }
}

impl From<TaxRegime> for RegimeSelection {
    fn from(regime: TaxRegime) -> Self {
        RegimeSelection::Known(regime)
    }
}

impl From<String> for RegimeSelection {
    fn from(raw: String) -> Self {
        RegimeSelection::parse(&raw)
    }
}

impl From<RegimeSelection> for String {
    fn from(selection: RegimeSelection) -> Self {
        selection.label().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRegimePolicy {
    #[default]
    Reject,
    ZeroRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    pub fixed_costs: f64,
    pub desired_draw: f64,
    pub productive_hours: u32,
    pub tax_regime: RegimeSelection,
}

impl PricingInput {
    pub const DEFAULT_FIXED_COSTS: f64 = 5000.0;
    pub const DEFAULT_DESIRED_DRAW: f64 = 8000.0;
    pub const DEFAULT_PRODUCTIVE_HOURS: u32 = 160;

    pub fn new(tax_regime: impl Into<RegimeSelection>) -> Self {
        Self {
            fixed_costs: Self::DEFAULT_FIXED_COSTS,
            desired_draw: Self::DEFAULT_DESIRED_DRAW,
            productive_hours: Self::DEFAULT_PRODUCTIVE_HOURS,
            tax_regime: tax_regime.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalHour {
    pub regime: String,
    pub base_hour: f64,
    pub margin_rate: f64,
    pub tax_rate: f64,
    pub final_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub client_name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub displacement_fee: f64,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }

    pub fn indicator(&self) -> Indicator {
        match self {
            RiskLevel::Low => Indicator::Green,
            RiskLevel::Medium => Indicator::Yellow,
            RiskLevel::High => Indicator::Orange,
            RiskLevel::VeryHigh => Indicator::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Green,
    Yellow,
    Orange,
    Red,
}

impl Indicator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Indicator::Green => "🟢",
            Indicator::Yellow => "🟡",
            Indicator::Orange => "🟠",
            Indicator::Red => "🔴",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub client: String,
    pub sector: String,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub factors: String,
    #[serde(default)]
    pub recommendations: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskOutcome {
    pub client: String,
    pub sector: String,
    pub risk_level: RiskLevel,
    pub indicator: Indicator,
    pub score: f64,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalItem {
    pub service: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub estimated_hours: f64,
    #[serde(default)]
    pub customization: f64,
    #[serde(default)]
    pub risk: f64,
    #[serde(default)]
    pub seniority: f64,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(flatten)]
    pub draft: ProposalDraft,
    pub tax_regime: RegimeSelection,
    pub number: Option<String>,
    pub validity_days: Option<u32>,
    #[serde(default)]
    pub items: Vec<ProposalItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedItem {
    pub service: String,
    pub quantity: u32,
    pub estimated_hours: f64,
    pub unit_price: f64,
    pub volume_discount: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub number: String,
    pub client_name: String,
    pub title: String,
    pub description: String,
    pub issued_on: NaiveDate,
    pub valid_until: NaiveDate,
    pub hourly_rate: TechnicalHour,
    pub items: Vec<PricedItem>,
    pub items_total: f64,
    pub discount_percent: f64,
    pub discount_amount: f64,
    pub displacement_fee: f64,
    pub total: f64,
}
