pub mod pricing;
pub mod proposal;
pub mod risk;

pub use crate::domain::model::{PricingInput, ProposalDraft, RiskAssessment};
pub use crate::domain::ports::PricingParameters;
pub use crate::utils::error::Result;
