use crate::app::{HourForm, OutputFormat, Request};
use crate::core::proposal::check_proposal_amounts;
use crate::domain::model::{ProposalDraft, RiskAssessment, RiskLevel};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "blackbelt")]
#[command(about = "Technical-hour pricing, proposals and NR-01 risk assessments")]
#[command(version)]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON on stderr")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Overview panel
    Dashboard,
    /// Calculate the technical hour rate
    Hour {
        #[arg(long, value_parser = parse_non_negative)]
        fixed_costs: Option<f64>,
        #[arg(long, value_parser = parse_non_negative)]
        desired_draw: Option<f64>,
        #[arg(long = "hours", value_parser = clap::value_parser!(u32).range(1..))]
        productive_hours: Option<u32>,
        /// MEI, Simples Nacional, Lucro Presumido or Autônomo
        #[arg(long)]
        regime: Option<String>,
    },
    /// Commercial proposals
    Proposal {
        #[command(subcommand)]
        action: ProposalAction,
    },
    /// Record an NR-01 psychosocial risk assessment
    Risk {
        #[arg(long, default_value = "")]
        client: String,
        #[arg(long, default_value = "")]
        sector: String,
        #[arg(long, value_enum, default_value = "low")]
        level: RiskLevel,
        #[arg(long, default_value = "")]
        factors: String,
        #[arg(long, default_value = "")]
        recommendations: String,
    },
    /// Price a full proposal described in a TOML file
    Quote {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProposalAction {
    /// Validate a new proposal draft
    New {
        #[arg(long, default_value = "")]
        client: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 0.0, value_parser = parse_discount)]
        discount: f64,
        #[arg(long, default_value_t = 0.0, value_parser = parse_non_negative)]
        fee: f64,
    },
    /// List proposals
    List,
}

fn parse_non_negative(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{}", e))?;
    check_proposal_amounts(0.0, value).map_err(|e| e.to_string())?;
    Ok(value)
}

fn parse_discount(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{}", e))?;
    check_proposal_amounts(value, 0.0).map_err(|e| e.to_string())?;
    Ok(value)
}

impl CliConfig {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn request(&self) -> Request {
        match &self.command {
            Commands::Dashboard => Request::Dashboard,
            Commands::Hour {
                fixed_costs,
                desired_draw,
                productive_hours,
                regime,
            } => Request::TechnicalHour(HourForm {
                fixed_costs: *fixed_costs,
                desired_draw: *desired_draw,
                productive_hours: *productive_hours,
                tax_regime: regime.clone(),
            }),
            Commands::Proposal {
                action:
                    ProposalAction::New {
                        client,
                        title,
                        description,
                        discount,
                        fee,
                    },
            } => Request::NewProposal(ProposalDraft {
                client_name: client.clone(),
                title: title.clone(),
                description: description.clone(),
                discount_percent: *discount,
                displacement_fee: *fee,
            }),
            Commands::Proposal {
                action: ProposalAction::List,
            } => Request::ListProposals,
            Commands::Risk {
                client,
                sector,
                level,
                factors,
                recommendations,
            } => Request::RiskAssessment(RiskAssessment {
                client: client.clone(),
                sector: sector.clone(),
                risk_level: *level,
                factors: factors.clone(),
                recommendations: recommendations.clone(),
            }),
            Commands::Quote { file } => Request::Quote { file: file.clone() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        CliConfig::command().debug_assert();
    }

    #[test]
    fn test_hour_command_maps_to_form() {
        let cli = CliConfig::try_parse_from([
            "blackbelt",
            "hour",
            "--fixed-costs",
            "0",
            "--hours",
            "1",
            "--regime",
            "Simples Nacional",
        ])
        .unwrap();

        match cli.request() {
            Request::TechnicalHour(form) => {
                assert_eq!(form.fixed_costs, Some(0.0));
                assert_eq!(form.desired_draw, None);
                assert_eq!(form.productive_hours, Some(1));
                assert_eq!(form.tax_regime.as_deref(), Some("Simples Nacional"));
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_zero_hours_rejected_at_parse_time() {
        assert!(CliConfig::try_parse_from(["blackbelt", "hour", "--hours", "0"]).is_err());
    }

    #[test]
    fn test_discount_range_enforced_at_parse_time() {
        assert!(CliConfig::try_parse_from([
            "blackbelt", "proposal", "new", "--client", "Acme", "--title", "Y", "--discount", "101"
        ])
        .is_err());
        assert!(CliConfig::try_parse_from([
            "blackbelt", "proposal", "new", "--client", "Acme", "--fee", "-5"
        ])
        .is_err());
    }

    #[test]
    fn test_risk_level_values() {
        let cli = CliConfig::try_parse_from([
            "blackbelt", "risk", "--client", "Acme", "--sector", "Ops", "--level", "very-high",
        ])
        .unwrap();
        match cli.request() {
            Request::RiskAssessment(a) => assert_eq!(a.risk_level, RiskLevel::VeryHigh),
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli =
            CliConfig::try_parse_from(["blackbelt", "proposal", "list", "--format", "csv", "-v"])
                .unwrap();
        assert_eq!(cli.format, OutputFormat::Csv);
        assert!(cli.verbose);
        assert_eq!(cli.request(), Request::ListProposals);
    }
}
