//! Stateless rendering of computed panels.
//!
//! The caller owns the [`ViewState`] and passes it in on every render; nothing
//! here remembers the previous page.

use crate::domain::model::{Indicator, Quote, RiskOutcome, TechnicalHour};
use crate::utils::error::{PricingError, Result};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    TechnicalHour,
    Proposals,
    RiskAssessments,
}

impl Page {
    pub fn heading(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::TechnicalHour => "Technical Hour Calculation",
            Page::Proposals => "Commercial Proposals",
            Page::RiskAssessments => "Risk Assessments (NR-01)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub page: Page,
    pub format: OutputFormat,
    pub color: bool,
}

impl ViewState {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            format: OutputFormat::Text,
            color: false,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub total_proposals: u32,
    pub active_clients: u32,
    pub total_value: f64,
    pub backend_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalRow {
    pub id: String,
    pub client: String,
    pub title: String,
    pub status: String,
    pub total_value: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum Panel {
    Dashboard(DashboardMetrics),
    TechnicalHour(TechnicalHour),
    ProposalCreated { client_name: String, title: String },
    ProposalList { rows: Vec<ProposalRow> },
    RiskSaved(RiskOutcome),
    Quote(Quote),
}

pub fn money(value: f64) -> String {
    format!("R$ {:.2}", value)
}

pub fn render(view: &ViewState, panel: &Panel) -> Result<String> {
    match view.format {
        OutputFormat::Text => Ok(render_text(view, panel)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(panel)?),
        OutputFormat::Csv => render_csv(panel),
    }
}

fn success(view: &ViewState, msg: &str) -> String {
    let line = format!("✅ {}", msg);
    if view.color {
        line.as_str().green().bold().to_string()
    } else {
        line
    }
}

fn indicator_label(view: &ViewState, indicator: Indicator, label: &str) -> String {
    if !view.color {
        return label.to_string();
    }
    match indicator {
        Indicator::Green => label.green().to_string(),
        Indicator::Yellow => label.yellow().to_string(),
        Indicator::Orange => label.truecolor(255, 165, 0).to_string(),
        Indicator::Red => label.red().to_string(),
    }
}

fn render_text(view: &ViewState, panel: &Panel) -> String {
    let mut out = String::new();
    let heading = view.page.heading();
    if view.color {
        let _ = writeln!(out, "{}", heading.bold());
    } else {
        let _ = writeln!(out, "{}", heading);
    }
    let _ = writeln!(out, "{}", "=".repeat(heading.chars().count()));

    match panel {
        Panel::Dashboard(metrics) => {
            let _ = writeln!(out, "Total proposals : {}", metrics.total_proposals);
            let _ = writeln!(out, "Active clients  : {}", metrics.active_clients);
            let _ = writeln!(out, "Total value     : {}", money(metrics.total_value));
            let _ = writeln!(
                out,
                "📊 Not connected to the backend at {}; no live data.",
                metrics.backend_url
            );
        }
        Panel::TechnicalHour(hour) => {
            let _ = writeln!(
                out,
                "{}",
                success(
                    view,
                    &format!("Technical hour: {}", money(hour.final_hour))
                )
            );
            let _ = writeln!(out, "Breakdown:");
            let _ = writeln!(out, "- Base hour: {}", money(hour.base_hour));
            if hour.margin_rate > 0.0 {
                let _ = writeln!(out, "- Contingency margin: {:.0}%", hour.margin_rate * 100.0);
            }
            let _ = writeln!(
                out,
                "- Tax rate ({}): {:.0}%",
                hour.regime,
                hour.tax_rate * 100.0
            );
            let _ = writeln!(out, "- Final technical hour: {}", money(hour.final_hour));
        }
        Panel::ProposalCreated { client_name, title } => {
            let _ = writeln!(out, "{}", success(view, "Proposal created successfully!"));
            let _ = writeln!(out, "Client: {}", client_name);
            let _ = writeln!(out, "Title : {}", title);
        }
        Panel::ProposalList { rows } => {
            if rows.is_empty() {
                let _ = writeln!(
                    out,
                    "🔍 No proposals found. Connect to the backend to see data."
                );
            }
            let _ = writeln!(out, "ID | Client | Title | Status | Total Value | Date");
            for row in rows {
                let _ = writeln!(
                    out,
                    "{} | {} | {} | {} | {} | {}",
                    row.id,
                    row.client,
                    row.title,
                    row.status,
                    money(row.total_value),
                    row.date
                );
            }
        }
        Panel::RiskSaved(outcome) => {
            let _ = writeln!(out, "{}", success(view, "Risk assessment saved successfully!"));
            let _ = writeln!(out, "Client: {} / Sector: {}", outcome.client, outcome.sector);
            let _ = writeln!(
                out,
                "{} Risk level: {}",
                outcome.indicator.symbol(),
                indicator_label(view, outcome.indicator, outcome.risk_level.label())
            );
            let _ = writeln!(out, "Score: {:.1}", outcome.score);
            let _ = writeln!(out, "Recommendation: {}", outcome.recommendation);
        }
        Panel::Quote(quote) => {
            let _ = writeln!(out, "Proposal {} for {}", quote.number, quote.client_name);
            let _ = writeln!(out, "Title: {}", quote.title);
            if !quote.description.is_empty() {
                let _ = writeln!(out, "{}", quote.description);
            }
            let _ = writeln!(
                out,
                "Issued {} / valid until {}",
                quote.issued_on, quote.valid_until
            );
            let _ = writeln!(
                out,
                "Technical hour ({}): {}",
                quote.hourly_rate.regime,
                money(quote.hourly_rate.final_hour)
            );
            for item in &quote.items {
                let _ = writeln!(
                    out,
                    "- {} x{} @ {} (volume -{:.2}%): {}",
                    item.service,
                    item.quantity,
                    money(item.unit_price),
                    item.volume_discount,
                    money(item.total)
                );
            }
            let _ = writeln!(out, "Items total: {}", money(quote.items_total));
            let _ = writeln!(
                out,
                "Discount ({:.2}%): -{}",
                quote.discount_percent,
                money(quote.discount_amount)
            );
            let _ = writeln!(out, "Displacement fee: {}", money(quote.displacement_fee));
            let _ = writeln!(out, "{}", success(view, &format!("Total: {}", money(quote.total))));
        }
    }
    out
}

fn render_csv(panel: &Panel) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    match panel {
        Panel::Quote(quote) => {
            writer.write_record([
                "service",
                "quantity",
                "estimated_hours",
                "unit_price",
                "volume_discount",
                "total",
            ])?;
            for item in &quote.items {
                writer.write_record([
                    item.service.clone(),
                    item.quantity.to_string(),
                    format!("{:.2}", item.estimated_hours),
                    format!("{:.2}", item.unit_price),
                    format!("{:.2}", item.volume_discount),
                    format!("{:.2}", item.total),
                ])?;
            }
        }
        Panel::ProposalList { rows } => {
            writer.write_record(["id", "client", "title", "status", "total_value", "date"])?;
            for row in rows {
                writer.serialize(row)?;
            }
        }
        _ => {
            return Err(PricingError::invalid_input(
                "format",
                "CSV output is only available for quotes and proposal lists",
            ))
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PricingError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| PricingError::invalid_input("format", e.to_string()))
}
