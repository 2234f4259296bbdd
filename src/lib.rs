pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{handle, render, OutputFormat, Page, Panel, Request, ViewState};
pub use config::PricingConfig;
pub use utils::error::{PricingError, Result};
