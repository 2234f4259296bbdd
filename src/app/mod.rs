pub mod commands;
pub mod render;

pub use commands::{handle, HourForm, Request};
pub use render::{render, OutputFormat, Page, Panel, ViewState};
