//! Core abstractions for chart creation
//!
//! Data model, error taxonomy, logging and settings, plus the traits every
//! parser, chart type, renderer, addon and external provider implements.

mod addon;
mod chart_type;
pub mod coerce;
mod config;
mod error;
mod figure;
pub mod logging;
mod parser;
mod provider;
mod renderer;
pub mod settings;
mod table;
mod types;

pub use addon::*;
pub use chart_type::*;
pub use config::*;
pub use error::*;
pub use figure::*;
pub use logging::*;
pub use parser::*;
pub use provider::*;
pub use renderer::*;
pub use settings::*;
pub use table::*;
pub use types::*;
