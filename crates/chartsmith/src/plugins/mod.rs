//! Plugin implementations for parsing, chart selection and rendering
//!
//! Each chart type lives in its own module with a descriptor (suitability
//! and default config) and a renderer. Parsers, addons, the catalog and the
//! render pipeline are shared across chart types.

pub mod addons;
pub mod bar;
mod bindings;
pub mod catalog;
pub mod line;
pub mod orchestrator;
pub mod parsers;
pub mod pie;
pub mod pipeline;
pub mod scatter;

pub use addons::*;
pub use bar::*;
pub use catalog::*;
pub use line::*;
pub use orchestrator::*;
pub use parsers::*;
pub use pie::*;
pub use pipeline::*;
pub use scatter::*;
