//! Generative-report client — follow-up questions and the automation report.
//!
//! Prompts are versioned, opaque instructions with an explicit expected
//! output schema; the client's real responsibility is strict response-shape
//! validation and graceful degradation of optional fields.

pub mod generator;
pub mod model;
pub mod prompts;

pub use generator::{GeneratorConfig, ReportGenerator};
pub use model::AutomationReport;
pub use prompts::PromptDefaults;
