//! Output formatters for check results

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::issue::CheckResult;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a check result as a string
    fn format(&self, result: &CheckResult) -> String;
}
