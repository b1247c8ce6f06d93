//! JSON output formatter

use super::OutputFormatter;
use crate::issue::CheckResult;

/// Machine-readable JSON output
#[derive(Debug, Default)]
pub struct JsonFormatter {
    /// Pretty-print the payload
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &CheckResult) -> String {
        let serialized = if self.pretty {
            serde_json::to_string_pretty(result)
        } else {
            serde_json::to_string(result)
        };
        serialized.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}
