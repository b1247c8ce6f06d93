//! Human-readable text output formatter

use super::OutputFormatter;
use crate::issue::{Category, CheckResult};
use colored::*;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show the per-category statistics block
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn category_str(&self, category: Category) -> ColoredString {
        let s = format!("{}", category);
        if !self.colored {
            return s.normal();
        }
        match category {
            Category::Accessibility => s.red().bold(),
            Category::Color | Category::Typography => s.yellow().bold(),
            _ => s.cyan(),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &CheckResult) -> String {
        let mut output = String::new();

        for category in Category::ALL {
            let issues: Vec<_> = result.issues_in(category).collect();
            if issues.is_empty() {
                continue;
            }
            output.push_str(&format!("{}\n", self.category_str(category)));
            for issue in issues {
                output.push_str(&format!("  {} [{}]\n", issue.message, issue.node_id));
            }
            output.push('\n');
        }

        if self.show_stats {
            output.push_str(&format!(
                "{} node(s) checked, {} issue(s) found\n",
                result.stats.nodes_checked, result.stats.issues_found
            ));
        }

        let verdict = if result.passed {
            let s = "PASSED";
            if self.colored {
                s.green().bold().to_string()
            } else {
                s.to_string()
            }
        } else if self.colored {
            "FAILED".red().bold().to_string()
        } else {
            "FAILED".to_string()
        };
        output.push_str(&verdict);
        output.push('\n');

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Issue;

    fn sample_result() -> CheckResult {
        let mut result = CheckResult::new();
        result.record_visit();
        result.record_visit();
        result.push(Issue::new(Category::Spacing, "'Frame' x of 3 is off the 8-unit spacing grid", "1:1"));
        result.push(Issue::new(Category::Naming, "'frame' does not match the frame naming pattern", "1:1"));
        result
    }

    #[test]
    fn test_groups_issues_by_category() {
        let text = TextFormatter::new().without_color().format(&sample_result());
        let spacing_pos = text.find("spacing").unwrap();
        let naming_pos = text.find("naming").unwrap();
        assert!(spacing_pos < naming_pos);
        assert!(text.contains("[1:1]"));
        assert!(text.contains("FAILED"));
    }

    #[test]
    fn test_passing_result_reports_passed() {
        let mut result = CheckResult::new();
        result.record_visit();
        let text = TextFormatter::new().without_color().format(&result);
        assert!(text.contains("PASSED"));
        assert!(text.contains("1 node(s) checked, 0 issue(s) found"));
    }

    #[test]
    fn test_stats_block_can_be_hidden() {
        let formatter = TextFormatter {
            colored: false,
            show_stats: false,
        };
        let text = formatter.format(&sample_result());
        assert!(!text.contains("node(s) checked"));
    }
}
