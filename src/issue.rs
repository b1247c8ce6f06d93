//! Issue and result types for standards checks

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Rule category that produced an issue
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Palette compliance of fills and strokes
    Color,
    /// Font families and text styles
    Typography,
    /// Spacing-grid alignment of geometry and padding
    Spacing,
    /// Required sub-components and raw-primitive usage
    Components,
    /// Layer naming conventions
    Naming,
    /// Contrast and interactive target sizes
    Accessibility,
}

impl Category {
    /// All categories in the fixed dispatch order
    pub const ALL: [Category; 6] = [
        Category::Color,
        Category::Typography,
        Category::Spacing,
        Category::Components,
        Category::Naming,
        Category::Accessibility,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Color => "color",
            Category::Typography => "typography",
            Category::Spacing => "spacing",
            Category::Components => "components",
            Category::Naming => "naming",
            Category::Accessibility => "accessibility",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "color" | "colors" => Ok(Category::Color),
            "typography" | "type" => Ok(Category::Typography),
            "spacing" => Ok(Category::Spacing),
            "components" | "component" => Ok(Category::Components),
            "naming" => Ok(Category::Naming),
            "accessibility" | "a11y" => Ok(Category::Accessibility),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// A single deviation from the configured standards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Category of the violated rule
    pub category: Category,
    /// Human-readable message including the offending value and node name
    pub message: String,
    /// Identifier of the offending node; a reference only, never owned
    #[serde(rename = "nodeId")]
    pub node_id: String,
}

impl Issue {
    pub fn new(category: Category, message: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            node_id: node_id.into(),
        }
    }
}

/// Rollup statistics for a check run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckStats {
    /// Nodes visited, counted once per node regardless of issues
    #[serde(rename = "nodesChecked")]
    pub nodes_checked: usize,
    /// Total issues found
    #[serde(rename = "issuesFound")]
    pub issues_found: usize,
    /// Issue count per category; only categories with at least one issue
    #[serde(rename = "categoryCounts")]
    pub category_counts: BTreeMap<Category, usize>,
}

/// Result of one standards evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// False as soon as one issue exists
    pub passed: bool,
    /// Issues in discovery order
    pub issues: Vec<Issue>,
    /// Rollup statistics
    pub stats: CheckStats,
}

impl CheckResult {
    /// An empty, passing result
    pub fn new() -> Self {
        Self {
            passed: true,
            ..Self::default()
        }
    }

    /// Append an issue and keep the stats consistent
    pub fn push(&mut self, issue: Issue) {
        *self.stats.category_counts.entry(issue.category).or_insert(0) += 1;
        self.issues.push(issue);
        self.stats.issues_found = self.issues.len();
        self.passed = false;
    }

    /// Record one visited node
    pub fn record_visit(&mut self) {
        self.stats.nodes_checked += 1;
    }

    /// Merge another result into this one (selection with multiple roots)
    pub fn merge(&mut self, other: CheckResult) {
        for (category, count) in other.stats.category_counts {
            *self.stats.category_counts.entry(category).or_insert(0) += count;
        }
        self.stats.nodes_checked += other.stats.nodes_checked;
        self.issues.extend(other.issues);
        self.stats.issues_found = self.issues.len();
        self.passed = self.issues.is_empty();
    }

    /// Issues belonging to one category, in discovery order
    pub fn issues_in(&self, category: Category) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_updates_stats_and_passed() {
        let mut result = CheckResult::new();
        assert!(result.passed);

        result.push(Issue::new(Category::Color, "off palette", "1:2"));
        result.push(Issue::new(Category::Color, "off palette", "1:3"));
        result.push(Issue::new(Category::Naming, "bad name", "1:3"));

        assert!(!result.passed);
        assert_eq!(result.stats.issues_found, 3);
        assert_eq!(result.stats.category_counts[&Category::Color], 2);
        assert_eq!(result.stats.category_counts[&Category::Naming], 1);
        assert!(!result.stats.category_counts.contains_key(&Category::Spacing));
    }

    #[test]
    fn test_merge_combines_counts() {
        let mut a = CheckResult::new();
        a.record_visit();
        a.push(Issue::new(Category::Spacing, "off grid", "1:1"));

        let mut b = CheckResult::new();
        b.record_visit();
        b.record_visit();
        b.push(Issue::new(Category::Spacing, "off grid", "2:1"));

        a.merge(b);
        assert_eq!(a.stats.nodes_checked, 3);
        assert_eq!(a.stats.issues_found, 2);
        assert_eq!(a.stats.category_counts[&Category::Spacing], 2);
        assert!(!a.passed);
    }

    #[test]
    fn test_merge_of_clean_results_passes() {
        let mut a = CheckResult::new();
        a.record_visit();
        let mut b = CheckResult::new();
        b.record_visit();
        a.merge(b);
        assert!(a.passed);
        assert_eq!(a.stats.nodes_checked, 2);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Category::Accessibility).unwrap(),
            "\"accessibility\""
        );
    }

    #[test]
    fn test_category_from_str_aliases() {
        assert_eq!("a11y".parse::<Category>().unwrap(), Category::Accessibility);
        assert_eq!("Colors".parse::<Category>().unwrap(), Category::Color);
        assert!("layout".parse::<Category>().is_err());
    }
}
