//! Traversal and aggregation engine
//!
//! Walks a node tree pre-order, runs every category checker against each
//! visited node, and aggregates issues and statistics into a [`CheckResult`].
//! All provider lookups are resolved inline, so the returned result is final
//! for all six categories.

use crate::checks;
use crate::config::Configuration;
use crate::issue::{CheckResult, Issue};
use crate::node::DesignNode;
use crate::provider::DocumentProvider;

/// One evaluation pass over a configuration and a document
///
/// The engine borrows the configuration and the document provider for the
/// duration of a call and holds nothing once `evaluate` returns.
pub struct Engine<'a> {
    config: &'a Configuration,
    provider: &'a dyn DocumentProvider,
}

impl<'a> Engine<'a> {
    pub fn new(config: &'a Configuration, provider: &'a dyn DocumentProvider) -> Self {
        Self { config, provider }
    }

    /// Evaluate a node against the standards
    ///
    /// With `deep` the walk recurses into every child in document order after
    /// checking the current node; without it only the root is checked (the
    /// quick mode used for live-selection feedback). Each node is visited
    /// exactly once and counted once in `stats.nodes_checked`.
    pub fn evaluate(&self, root: &dyn DesignNode, deep: bool) -> CheckResult {
        let mut result = CheckResult::new();
        self.visit(root, deep, &mut result);
        log::debug!(
            "checked {} node(s), {} issue(s)",
            result.stats.nodes_checked,
            result.stats.issues_found
        );
        result
    }

    /// Evaluate every node of a selection and merge the results
    pub fn evaluate_all(&self, roots: &[&dyn DesignNode], deep: bool) -> CheckResult {
        let mut combined = CheckResult::new();
        for root in roots {
            combined.merge(self.evaluate(*root, deep));
        }
        combined
    }

    fn visit(&self, node: &dyn DesignNode, deep: bool, result: &mut CheckResult) {
        result.record_visit();
        for issue in self.check_node(node) {
            result.push(issue);
        }
        if deep {
            for child in node.children() {
                self.visit(child, deep, result);
            }
        }
    }

    fn check_node(&self, node: &dyn DesignNode) -> Vec<Issue> {
        checks::run_all(node, self.config, self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::JsonDocument;
    use crate::issue::Category;
    use pretty_assertions::assert_eq;

    /// A screen frame with one off-standard text child
    fn screen_document() -> JsonDocument {
        JsonDocument::from_str(
            r#"{
                "root": {
                    "id": "1:1", "name": "Screen - home", "kind": "frame",
                    "x": 0, "y": 0, "width": 328, "height": 640,
                    "children": [
                        { "id": "1:2", "name": "Header", "kind": "instance" },
                        { "id": "1:3", "name": "Navigation", "kind": "instance" },
                        { "id": "1:4", "name": "body copy", "kind": "text",
                          "fontFamily": "Arial" }
                    ]
                },
                "selection": ["1:1"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deep_evaluation_of_screen_scenario() {
        let doc = screen_document();
        let config = Configuration::default();
        let engine = Engine::new(&config, &doc);

        let result = engine.evaluate(&doc.root, true);

        assert!(!result.passed);
        assert_eq!(result.stats.nodes_checked, 4);
        // Disallowed font plus missing text style
        assert_eq!(result.stats.category_counts[&Category::Typography], 2);
        let typography: Vec<_> = result.issues_in(Category::Typography).collect();
        assert!(typography[0].message.contains("Arial"));
        assert!(typography[1].message.contains("no text style"));
    }

    #[test]
    fn test_quick_mode_checks_only_the_root() {
        let doc = screen_document();
        let config = Configuration::default();
        let engine = Engine::new(&config, &doc);

        let result = engine.evaluate(&doc.root, false);

        assert_eq!(result.stats.nodes_checked, 1);
        // The text child's typography problems are not visited
        assert!(!result.stats.category_counts.contains_key(&Category::Typography));
    }

    #[test]
    fn test_nodes_checked_equals_subtree_size() {
        let doc = screen_document();
        let config = Configuration::default();
        let engine = Engine::new(&config, &doc);

        let result = engine.evaluate(&doc.root, true);
        assert_eq!(result.stats.nodes_checked, doc.root.subtree_size());
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let doc = screen_document();
        let config = Configuration::default();
        let engine = Engine::new(&config, &doc);

        let first = engine.evaluate(&doc.root, true);
        let second = engine.evaluate(&doc.root, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_passed_iff_no_issues() {
        let doc = screen_document();
        let config = Configuration::default();
        let engine = Engine::new(&config, &doc);

        let result = engine.evaluate(&doc.root, true);
        assert_eq!(result.passed, result.issues.is_empty());
        assert_eq!(result.stats.issues_found, result.issues.len());
    }

    #[test]
    fn test_undersized_button_frame_scenario() {
        let doc = JsonDocument::from_str(
            r#"{
                "root": { "id": "2:1", "name": "button", "kind": "frame",
                          "width": 40, "height": 40 }
            }"#,
        )
        .unwrap();
        let config = Configuration::default();
        let engine = Engine::new(&config, &doc);

        let result = engine.evaluate(&doc.root, true);

        // Fails the frame pattern (lowercase) and the minimum target size
        assert_eq!(result.stats.category_counts[&Category::Naming], 1);
        assert_eq!(result.stats.category_counts[&Category::Accessibility], 1);
    }

    #[test]
    fn test_evaluate_all_merges_selection_roots() {
        let doc = screen_document();
        let config = Configuration::default();
        let engine = Engine::new(&config, &doc);

        let roots = doc.selection();
        let result = engine.evaluate_all(&roots, true);
        assert_eq!(result.stats.nodes_checked, 4);
    }

    #[test]
    fn test_issue_order_is_discovery_order() {
        let doc = screen_document();
        let config = Configuration::default();
        let engine = Engine::new(&config, &doc);

        let result = engine.evaluate(&doc.root, true);
        // Pre-order walk: any issues on the root precede issues on children
        let first_child_issue = result.issues.iter().position(|i| i.node_id == "1:4");
        let last_root_issue = result.issues.iter().rposition(|i| i.node_id == "1:1");
        if let (Some(child), Some(root)) = (first_child_issue, last_root_issue) {
            assert!(root < child);
        }
    }
}
