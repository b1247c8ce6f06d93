//! Component usage checker
//!
//! Two rules: containers whose name marks them as a known frame type must
//! contain the sub-components configured for that type somewhere in their
//! subtree, and layers named like a library component must actually be a
//! component or instance rather than a raw primitive.

use crate::config::Configuration;
use crate::issue::{Category, Issue};
use crate::node::DesignNode;

pub fn check(node: &dyn DesignNode, config: &Configuration) -> Vec<Issue> {
    let mut issues = Vec::new();

    // Frame type is derived from the name by case-insensitive substring match
    // against the configured type tags
    if node.kind().is_container() {
        let name_lower = node.name().to_lowercase();
        for (frame_type, required) in &config.components.required_children {
            if !name_lower.contains(&frame_type.to_lowercase()) {
                continue;
            }
            for required_name in required {
                if !subtree_contains_name(node, required_name) {
                    issues.push(Issue::new(
                        Category::Components,
                        format!(
                            "'{}' ({}) is missing required component '{}'",
                            node.name(),
                            frame_type,
                            required_name
                        ),
                        node.id(),
                    ));
                }
            }
        }
    }

    // The segment after the last '/' is the candidate component name
    let candidate = node
        .name()
        .rsplit('/')
        .next()
        .unwrap_or_else(|| node.name())
        .trim();
    let must_be_instance = config
        .components
        .must_be_instance
        .iter()
        .any(|name| name == candidate);
    if must_be_instance && !node.kind().is_componentish() {
        issues.push(Issue::new(
            Category::Components,
            format!(
                "'{}' should be an instance of the '{}' component, not a raw {}",
                node.name(),
                candidate,
                node.kind()
            ),
            node.id(),
        ));
    }

    issues
}

/// Case-sensitive substring search over all descendant names
fn subtree_contains_name(node: &dyn DesignNode, needle: &str) -> bool {
    node.children()
        .iter()
        .any(|child| child.name().contains(needle) || subtree_contains_name(*child, needle))
}
