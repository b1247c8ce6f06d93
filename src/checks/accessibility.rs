//! Accessibility checker
//!
//! Text must clear the minimum WCAG contrast ratio against its resolved
//! background, and anything named like an interactive control must meet the
//! minimum touch-target size.

use crate::config::Configuration;
use crate::issue::{Category, Issue};
use crate::node::{DesignNode, NodeKind, Paint};
use crate::provider::DocumentProvider;

/// Names containing one of these are treated as interactive controls
const INTERACTIVE_KEYWORDS: [&str; 6] = ["button", "link", "input", "toggle", "checkbox", "radio"];

/// Whether the node's name classifies it as interactive
pub fn is_interactive(name: &str) -> bool {
    let lower = name.to_lowercase();
    INTERACTIVE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

pub fn check(
    node: &dyn DesignNode,
    config: &Configuration,
    provider: &dyn DocumentProvider,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    if node.kind() == NodeKind::Text {
        if let Some(color) = node.fills().iter().find_map(Paint::visible_solid) {
            let background = provider.background_for(node.id());
            let ratio = color.contrast_ratio(&background);
            if ratio < config.accessibility.min_contrast_ratio {
                issues.push(Issue::new(
                    Category::Accessibility,
                    format!(
                        "Text '{}' has contrast {:.2}:1 against its background, below the minimum {:.1}:1",
                        node.name(),
                        ratio,
                        config.accessibility.min_contrast_ratio
                    ),
                    node.id(),
                ));
            }
        }
    }

    if is_interactive(node.name()) {
        if let Some(bounds) = node.bounds() {
            let min = config.accessibility.interactive_element_min_size;
            if bounds.width < min || bounds.height < min {
                issues.push(Issue::new(
                    Category::Accessibility,
                    format!(
                        "Interactive element '{}' is {}x{}, below the {}-unit minimum size",
                        node.name(),
                        bounds.width,
                        bounds.height,
                        min
                    ),
                    node.id(),
                ));
            }
        }
    }

    issues
}
