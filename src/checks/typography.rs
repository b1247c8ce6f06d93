//! Typography checker
//!
//! Text nodes must use an allowed font family and carry a text style whose
//! resolved name matches one of the approved style families. Style names are
//! resolved through the document provider; a failed resolution is itself
//! reported as an issue, never swallowed.

use crate::config::Configuration;
use crate::issue::{Category, Issue};
use crate::node::{DesignNode, NodeKind};
use crate::provider::DocumentProvider;

pub fn check(
    node: &dyn DesignNode,
    config: &Configuration,
    provider: &dyn DocumentProvider,
) -> Vec<Issue> {
    if node.kind() != NodeKind::Text {
        return Vec::new();
    }

    let mut issues = Vec::new();

    if let Some(family) = node.font_family() {
        if !config
            .typography
            .allowed_fonts
            .iter()
            .any(|allowed| allowed == family)
        {
            issues.push(Issue::new(
                Category::Typography,
                format!("Font '{}' on '{}' is not an allowed family", family, node.name()),
                node.id(),
            ));
        }
    }

    match node.text_style_id() {
        None => {
            issues.push(Issue::new(
                Category::Typography,
                format!("Text layer '{}' has no text style assigned", node.name()),
                node.id(),
            ));
        }
        Some(style_id) => match provider.resolve_text_style_name(style_id) {
            Err(e) => {
                issues.push(Issue::new(
                    Category::Typography,
                    format!("Text style on '{}' could not be resolved: {}", node.name(), e),
                    node.id(),
                ));
            }
            Ok(style_name) => {
                let approved = config
                    .typography
                    .style_name_contains
                    .iter()
                    .any(|fragment| style_name.contains(fragment.as_str()));
                if !approved {
                    issues.push(Issue::new(
                        Category::Typography,
                        format!(
                            "Text style '{}' on '{}' is not an approved style family",
                            style_name,
                            node.name()
                        ),
                        node.id(),
                    ));
                }
            }
        },
    }

    issues
}
