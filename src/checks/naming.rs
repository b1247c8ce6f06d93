//! Naming convention checker
//!
//! Each node is tested against exactly one pattern, picked by kind: frames
//! against the frame pattern, components and instances against the component
//! pattern, everything else against the layer pattern.

use crate::config::Configuration;
use crate::issue::{Category, Issue};
use crate::node::{DesignNode, NodeKind};

pub fn check(node: &dyn DesignNode, config: &Configuration) -> Vec<Issue> {
    let (pattern, label) = match node.kind() {
        NodeKind::Frame => (&config.naming.frame, "frame"),
        kind if kind.is_componentish() => (&config.naming.component, "component"),
        _ => (&config.naming.layer, "layer"),
    };

    if pattern.is_match(node.name()) {
        Vec::new()
    } else {
        vec![Issue::new(
            Category::Naming,
            format!(
                "'{}' does not match the {} naming pattern {}",
                node.name(),
                label,
                pattern.as_str()
            ),
            node.id(),
        )]
    }
}
