//! Category checkers
//!
//! Six stateless rule evaluators, each a pure function of a node and the
//! configuration. The engine dispatches them in a fixed order per node:
//! color, typography, spacing, components, naming, accessibility.

pub mod accessibility;
pub mod color;
pub mod components;
pub mod naming;
pub mod spacing;
pub mod typography;

use crate::config::Configuration;
use crate::issue::Issue;
use crate::node::DesignNode;
use crate::provider::DocumentProvider;

/// Run every checker against one node, in the fixed dispatch order
pub fn run_all(
    node: &dyn DesignNode,
    config: &Configuration,
    provider: &dyn DocumentProvider,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(color::check(node, config));
    issues.extend(typography::check(node, config, provider));
    issues.extend(spacing::check(node, config));
    issues.extend(components::check(node, config));
    issues.extend(naming::check(node, config));
    issues.extend(accessibility::check(node, config, provider));
    issues
}
