//! Spacing-grid checker
//!
//! Container geometry (and auto-layout padding) must sit on multiples of the
//! configured base unit, within a percentage tolerance.

use crate::config::Configuration;
use crate::issue::{Category, Issue};
use crate::node::DesignNode;

/// Whether a value lies within tolerance of a multiple of the base unit
///
/// `tolerance_abs = base_unit * tolerance_percent / 100`; the value is
/// on-grid when its remainder is within the tolerance of either end of the
/// period.
pub fn is_on_grid(value: f64, base_unit: f64, tolerance_percent: f64) -> bool {
    let tolerance = base_unit * tolerance_percent / 100.0;
    let remainder = value.rem_euclid(base_unit);
    remainder <= tolerance || base_unit - remainder <= tolerance
}

pub fn check(node: &dyn DesignNode, config: &Configuration) -> Vec<Issue> {
    if !node.kind().is_container() {
        return Vec::new();
    }

    let base = config.spacing.base_unit;
    let tolerance = config.spacing.tolerance_percent;
    let mut issues = Vec::new();

    let flag_off_grid = |label: &str, value: f64, issues: &mut Vec<Issue>| {
        if !is_on_grid(value, base, tolerance) {
            issues.push(Issue::new(
                Category::Spacing,
                format!(
                    "'{}' {} of {} is off the {}-unit spacing grid",
                    node.name(),
                    label,
                    value,
                    base
                ),
                node.id(),
            ));
        }
    };

    if let Some(bounds) = node.bounds() {
        flag_off_grid("x", bounds.x, &mut issues);
        flag_off_grid("y", bounds.y, &mut issues);
        flag_off_grid("width", bounds.width, &mut issues);
        flag_off_grid("height", bounds.height, &mut issues);
    }

    // Only auto-layout containers expose padding
    if let Some(padding) = node.padding() {
        flag_off_grid("padding-top", padding.top, &mut issues);
        flag_off_grid("padding-right", padding.right, &mut issues);
        flag_off_grid("padding-bottom", padding.bottom, &mut issues);
        flag_off_grid("padding-left", padding.left, &mut issues);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::JsonNode;
    use crate::node::{NodeKind, Padding};

    fn frame(x: f64, y: f64, width: f64, height: f64) -> JsonNode {
        JsonNode {
            id: "4:1".to_string(),
            name: "Frame".to_string(),
            kind: NodeKind::Frame,
            x,
            y,
            width: Some(width),
            height: Some(height),
            ..JsonNode::default()
        }
    }

    #[test]
    fn test_on_grid_is_periodic() {
        for value in [0.0, 3.0, 7.9, 12.5, 100.0, -4.0] {
            assert_eq!(
                is_on_grid(value, 8.0, 5.0),
                is_on_grid(value + 8.0, 8.0, 5.0),
                "period broken at {}",
                value
            );
        }
    }

    #[test]
    fn test_zero_tolerance_accepts_exact_multiples_only() {
        assert!(is_on_grid(0.0, 8.0, 0.0));
        assert!(is_on_grid(16.0, 8.0, 0.0));
        assert!(!is_on_grid(16.01, 8.0, 0.0));
        assert!(!is_on_grid(4.0, 8.0, 0.0));
    }

    #[test]
    fn test_tolerance_accepts_both_sides_of_a_multiple() {
        // 5% of 8 = 0.4
        assert!(is_on_grid(8.3, 8.0, 5.0));
        assert!(is_on_grid(7.7, 8.0, 5.0));
        assert!(!is_on_grid(7.0, 8.0, 5.0));
    }

    #[test]
    fn test_one_issue_per_off_grid_dimension() {
        let node = frame(3.0, 5.0, 328.0, 41.0);
        let issues = check(&node, &Configuration::default());
        assert_eq!(issues.len(), 3); // x, y, height; 328 is on-grid
        assert!(issues.iter().all(|i| i.category == Category::Spacing));
    }

    #[test]
    fn test_padding_is_checked_for_auto_layout() {
        let mut node = frame(0.0, 0.0, 320.0, 640.0);
        node.padding = Some(Padding {
            top: 16.0,
            right: 13.0,
            bottom: 16.0,
            left: 13.0,
        });
        let issues = check(&node, &Configuration::default());
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("padding-right"));
        assert!(issues[1].message.contains("padding-left"));
    }

    #[test]
    fn test_non_containers_are_skipped() {
        let node = JsonNode {
            kind: NodeKind::Text,
            width: Some(13.0),
            height: Some(13.0),
            ..JsonNode::default()
        };
        assert!(check(&node, &Configuration::default()).is_empty());
    }
}
