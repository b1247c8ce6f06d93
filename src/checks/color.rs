//! Color palette checker
//!
//! Every visible solid fill and stroke must match the allowed palette exactly.
//! The configured tolerance is reserved for future fuzzy matching and does not
//! affect the test.

use crate::config::Configuration;
use crate::issue::{Category, Issue};
use crate::node::{DesignNode, Rgb};

/// Canonical uppercase `#RRGGBB` for an RGB triple with channels in [0, 1]
pub fn rgb_to_hex(color: Rgb) -> String {
    fn to_byte(channel: f32) -> u8 {
        (channel.clamp(0.0, 1.0) * 255.0).round() as u8
    }
    format!(
        "#{:02X}{:02X}{:02X}",
        to_byte(color.r),
        to_byte(color.g),
        to_byte(color.b)
    )
}

pub fn check(node: &dyn DesignNode, config: &Configuration) -> Vec<Issue> {
    let mut issues = Vec::new();
    let allowed = &config.colors.allowed;

    for paint in node.fills() {
        if let Some(color) = paint.visible_solid() {
            let hex = rgb_to_hex(color);
            if !allowed.iter().any(|entry| entry == &hex) {
                issues.push(Issue::new(
                    Category::Color,
                    format!("Fill {} on '{}' is not in the color palette", hex, node.name()),
                    node.id(),
                ));
            }
        }
    }

    for paint in node.strokes() {
        if let Some(color) = paint.visible_solid() {
            let hex = rgb_to_hex(color);
            if !allowed.iter().any(|entry| entry == &hex) {
                issues.push(Issue::new(
                    Category::Color,
                    format!(
                        "Stroke {} on '{}' is not in the color palette",
                        hex,
                        node.name()
                    ),
                    node.id(),
                ));
            }
        }
    }

    issues
}
