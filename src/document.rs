//! JSON document adapter
//!
//! A concrete, serde-deserializable document tree implementing the abstract
//! node surface and the document provider seam. This is what the CLI walks;
//! a live host would supply its own adapter instead.

use crate::node::{DesignNode, NodeKind, Padding, Paint, Rect};
use crate::provider::{DocumentProvider, LookupError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Error reading a document file
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One node of the serialized tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsonNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub font_family: Option<String>,
    pub text_style_id: Option<String>,
    pub padding: Option<Padding>,
    pub children: Vec<JsonNode>,
}

impl JsonNode {
    /// Depth-first search by id
    pub fn find(&self, id: &str) -> Option<&JsonNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Total node count of this subtree, itself included
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(JsonNode::subtree_size).sum::<usize>()
    }
}

impl DesignNode for JsonNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn bounds(&self) -> Option<Rect> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(Rect {
                x: self.x,
                y: self.y,
                width,
                height,
            }),
            _ => None,
        }
    }

    fn fills(&self) -> &[Paint] {
        &self.fills
    }

    fn strokes(&self) -> &[Paint] {
        &self.strokes
    }

    fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    fn text_style_id(&self) -> Option<&str> {
        self.text_style_id.as_deref()
    }

    fn padding(&self) -> Option<Padding> {
        self.padding
    }

    fn children(&self) -> Vec<&dyn DesignNode> {
        self.children
            .iter()
            .map(|child| child as &dyn DesignNode)
            .collect()
    }
}

/// A whole serialized document: tree, text-style table, current selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsonDocument {
    pub name: String,
    pub root: JsonNode,
    /// Style id -> style display name
    pub text_styles: HashMap<String, String>,
    /// Selected node ids, in selection order
    pub selection: Vec<String>,
    /// Node id -> RFC 3339 timestamp of the ready-for-dev mark
    pub ready_for_dev: HashMap<String, String>,
}

impl JsonDocument {
    pub fn from_str(content: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }
}

impl DocumentProvider for JsonDocument {
    fn node_by_id(&self, id: &str) -> Option<&dyn DesignNode> {
        self.root.find(id).map(|node| node as &dyn DesignNode)
    }

    fn resolve_text_style_name(&self, style_id: &str) -> Result<String, LookupError> {
        self.text_styles
            .get(style_id)
            .cloned()
            .ok_or_else(|| LookupError::StyleNotFound(style_id.to_string()))
    }

    fn selection(&self) -> Vec<&dyn DesignNode> {
        self.selection
            .iter()
            .filter_map(|id| self.node_by_id(id))
            .collect()
    }

    fn mark_ready_for_dev(&mut self, node_id: &str, timestamp: &str) -> Result<(), LookupError> {
        if self.root.find(node_id).is_none() {
            return Err(LookupError::NodeNotFound(node_id.to_string()));
        }
        self.ready_for_dev
            .insert(node_id.to_string(), timestamp.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JsonDocument {
        JsonDocument::from_str(
            r#"{
                "name": "Test",
                "textStyles": { "S:1": "Heading/H1" },
                "selection": ["2:1"],
                "root": {
                    "id": "0:1", "name": "Page 1", "kind": "page",
                    "children": [
                        {
                            "id": "2:1", "name": "Screen - home", "kind": "frame",
                            "width": 320, "height": 640,
                            "children": [
                                { "id": "2:2", "name": "title", "kind": "text",
                                  "fontFamily": "Inter", "textStyleId": "S:1" }
                            ]
                        }
                    ]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_and_subtree_size() {
        let doc = sample();
        assert_eq!(doc.root.subtree_size(), 3);
        assert_eq!(doc.root.find("2:2").unwrap().name, "title");
        assert!(doc.root.find("9:9").is_none());
    }

    #[test]
    fn test_selection_skips_vanished_nodes() {
        let mut doc = sample();
        doc.selection.push("9:9".to_string());
        let selected = doc.selection();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id(), "2:1");
    }

    #[test]
    fn test_style_resolution() {
        let doc = sample();
        assert_eq!(doc.resolve_text_style_name("S:1").unwrap(), "Heading/H1");
        assert!(matches!(
            doc.resolve_text_style_name("S:9"),
            Err(LookupError::StyleNotFound(_))
        ));
    }

    #[test]
    fn test_mark_ready_for_dev_requires_existing_node() {
        let mut doc = sample();
        doc.mark_ready_for_dev("2:1", "2026-01-01T00:00:00Z").unwrap();
        assert_eq!(
            doc.ready_for_dev.get("2:1").map(String::as_str),
            Some("2026-01-01T00:00:00Z")
        );
        assert!(doc.mark_ready_for_dev("9:9", "now").is_err());
    }

    #[test]
    fn test_bounds_require_width_and_height() {
        let doc = sample();
        let frame = doc.root.find("2:1").unwrap();
        let bounds = DesignNode::bounds(frame).unwrap();
        assert_eq!(bounds.width, 320.0);
        let text = doc.root.find("2:2").unwrap();
        assert!(DesignNode::bounds(text).is_none());
    }
}
