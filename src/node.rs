//! Abstract node surface the engine checks against
//!
//! The engine never owns document nodes. It sees them through the read-only
//! [`DesignNode`] trait, implemented by an adapter around whatever tree the
//! host document system actually holds.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Kind of a document node (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Top-level container frame
    Frame,
    /// Loose grouping of layers
    Group,
    /// Reusable component definition
    Component,
    /// Instance of a component
    Instance,
    /// Text layer
    Text,
    /// Page within a document
    Page,
    /// Document root
    Document,
    /// Any other leaf (shapes, vectors, images, ...)
    #[default]
    Other,
}

impl NodeKind {
    /// Map a serialized kind tag; anything unrecognized is an other-leaf
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "frame" => NodeKind::Frame,
            "group" => NodeKind::Group,
            "component" => NodeKind::Component,
            "instance" => NodeKind::Instance,
            "text" => NodeKind::Text,
            "page" => NodeKind::Page,
            "document" => NodeKind::Document,
            _ => NodeKind::Other,
        }
    }

    /// Container-like kinds carry geometry the spacing rules apply to
    pub fn is_container(self) -> bool {
        matches!(
            self,
            NodeKind::Frame | NodeKind::Group | NodeKind::Component | NodeKind::Instance
        )
    }

    /// Component definitions and their instances
    pub fn is_componentish(self) -> bool {
        matches!(self, NodeKind::Component | NodeKind::Instance)
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(NodeKind::from_tag(&tag))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Frame => "frame",
            NodeKind::Group => "group",
            NodeKind::Component => "component",
            NodeKind::Instance => "instance",
            NodeKind::Text => "text",
            NodeKind::Page => "page",
            NodeKind::Document => "document",
            NodeKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// RGB color with channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// WCAG relative luminance
    pub fn relative_luminance(&self) -> f64 {
        fn linearize(c: f32) -> f64 {
            let c = f64::from(c.clamp(0.0, 1.0));
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG contrast ratio between two colors, always >= 1
    pub fn contrast_ratio(&self, other: &Rgb) -> f64 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

/// A single paint entry on a node's fill or stroke list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Paint {
    /// Solid color paint
    Solid {
        color: Rgb,
        #[serde(default = "default_visible")]
        visible: bool,
    },
    /// Gradient, image, video, and anything else the color rules ignore
    #[serde(other)]
    Other,
}

fn default_visible() -> bool {
    true
}

impl Paint {
    /// The color of a visible solid paint, if this is one
    pub fn visible_solid(&self) -> Option<Rgb> {
        match self {
            Paint::Solid { color, visible } if *visible => Some(*color),
            _ => None,
        }
    }
}

/// Node geometry in layout units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Auto-layout padding, present only when the container uses an automatic
/// layout mode
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Read-only capability surface over a host-owned document node
pub trait DesignNode {
    /// Opaque stable identifier
    fn id(&self) -> &str;

    /// Layer name as shown to the designer
    fn name(&self) -> &str;

    /// Node kind
    fn kind(&self) -> NodeKind;

    /// Geometry, when the node exposes one
    fn bounds(&self) -> Option<Rect>;

    /// Fill paints, in paint order
    fn fills(&self) -> &[Paint];

    /// Stroke paints, in paint order
    fn strokes(&self) -> &[Paint];

    /// Font family, for text nodes that have one resolved
    fn font_family(&self) -> Option<&str> {
        None
    }

    /// Assigned text style id, for text nodes
    fn text_style_id(&self) -> Option<&str> {
        None
    }

    /// Auto-layout padding, when the container uses one
    fn padding(&self) -> Option<Padding> {
        None
    }

    /// Child nodes in document order (empty for leaves)
    fn children(&self) -> Vec<&dyn DesignNode>;
}
