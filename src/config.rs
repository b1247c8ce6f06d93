//! Configuration model for the standards checker
//!
//! One [`Configuration`] value is authoritative per session. It is seeded from
//! a persisted per-document blob (or the hardcoded default), mutated through
//! [`Configuration::update`] / [`Configuration::reset`], and written back
//! after every mutation. Partial updates deep-merge: object-valued fields
//! merge key-by-key, everything else replaces wholesale.

use crate::provider::{ConfigStore, StoreError};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Store key the per-document configuration blob lives under
pub const CONFIG_STORE_KEY: &str = "designlint.config";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A compiled naming rule
///
/// Serialized as the pattern source string; flags travel inline (`(?i)`), so
/// the blob round-trips losslessly. Deserialization recompiles the pattern and
/// rejects an invalid one at the boundary instead of accepting it silently.
#[derive(Debug, Clone)]
pub struct NamePattern(Regex);

impl NamePattern {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(NamePattern)
            .map_err(|e| ConfigError::Pattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.0.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for NamePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NamePattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        NamePattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Color palette rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorRules {
    /// Allowed palette, canonical uppercase `#RRGGBB`
    pub allowed: Vec<String>,
    /// Reserved for fuzzy matching; currently unused by the match test
    pub tolerance: f32,
}

impl Default for ColorRules {
    fn default() -> Self {
        Self {
            allowed: vec![
                "#FFFFFF".to_string(),
                "#000000".to_string(),
                "#1A1A1A".to_string(),
                "#F5F5F5".to_string(),
                "#0066FF".to_string(),
                "#E53935".to_string(),
                "#43A047".to_string(),
            ],
            tolerance: 0.0,
        }
    }
}

/// Font and text-style rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypographyRules {
    /// Allowed font families, exact match
    pub allowed_fonts: Vec<String>,
    /// A text-style name must contain at least one of these
    pub style_name_contains: Vec<String>,
}

impl Default for TypographyRules {
    fn default() -> Self {
        Self {
            allowed_fonts: vec![
                "Inter".to_string(),
                "Roboto".to_string(),
                "SF Pro Display".to_string(),
                "SF Pro Text".to_string(),
            ],
            style_name_contains: vec![
                "Heading".to_string(),
                "Body".to_string(),
                "Caption".to_string(),
                "Label".to_string(),
            ],
        }
    }
}

/// Spacing-grid rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacingRules {
    /// Grid pitch in layout units, positive
    pub base_unit: f64,
    /// Allowed deviation from the grid, percent of the base unit
    pub tolerance_percent: f64,
}

impl Default for SpacingRules {
    fn default() -> Self {
        Self {
            base_unit: 8.0,
            tolerance_percent: 5.0,
        }
    }
}

/// Component usage rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentRules {
    /// Frame-type tag -> required child-component name substrings. The keys
    /// double as the vocabulary frame types are derived from.
    pub required_children: BTreeMap<String, Vec<String>>,
    /// Names that must appear as a component or instance, never a raw layer
    pub must_be_instance: Vec<String>,
}

impl Default for ComponentRules {
    fn default() -> Self {
        let mut required_children = BTreeMap::new();
        required_children.insert(
            "screen".to_string(),
            vec!["Header".to_string(), "Navigation".to_string()],
        );
        required_children.insert("card".to_string(), vec!["Title".to_string()]);
        Self {
            required_children,
            must_be_instance: vec![
                "Button".to_string(),
                "Input".to_string(),
                "Checkbox".to_string(),
                "Card".to_string(),
            ],
        }
    }
}

/// Layer naming rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamingRules {
    /// Pattern for frame names
    pub frame: NamePattern,
    /// Pattern for component and instance names
    pub component: NamePattern,
    /// Pattern for every other layer
    pub layer: NamePattern,
}

impl Default for NamingRules {
    fn default() -> Self {
        // Compiled from literals, cannot fail
        Self {
            frame: NamePattern::new(r"^[A-Z][A-Za-z0-9]*( - .+)?$").unwrap(),
            component: NamePattern::new(r"^[A-Z][A-Za-z0-9 ]*(/[A-Z][A-Za-z0-9 ]*)*$").unwrap(),
            layer: NamePattern::new(r"^[a-z][a-z0-9 -]*$").unwrap(),
        }
    }
}

/// Accessibility rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessibilityRules {
    /// Minimum WCAG contrast ratio for text against its background
    pub min_contrast_ratio: f64,
    /// Minimum width/height for interactive elements, layout units
    pub interactive_element_min_size: f64,
}

impl Default for AccessibilityRules {
    fn default() -> Self {
        Self {
            min_contrast_ratio: 4.5,
            interactive_element_min_size: 44.0,
        }
    }
}

/// The full rule set for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    pub colors: ColorRules,
    pub typography: TypographyRules,
    pub spacing: SpacingRules,
    pub components: ComponentRules,
    pub naming: NamingRules,
    pub accessibility: AccessibilityRules,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            colors: ColorRules::default(),
            typography: TypographyRules::default(),
            spacing: SpacingRules::default(),
            components: ComponentRules::default(),
            naming: NamingRules::default(),
            accessibility: AccessibilityRules::default(),
        }
    }
}

impl Configuration {
    /// Load the persisted configuration for a document, if a valid blob exists
    ///
    /// Fails soft: a missing, malformed, or invalid blob logs and yields
    /// `None`, so the caller falls back to the default.
    pub fn load_from(store: &dyn ConfigStore) -> Option<Self> {
        let blob = store.get(CONFIG_STORE_KEY)?;
        match serde_json::from_str::<Self>(&blob).map_err(ConfigError::from) {
            Ok(config) => match config.validate() {
                Ok(()) => Some(config),
                Err(e) => {
                    log::warn!("persisted configuration rejected: {}", e);
                    None
                }
            },
            Err(e) => {
                log::warn!("persisted configuration unreadable: {}", e);
                None
            }
        }
    }

    /// Persist the configuration as the document's blob
    pub fn save_to(&self, store: &mut dyn ConfigStore) -> Result<(), ConfigError> {
        let blob = serde_json::to_string(self)?;
        store.set(CONFIG_STORE_KEY, &blob)?;
        Ok(())
    }

    /// Deep-merge a partial update onto this configuration
    ///
    /// Object-valued keys merge recursively, anything else replaces. The
    /// merged value is re-validated before it is adopted; on any failure the
    /// live configuration is left untouched.
    pub fn update(&mut self, partial: &Value) -> Result<(), ConfigError> {
        let mut merged = serde_json::to_value(&*self)?;
        deep_merge(&mut merged, partial);
        let candidate: Self = serde_json::from_value(merged)?;
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    /// Replace with a fresh copy of the hardcoded default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Canonical pretty-printed JSON, same encoding the blob uses
    pub fn export_text(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the value constraints a blob or an editor could violate
    pub fn validate(&self) -> Result<(), ConfigError> {
        for hex in &self.colors.allowed {
            if !is_canonical_hex(hex) {
                return Err(ConfigError::Invalid(format!(
                    "allowed color '{}' is not canonical #RRGGBB",
                    hex
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.colors.tolerance) {
            return Err(ConfigError::Invalid(
                "color tolerance must be between 0 and 100".to_string(),
            ));
        }
        if !(self.spacing.base_unit > 0.0) {
            return Err(ConfigError::Invalid(
                "spacing baseUnit must be positive".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.spacing.tolerance_percent) {
            return Err(ConfigError::Invalid(
                "spacing tolerancePercent must be between 0 and 100".to_string(),
            ));
        }
        if self.accessibility.min_contrast_ratio < 1.0 {
            return Err(ConfigError::Invalid(
                "minContrastRatio must be at least 1".to_string(),
            ));
        }
        if self.accessibility.interactive_element_min_size < 0.0 {
            return Err(ConfigError::Invalid(
                "interactiveElementMinSize must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Recursive merge over generic JSON values: objects merge key-by-key, every
/// other value (array, string, number, pattern source) replaces outright
pub fn deep_merge(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                deep_merge(base_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}

/// Uppercase `#RRGGBB` with exactly six hex digits
fn is_canonical_hex(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}
