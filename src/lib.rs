//! Designlint - standards checker for design document trees
//!
//! Walks a design document's node tree and reports deviations from a
//! configurable style guide: color palette, typography, spacing grid,
//! component usage, naming conventions, and accessibility minimums.
//!
//! # Architecture
//!
//! ```text
//! Host/CLI -> Session -> Engine -> Checkers -> CheckResult
//! ```
//!
//! The session owns the per-document configuration (seeded from a persisted
//! blob or the defaults), the engine walks a read-only node tree and runs the
//! six category checkers per node, and the result carries structured issues
//! plus rollup statistics. Evaluation is a pure function of (tree,
//! configuration); the engine never owns nodes and holds nothing once a call
//! returns.
//!
//! # Checking a document
//!
//! ```no_run
//! use designlint::{Configuration, Engine, JsonDocument};
//! use std::path::Path;
//!
//! let doc = JsonDocument::from_path(Path::new("design.json")).unwrap();
//! let config = Configuration::default();
//! let engine = Engine::new(&config, &doc);
//! let result = engine.evaluate(&doc.root, true);
//! assert_eq!(result.passed, result.issues.is_empty());
//! ```

pub mod checks;
pub mod config;
pub mod document;
pub mod engine;
pub mod issue;
pub mod node;
pub mod output;
pub mod provider;
pub mod session;

// Re-export main types
pub use config::{ConfigError, Configuration, NamePattern, CONFIG_STORE_KEY};
pub use document::{DocumentError, JsonDocument, JsonNode};
pub use engine::Engine;
pub use issue::{Category, CheckResult, CheckStats, Issue};
pub use node::{DesignNode, NodeKind, Padding, Paint, Rect, Rgb};
pub use output::{JsonFormatter, OutputFormatter, TextFormatter};
pub use provider::{
    ConfigStore, DocumentProvider, FileStore, ImportError, ImportProvider, LookupError,
    MemoryStore, StoreError,
};
pub use session::{Event, Request, Session};
