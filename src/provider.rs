//! Traits for the external collaborators the engine talks to
//!
//! The host document system, the per-document key-value store, and the team
//! library importer are all outside the crate; the session only sees these
//! seams.

use crate::config::Configuration;
use crate::node::{DesignNode, Rgb};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure looking something up in the host document
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Text style '{0}' could not be resolved")]
    StyleNotFound(String),

    #[error("Node '{0}' no longer exists")]
    NodeNotFound(String),

    #[error("Document provider error: {0}")]
    Provider(String),
}

/// Failure talking to the persistence store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store blob unreadable: {0}")]
    Corrupt(String),
}

/// Failure fetching a configuration from the team library
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("No team library found for handle '{0}'")]
    NotFound(String),

    #[error("Team library configuration rejected: {0}")]
    Invalid(String),

    #[error("Import failed: {0}")]
    Transport(String),
}

/// Read-only view of the host document plus the two write-backs the session
/// needs (ready-for-dev marker)
pub trait DocumentProvider {
    /// Find a node anywhere in the document
    fn node_by_id(&self, id: &str) -> Option<&dyn DesignNode>;

    /// Resolve a text style id to its display name
    fn resolve_text_style_name(&self, style_id: &str) -> Result<String, LookupError>;

    /// Nodes currently selected, in selection order
    fn selection(&self) -> Vec<&dyn DesignNode>;

    /// Background color behind a node, for contrast checks
    ///
    /// Hosts that cannot resolve the actual backdrop fall back to white.
    fn background_for(&self, _node_id: &str) -> Rgb {
        Rgb::WHITE
    }

    /// Persist the ready-for-dev flag and timestamp on a node
    fn mark_ready_for_dev(&mut self, node_id: &str, timestamp: &str) -> Result<(), LookupError>;
}

/// Per-document key-value persistence
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// External source of shared standards configurations
pub trait ImportProvider {
    /// Fetch and validate a configuration by opaque handle
    fn import_by_handle(&self, handle: &str) -> Result<Configuration, ImportError>;
}

/// In-memory store, used in tests and as a placeholder host
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON object per document, key -> blob string
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}

impl ConfigStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_entries() {
            Ok(entries) => entries.get(key).cloned(),
            Err(e) => {
                log::warn!("store file {} unreadable: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        let blob = serde_json::to_string_pretty(&entries)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, blob)?;
        Ok(())
    }
}
