//! Session layer: message protocol and stateful operations
//!
//! A [`Session`] owns the one authoritative [`Configuration`] for a document,
//! borrows the external collaborators, and turns presentation-layer requests
//! into events. Every failure path degrades to a `notify` event with the
//! configuration left unchanged; nothing here is fatal to the host.

use crate::config::Configuration;
use crate::engine::Engine;
use crate::issue::CheckResult;
use crate::provider::{ConfigStore, DocumentProvider, ImportProvider};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request from the presentation layer to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    /// Evaluate the current selection; `deep` recurses into children
    RunCheck { deep: bool },
    /// Deep-merge a partial configuration onto the live one
    UpdateConfig { partial: Value },
    /// Replace the live configuration with the hardcoded default
    ResetConfig,
    /// Fetch a shared configuration by opaque handle
    ImportFromTeamLibrary { handle: String },
    /// Export the live configuration as canonical JSON text
    ExportConfig,
    /// Navigate the host viewport to a node
    FocusNode { id: String },
    /// Full evaluation of the selection; mark the node ready on pass
    CheckReadyForDev,
}

/// Event from the engine back to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Event {
    /// Result of an evaluation
    CheckResults { result: CheckResult },
    /// The live configuration, after load or mutation
    CurrentConfig { config: Configuration },
    /// Export payload
    ExportConfigData { text: String },
    /// User-visible toast message
    Notify { message: String },
    /// Scroll-into-view effect, executed by the host
    FocusNode { id: String },
}

impl Event {
    fn notify(message: impl Into<String>) -> Self {
        Event::Notify {
            message: message.into(),
        }
    }
}

/// One evaluation session over one document
pub struct Session<'a> {
    config: Configuration,
    store: &'a mut dyn ConfigStore,
    provider: &'a mut dyn DocumentProvider,
    importer: &'a dyn ImportProvider,
}

impl<'a> Session<'a> {
    /// Open a session, seeding the configuration from the persisted blob or
    /// falling back to the default
    pub fn open(
        store: &'a mut dyn ConfigStore,
        provider: &'a mut dyn DocumentProvider,
        importer: &'a dyn ImportProvider,
    ) -> Self {
        let config = Configuration::load_from(store).unwrap_or_default();
        Self {
            config,
            store,
            provider,
            importer,
        }
    }

    /// The live configuration
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Event carrying the live configuration, sent to a freshly opened UI
    pub fn current_config_event(&self) -> Event {
        Event::CurrentConfig {
            config: self.config.clone(),
        }
    }

    /// Handle one request, producing zero or more events
    pub fn handle(&mut self, request: Request) -> Vec<Event> {
        match request {
            Request::RunCheck { deep } => self.run_check(deep),
            Request::UpdateConfig { partial } => self.update_config(&partial),
            Request::ResetConfig => self.reset_config(),
            Request::ImportFromTeamLibrary { handle } => self.import_config(&handle),
            Request::ExportConfig => self.export_config(),
            Request::FocusNode { id } => self.focus_node(&id),
            Request::CheckReadyForDev => self.check_ready_for_dev(),
        }
    }

    /// Live-selection feedback: quick single-node check of the selection
    pub fn selection_changed(&mut self) -> Vec<Event> {
        self.run_check(false)
    }

    fn run_check(&mut self, deep: bool) -> Vec<Event> {
        match self.evaluate_selection(deep) {
            Some(result) => vec![Event::CheckResults { result }],
            None => vec![Event::notify("Nothing is selected")],
        }
    }

    fn evaluate_selection(&self, deep: bool) -> Option<CheckResult> {
        let roots = self.provider.selection();
        if roots.is_empty() {
            return None;
        }
        let engine = Engine::new(&self.config, &*self.provider);
        Some(engine.evaluate_all(&roots, deep))
    }

    fn update_config(&mut self, partial: &Value) -> Vec<Event> {
        match self.config.update(partial) {
            Ok(()) => {
                let mut events = self.persist();
                events.push(Event::CurrentConfig {
                    config: self.config.clone(),
                });
                events
            }
            Err(e) => vec![Event::notify(format!("Configuration update rejected: {}", e))],
        }
    }

    fn reset_config(&mut self) -> Vec<Event> {
        self.config.reset();
        let mut events = self.persist();
        events.push(Event::CurrentConfig {
            config: self.config.clone(),
        });
        events
    }

    fn import_config(&mut self, handle: &str) -> Vec<Event> {
        match self.importer.import_by_handle(handle) {
            Ok(imported) => match imported.validate() {
                Ok(()) => {
                    self.config = imported;
                    let mut events = self.persist();
                    events.push(Event::CurrentConfig {
                        config: self.config.clone(),
                    });
                    events.push(Event::notify("Team library configuration imported"));
                    events
                }
                Err(e) => vec![Event::notify(format!(
                    "Imported configuration rejected: {}",
                    e
                ))],
            },
            Err(e) => vec![Event::notify(format!("Import failed: {}", e))],
        }
    }

    fn export_config(&self) -> Vec<Event> {
        match self.config.export_text() {
            Ok(text) => vec![Event::ExportConfigData { text }],
            Err(e) => vec![Event::notify(format!("Export failed: {}", e))],
        }
    }

    fn focus_node(&self, id: &str) -> Vec<Event> {
        if self.provider.node_by_id(id).is_some() {
            vec![Event::FocusNode { id: id.to_string() }]
        } else {
            vec![Event::notify("That layer no longer exists")]
        }
    }

    fn check_ready_for_dev(&mut self) -> Vec<Event> {
        let evaluated = {
            let roots = self.provider.selection();
            roots.first().map(|node| {
                let engine = Engine::new(&self.config, &*self.provider);
                let result = engine.evaluate(*node, true);
                (node.id().to_string(), node.name().to_string(), result)
            })
        };

        let Some((id, name, result)) = evaluated else {
            return vec![Event::notify("Select a frame to check")];
        };

        if result.passed {
            let timestamp = Utc::now().to_rfc3339();
            match self.provider.mark_ready_for_dev(&id, &timestamp) {
                Ok(()) => vec![Event::notify(format!("'{}' marked ready for dev", name))],
                Err(e) => vec![Event::notify(format!(
                    "Could not mark '{}' ready for dev: {}",
                    name, e
                ))],
            }
        } else {
            let count = result.stats.issues_found;
            vec![
                Event::CheckResults { result },
                Event::notify(format!(
                    "'{}' is not ready for dev: {} issue(s) found",
                    name, count
                )),
            ]
        }
    }

    /// Write the live configuration back to the store, degrading to a notify
    /// on failure
    fn persist(&mut self) -> Vec<Event> {
        match self.config.save_to(self.store) {
            Ok(()) => Vec::new(),
            Err(e) => {
                log::warn!("configuration persist failed: {}", e);
                vec![Event::notify(format!("Could not save configuration: {}", e))]
            }
        }
    }
}
