//! The root application schema.
//!
//! An [`AppSchema`] aggregates everything the synthesizer produces: the
//! entities, pages, workflows, navigation, theme, settings, and generation
//! metadata.  The synthesizer creates it, the validator repairs it, revision
//! operations bump its version, and the calling application layer owns it
//! from there (persistence is external).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::EntityDef;
use crate::navigation::NavigationDef;
use crate::page::PageDef;
use crate::theme::ThemeDef;
use crate::workflow::WorkflowDef;

/// Cross-cutting application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Feature flags detected or requested at generation time
    /// (e.g. `scheduling`, `invoicing`, `messaging`).
    #[serde(default)]
    pub features: Vec<String>,
    /// BCP 47 locale tag.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// ISO 4217 currency code used by currency fields.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            features: Vec::new(),
            locale: default_locale(),
            currency: default_currency(),
        }
    }
}

/// Generation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMetadata {
    /// Schema version; starts at 1 and is bumped by every revision.
    pub version: u32,
    /// Synthesizer confidence in `[0, 1]`.
    pub confidence: f64,
    /// When the schema was first generated.
    pub generated_at: DateTime<Utc>,
    /// When the schema was last modified.
    pub updated_at: DateTime<Utc>,
    /// Detected or requested industry id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// The raw utterance the schema was generated from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_prompt: Option<String>,
}

impl Default for AppMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            version: 1,
            confidence: 0.0,
            generated_at: now,
            updated_at: now,
            industry: None,
            source_prompt: None,
        }
    }
}

/// The complete generated application definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSchema {
    /// Application id.
    pub id: String,
    /// Application name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Entity definitions.
    #[serde(default)]
    pub entities: Vec<EntityDef>,
    /// Page definitions.
    #[serde(default)]
    pub pages: Vec<PageDef>,
    /// Workflow definitions.
    #[serde(default)]
    pub workflows: Vec<WorkflowDef>,
    /// Navigation.
    #[serde(default)]
    pub navigation: NavigationDef,
    /// Theme.
    #[serde(default)]
    pub theme: ThemeDef,
    /// Cross-cutting settings.
    #[serde(default)]
    pub settings: AppSettings,
    /// Generation metadata.
    #[serde(default)]
    pub metadata: AppMetadata,
}

impl AppSchema {
    /// Create an empty schema shell with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_app_id(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up an entity by id.
    pub fn entity(&self, id: &str) -> Option<&EntityDef> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Look up a page by id.
    pub fn page(&self, id: &str) -> Option<&PageDef> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// Look up a workflow by id.
    pub fn workflow(&self, id: &str) -> Option<&WorkflowDef> {
        self.workflows.iter().find(|w| w.id == id)
    }

    /// Whether any workflow is bound to the given entity.
    pub fn has_workflow_for_entity(&self, entity_id: &str) -> bool {
        self.workflows
            .iter()
            .any(|w| w.trigger.entity.as_deref() == Some(entity_id))
    }

    /// Bump the version and refresh the updated timestamp.  Called by
    /// revision operations.
    pub fn bump_version(&mut self) {
        self.metadata.version += 1;
        self.metadata.updated_at = Utc::now();
    }
}

/// Generate a fresh application id.
pub fn new_app_id() -> String {
    format!("app-{}", Uuid::now_v7().simple())
}
