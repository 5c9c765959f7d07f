//! In-memory [`WorkflowApi`] for tests and demos.
//!
//! Records live in a [`DashMap`] keyed by entity, variables in another, and
//! UI effects are appended to an ordered event log tests can inspect.
//! Concurrent writers to the same record race on whole-record replacement
//! and the last write wins; consistency across concurrent runs is the
//! backing store's concern, and this one deliberately has none.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::api::{NotificationSeverity, StoredRecord, WorkflowApi};
use crate::error::{Result, WorkflowError};

/// One UI effect a workflow produced, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum UiEvent {
    Navigated {
        page: String,
        params: Option<Value>,
    },
    Notified {
        message: String,
        severity: NotificationSeverity,
    },
    ModalOpened {
        modal: String,
        data: Option<Value>,
    },
    ModalClosed {
        modal: Option<String>,
    },
    Refreshed {
        entity: Option<String>,
    },
}

/// DashMap-backed reference implementation of [`WorkflowApi`].
#[derive(Debug, Default)]
pub struct MemoryWorkflowApi {
    records: DashMap<String, HashMap<String, Value>>,
    variables: DashMap<String, Value>,
    events: Mutex<Vec<UiEvent>>,
}

impl MemoryWorkflowApi {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record with a chosen id, for test fixtures.
    pub fn seed_record(&self, entity: &str, record_id: &str, data: Value) {
        self.records
            .entry(entity.to_string())
            .or_default()
            .insert(record_id.to_string(), data);
    }

    /// Number of records stored for an entity.
    pub fn record_count(&self, entity: &str) -> usize {
        self.records.get(entity).map(|m| m.len()).unwrap_or(0)
    }

    /// Snapshot of all records for an entity, ordered by id.
    pub fn records(&self, entity: &str) -> Vec<StoredRecord> {
        let mut out: Vec<StoredRecord> = self
            .records
            .get(entity)
            .map(|m| {
                m.iter()
                    .map(|(id, data)| StoredRecord {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    /// Read a variable without going through the async trait.
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.variables.get(name).map(|v| v.value().clone())
    }

    /// Snapshot of the UI event log, in emission order.
    pub fn events(&self) -> Vec<UiEvent> {
        self.events_guard().clone()
    }

    fn events_guard(&self) -> MutexGuard<'_, Vec<UiEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push_event(&self, event: UiEvent) {
        self.events_guard().push(event);
    }
}

#[async_trait]
impl WorkflowApi for MemoryWorkflowApi {
    async fn create_record(&self, entity: &str, data: Value) -> Result<StoredRecord> {
        let id = format!("rec-{}", Uuid::now_v7().simple());
        let mut stored = data;
        if let Value::Object(map) = &mut stored {
            map.insert("id".to_string(), Value::String(id.clone()));
        }
        self.records
            .entry(entity.to_string())
            .or_default()
            .insert(id.clone(), stored.clone());
        Ok(StoredRecord { id, data: stored })
    }

    async fn update_record(&self, entity: &str, record_id: &str, data: Value) -> Result<Value> {
        let mut table = self
            .records
            .entry(entity.to_string())
            .or_default();
        let Some(existing) = table.get_mut(record_id) else {
            return Err(WorkflowError::RecordNotFound {
                entity: entity.to_string(),
                record_id: record_id.to_string(),
            });
        };
        match (existing, data) {
            (Value::Object(current), Value::Object(patch)) => {
                for (key, value) in patch {
                    current.insert(key, value);
                }
            }
            (slot, replacement) => *slot = replacement,
        }
        Ok(table
            .get(record_id)
            .cloned()
            .unwrap_or(Value::Null))
    }

    async fn delete_record(&self, entity: &str, record_id: &str) -> Result<()> {
        if let Some(mut table) = self.records.get_mut(entity) {
            table.remove(record_id);
        }
        Ok(())
    }

    async fn get_record(&self, entity: &str, record_id: &str) -> Result<Option<Value>> {
        Ok(self
            .records
            .get(entity)
            .and_then(|m| m.get(record_id).cloned()))
    }

    async fn navigate(&self, page: &str, params: Option<Value>) -> Result<()> {
        self.push_event(UiEvent::Navigated {
            page: page.to_string(),
            params,
        });
        Ok(())
    }

    async fn show_notification(
        &self,
        message: &str,
        severity: NotificationSeverity,
    ) -> Result<()> {
        self.push_event(UiEvent::Notified {
            message: message.to_string(),
            severity,
        });
        Ok(())
    }

    async fn show_modal(&self, modal: &str, data: Option<Value>) -> Result<()> {
        self.push_event(UiEvent::ModalOpened {
            modal: modal.to_string(),
            data,
        });
        Ok(())
    }

    async fn close_modal(&self, modal: Option<&str>) -> Result<()> {
        self.push_event(UiEvent::ModalClosed {
            modal: modal.map(str::to_string),
        });
        Ok(())
    }

    async fn refresh_data(&self, entity: Option<&str>) -> Result<()> {
        self.push_event(UiEvent::Refreshed {
            entity: entity.map(str::to_string),
        });
        Ok(())
    }

    async fn set_variable(&self, name: &str, value: Value) -> Result<()> {
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    async fn get_variable(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.variables.get(name).map(|v| v.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_assigns_an_id_and_get_round_trips() {
        let api = MemoryWorkflowApi::new();
        let created = api
            .create_record("invoice", json!({ "amount": 120 }))
            .await
            .unwrap();
        assert!(created.id.starts_with("rec-"));
        assert_eq!(created.data["id"], json!(created.id));

        let fetched = api.get_record("invoice", &created.id).await.unwrap();
        assert_eq!(fetched, Some(created.data));
    }

    #[tokio::test]
    async fn update_merges_objects_and_rejects_missing_records() {
        let api = MemoryWorkflowApi::new();
        api.seed_record("job", "j1", json!({ "status": "open", "title": "Fix sink" }));

        let updated = api
            .update_record("job", "j1", json!({ "status": "done" }))
            .await
            .unwrap();
        assert_eq!(updated["status"], json!("done"));
        assert_eq!(updated["title"], json!("Fix sink"));

        let err = api
            .update_record("job", "ghost", json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("job/ghost"));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let api = MemoryWorkflowApi::new();
        api.seed_record("job", "j1", json!({}));
        api.delete_record("job", "j1").await.unwrap();
        api.delete_record("job", "j1").await.unwrap();
        assert_eq!(api.record_count("job"), 0);
    }

    #[tokio::test]
    async fn ui_events_keep_emission_order() {
        let api = MemoryWorkflowApi::new();
        api.show_notification("Saved", NotificationSeverity::Success)
            .await
            .unwrap();
        api.navigate("jobs-list", None).await.unwrap();

        let events = api.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], UiEvent::Notified { .. }));
        assert!(matches!(events[1], UiEvent::Navigated { .. }));
    }
}
