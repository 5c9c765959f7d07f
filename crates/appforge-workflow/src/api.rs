//! The caller-supplied API workflows act through.
//!
//! The engine never persists anything itself.  Record CRUD, navigation,
//! notifications, modals, refresh hints, and variables all go through
//! [`WorkflowApi`], implemented by the host (and by
//! [`MemoryWorkflowApi`](crate::memory::MemoryWorkflowApi) for tests and
//! demos).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationSeverity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationSeverity {
    /// Parse the loose string form used in action configs.
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "success" => Self::Success,
            "warning" | "warn" => Self::Warning,
            "error" | "danger" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// A stored record: its id plus the field data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub id: String,
    pub data: Value,
}

/// Everything a workflow action can ask the host to do.
///
/// All record operations take the entity id first.  `get_record` returns
/// `Ok(None)` for a missing record; `update_record` treats a missing record
/// as an error because the caller named a specific one.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Create a record and return it with its assigned id.
    async fn create_record(&self, entity: &str, data: Value) -> Result<StoredRecord>;

    /// Merge `data` into an existing record and return the updated data.
    async fn update_record(&self, entity: &str, record_id: &str, data: Value) -> Result<Value>;

    /// Delete a record.  Deleting a missing record is a no-op.
    async fn delete_record(&self, entity: &str, record_id: &str) -> Result<()>;

    /// Fetch a record's data, or `None` if it does not exist.
    async fn get_record(&self, entity: &str, record_id: &str) -> Result<Option<Value>>;

    /// Navigate the UI to a page, optionally with route params.
    async fn navigate(&self, page: &str, params: Option<Value>) -> Result<()>;

    /// Show a toast-style notification.
    async fn show_notification(&self, message: &str, severity: NotificationSeverity)
    -> Result<()>;

    /// Open a modal, optionally passing it data.
    async fn show_modal(&self, modal: &str, data: Option<Value>) -> Result<()>;

    /// Close a modal, or the topmost one when no id is given.
    async fn close_modal(&self, modal: Option<&str>) -> Result<()>;

    /// Ask the UI to refetch one entity's data, or everything.
    async fn refresh_data(&self, entity: Option<&str>) -> Result<()>;

    /// Store a session variable.
    async fn set_variable(&self, name: &str, value: Value) -> Result<()>;

    /// Read a session variable.
    async fn get_variable(&self, name: &str) -> Result<Option<Value>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parses_loosely() {
        assert_eq!(
            NotificationSeverity::from_config("Success"),
            NotificationSeverity::Success
        );
        assert_eq!(
            NotificationSeverity::from_config("danger"),
            NotificationSeverity::Error
        );
        assert_eq!(
            NotificationSeverity::from_config("shrug"),
            NotificationSeverity::Info
        );
    }
}
