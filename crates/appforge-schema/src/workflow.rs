//! Workflow definitions.
//!
//! A [`WorkflowDef`] pairs a trigger with an ordered list of actions.  The
//! schema only declares workflows; execution lives in the workflow engine,
//! which matches runtime events against [`TriggerDef`] bindings and runs
//! each [`ActionDef`] in declared order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SchemaError;

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// Canonical trigger types.  Front-end event names are normalized to these
/// before matching (e.g. `onClick` → `ButtonClick`); see
/// [`TriggerType::from_event`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// A button component was clicked.
    #[default]
    ButtonClick,
    /// A form component was submitted.
    FormSubmit,
    /// A page finished loading.
    PageLoad,
    /// A record of the bound entity was created.
    RecordCreated,
    /// A record of the bound entity was updated.
    RecordUpdated,
    /// A record of the bound entity was deleted.
    RecordDeleted,
    /// Fired by the host on a cron schedule (see [`TriggerDef::schedule`]).
    Schedule,
    /// Explicitly invoked by the user.
    Manual,
}

impl TriggerType {
    /// Normalize a raw event name to a canonical trigger type.
    ///
    /// UI layers report events under several historical spellings; this is
    /// the single place aliases are resolved.  Unknown events return `None`
    /// and simply match no workflow.
    pub fn from_event(event: &str) -> Option<Self> {
        match event.trim().to_lowercase().as_str() {
            "button_click" | "button-click" | "onclick" | "click" => Some(Self::ButtonClick),
            "form_submit" | "form-submit" | "onsubmit" | "submit" => Some(Self::FormSubmit),
            "page_load" | "page-load" | "onload" | "load" => Some(Self::PageLoad),
            "record_created" | "record-created" | "created" => Some(Self::RecordCreated),
            "record_updated" | "record-updated" | "updated" => Some(Self::RecordUpdated),
            "record_deleted" | "record-deleted" | "deleted" => Some(Self::RecordDeleted),
            "schedule" | "scheduled" | "cron" => Some(Self::Schedule),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ButtonClick => "button_click",
            Self::FormSubmit => "form_submit",
            Self::PageLoad => "page_load",
            Self::RecordCreated => "record_created",
            Self::RecordUpdated => "record_updated",
            Self::RecordDeleted => "record_deleted",
            Self::Schedule => "schedule",
            Self::Manual => "manual",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for TriggerType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_event(s).ok_or_else(|| SchemaError::UnknownTriggerType {
            value: s.to_string(),
        })
    }
}

/// When a workflow fires, and what it is bound to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDef {
    /// Canonical trigger type.
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    /// When set, only events from this component match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// When set, only events about this entity match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Cron expression; only meaningful for `schedule` triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

impl TriggerDef {
    /// A trigger of the given type with no bindings.
    pub fn of(trigger_type: TriggerType) -> Self {
        Self {
            trigger_type,
            ..Self::default()
        }
    }

    /// Bind the trigger to a component.
    pub fn on_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Bind the trigger to an entity.
    pub fn on_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Everything a workflow action can do.  One handler is registered per
/// variant in the engine; keeping this closed makes dispatch exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    CreateRecord,
    UpdateRecord,
    DeleteRecord,
    Navigate,
    ShowNotification,
    ShowModal,
    CloseModal,
    RefreshData,
    SetVariable,
    Validate,
    Conditional,
    CallApi,
    SendEmail,
    SendSms,
    ScheduleEvent,
    CreateInvoice,
    /// `webhook` is accepted as a legacy spelling.
    #[serde(alias = "webhook")]
    TriggerWebhook,
}

impl ActionType {
    /// Every action type, in a stable order.
    pub const ALL: [ActionType; 17] = [
        ActionType::CreateRecord,
        ActionType::UpdateRecord,
        ActionType::DeleteRecord,
        ActionType::Navigate,
        ActionType::ShowNotification,
        ActionType::ShowModal,
        ActionType::CloseModal,
        ActionType::RefreshData,
        ActionType::SetVariable,
        ActionType::Validate,
        ActionType::Conditional,
        ActionType::CallApi,
        ActionType::SendEmail,
        ActionType::SendSms,
        ActionType::ScheduleEvent,
        ActionType::CreateInvoice,
        ActionType::TriggerWebhook,
    ];

    /// Canonical snake_case name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateRecord => "create_record",
            Self::UpdateRecord => "update_record",
            Self::DeleteRecord => "delete_record",
            Self::Navigate => "navigate",
            Self::ShowNotification => "show_notification",
            Self::ShowModal => "show_modal",
            Self::CloseModal => "close_modal",
            Self::RefreshData => "refresh_data",
            Self::SetVariable => "set_variable",
            Self::Validate => "validate",
            Self::Conditional => "conditional",
            Self::CallApi => "call_api",
            Self::SendEmail => "send_email",
            Self::SendSms => "send_sms",
            Self::ScheduleEvent => "schedule_event",
            Self::CreateInvoice => "create_invoice",
            Self::TriggerWebhook => "trigger_webhook",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == normalized)
            .or_else(|| (normalized == "webhook").then_some(Self::TriggerWebhook))
            .ok_or_else(|| SchemaError::UnknownActionType {
                value: s.to_string(),
            })
    }
}

/// One step of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDef {
    /// Unique id within the workflow.
    pub id: String,
    /// What the action does.
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Handler configuration; defaulted to an empty object when absent.
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl ActionDef {
    /// Create an action with an empty config.
    pub fn new(id: impl Into<String>, action_type: ActionType) -> Self {
        Self {
            id: id.into(),
            action_type,
            name: None,
            config: Map::new(),
        }
    }

    /// Attach configuration built from a JSON object literal.
    pub fn with_config(mut self, config: Value) -> Self {
        if let Value::Object(map) = config {
            self.config = map;
        }
        self
    }

    /// Read a string config key.
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(Value::as_str)
    }
}

// ---------------------------------------------------------------------------
// Error policy and workflow
// ---------------------------------------------------------------------------

/// What the engine does when an action fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorAction {
    /// Abort the workflow at the failed action.
    Stop,
    /// Record the failure and keep executing.
    #[default]
    Continue,
}

/// Per-workflow error policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnErrorPolicy {
    /// Stop or continue on action failure.
    #[serde(default)]
    pub action: ErrorAction,
    /// Optional message surfaced to the user when the policy fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A trigger plus an ordered list of actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDef {
    /// Workflow identifier (kebab slug, e.g. `customer-create`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Disabled workflows never match any event.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// When the workflow fires.
    pub trigger: TriggerDef,
    /// Ordered action list.  Validation guarantees at least one action.
    pub actions: Vec<ActionDef>,
    /// What to do when an action fails; `None` behaves like `continue`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<OnErrorPolicy>,
}

fn default_enabled() -> bool {
    true
}

impl WorkflowDef {
    /// Create an enabled workflow.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        trigger: TriggerDef,
        actions: Vec<ActionDef>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            enabled: true,
            trigger,
            actions,
            on_error: None,
        }
    }

    /// Attach an error policy.
    pub fn with_on_error(mut self, policy: OnErrorPolicy) -> Self {
        self.on_error = Some(policy);
        self
    }

    /// The effective error action (`Continue` when no policy is set).
    pub fn error_action(&self) -> ErrorAction {
        self.on_error.as_ref().map(|p| p.action).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_aliases_normalize() {
        assert_eq!(
            TriggerType::from_event("onClick"),
            Some(TriggerType::ButtonClick)
        );
        assert_eq!(
            TriggerType::from_event("form-submit"),
            Some(TriggerType::FormSubmit)
        );
        assert_eq!(TriggerType::from_event("cron"), Some(TriggerType::Schedule));
        assert_eq!(TriggerType::from_event("teleport"), None);
    }

    #[test]
    fn webhook_alias_deserializes() {
        let legacy: ActionType = serde_json::from_str("\"webhook\"").unwrap();
        assert_eq!(legacy, ActionType::TriggerWebhook);
        let canonical: ActionType = serde_json::from_str("\"trigger_webhook\"").unwrap();
        assert_eq!(canonical, ActionType::TriggerWebhook);
    }

    #[test]
    fn action_config_defaults_to_empty_object() {
        let json = r#"{"id": "a1", "type": "show_notification"}"#;
        let action: ActionDef = serde_json::from_str(json).unwrap();
        assert!(action.config.is_empty());
        assert_eq!(action.action_type, ActionType::ShowNotification);
    }

    #[test]
    fn error_action_defaults_to_continue() {
        let wf = WorkflowDef::new(
            "wf",
            "Workflow",
            TriggerDef::of(TriggerType::ButtonClick),
            vec![ActionDef::new("a1", ActionType::ShowNotification)],
        );
        assert_eq!(wf.error_action(), ErrorAction::Continue);

        let wf = wf.with_on_error(OnErrorPolicy {
            action: ErrorAction::Stop,
            message: None,
        });
        assert_eq!(wf.error_action(), ErrorAction::Stop);
    }

    #[test]
    fn action_type_round_trips_through_str() {
        for action in ActionType::ALL {
            assert_eq!(action.as_str().parse::<ActionType>().unwrap(), action);
        }
    }
}
