//! Trigger matching and async workflow execution for AppForge.
//!
//! The [`WorkflowEngine`] is a stateless dispatcher: it matches UI events
//! against workflow triggers and runs each workflow's actions in declared
//! order.  All side effects go through a caller-supplied [`WorkflowApi`]
//! (record CRUD, navigation, notifications, variables) and an optional
//! [`IntegrationRegistry`] for outbound providers; the engine itself never
//! persists anything.  Handlers are registered per [`ActionType`] and any
//! of them can be replaced by the host.
//!
//! [`ActionType`]: appforge_schema::ActionType

pub mod api;
pub mod condition;
pub mod context;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod integrations;
pub mod memory;

pub use api::{NotificationSeverity, StoredRecord, WorkflowApi};
pub use condition::evaluate_condition;
pub use context::ExecutionContext;
pub use engine::{ActionResult, EngineConfig, WorkflowEngine, WorkflowRun};
pub use error::{Result, WorkflowError};
pub use handlers::{ActionHandler, ActionOutcome, NextAction, builtin_handlers};
pub use integrations::{
    IntegrationOutcome, IntegrationRegistry, IntegrationRequest, NoIntegrations, ProviderKind,
};
pub use memory::{MemoryWorkflowApi, UiEvent};
