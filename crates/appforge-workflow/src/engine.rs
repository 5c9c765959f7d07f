//! Trigger matching and sequential action dispatch.
//!
//! The engine owns nothing but its handler table.  Records, navigation and
//! variables live behind the caller-supplied [`WorkflowApi`]; outbound
//! providers behind an [`IntegrationRegistry`].  Actions within one run are
//! awaited in declared order so later actions can read earlier side
//! effects; distinct runs share no state and may execute concurrently.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use appforge_schema::{ActionType, ErrorAction, TriggerType, WorkflowDef};

use crate::api::WorkflowApi;
use crate::context::ExecutionContext;
use crate::handlers::{ActionHandler, ActionOutcome, NextAction, builtin_handlers};
use crate::integrations::{IntegrationRegistry, NoIntegrations};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Engine-level knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// What an unevaluable `conditional` expression counts as.  Defaults to
    /// `true`: a broken condition lets the workflow proceed rather than
    /// silently swallowing the actions behind it.
    pub condition_default: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            condition_default: true,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_condition_default(mut self, value: bool) -> Self {
        self.condition_default = value;
        self
    }
}

// ---------------------------------------------------------------------------
// Run records
// ---------------------------------------------------------------------------

/// Outcome of one executed action, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub action_id: String,
    pub action_type: ActionType,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Full record of one workflow invocation.
///
/// `success` is true iff every executed action succeeded.  `stopped_early`
/// marks runs cut short by a conditional gate or a stop-on-error policy;
/// a gated run can be both successful and stopped early.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRun {
    pub run_id: Uuid,
    pub workflow_id: String,
    pub success: bool,
    pub stopped_early: bool,
    pub action_results: Vec<ActionResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Stateless action dispatcher with a replaceable handler table.
pub struct WorkflowEngine {
    config: EngineConfig,
    handlers: DashMap<ActionType, Arc<dyn ActionHandler>>,
    integrations: Arc<dyn IntegrationRegistry>,
}

impl WorkflowEngine {
    /// Engine with the built-in handler set and default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Engine with the built-in handler set and the given config.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let engine = Self::empty(config);
        for (kind, handler) in builtin_handlers(&engine.config) {
            engine.handlers.insert(kind, handler);
        }
        engine
    }

    /// Engine with no handlers at all.  Every action fails as unknown
    /// until the host registers handlers.
    #[must_use]
    pub fn empty(config: EngineConfig) -> Self {
        Self {
            config,
            handlers: DashMap::new(),
            integrations: Arc::new(NoIntegrations),
        }
    }

    /// Attach a provider registry consulted by the outbound handlers.
    #[must_use]
    pub fn with_integrations(mut self, integrations: Arc<dyn IntegrationRegistry>) -> Self {
        self.integrations = integrations;
        self
    }

    /// Register or override the handler for an action type.
    pub fn register_handler(&self, kind: ActionType, handler: Arc<dyn ActionHandler>) {
        self.handlers.insert(kind, handler);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Workflows that should fire for a UI event.
    ///
    /// `event` accepts alias spellings (`onClick`, `submit`, ...); an
    /// unrecognized event matches nothing.  A trigger binding that is set
    /// must equal the provided component/entity; an unset binding matches
    /// any.
    pub fn find_matching<'a>(
        &self,
        workflows: &'a [WorkflowDef],
        event: &str,
        component: Option<&str>,
        entity: Option<&str>,
    ) -> Vec<&'a WorkflowDef> {
        let Some(trigger_type) = TriggerType::from_event(event) else {
            return Vec::new();
        };
        workflows
            .iter()
            .filter(|workflow| workflow.enabled && workflow.trigger.trigger_type == trigger_type)
            .filter(|workflow| binding_matches(workflow.trigger.component.as_deref(), component))
            .filter(|workflow| binding_matches(workflow.trigger.entity.as_deref(), entity))
            .collect()
    }

    /// Run a workflow's actions in order against the given API.
    ///
    /// Never returns an error: unknown action types and handler failures
    /// become failed [`ActionResult`]s, and the workflow's error policy
    /// decides whether the run continues past them.
    pub async fn execute(
        &self,
        workflow: &WorkflowDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
    ) -> WorkflowRun {
        let run_id = Uuid::now_v7();
        let started_at = Utc::now();
        info!(
            run = %run_id,
            workflow = %workflow.id,
            actions = workflow.actions.len(),
            "executing workflow"
        );

        let mut action_results = Vec::with_capacity(workflow.actions.len());
        let mut success = true;
        let mut stopped_early = false;

        for action in &workflow.actions {
            // Clone the handler out so no map guard is held across an await.
            let handler = self
                .handlers
                .get(&action.action_type)
                .map(|h| h.value().clone());
            let outcome = match handler {
                Some(handler) => {
                    handler
                        .execute(action, ctx, api, self.integrations.as_ref())
                        .await
                }
                None => {
                    ActionOutcome::failed(format!("Unknown action type: {}", action.action_type))
                }
            };

            match &outcome.error {
                Some(error) => {
                    warn!(run = %run_id, action = %action.id, %error, "action failed");
                }
                None => {
                    debug!(
                        run = %run_id,
                        action = %action.id,
                        kind = %action.action_type,
                        "action completed"
                    );
                }
            }

            let failed = !outcome.success;
            let requested_stop = outcome.next_action == NextAction::Stop;
            action_results.push(ActionResult {
                action_id: action.id.clone(),
                action_type: action.action_type,
                success: outcome.success,
                data: outcome.data,
                error: outcome.error,
            });

            if failed {
                success = false;
                if workflow.error_action() == ErrorAction::Stop {
                    stopped_early = true;
                    break;
                }
            }
            if requested_stop {
                stopped_early = true;
                break;
            }
        }

        let run = WorkflowRun {
            run_id,
            workflow_id: workflow.id.clone(),
            success,
            stopped_early,
            action_results,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            run = %run_id,
            success = run.success,
            stopped_early = run.stopped_early,
            "workflow finished"
        );
        run
    }
}

impl Default for WorkflowEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn binding_matches(bound: Option<&str>, provided: Option<&str>) -> bool {
    match bound {
        None => true,
        Some(b) => provided == Some(b),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
