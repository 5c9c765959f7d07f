//! Integration tests for the appforge-workflow crate.
//!
//! Synthesized CRUD workflows run end to end against the in-memory API,
//! covering ordered side effects, error policies, conditional gates and
//! the fail-open default for broken condition expressions.

use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;
use serde_json::json;

use appforge_blueprint::crud_workflows;
use appforge_blueprint::entities::item_entity;
use appforge_schema::{
    ActionDef, ActionType, ErrorAction, OnErrorPolicy, TriggerDef, TriggerType, WorkflowDef,
};
use appforge_workflow::{
    ActionHandler, ActionOutcome, EngineConfig, ExecutionContext, IntegrationRegistry,
    MemoryWorkflowApi, UiEvent, WorkflowApi, WorkflowEngine, evaluate_condition,
};

fn workflow<'a>(workflows: &'a [WorkflowDef], id: &str) -> &'a WorkflowDef {
    workflows.iter().find(|w| w.id == id).unwrap()
}

fn gate_workflow(condition: &str) -> WorkflowDef {
    WorkflowDef::new(
        "gated",
        "Gated",
        TriggerDef::of(TriggerType::RecordCreated),
        vec![
            ActionDef::new("gate", ActionType::Conditional)
                .with_config(json!({ "condition": condition })),
            ActionDef::new("notify", ActionType::ShowNotification)
                .with_config(json!({ "message": "passed the gate" })),
        ],
    )
}

// ═══════════════════════════════════════════════════════════════════════
//  Ordered execution
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn create_workflow_persists_then_notifies_then_navigates() {
    let engine = WorkflowEngine::new();
    let api = MemoryWorkflowApi::new();
    let workflows = crud_workflows(&item_entity());

    let mut ctx = ExecutionContext::for_app("app-1")
        .with_entity("item")
        .with_form(json!({ "name": "Ladder", "description": "8ft aluminium" }));
    let run = engine
        .execute(workflow(&workflows, "item-create"), &mut ctx, &api)
        .await;

    assert!(run.success);
    assert!(!run.stopped_early);
    assert_eq!(run.action_results.len(), 3);
    assert!(run.action_results.iter().all(|r| r.success));

    assert_eq!(api.record_count("item"), 1);
    let stored = &api.records("item")[0];
    assert_eq!(stored.data["name"], json!("Ladder"));
    assert_eq!(ctx.record_id.as_deref(), Some(stored.id.as_str()));

    let events = api.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        UiEvent::Notified { message, .. } if message == "Item created"
    ));
    assert!(matches!(
        &events[1],
        UiEvent::Navigated { page, .. } if page == "items-list"
    ));
}

#[tokio::test]
async fn created_record_id_interpolates_into_later_actions() {
    let engine = WorkflowEngine::new();
    let api = MemoryWorkflowApi::new();
    let wf = WorkflowDef::new(
        "intake",
        "Intake",
        TriggerDef::of(TriggerType::FormSubmit),
        vec![
            ActionDef::new("a1", ActionType::CreateRecord).with_config(json!({
                "entity": "lead",
                "data": "{form}",
            })),
            ActionDef::new("a2", ActionType::ShowNotification).with_config(json!({
                "message": "Saved as {createdRecordId}",
            })),
        ],
    );

    let mut ctx = ExecutionContext::for_app("app-1").with_form(json!({ "name": "Dana" }));
    let run = engine.execute(&wf, &mut ctx, &api).await;

    assert!(run.success);
    let id = ctx.record_id.clone().unwrap();
    assert!(matches!(
        &api.events()[0],
        UiEvent::Notified { message, .. } if *message == format!("Saved as {id}")
    ));
}

#[tokio::test]
async fn update_then_delete_follow_the_record_through_the_context() {
    let engine = WorkflowEngine::new();
    let api = MemoryWorkflowApi::new();
    let workflows = crud_workflows(&item_entity());

    let mut ctx = ExecutionContext::for_app("app-1")
        .with_entity("item")
        .with_form(json!({ "name": "Ladder" }));
    engine
        .execute(workflow(&workflows, "item-create"), &mut ctx, &api)
        .await;

    ctx.form.insert("name".to_string(), json!("Step ladder"));
    let run = engine
        .execute(workflow(&workflows, "item-update"), &mut ctx, &api)
        .await;
    assert!(run.success);
    assert_eq!(api.records("item")[0].data["name"], json!("Step ladder"));

    let run = engine
        .execute(workflow(&workflows, "item-delete"), &mut ctx, &api)
        .await;
    assert!(run.success);
    assert!(!run.stopped_early);
    assert_eq!(run.action_results.len(), 4);
    assert_eq!(api.record_count("item"), 0);
}

// ═══════════════════════════════════════════════════════════════════════
//  Error policy
// ═══════════════════════════════════════════════════════════════════════

fn strict_workflow(on_error: Option<OnErrorPolicy>) -> WorkflowDef {
    let mut wf = WorkflowDef::new(
        "strict",
        "Strict intake",
        TriggerDef::of(TriggerType::FormSubmit),
        vec![
            ActionDef::new("check", ActionType::Validate)
                .with_config(json!({ "required": ["email"] })),
            ActionDef::new("notify", ActionType::ShowNotification)
                .with_config(json!({ "message": "intake accepted" })),
        ],
    );
    wf.on_error = on_error;
    wf
}

#[tokio::test]
async fn stop_policy_halts_at_the_failed_action() {
    let engine = WorkflowEngine::new();
    let api = MemoryWorkflowApi::new();
    let wf = strict_workflow(Some(OnErrorPolicy {
        action: ErrorAction::Stop,
        message: None,
    }));

    let mut ctx = ExecutionContext::for_app("app-1").with_form(json!({ "name": "Dana" }));
    let run = engine.execute(&wf, &mut ctx, &api).await;

    assert!(!run.success);
    assert!(run.stopped_early);
    assert_eq!(run.action_results.len(), 1);
    assert!(run.action_results[0].error.as_deref().unwrap().contains("email"));
    assert!(api.events().is_empty());
}

#[tokio::test]
async fn continue_policy_runs_the_remaining_actions() {
    let engine = WorkflowEngine::new();
    let api = MemoryWorkflowApi::new();
    let wf = strict_workflow(None);

    let mut ctx = ExecutionContext::for_app("app-1").with_form(json!({ "name": "Dana" }));
    let run = engine.execute(&wf, &mut ctx, &api).await;

    assert!(!run.success);
    assert!(!run.stopped_early);
    assert_eq!(run.action_results.len(), 2);
    assert!(run.action_results[1].success);
    assert_eq!(api.events().len(), 1);
}

// ═══════════════════════════════════════════════════════════════════════
//  Conditional gates
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn closed_condition_gate_stops_a_successful_run() {
    let engine = WorkflowEngine::new();
    let api = MemoryWorkflowApi::new();
    let wf = gate_workflow("form.tier === \"vip\"");

    let mut ctx = ExecutionContext::for_app("app-1").with_form(json!({ "tier": "standard" }));
    let run = engine.execute(&wf, &mut ctx, &api).await;

    assert!(run.success);
    assert!(run.stopped_early);
    assert_eq!(run.action_results.len(), 1);
    assert!(api.events().is_empty());
}

#[tokio::test]
async fn broken_conditions_fail_open_by_default() {
    let api = MemoryWorkflowApi::new();
    let wf = gate_workflow("?? not an expression ??");
    let mut ctx = ExecutionContext::for_app("app-1");

    let run = WorkflowEngine::new().execute(&wf, &mut ctx, &api).await;
    assert!(run.success);
    assert_eq!(run.action_results.len(), 2);
    assert_eq!(api.events().len(), 1);

    let strict = WorkflowEngine::with_config(EngineConfig::default().with_condition_default(false));
    let api = MemoryWorkflowApi::new();
    let run = strict.execute(&wf, &mut ctx, &api).await;
    assert!(run.success);
    assert!(run.stopped_early);
    assert_eq!(run.action_results.len(), 1);
    assert!(api.events().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
//  Handler registry
// ═══════════════════════════════════════════════════════════════════════

struct Recorder;

#[async_trait]
impl ActionHandler for Recorder {
    async fn execute(
        &self,
        _action: &ActionDef,
        ctx: &mut ExecutionContext,
        _api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        ctx.variables.insert("handled".to_string(), json!(true));
        ActionOutcome::ok()
    }
}

#[tokio::test]
async fn empty_engine_reports_unknown_action_types() {
    let engine = WorkflowEngine::empty(EngineConfig::default());
    let api = MemoryWorkflowApi::new();
    let wf = WorkflowDef::new(
        "orphan",
        "Orphan",
        TriggerDef::of(TriggerType::Manual),
        vec![ActionDef::new("a1", ActionType::ShowNotification)
            .with_config(json!({ "message": "hello" }))],
    );

    let mut ctx = ExecutionContext::for_app("app-1");
    let run = engine.execute(&wf, &mut ctx, &api).await;

    assert!(!run.success);
    assert!(!run.stopped_early);
    assert_eq!(
        run.action_results[0].error.as_deref(),
        Some("Unknown action type: show_notification"),
    );
    assert!(api.events().is_empty());
}

#[tokio::test]
async fn hosts_can_override_builtin_handlers() {
    let engine = WorkflowEngine::new();
    engine.register_handler(ActionType::ShowNotification, Arc::new(Recorder));
    let api = MemoryWorkflowApi::new();
    let wf = WorkflowDef::new(
        "custom",
        "Custom",
        TriggerDef::of(TriggerType::Manual),
        vec![ActionDef::new("a1", ActionType::ShowNotification)
            .with_config(json!({ "message": "ignored" }))],
    );

    let mut ctx = ExecutionContext::for_app("app-1");
    let run = engine.execute(&wf, &mut ctx, &api).await;

    assert!(run.success);
    assert_eq!(ctx.variables.get("handled"), Some(&json!(true)));
    assert!(api.events().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
//  Condition robustness
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn condition_evaluation_never_panics(expr in ".{0,40}") {
        let ctx = ExecutionContext::for_app("app-1").with_form(json!({ "status": "open" }));
        let _ = evaluate_condition(&expr, &ctx, true);
        let _ = evaluate_condition(&expr, &ctx, false);
    }

    #[test]
    fn unresolvable_comparisons_follow_the_engine_default(
        name in "[a-z]{3,10}",
        default in any::<bool>(),
    ) {
        prop_assume!(!matches!(name.as_str(), "form" | "record" | "variables"));
        let ctx = ExecutionContext::for_app("app-1");
        let expr = format!("{name} === 7");
        prop_assert_eq!(evaluate_condition(&expr, &ctx, default), default);
    }
}
