//! Built-in action handlers.
//!
//! One handler per [`ActionType`].  Handlers never return `Err` to the
//! engine; anything that goes wrong becomes an [`ActionOutcome`] with
//! `success: false` so one bad action cannot crash a workflow run.
//! Hosts can replace any of them through
//! [`WorkflowEngine::register_handler`](crate::engine::WorkflowEngine::register_handler).

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use appforge_schema::{ActionDef, ActionType};

use crate::api::{NotificationSeverity, WorkflowApi};
use crate::condition::evaluate_condition;
use crate::context::ExecutionContext;
use crate::engine::EngineConfig;
use crate::error::{Result, WorkflowError};
use crate::integrations::{
    IntegrationOutcome, IntegrationRegistry, IntegrationRequest, ProviderKind,
};

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// What the engine should do after an action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    #[default]
    Continue,
    Stop,
}

/// Result of a single action handler invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub next_action: NextAction,
}

impl ActionOutcome {
    /// Success with no payload.
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            next_action: NextAction::Continue,
        }
    }

    /// Success carrying response data for the run log.
    pub fn ok_with(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::ok()
        }
    }

    /// Failure with a message.  The engine decides whether the run
    /// continues based on the workflow's error policy.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            next_action: NextAction::Continue,
        }
    }

    /// Successful completion that asks the engine to stop the run,
    /// e.g. a conditional gate that evaluated to false.
    pub fn stop() -> Self {
        Self {
            next_action: NextAction::Stop,
            ..Self::ok()
        }
    }
}

/// An executable workflow action.
///
/// Handlers receive the execution context mutably so side effects such as
/// a freshly created record id are visible to later actions in the same
/// run.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome;
}

/// The full built-in handler set, one entry per [`ActionType`].
///
/// `call_api` and `trigger_webhook` share one HTTP client.
pub fn builtin_handlers(config: &EngineConfig) -> Vec<(ActionType, Arc<dyn ActionHandler>)> {
    let client = Client::new();
    ActionType::ALL
        .into_iter()
        .map(|kind| {
            let handler: Arc<dyn ActionHandler> = match kind {
                ActionType::CreateRecord => Arc::new(CreateRecord),
                ActionType::UpdateRecord => Arc::new(UpdateRecord),
                ActionType::DeleteRecord => Arc::new(DeleteRecord),
                ActionType::Navigate => Arc::new(Navigate),
                ActionType::ShowNotification => Arc::new(ShowNotification),
                ActionType::ShowModal => Arc::new(ShowModal),
                ActionType::CloseModal => Arc::new(CloseModal),
                ActionType::RefreshData => Arc::new(RefreshData),
                ActionType::SetVariable => Arc::new(SetVariable),
                ActionType::Validate => Arc::new(Validate),
                ActionType::Conditional => Arc::new(Conditional {
                    fail_open: config.condition_default,
                }),
                ActionType::CallApi => Arc::new(CallApi {
                    client: client.clone(),
                }),
                ActionType::SendEmail => Arc::new(SendEmail),
                ActionType::SendSms => Arc::new(SendSms),
                ActionType::ScheduleEvent => Arc::new(ScheduleEvent),
                ActionType::CreateInvoice => Arc::new(CreateInvoice),
                ActionType::TriggerWebhook => Arc::new(TriggerWebhook {
                    client: client.clone(),
                }),
            };
            (kind, handler)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Config access
// ---------------------------------------------------------------------------

/// String config value with `{tokens}` expanded.
fn interpolated(action: &ActionDef, key: &str, ctx: &ExecutionContext) -> Option<String> {
    action.config_str(key).map(|raw| ctx.interpolate(raw))
}

fn require(action: &ActionDef, key: &str, ctx: &ExecutionContext) -> Result<String> {
    interpolated(action, key, ctx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| WorkflowError::MissingConfig {
            action: action.action_type.to_string(),
            key: key.to_string(),
        })
}

/// Arbitrary config value with tokens resolved recursively.
fn resolved(action: &ActionDef, key: &str, ctx: &ExecutionContext) -> Option<Value> {
    action.config.get(key).map(|v| ctx.resolve_value(v))
}

/// The `data` config value, defaulting to the submitted form.
fn data_or_form(action: &ActionDef, ctx: &ExecutionContext) -> Value {
    resolved(action, "data", ctx).unwrap_or_else(|| Value::Object(ctx.form.clone()))
}

/// The whole config object with tokens resolved, as an integration payload.
fn resolved_config(action: &ActionDef, ctx: &ExecutionContext) -> Value {
    ctx.resolve_value(&Value::Object(action.config.clone()))
}

/// Config `entity` falling back to the context's bound entity.
fn target_entity(action: &ActionDef, ctx: &ExecutionContext) -> Result<String> {
    interpolated(action, "entity", ctx)
        .filter(|s| !s.is_empty())
        .or_else(|| ctx.entity.clone())
        .ok_or_else(|| WorkflowError::MissingConfig {
            action: action.action_type.to_string(),
            key: "entity".to_string(),
        })
}

/// Config `recordId` falling back to the context's current record.
fn target_record_id(action: &ActionDef, ctx: &ExecutionContext) -> Result<String> {
    interpolated(action, "recordId", ctx)
        .filter(|s| !s.is_empty())
        .or_else(|| ctx.record_id.clone())
        .ok_or_else(|| WorkflowError::MissingConfig {
            action: action.action_type.to_string(),
            key: "recordId".to_string(),
        })
}

fn integration_request(action: &ActionDef, ctx: &ExecutionContext) -> IntegrationRequest {
    IntegrationRequest {
        app_id: ctx.app_id.clone(),
        user_id: ctx.user_id.clone(),
        payload: resolved_config(action, ctx),
        variables: ctx.variables.clone(),
    }
}

fn from_integration(outcome: IntegrationOutcome) -> ActionOutcome {
    if outcome.success {
        match outcome.data {
            Some(data) => ActionOutcome::ok_with(data),
            None => ActionOutcome::ok(),
        }
    } else {
        ActionOutcome::failed(
            outcome
                .error
                .unwrap_or_else(|| "integration call failed".to_string()),
        )
    }
}

fn report(result: Result<ActionOutcome>) -> ActionOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(err) => ActionOutcome::failed(err.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Record handlers
// ---------------------------------------------------------------------------

struct CreateRecord;

impl CreateRecord {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
    ) -> Result<ActionOutcome> {
        let entity = target_entity(action, ctx)?;
        let data = data_or_form(action, ctx);
        let created = api.create_record(&entity, data).await?;
        ctx.record_id = Some(created.id.clone());
        ctx.variables.insert(
            "createdRecordId".to_string(),
            Value::String(created.id.clone()),
        );
        if let Value::Object(map) = &created.data {
            ctx.record = map.clone();
        }
        Ok(ActionOutcome::ok_with(json!({
            "id": created.id,
            "data": created.data,
        })))
    }
}

#[async_trait]
impl ActionHandler for CreateRecord {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, api).await)
    }
}

struct UpdateRecord;

impl UpdateRecord {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
    ) -> Result<ActionOutcome> {
        let entity = target_entity(action, ctx)?;
        let record_id = target_record_id(action, ctx)?;
        let data = data_or_form(action, ctx);
        let updated = api.update_record(&entity, &record_id, data).await?;
        if let Value::Object(map) = &updated {
            ctx.record = map.clone();
        }
        Ok(ActionOutcome::ok_with(updated))
    }
}

#[async_trait]
impl ActionHandler for UpdateRecord {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, api).await)
    }
}

struct DeleteRecord;

impl DeleteRecord {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &ExecutionContext,
        api: &dyn WorkflowApi,
    ) -> Result<ActionOutcome> {
        let entity = target_entity(action, ctx)?;
        let record_id = target_record_id(action, ctx)?;
        api.delete_record(&entity, &record_id).await?;
        Ok(ActionOutcome::ok())
    }
}

#[async_trait]
impl ActionHandler for DeleteRecord {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, api).await)
    }
}

// ---------------------------------------------------------------------------
// UI handlers
// ---------------------------------------------------------------------------

struct Navigate;

impl Navigate {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &ExecutionContext,
        api: &dyn WorkflowApi,
    ) -> Result<ActionOutcome> {
        let page = require(action, "page", ctx)?;
        let params = resolved(action, "params", ctx);
        api.navigate(&page, params).await?;
        Ok(ActionOutcome::ok())
    }
}

#[async_trait]
impl ActionHandler for Navigate {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, api).await)
    }
}

struct ShowNotification;

impl ShowNotification {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &ExecutionContext,
        api: &dyn WorkflowApi,
    ) -> Result<ActionOutcome> {
        let message = require(action, "message", ctx)?;
        let severity = action.config_str("severity")
            .map(NotificationSeverity::from_config)
            .unwrap_or_default();
        api.show_notification(&message, severity).await?;
        Ok(ActionOutcome::ok())
    }
}

#[async_trait]
impl ActionHandler for ShowNotification {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, api).await)
    }
}

struct ShowModal;

impl ShowModal {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &ExecutionContext,
        api: &dyn WorkflowApi,
    ) -> Result<ActionOutcome> {
        // `modalId` is accepted as an alternate spelling.
        let modal = interpolated(action, "modal", ctx)
            .or_else(|| interpolated(action, "modalId", ctx))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| WorkflowError::MissingConfig {
                action: action.action_type.to_string(),
                key: "modal".to_string(),
            })?;
        let data = resolved(action, "data", ctx);
        api.show_modal(&modal, data).await?;
        Ok(ActionOutcome::ok())
    }
}

#[async_trait]
impl ActionHandler for ShowModal {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, api).await)
    }
}

struct CloseModal;

#[async_trait]
impl ActionHandler for CloseModal {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        let modal = interpolated(action, "modal", ctx)
            .or_else(|| interpolated(action, "modalId", ctx))
            .filter(|s| !s.is_empty());
        match api.close_modal(modal.as_deref()).await {
            Ok(()) => ActionOutcome::ok(),
            Err(err) => ActionOutcome::failed(err.to_string()),
        }
    }
}

struct RefreshData;

#[async_trait]
impl ActionHandler for RefreshData {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        let entity = interpolated(action, "entity", ctx)
            .filter(|s| !s.is_empty())
            .or_else(|| ctx.entity.clone());
        match api.refresh_data(entity.as_deref()).await {
            Ok(()) => ActionOutcome::ok(),
            Err(err) => ActionOutcome::failed(err.to_string()),
        }
    }
}

struct SetVariable;

impl SetVariable {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
    ) -> Result<ActionOutcome> {
        let name = require(action, "name", ctx)?;
        let value = resolved(action, "value", ctx).unwrap_or(Value::Null);
        api.set_variable(&name, value.clone()).await?;
        // Mirror into the context so later actions in this run see it.
        ctx.variables.insert(name, value);
        Ok(ActionOutcome::ok())
    }
}

#[async_trait]
impl ActionHandler for SetVariable {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, api).await)
    }
}

// ---------------------------------------------------------------------------
// Flow control handlers
// ---------------------------------------------------------------------------

struct Validate;

#[async_trait]
impl ActionHandler for Validate {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        _api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        let required = action
            .config
            .get("required")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let missing: Vec<String> = required
            .iter()
            .filter_map(Value::as_str)
            .filter(|field| match ctx.form.get(*field) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(str::to_string)
            .collect();
        if missing.is_empty() {
            ActionOutcome::ok()
        } else {
            ActionOutcome::failed(format!("Missing required fields: {}", missing.join(", ")))
        }
    }
}

struct Conditional {
    /// What an unevaluable condition counts as.
    fail_open: bool,
}

#[async_trait]
impl ActionHandler for Conditional {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        _api: &dyn WorkflowApi,
        _integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        let condition = action.config_str("condition").unwrap_or("");
        if evaluate_condition(condition, ctx, self.fail_open) {
            ActionOutcome::ok()
        } else {
            debug!(action = %action.id, "condition gate closed, stopping run");
            ActionOutcome::stop()
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound handlers
// ---------------------------------------------------------------------------

struct CallApi {
    client: Client,
}

impl CallApi {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &ExecutionContext,
        integrations: &dyn IntegrationRegistry,
    ) -> Result<ActionOutcome> {
        if integrations.supports(ProviderKind::Rest) {
            let name = action.config_str("action").unwrap_or("request");
            let outcome = integrations
                .execute(ProviderKind::Rest, name, integration_request(action, ctx))
                .await?;
            return Ok(from_integration(outcome));
        }

        let url = require(action, "url", ctx)?;
        let parsed = Url::parse(&url).map_err(|err| WorkflowError::InvalidUrl {
            url: url.clone(),
            reason: err.to_string(),
        })?;
        let method_name = action.config_str("method").unwrap_or("GET");
        let method = Method::from_bytes(method_name.to_uppercase().as_bytes()).map_err(|_| {
            WorkflowError::Http {
                reason: format!("unsupported HTTP method `{method_name}`"),
            }
        })?;

        let mut request = self.client.request(method, parsed);
        if let Some(Value::Object(headers)) = action.config.get("headers") {
            for (name, value) in headers {
                if let Some(raw) = value.as_str() {
                    request = request.header(name.as_str(), ctx.interpolate(raw));
                }
            }
        }
        if let Some(body) = resolved(action, "body", ctx) {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if status.is_success() {
            Ok(ActionOutcome::ok_with(json!({
                "status": status.as_u16(),
                "body": body,
            })))
        } else {
            Ok(ActionOutcome::failed(format!(
                "API call returned {}",
                status.as_u16(),
            )))
        }
    }
}

#[async_trait]
impl ActionHandler for CallApi {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        _api: &dyn WorkflowApi,
        integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, integrations).await)
    }
}

struct TriggerWebhook {
    client: Client,
}

impl TriggerWebhook {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &ExecutionContext,
        integrations: &dyn IntegrationRegistry,
    ) -> Result<ActionOutcome> {
        if integrations.supports(ProviderKind::Rest) {
            let outcome = integrations
                .execute(
                    ProviderKind::Rest,
                    "webhook",
                    integration_request(action, ctx),
                )
                .await?;
            return Ok(from_integration(outcome));
        }

        let url = require(action, "url", ctx)?;
        let parsed = Url::parse(&url).map_err(|err| WorkflowError::InvalidUrl {
            url: url.clone(),
            reason: err.to_string(),
        })?;
        let body = resolved(action, "payload", ctx)
            .or_else(|| resolved(action, "body", ctx))
            .unwrap_or_else(|| Value::Object(ctx.form.clone()));

        let response = self.client.post(parsed).json(&body).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(ActionOutcome::ok_with(json!({ "status": status.as_u16() })))
        } else {
            Ok(ActionOutcome::failed(format!(
                "webhook returned {}",
                status.as_u16(),
            )))
        }
    }
}

#[async_trait]
impl ActionHandler for TriggerWebhook {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        _api: &dyn WorkflowApi,
        integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, integrations).await)
    }
}

struct SendEmail;

impl SendEmail {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &ExecutionContext,
        integrations: &dyn IntegrationRegistry,
    ) -> Result<ActionOutcome> {
        if !integrations.supports(ProviderKind::Email) {
            return Err(WorkflowError::ProviderUnavailable {
                provider: ProviderKind::Email.to_string(),
            });
        }
        let outcome = integrations
            .execute(ProviderKind::Email, "send", integration_request(action, ctx))
            .await?;
        Ok(from_integration(outcome))
    }
}

#[async_trait]
impl ActionHandler for SendEmail {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        _api: &dyn WorkflowApi,
        integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, integrations).await)
    }
}

struct SendSms;

impl SendSms {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &ExecutionContext,
        integrations: &dyn IntegrationRegistry,
    ) -> Result<ActionOutcome> {
        if !integrations.supports(ProviderKind::Sms) {
            return Err(WorkflowError::ProviderUnavailable {
                provider: ProviderKind::Sms.to_string(),
            });
        }
        let outcome = integrations
            .execute(ProviderKind::Sms, "send", integration_request(action, ctx))
            .await?;
        Ok(from_integration(outcome))
    }
}

#[async_trait]
impl ActionHandler for SendSms {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        _api: &dyn WorkflowApi,
        integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, integrations).await)
    }
}

struct ScheduleEvent;

impl ScheduleEvent {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &ExecutionContext,
        api: &dyn WorkflowApi,
        integrations: &dyn IntegrationRegistry,
    ) -> Result<ActionOutcome> {
        if integrations.supports(ProviderKind::Calendar) {
            match integrations
                .execute(
                    ProviderKind::Calendar,
                    "create_event",
                    integration_request(action, ctx),
                )
                .await
            {
                Ok(outcome) if outcome.success => return Ok(from_integration(outcome)),
                Ok(_) | Err(_) => {
                    debug!("calendar provider failed, falling back to a stored record");
                }
            }
        }
        let payload = resolved(action, "data", ctx).unwrap_or_else(|| resolved_config(action, ctx));
        let record = api.create_record("event", payload).await?;
        Ok(ActionOutcome::ok_with(json!({
            "fallback": "record",
            "id": record.id,
        })))
    }
}

#[async_trait]
impl ActionHandler for ScheduleEvent {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, api, integrations).await)
    }
}

struct CreateInvoice;

impl CreateInvoice {
    async fn run(
        &self,
        action: &ActionDef,
        ctx: &ExecutionContext,
        api: &dyn WorkflowApi,
        integrations: &dyn IntegrationRegistry,
    ) -> Result<ActionOutcome> {
        if integrations.supports(ProviderKind::Payment) {
            match integrations
                .execute(
                    ProviderKind::Payment,
                    "create_invoice",
                    integration_request(action, ctx),
                )
                .await
            {
                Ok(outcome) if outcome.success => return Ok(from_integration(outcome)),
                Ok(_) | Err(_) => {
                    debug!("payment provider failed, falling back to a stored record");
                }
            }
        }
        let payload = resolved(action, "data", ctx).unwrap_or_else(|| resolved_config(action, ctx));
        let record = api.create_record("invoice", payload).await?;
        Ok(ActionOutcome::ok_with(json!({
            "fallback": "record",
            "id": record.id,
        })))
    }
}

#[async_trait]
impl ActionHandler for CreateInvoice {
    async fn execute(
        &self,
        action: &ActionDef,
        ctx: &mut ExecutionContext,
        api: &dyn WorkflowApi,
        integrations: &dyn IntegrationRegistry,
    ) -> ActionOutcome {
        report(self.run(action, ctx, api, integrations).await)
    }
}
