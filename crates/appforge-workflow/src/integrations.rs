//! External provider seam.
//!
//! Email, SMS, calendar, payment, and generic REST providers are configured
//! by the host and reached through [`IntegrationRegistry`].  The engine
//! ships [`NoIntegrations`], under which every provider-backed action takes
//! its degradation path: `call_api`/`trigger_webhook` make a direct HTTP
//! call, `schedule_event`/`create_invoice` fall back to record creation, and
//! `send_email`/`send_sms` fail softly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, WorkflowError};

/// The provider categories workflow actions can delegate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Email,
    Sms,
    Calendar,
    Payment,
    Rest,
}

impl ProviderKind {
    /// Canonical snake_case name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Calendar => "calendar",
            Self::Payment => "payment",
            Self::Rest => "rest",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an integration call carries to the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationRequest {
    /// The application the workflow belongs to.
    pub app_id: String,
    /// Acting user, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Action-specific payload, already token-expanded.
    pub payload: Value,
    /// Session variables at call time.
    #[serde(default)]
    pub variables: Map<String, Value>,
}

/// What a provider reports back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntegrationOutcome {
    /// A successful call with response data.
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed call.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Host-configured provider registry.
#[async_trait]
pub trait IntegrationRegistry: Send + Sync {
    /// Whether a provider of this kind is configured.  Handlers consult
    /// this before committing to the provider path.
    fn supports(&self, provider: ProviderKind) -> bool;

    /// Execute a named provider action.
    async fn execute(
        &self,
        provider: ProviderKind,
        action: &str,
        request: IntegrationRequest,
    ) -> Result<IntegrationOutcome>;
}

/// The default registry: nothing configured, every call degrades.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIntegrations;

#[async_trait]
impl IntegrationRegistry for NoIntegrations {
    fn supports(&self, _provider: ProviderKind) -> bool {
        false
    }

    async fn execute(
        &self,
        provider: ProviderKind,
        _action: &str,
        _request: IntegrationRequest,
    ) -> Result<IntegrationOutcome> {
        Err(WorkflowError::ProviderUnavailable {
            provider: provider.to_string(),
        })
    }
}
