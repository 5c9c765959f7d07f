//! Workflow engine error types.
//!
//! [`WorkflowError`] exists only at the seams: the caller-supplied
//! [`WorkflowApi`](crate::api::WorkflowApi), the integration registry, and
//! the direct-network degradation path.  Handlers convert every error into a
//! failed action outcome, so nothing in the engine panics or bubbles an
//! error past a workflow run.

/// Unified error type for the workflow engine's external seams.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    // -- Record API errors --------------------------------------------------
    /// The referenced record does not exist in the backing store.
    #[error("record not found: {entity}/{record_id}")]
    RecordNotFound { entity: String, record_id: String },

    /// The caller-supplied API reported a fault.
    #[error("workflow api error: {reason}")]
    Api { reason: String },

    // -- Action configuration errors ----------------------------------------
    /// A handler needed a config key the action does not carry.
    #[error("{action} action is missing config key `{key}`")]
    MissingConfig { action: String, key: String },

    // -- Integration errors -------------------------------------------------
    /// No provider of the requested kind is configured.
    #[error("no {provider} provider configured")]
    ProviderUnavailable { provider: String },

    /// A configured provider reported a failure.
    #[error("{provider} integration failed: {reason}")]
    Integration { provider: String, reason: String },

    // -- Network degradation ------------------------------------------------
    /// A URL in the action config does not parse.
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A direct HTTP call failed.
    #[error("http request failed: {reason}")]
    Http { reason: String },
}

impl From<reqwest::Error> for WorkflowError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http {
            reason: err.to_string(),
        }
    }
}

/// Convenience alias used throughout the workflow crate.
pub type Result<T> = std::result::Result<T, WorkflowError>;
