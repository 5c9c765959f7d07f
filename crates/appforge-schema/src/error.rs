//! Schema model error types.
//!
//! The schema crate is mostly infallible; invariant repair belongs to the
//! validator.  The only errors here come from parsing string-typed
//! discriminants at the serialization boundary.

/// Unified error type for the schema model.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A field type string did not match any known [`crate::FieldType`].
    #[error("unknown field type: {value}")]
    UnknownFieldType { value: String },

    /// A page type string did not match any known [`crate::PageType`].
    #[error("unknown page type: {value}")]
    UnknownPageType { value: String },

    /// An action type string did not match any known [`crate::ActionType`].
    #[error("unknown action type: {value}")]
    UnknownActionType { value: String },

    /// A trigger type string did not match any known [`crate::TriggerType`].
    #[error("unknown trigger type: {value}")]
    UnknownTriggerType { value: String },
}

/// Convenience alias used throughout the schema crate.
pub type Result<T> = std::result::Result<T, SchemaError>;
