//! Schema validation and repair for AppForge.
//!
//! Generated and revised schemas, as well as schemas edited by hosts, pass
//! through [`validate`] before rendering.  Validation never rejects: every
//! structural defect with a defined repair is fixed on an internal copy and
//! reported as an auto-fixed [`ValidationIssue`], so the outcome always
//! carries a renderable schema.  See [`validator`] for the pass pipeline.

pub mod issue;
pub mod validator;

pub use issue::{Severity, ValidationIssue, ValidationOutcome};
pub use validator::validate;
