//! Validation issue model.

use serde::{Deserialize, Serialize};

use appforge_schema::AppSchema;

/// How bad a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One finding from a validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Structural location, e.g. `entities[2].fields[0].type`.
    pub path: String,
    pub message: String,
    /// Whether the repaired schema already reflects the fix.
    pub auto_fixed: bool,
}

impl ValidationIssue {
    /// A finding that was repaired in place.
    pub fn fixed(
        severity: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            path: path.into(),
            message: message.into(),
            auto_fixed: true,
        }
    }

    /// A finding left for the caller.
    pub fn open(
        severity: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            path: path.into(),
            message: message.into(),
            auto_fixed: false,
        }
    }
}

/// The result of running the full pass pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    /// True iff no error-severity issue was left unfixed.
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
    /// The repaired schema.  The caller's input is never mutated.
    pub schema: AppSchema,
}

impl ValidationOutcome {
    /// Findings at or above a severity.
    pub fn at_least(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity >= severity)
    }

    /// Whether anything was repaired.
    pub fn repaired(&self) -> bool {
        self.issues.iter().any(|i| i.auto_fixed)
    }
}
