//! Input contracts for synthesis.
//!
//! [`IntelligenceInput`] is the payload an external NLU/voice layer
//! produces.  Every field is optional or defaulted: the synthesizer must
//! produce a usable schema from any subset, down to an empty payload, so
//! deserialization never insists on anything.

use serde::{Deserialize, Serialize};

use appforge_schema::{AppSchema, Behavior, ThemeMode};

/// Grammar-level breakdown of the user's utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedUtterance {
    /// The classified high-level intent (e.g. `create_app`).
    #[serde(default)]
    pub intent: String,
    /// Nouns extracted from the text.
    #[serde(default)]
    pub nouns: Vec<String>,
    /// Adjectives extracted from the text.
    #[serde(default)]
    pub adjectives: Vec<String>,
}

/// An entity the NLU layer believes the app needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityHint {
    /// Singular entity name (e.g. `Appointment`).
    pub name: String,
    /// Suggested field names; types are inferred from the names.
    #[serde(default)]
    pub fields: Vec<String>,
    /// Behavioral tags the NLU layer detected.
    #[serde(default)]
    pub behaviors: Vec<Behavior>,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl EntityHint {
    /// A hint with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The full payload produced by the external intelligence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceInput {
    /// Grammar-level breakdown, if the layer produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedUtterance>,
    /// Entities the layer inferred.
    #[serde(default)]
    pub entities: Vec<EntityHint>,
    /// Detected feature ids (e.g. `scheduling`, `invoicing`).
    #[serde(default)]
    pub features: Vec<String>,
    /// Detected industry id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Requested layout hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// The layer's own confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,
}

/// Everything `generate` consumes.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    /// The raw utterance, when available.
    pub prompt: Option<String>,
    /// Explicit app name override.
    pub app_name: Option<String>,
    /// Explicit industry override.  Takes precedence over the detected one.
    pub industry: Option<String>,
    /// Light or dark theme.
    pub theme_mode: ThemeMode,
    /// NLU payload, when available.
    pub intelligence: Option<IntelligenceInput>,
    /// When set, synthesis runs in revision mode and patches this schema.
    pub existing: Option<AppSchema>,
}

impl GenerationContext {
    /// Context seeded from a raw utterance.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    /// Set the app name.
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Set the industry.
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Attach an NLU payload.
    pub fn with_intelligence(mut self, intelligence: IntelligenceInput) -> Self {
        self.intelligence = Some(intelligence);
        self
    }

    /// Set the theme mode.
    pub fn with_theme_mode(mut self, mode: ThemeMode) -> Self {
        self.theme_mode = mode;
        self
    }

    /// Switch to revision mode against an existing schema.
    pub fn revising(mut self, existing: AppSchema) -> Self {
        self.existing = Some(existing);
        self
    }

    /// The industry to use: explicit override first, then the detected one.
    pub fn effective_industry(&self) -> Option<&str> {
        self.industry
            .as_deref()
            .or_else(|| self.intelligence.as_ref()?.industry.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Keyword candidates for design system matching (nouns + adjectives).
    pub fn keywords(&self) -> Vec<&str> {
        let Some(parsed) = self.intelligence.as_ref().and_then(|i| i.parsed.as_ref()) else {
            return Vec::new();
        };
        parsed
            .nouns
            .iter()
            .chain(parsed.adjectives.iter())
            .map(String::as_str)
            .collect()
    }

    /// Detected features, trimmed and lowercased.
    pub fn features(&self) -> Vec<String> {
        self.intelligence
            .as_ref()
            .map(|i| {
                i.features
                    .iter()
                    .map(|f| f.trim().to_lowercase())
                    .filter(|f| !f.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
