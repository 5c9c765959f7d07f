//! Schema synthesis.
//!
//! [`Synthesizer::generate`] turns a [`GenerationContext`] into a complete
//! [`AppSchema`]: entities first, then the pages, workflows, and navigation
//! derived from them, then a design system resolved from whatever signal the
//! context carries.  Generation is deterministic for a given context (ids
//! and timestamps aside) and always produces a usable app, falling back to a
//! generic item tracker when the context gives nothing to work with.

use tracing::{debug, info};

use appforge_design::{
    DesignSystem, DesignSystemId, IndustryProfile, by_intent, by_text, design_system_to_theme,
    industry_system_id, profile_for_industry, system,
};
use appforge_schema::{AppSchema, EntityDef};

use crate::entities::derive_entities;
use crate::intelligence::GenerationContext;
use crate::navigation::build_navigation;
use crate::pages::generate_pages;
use crate::revision::revise;
use crate::workflows::generate_workflows;

/// The result of a generation or revision run.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The generated (or revised) schema.
    pub schema: AppSchema,
    /// Confidence in `[0, 1]`; mirrors `schema.metadata.confidence`.
    pub confidence: f64,
    /// Next-step hints surfaced to the user.
    pub suggestions: Vec<String>,
    /// Non-fatal problems encountered while generating.
    pub warnings: Vec<String>,
}

/// Stateless schema generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer;

impl Synthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Generate a schema from scratch, or revise `ctx.existing` when the
    /// context carries one.
    pub fn generate(&self, ctx: GenerationContext) -> GenerationOutcome {
        if ctx.existing.is_some() {
            return revise(ctx);
        }

        let mut warnings = Vec::new();

        let entities = derive_entities(&ctx, &mut warnings);
        let pages = generate_pages(&entities);
        let workflows = generate_workflows(&entities);

        let industry = ctx.effective_industry().map(str::to_owned);
        let profile = profile_for_industry(industry.as_deref().unwrap_or(""));
        let features = ctx.features();
        let navigation = build_navigation(&entities, &pages, profile, &features);

        let (design, design_defaulted) = resolve_design(&ctx, industry.as_deref());
        let theme = design_system_to_theme(design, ctx.theme_mode);
        debug!(system = %design.id, defaulted = design_defaulted, "design system resolved");

        let confidence = score_confidence(&ctx, &entities, &features);
        let suggestions = build_suggestions(&entities, design_defaulted);

        let mut schema = AppSchema::new(app_name(&ctx, &entities));
        schema.description = describe(&entities, profile);
        schema.entities = entities;
        schema.pages = pages;
        schema.workflows = workflows;
        schema.navigation = navigation;
        schema.theme = theme;
        schema.settings.features = features;
        schema.metadata.confidence = confidence;
        schema.metadata.industry = industry;
        schema.metadata.source_prompt = ctx.prompt;

        info!(
            app = %schema.name,
            entities = schema.entities.len(),
            pages = schema.pages.len(),
            workflows = schema.workflows.len(),
            confidence,
            "schema synthesized"
        );

        GenerationOutcome {
            schema,
            confidence,
            suggestions,
            warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution helpers
// ---------------------------------------------------------------------------

/// Pick a design system for the context.  Industry wins, then parsed
/// keywords, then raw prompt text.  The boolean reports whether the pick
/// fell through to the default.
fn resolve_design(
    ctx: &GenerationContext,
    industry: Option<&str>,
) -> (&'static DesignSystem, bool) {
    if let Some(industry) = industry {
        return (system(industry_system_id(industry)), false);
    }
    let keywords = ctx.keywords();
    if !keywords.is_empty() {
        let id = by_intent(&keywords);
        if id != DesignSystemId::Modern {
            return (system(id), false);
        }
    }
    if let Some(prompt) = ctx.prompt.as_deref() {
        let id = by_text(prompt);
        return (system(id), id == DesignSystemId::Modern);
    }
    (system(DesignSystemId::Modern), true)
}

fn app_name(ctx: &GenerationContext, entities: &[EntityDef]) -> String {
    if let Some(name) = ctx.app_name.as_deref() {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }
    match entities.first() {
        Some(first) => format!("{} Manager", first.name),
        None => "New App".to_string(),
    }
}

fn describe(entities: &[EntityDef], profile: &IndustryProfile) -> Option<String> {
    if entities.is_empty() {
        return None;
    }
    let names: Vec<String> = entities
        .iter()
        .map(|e| e.plural_name.to_lowercase())
        .collect();
    let list = match names.len() {
        1 => names[0].clone(),
        2 => format!("{} and {}", names[0], names[1]),
        _ => format!(
            "{} and {}",
            names[..names.len() - 1].join(", "),
            names[names.len() - 1]
        ),
    };
    Some(if profile.id == "general" {
        format!("Manage {list}")
    } else {
        format!(
            "A {} app for managing {list}",
            profile.display_name.to_lowercase()
        )
    })
}

fn score_confidence(ctx: &GenerationContext, entities: &[EntityDef], features: &[String]) -> f64 {
    let mut score = 0.5;
    if ctx.intelligence.is_some() {
        score += 0.2;
    }
    score += (entities.len() as f64 * 0.05).min(0.15);
    score += (features.len() as f64 * 0.05).min(0.15);
    score.min(1.0)
}

fn build_suggestions(entities: &[EntityDef], design_defaulted: bool) -> Vec<String> {
    let mut suggestions = Vec::new();
    if entities.len() == 1 {
        suggestions.push(format!(
            "Add an entity related to {} to unlock a dashboard overview",
            entities[0].name.to_lowercase()
        ));
    }
    if !entities.iter().any(|e| e.status_field().is_some()) {
        suggestions.push("Add a status field to an entity to get a board view".to_string());
    }
    if design_defaulted {
        suggestions.push("Mention your industry to get a design tailored to it".to_string());
    }
    suggestions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
