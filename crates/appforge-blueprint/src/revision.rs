//! Schema revision.
//!
//! Revisions are narrow patches, not regenerations: the existing schema is
//! kept intact and only the requested addition is spliced in.  The request
//! is classified from the same context shape generation uses; hints beat
//! features beat prompt keywords.  Every revision bumps the schema version,
//! and a request that maps to nothing leaves the schema unchanged apart
//! from the bump so callers can still tell the revision was attempted.

use tracing::{info, warn};

use appforge_design::{by_text, design_system_to_theme, system};
use appforge_schema::{AppSchema, EntityDef, NavItem, PageDef, PageType};

use crate::entities::{entity_from_hint, feature_entity, slug};
use crate::intelligence::GenerationContext;
use crate::pages::pages_for_entity;
use crate::synthesizer::{GenerationOutcome, Synthesizer};
use crate::workflows::crud_workflows;

/// Confidence reported for every revision.  Patches are mechanical, so the
/// score reflects classification uncertainty rather than synthesis quality.
const REVISION_CONFIDENCE: f64 = 0.7;

/// What a revision request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionKind {
    AddEntity,
    AddFeature,
    ChangeDesign,
    AddPage,
    Modify,
}

/// Classify a revision request.
pub fn classify(ctx: &GenerationContext) -> RevisionKind {
    if let Some(intelligence) = &ctx.intelligence
        && !intelligence.entities.is_empty()
    {
        return RevisionKind::AddEntity;
    }
    if !ctx.features().is_empty() {
        return RevisionKind::AddFeature;
    }
    let prompt = ctx.prompt.as_deref().unwrap_or("").to_lowercase();
    if ["theme", "design", "color", "colour", "look", "style"]
        .iter()
        .any(|k| prompt.contains(k))
    {
        return RevisionKind::ChangeDesign;
    }
    if ["page", "screen", "view", "tab"]
        .iter()
        .any(|k| prompt.contains(k))
    {
        return RevisionKind::AddPage;
    }
    RevisionKind::Modify
}

/// Apply a revision to `ctx.existing`.
pub fn revise(mut ctx: GenerationContext) -> GenerationOutcome {
    let Some(mut schema) = ctx.existing.take() else {
        // Nothing to revise; treat as a fresh generation.
        return Synthesizer::new().generate(ctx);
    };

    let kind = classify(&ctx);
    let mut warnings = Vec::new();

    match kind {
        RevisionKind::AddEntity => {
            if let Some(intelligence) = &ctx.intelligence {
                for hint in &intelligence.entities {
                    let entity = entity_from_hint(hint);
                    if schema.entity(&entity.id).is_some() {
                        warnings.push(format!("entity '{}' already exists; skipped", entity.id));
                        continue;
                    }
                    attach_entity(&mut schema, entity);
                }
            }
        }
        RevisionKind::AddFeature => {
            for feature in ctx.features() {
                if schema.settings.features.contains(&feature) {
                    warnings.push(format!("feature '{feature}' is already enabled"));
                    continue;
                }
                schema.settings.features.push(feature.clone());
                if let Some(entity) = feature_entity(&feature)
                    && schema.entity(&entity.id).is_none()
                {
                    attach_entity(&mut schema, entity);
                }
            }
        }
        RevisionKind::ChangeDesign => {
            change_design(&mut schema, ctx.prompt.as_deref().unwrap_or(""), &mut warnings);
        }
        RevisionKind::AddPage => {
            add_page(&mut schema, ctx.prompt.as_deref().unwrap_or(""), &mut warnings);
        }
        RevisionKind::Modify => {
            warnings.push(
                "could not map the request to a concrete change; schema left as is".to_string(),
            );
            warn!(prompt = ctx.prompt.as_deref().unwrap_or(""), "unclassified revision");
        }
    }

    schema.bump_version();
    schema.metadata.confidence = REVISION_CONFIDENCE;

    info!(
        app = %schema.name,
        kind = ?kind,
        version = schema.metadata.version,
        warnings = warnings.len(),
        "schema revised"
    );

    GenerationOutcome {
        schema,
        confidence: REVISION_CONFIDENCE,
        suggestions: Vec::new(),
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Patch helpers
// ---------------------------------------------------------------------------

/// Splice a new entity into the schema: its pages, CRUD workflows, and
/// sidebar entries, ordered after everything except settings.
fn attach_entity(schema: &mut AppSchema, entity: EntityDef) {
    let mut order = next_page_order(schema);
    let pages = pages_for_entity(&entity, &mut order);
    let workflows = crud_workflows(&entity);

    for page in &pages {
        if page.navigation.show_in_sidebar && !page.page_type.is_auxiliary() {
            schema.navigation.sidebar.items.push(NavItem {
                page: page.id.clone(),
                label: page.name.clone(),
                icon: page.navigation.icon.clone(),
                order: page.navigation.order,
            });
        }
    }
    schema.navigation.sidebar.items.sort_by_key(|i| i.order);

    schema.entities.push(entity);
    schema.pages.extend(pages);
    schema.workflows.extend(workflows);
}

fn next_page_order(schema: &AppSchema) -> u32 {
    schema
        .pages
        .iter()
        .filter(|p| p.page_type != PageType::Settings)
        .map(|p| p.navigation.order)
        .max()
        .map_or(1, |o| o + 1)
}

fn change_design(schema: &mut AppSchema, prompt: &str, warnings: &mut Vec<String>) {
    let id = by_text(prompt);
    if schema.theme.design_system == id.as_str() {
        warnings.push(format!("already using the '{id}' design system"));
        return;
    }
    schema.theme = design_system_to_theme(system(id), schema.theme.mode);
}

fn add_page(schema: &mut AppSchema, prompt: &str, warnings: &mut Vec<String>) {
    let lower = prompt.to_lowercase();
    let target = schema
        .entities
        .iter()
        .find(|e| {
            lower.contains(&e.name.to_lowercase()) || lower.contains(&e.plural_name.to_lowercase())
        })
        .or_else(|| schema.entities.first())
        .cloned();
    let Some(entity) = target else {
        warnings.push("no entity to attach the new page to".to_string());
        return;
    };

    let id = format!("{}-table", entity.id);
    if schema.page(&id).is_some() {
        warnings.push(format!("page '{id}' already exists"));
        return;
    }

    let order = next_page_order(schema);
    let mut page = PageDef::new(
        id,
        format!("{} Table", entity.plural_name),
        format!("/{}/table", slug(&entity.plural_name)),
        PageType::Table,
    )
    .with_entity(&entity.id)
    .with_order(order);
    page.navigation.icon = Some("table".to_string());

    schema.navigation.sidebar.items.push(NavItem {
        page: page.id.clone(),
        label: page.name.clone(),
        icon: page.navigation.icon.clone(),
        order,
    });
    schema.navigation.sidebar.items.sort_by_key(|i| i.order);
    schema.pages.push(page);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
