//! Integration tests for the appforge-validate crate.
//!
//! A synthesized schema is damaged in controlled ways, repaired, and the
//! repaired result re-validated to prove the pipeline converges in a single
//! pass.

use appforge_blueprint::{EntityHint, GenerationContext, IntelligenceInput, Synthesizer};
use appforge_schema::{
    AppSchema, Behavior, FieldDef, FieldType, NavItem, ReferenceConfig, RelationshipKind,
};
use appforge_validate::{Severity, validate};
use proptest::prelude::*;

fn clinic_schema() -> AppSchema {
    let ctx = GenerationContext::from_prompt("Run my dental clinic")
        .with_industry("dental")
        .with_intelligence(IntelligenceInput {
            entities: vec![
                EntityHint::named("Patient"),
                EntityHint {
                    name: "Appointment".to_string(),
                    fields: vec![
                        "title".to_string(),
                        "startsAt".to_string(),
                        "status".to_string(),
                    ],
                    behaviors: vec![Behavior::Schedulable],
                    icon: Some("calendar".to_string()),
                },
            ],
            features: vec!["scheduling".to_string()],
            ..Default::default()
        });
    Synthesizer::new().generate(ctx).schema
}

// ═══════════════════════════════════════════════════════════════════════
//  Generated schemas
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn fresh_generated_schema_needs_only_preview_seeding() {
    let outcome = validate(&clinic_schema());
    assert!(outcome.valid);
    for issue in &outcome.issues {
        assert_eq!(issue.severity, Severity::Info, "unexpected issue: {issue:?}");
        assert!(issue.auto_fixed);
        assert!(issue.path.ends_with("components"), "unexpected issue: {issue:?}");
    }
}

#[test]
fn default_schema_is_built_up_to_the_floor() {
    let outcome = validate(&AppSchema::default());
    assert!(outcome.valid);
    assert!(outcome.repaired());

    let schema = &outcome.schema;
    assert_eq!(schema.entities[0].id, "item");
    assert_eq!(schema.pages.iter().filter(|p| p.route == "/").count(), 1);
    assert_eq!(schema.workflows.len(), 3);
    assert!(schema.page(&schema.navigation.default_page).is_some());
    assert!(schema.theme.is_renderable());
    assert!(schema.pages.iter().all(|p| !p.components.is_empty()));
}

// ═══════════════════════════════════════════════════════════════════════
//  Targeted repairs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn dangling_navigation_is_stripped() {
    let mut schema = clinic_schema();
    schema.navigation.sidebar.items.push(NavItem {
        page: "ghost-page".to_string(),
        label: "Ghost".to_string(),
        icon: None,
        order: 99,
    });
    schema.navigation.default_page = "ghost-page".to_string();

    let outcome = validate(&schema);
    assert!(
        outcome
            .schema
            .navigation
            .sidebar
            .items
            .iter()
            .all(|i| i.page != "ghost-page")
    );
    assert!(
        outcome
            .schema
            .page(&outcome.schema.navigation.default_page)
            .is_some()
    );
}

#[test]
fn broken_theme_is_refilled_from_the_default_system() {
    let mut schema = clinic_schema();
    schema.theme.colors.primary = "teal-ish".to_string();

    let outcome = validate(&schema);
    assert_eq!(outcome.schema.theme.design_system, "modern");
    assert!(outcome.schema.theme.colors.primary.starts_with('#'));
    assert!(
        outcome
            .issues
            .iter()
            .any(|i| i.path == "theme" && i.severity == Severity::Warning)
    );
}

#[test]
fn outcome_serializes_with_js_field_names() {
    let outcome = validate(&AppSchema::default());
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["valid"], true);
    assert!(json["issues"][0]["autoFixed"].is_boolean());
    assert!(json["schema"]["entities"].is_array());
}

// ═══════════════════════════════════════════════════════════════════════
//  Convergence under arbitrary damage
// ═══════════════════════════════════════════════════════════════════════

/// Apply a bitmask of independent corruptions to a valid schema.
fn damage(schema: &mut AppSchema, mask: u32) {
    if mask & 1 != 0 {
        schema.id.clear();
    }
    if mask & 2 != 0 {
        schema.name.clear();
    }
    if mask & 4 != 0 {
        schema.metadata.confidence = 7.5;
    }
    if mask & 8 != 0
        && let Some(entity) = schema.entities.first_mut()
    {
        entity.plural_name.clear();
    }
    if mask & 16 != 0
        && let Some(entity) = schema.entities.first_mut()
    {
        entity.fields.retain(|f| f.id != "id");
    }
    if mask & 32 != 0
        && let Some(entity) = schema.entities.first_mut()
    {
        entity.fields.push(
            FieldDef::new("owner", "Owner", FieldType::Reference).with_reference(
                ReferenceConfig {
                    entity: "ghost".to_string(),
                    display_field: "name".to_string(),
                    relationship: RelationshipKind::ManyToOne,
                },
            ),
        );
    }
    if mask & 64 != 0 {
        for page in &mut schema.pages {
            if page.route == "/" {
                page.route = "/misplaced".to_string();
            }
        }
    }
    if mask & 128 != 0 {
        schema.navigation.default_page = "nowhere".to_string();
    }
    if mask & 256 != 0 {
        schema.theme.colors.primary = "blue".to_string();
    }
    if mask & 512 != 0 {
        schema.workflows.clear();
    }
    if mask & 1024 != 0 {
        schema.navigation.sidebar.items.push(NavItem {
            page: "ghost-page".to_string(),
            label: "Ghost".to_string(),
            icon: None,
            order: 99,
        });
    }
    if mask & 2048 != 0 {
        schema.entities.clear();
    }
}

proptest! {
    #[test]
    fn repair_converges_in_one_pass(mask in 0u32..4096) {
        let mut schema = clinic_schema();
        damage(&mut schema, mask);

        let outcome = validate(&schema);
        prop_assert!(outcome.valid);
        prop_assert!(!outcome.schema.entities.is_empty());
        prop_assert!(!outcome.schema.pages.is_empty());
        prop_assert!(!outcome.schema.workflows.is_empty());
        prop_assert!(
            outcome
                .schema
                .page(&outcome.schema.navigation.default_page)
                .is_some()
        );
        for entity in &outcome.schema.entities {
            prop_assert!(entity.field("id").is_some());
        }

        let again = validate(&outcome.schema);
        prop_assert!(
            !again.repaired(),
            "second pass still fixed: {:?}",
            again.issues
        );
    }
}
