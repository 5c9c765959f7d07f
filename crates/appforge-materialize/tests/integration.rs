//! Integration tests for the appforge-materialize crate.
//!
//! These tests run the full generate → materialize pipeline and inspect
//! the concrete component trees a renderer would receive.

use appforge_blueprint::{EntityHint, GenerationContext, IntelligenceInput, Synthesizer};
use appforge_materialize::{MaterializeOptions, Materializer, ShellKind};
use appforge_schema::{AppSchema, Behavior, PageType, Surface};

fn dental_schema() -> AppSchema {
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
//  Full pipeline
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn every_materialized_page_renders_something() {
    let schema = dental_schema();
    let app = Materializer::new().materialize(&schema, &MaterializeOptions::default());

    assert_eq!(app.pages.len(), schema.pages.len());
    for page in &app.pages {
        assert!(!page.components.is_empty(), "page {} is blank", page.id);
    }
    assert_eq!(app.entities.len(), 2);
    assert_eq!(app.workflows.len(), schema.workflows.len());
    assert_eq!(app.theme.colors.primary, "#0d9488");
    assert_eq!(app.shell, ShellKind::Sidebar);
}

#[test]
fn page_types_dispatch_to_their_builders() {
    let schema = dental_schema();
    let app = Materializer::new().materialize(&schema, &MaterializeOptions::default());

    let by_id = |id: &str| {
        app.pages
            .iter()
            .find(|p| p.id == id)
            .unwrap_or_else(|| panic!("page {id} missing"))
    };

    // Patients read as people and get cards.
    assert_eq!(by_id("patients-list").components[1].component_id, "card-list");
    // The appointment hint carries a status field, so a board exists.
    assert_eq!(
        by_id("appointment-board").components[1].component_id,
        "kanban-board"
    );
    assert_eq!(
        by_id("appointment-calendar").components[1].component_id,
        "calendar"
    );
    assert_eq!(
        by_id("settings").components[1].component_id,
        "settings-form"
    );
}

#[test]
fn dashboard_page_gets_sections_and_feed() {
    let schema = dental_schema();
    let app = Materializer::new().materialize(&schema, &MaterializeOptions::default());

    let dashboard = app
        .pages
        .iter()
        .find(|p| p.page_type == PageType::Dashboard)
        .unwrap();
    assert_eq!(dashboard.route, "/");
    assert_eq!(dashboard.components[0].component_id, "stats-grid");
    assert_eq!(
        dashboard.components.last().unwrap().component_id,
        "activity-feed"
    );
    for section in &dashboard.components {
        assert!(section.intent.is_some());
    }
}

#[test]
fn navigation_excludes_auxiliary_pages() {
    let schema = dental_schema();
    let app = Materializer::new().materialize(&schema, &MaterializeOptions::default());

    for item in &app.navigation.sidebar.items {
        assert!(!item.page.ends_with("-form"));
        assert!(!item.page.ends_with("-detail"));
    }
    assert_eq!(app.navigation.default_page, "dashboard");
}

// ═══════════════════════════════════════════════════════════════════════
//  Surface-scoped materialization
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn patient_surface_sees_only_schedulable_pages() {
    let schema = dental_schema();
    let options = MaterializeOptions {
        surface: Some(Surface::Patient),
        ..Default::default()
    };
    let app = Materializer::new().materialize(&schema, &options);

    assert!(!app.navigation.sidebar.items.is_empty());
    for item in &app.navigation.sidebar.items {
        assert!(
            item.page.starts_with("appointment"),
            "unexpected patient-surface page {}",
            item.page
        );
    }
}

#[test]
fn shell_override_wins() {
    let schema = dental_schema();
    let options = MaterializeOptions {
        shell: Some(ShellKind::Topbar),
        ..Default::default()
    };
    let app = Materializer::new().materialize(&schema, &options);
    assert_eq!(app.shell, ShellKind::Topbar);
}

// ═══════════════════════════════════════════════════════════════════════
//  Degenerate schemas
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn single_entity_app_materializes_with_home_list() {
    let outcome = Synthesizer::new().generate(GenerationContext::from_prompt("track invoices"));
    let app = Materializer::new().materialize(&outcome.schema, &MaterializeOptions::default());

    let home = app.pages.iter().find(|p| p.route == "/").unwrap();
    assert_eq!(home.page_type, PageType::List);
    assert_eq!(home.components[1].component_id, "data-table");
    assert_eq!(app.navigation.default_page, home.id);
}

#[test]
fn messaging_feature_produces_a_chat_thread_and_split_shell() {
    let ctx = GenerationContext::from_prompt("a team messaging tool").with_intelligence(
        IntelligenceInput {
            features: vec!["messaging".to_string()],
            ..Default::default()
        },
    );
    let outcome = Synthesizer::new().generate(ctx);
    let app = Materializer::new().materialize(&outcome.schema, &MaterializeOptions::default());

    let chat = app
        .pages
        .iter()
        .find(|p| p.page_type == PageType::Chat)
        .unwrap();
    assert_eq!(chat.components[1].component_id, "message-thread");
    assert_eq!(app.shell, ShellKind::Split);
}
