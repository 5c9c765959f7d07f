//! Schema validation and repair.
//!
//! [`validate`] clones the caller's schema and runs a fixed pipeline of
//! repair passes over the copy.  Every defect with a defined repair is fixed
//! in place and reported as an auto-fixed [`ValidationIssue`]; the caller's
//! schema is never touched.  Passes are ordered so later ones can rely on
//! earlier guarantees: the entity pass runs before anything that resolves
//! entity ids, the page pass before navigation, cross-references before the
//! blank-page seeding.
//!
//! Re-validating a repaired schema reports no further fixes.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use appforge_blueprint::crud_workflows;
use appforge_blueprint::entities::{item_entity, slug, title_case};
use appforge_design::default_theme;
use appforge_schema::{
    ActionDef, ActionType, AppSchema, ComponentDef, DisplayConfig, EnumOption, FieldType, PageDef,
    PageType, TriggerType, base_fields, new_app_id, pluralize,
};

use crate::issue::{Severity, ValidationIssue, ValidationOutcome};

/// Validate a schema and repair every defect that has a defined fix.
///
/// The input is cloned up front; the repaired copy travels back in the
/// outcome.  `valid` is true when no error-severity issue was left unfixed,
/// which in practice means always, since every defined repair applies
/// automatically.
pub fn validate(schema: &AppSchema) -> ValidationOutcome {
    let mut fixed = schema.clone();
    let mut issues = Vec::new();

    check_root(&mut fixed, &mut issues);
    check_entities(&mut fixed, &mut issues);
    check_pages(&mut fixed, &mut issues);
    check_workflows(&mut fixed, &mut issues);
    check_navigation(&mut fixed, &mut issues);
    check_theme(&mut fixed, &mut issues);
    check_cross_references(&mut fixed, &mut issues);
    check_blank_pages(&mut fixed, &mut issues);

    let valid = issues
        .iter()
        .all(|i| i.severity != Severity::Error || i.auto_fixed);
    debug!(
        issues = issues.len(),
        repaired = issues.iter().filter(|i| i.auto_fixed).count(),
        valid,
        "schema validated"
    );

    ValidationOutcome {
        valid,
        issues,
        schema: fixed,
    }
}

// ---------------------------------------------------------------------------
// Pass 1: root identity
// ---------------------------------------------------------------------------

fn check_root(schema: &mut AppSchema, issues: &mut Vec<ValidationIssue>) {
    if schema.id.trim().is_empty() {
        schema.id = new_app_id();
        issues.push(ValidationIssue::fixed(
            Severity::Error,
            "id",
            "app id was missing; assigned a fresh one",
        ));
    }
    if schema.name.trim().is_empty() {
        schema.name = "Untitled App".to_string();
        issues.push(ValidationIssue::fixed(
            Severity::Warning,
            "name",
            "app name was missing; named it Untitled App",
        ));
    }
    if schema.metadata.version == 0 {
        schema.metadata.version = 1;
        issues.push(ValidationIssue::fixed(
            Severity::Info,
            "metadata.version",
            "schema version started below 1; reset to 1",
        ));
    }
    let confidence = schema.metadata.confidence;
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        schema.metadata.confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        issues.push(ValidationIssue::fixed(
            Severity::Info,
            "metadata.confidence",
            "confidence was outside [0, 1]; clamped",
        ));
    }
}

// ---------------------------------------------------------------------------
// Pass 2: entities
// ---------------------------------------------------------------------------

fn check_entities(schema: &mut AppSchema, issues: &mut Vec<ValidationIssue>) {
    if schema.entities.is_empty() {
        schema.entities.push(item_entity());
        issues.push(ValidationIssue::fixed(
            Severity::Error,
            "entities",
            "schema had no entities; added a generic Item entity",
        ));
    }

    for (i, entity) in schema.entities.iter_mut().enumerate() {
        let path = format!("entities[{i}]");

        if entity.id.trim().is_empty() {
            entity.id = fallback_slug(&entity.name, || format!("entity-{i}"));
            issues.push(ValidationIssue::fixed(
                Severity::Error,
                format!("{path}.id"),
                "entity id was missing; derived one from the name",
            ));
        }
        if entity.name.trim().is_empty() {
            entity.name = title_case(&entity.id.replace('-', " "));
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                format!("{path}.name"),
                "entity name was missing; derived from the id",
            ));
        }
        if entity.plural_name.trim().is_empty() {
            entity.plural_name = pluralize(&entity.name);
            issues.push(ValidationIssue::fixed(
                Severity::Info,
                format!("{path}.pluralName"),
                "plural name was missing; derived from the name",
            ));
        }
        if entity.fields.is_empty() {
            entity.fields = base_fields();
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                format!("{path}.fields"),
                "entity had no fields; seeded the bookkeeping fields",
            ));
        }
        if entity.ensure_id_field() {
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                format!("{path}.fields"),
                "entity was missing its id field; inserted one",
            ));
        }

        for (j, field) in entity.fields.iter_mut().enumerate() {
            let field_path = format!("{path}.fields[{j}]");
            match field.field_type {
                FieldType::Enum => {
                    if field.enum_options.as_deref().unwrap_or_default().is_empty() {
                        field.enum_options = Some(vec![
                            EnumOption::new("active", "Active"),
                            EnumOption::new("inactive", "Inactive"),
                        ]);
                        issues.push(ValidationIssue::fixed(
                            Severity::Warning,
                            field_path,
                            "enum field had no options; seeded a default pair",
                        ));
                    }
                }
                FieldType::Reference => {
                    if field.reference.is_none() {
                        field.field_type = FieldType::String;
                        issues.push(ValidationIssue::fixed(
                            Severity::Warning,
                            field_path,
                            "reference field had no target config; demoted to string",
                        ));
                    }
                }
                _ => {}
            }
        }

        if !entity.display.is_consistent_with(&entity.fields) {
            entity.display = DisplayConfig::derive(&entity.fields);
            issues.push(ValidationIssue::fixed(
                Severity::Info,
                format!("{path}.display"),
                "display config referenced unknown fields; rederived it",
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Pass 3: pages
// ---------------------------------------------------------------------------

fn check_pages(schema: &mut AppSchema, issues: &mut Vec<ValidationIssue>) {
    // The entity pass guarantees at least one entity by now.
    if schema.pages.is_empty()
        && let Some(entity) = schema.entities.first()
    {
        let plural_slug = slug(&pluralize(&entity.id));
        let page = PageDef::new(
            format!("{plural_slug}-list"),
            entity.plural_name.clone(),
            "/",
            PageType::List,
        )
        .with_entity(&entity.id);
        let message = format!("schema had no pages; added a {} list page", entity.name);
        schema.pages.push(page);
        issues.push(ValidationIssue::fixed(Severity::Error, "pages", message));
    }

    for (i, page) in schema.pages.iter_mut().enumerate() {
        let path = format!("pages[{i}]");

        if page.id.trim().is_empty() {
            page.id = fallback_slug(&page.name, || format!("page-{i}"));
            issues.push(ValidationIssue::fixed(
                Severity::Error,
                format!("{path}.id"),
                "page id was missing; derived one from the name",
            ));
        }
        if page.name.trim().is_empty() {
            page.name = title_case(&page.id.replace('-', " "));
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                format!("{path}.name"),
                "page name was missing; derived from the id",
            ));
        }
        if page.route.trim().is_empty() {
            page.route = format!("/{}", page.id);
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                format!("{path}.route"),
                "page route was missing; derived from the id",
            ));
        } else if !page.route.starts_with('/') {
            page.route = format!("/{}", page.route);
            issues.push(ValidationIssue::fixed(
                Severity::Info,
                format!("{path}.route"),
                "route did not start with a slash; prefixed it",
            ));
        }
    }

    ensure_single_home(schema, issues);
}

/// Exactly one page owns the `/` route.  With no owner the first
/// non-auxiliary page is promoted; with several, the first keeps it and the
/// rest move to `/{id}`.
fn ensure_single_home(schema: &mut AppSchema, issues: &mut Vec<ValidationIssue>) {
    let owners: Vec<usize> = schema
        .pages
        .iter()
        .enumerate()
        .filter(|(_, p)| p.route == "/")
        .map(|(i, _)| i)
        .collect();

    match owners.split_first() {
        None => {
            let promoted = schema
                .pages
                .iter()
                .position(|p| !p.page_type.is_auxiliary())
                .unwrap_or(0);
            schema.pages[promoted].route = "/".to_string();
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                format!("pages[{promoted}].route"),
                "no page owned the home route; promoted this one",
            ));
        }
        Some((_, extra)) => {
            for &i in extra {
                let id = schema.pages[i].id.clone();
                schema.pages[i].route = format!("/{id}");
                issues.push(ValidationIssue::fixed(
                    Severity::Warning,
                    format!("pages[{i}].route"),
                    "home route had multiple owners; rerouted this page",
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pass 4: workflows
// ---------------------------------------------------------------------------

fn check_workflows(schema: &mut AppSchema, issues: &mut Vec<ValidationIssue>) {
    let uncovered: Vec<_> = schema
        .entities
        .iter()
        .filter(|e| !schema.has_workflow_for_entity(&e.id))
        .cloned()
        .collect();
    for entity in &uncovered {
        schema.workflows.extend(crud_workflows(entity));
        issues.push(ValidationIssue::fixed(
            Severity::Info,
            "workflows",
            format!("entity {} had no workflows; generated its CRUD set", entity.id),
        ));
    }

    for (i, workflow) in schema.workflows.iter_mut().enumerate() {
        let path = format!("workflows[{i}]");

        if workflow.id.trim().is_empty() {
            workflow.id = fallback_slug(&workflow.name, || format!("workflow-{i}"));
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                format!("{path}.id"),
                "workflow id was missing; derived one",
            ));
        }
        if workflow.name.trim().is_empty() {
            workflow.name = title_case(&workflow.id.replace('-', " "));
            issues.push(ValidationIssue::fixed(
                Severity::Info,
                format!("{path}.name"),
                "workflow name was missing; derived from the id",
            ));
        }
        if workflow.actions.is_empty() {
            let note = format!("{} ran", workflow.name);
            workflow.actions.push(
                ActionDef::new("a1", ActionType::ShowNotification).with_config(json!({
                    "message": note,
                    "severity": "info",
                })),
            );
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                format!("{path}.actions"),
                "workflow had no actions; added a notification",
            ));
        }
        for (j, action) in workflow.actions.iter_mut().enumerate() {
            if action.id.trim().is_empty() {
                action.id = format!("a{}", j + 1);
                issues.push(ValidationIssue::fixed(
                    Severity::Warning,
                    format!("{path}.actions[{j}].id"),
                    "action id was missing; assigned one",
                ));
            }
        }

        // A schedule trigger the host cannot parse would never fire, or
        // worse, fire unpredictably.  Disable rather than guess.
        if workflow.trigger.trigger_type == TriggerType::Schedule && workflow.enabled {
            let parses = workflow
                .trigger
                .schedule
                .as_deref()
                .is_some_and(cron_parses);
            if !parses {
                workflow.enabled = false;
                warn!(workflow = %workflow.id, "unusable cron schedule, workflow disabled");
                issues.push(ValidationIssue::fixed(
                    Severity::Warning,
                    format!("{path}.trigger.schedule"),
                    "schedule trigger had no parseable cron expression; workflow disabled",
                ));
            }
        }
    }
}

/// Accepts both classic five-field cron and the six/seven-field form with a
/// leading seconds column.
fn cron_parses(expr: &str) -> bool {
    let expr = expr.trim();
    if expr.is_empty() {
        return false;
    }
    let widened;
    let candidate = if expr.split_whitespace().count() == 5 {
        widened = format!("0 {expr}");
        widened.as_str()
    } else {
        expr
    };
    cron::Schedule::from_str(candidate).is_ok()
}

// ---------------------------------------------------------------------------
// Pass 5: navigation
// ---------------------------------------------------------------------------

fn check_navigation(schema: &mut AppSchema, issues: &mut Vec<ValidationIssue>) {
    let page_ids: HashSet<String> = schema.pages.iter().map(|p| p.id.clone()).collect();

    let mut dangling = Vec::new();
    schema.navigation.sidebar.items.retain(|item| {
        let keep = page_ids.contains(&item.page);
        if !keep {
            dangling.push(item.page.clone());
        }
        keep
    });
    for page in dangling {
        issues.push(ValidationIssue::fixed(
            Severity::Warning,
            "navigation.sidebar.items",
            format!("sidebar item pointed at unknown page {page}; removed"),
        ));
    }

    let mut dead_rules = Vec::new();
    schema.navigation.rules.retain(|rule| {
        let keep = page_ids.contains(&rule.page);
        if !keep {
            dead_rules.push(rule.page.clone());
        }
        keep
    });
    for page in dead_rules {
        issues.push(ValidationIssue::fixed(
            Severity::Warning,
            "navigation.rules",
            format!("rule pointed at unknown page {page}; removed"),
        ));
    }

    let mut kept = Vec::with_capacity(schema.navigation.surfaces.len());
    for (k, mut tree) in schema.navigation.surfaces.drain(..).enumerate() {
        let before = tree.items.len();
        tree.items.retain(|item| page_ids.contains(&item.page));
        if tree.items.len() < before {
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                format!("navigation.surfaces[{k}].items"),
                format!(
                    "removed {} item(s) pointing at unknown pages",
                    before - tree.items.len()
                ),
            ));
        }
        if tree.items.is_empty() {
            issues.push(ValidationIssue::fixed(
                Severity::Info,
                format!("navigation.surfaces[{k}]"),
                format!("{} navigation had no resolvable pages; removed", tree.surface.label()),
            ));
            continue;
        }
        if let Some(default) = &tree.default_page
            && !page_ids.contains(default)
        {
            tree.default_page = tree.items.first().map(|i| i.page.clone());
            issues.push(ValidationIssue::fixed(
                Severity::Info,
                format!("navigation.surfaces[{k}].defaultPage"),
                "surface default page did not resolve; repointed at its first item",
            ));
        }
        kept.push(tree);
    }
    schema.navigation.surfaces = kept;

    if !page_ids.contains(&schema.navigation.default_page) {
        let fallback = schema
            .navigation
            .sidebar
            .items
            .first()
            .map(|i| i.page.clone())
            .or_else(|| schema.pages.first().map(|p| p.id.clone()));
        // The page pass guarantees at least one page.
        if let Some(page) = fallback {
            let message = if schema.navigation.default_page.is_empty() {
                format!("no default page was set; pointed at {page}")
            } else {
                format!("default page did not resolve; repointed at {page}")
            };
            schema.navigation.default_page = page;
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                "navigation.defaultPage",
                message,
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Pass 6: theme
// ---------------------------------------------------------------------------

fn check_theme(schema: &mut AppSchema, issues: &mut Vec<ValidationIssue>) {
    let renderable =
        schema.theme.is_renderable() && hex_color().is_match(&schema.theme.colors.primary);
    if !renderable {
        schema.theme = default_theme(schema.theme.mode);
        issues.push(ValidationIssue::fixed(
            Severity::Warning,
            "theme",
            "theme was missing or unrenderable; refilled from the default design system",
        ));
    }
}

fn hex_color() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex pattern compiles")
    })
}

// ---------------------------------------------------------------------------
// Pass 7: cross-references
// ---------------------------------------------------------------------------

fn check_cross_references(schema: &mut AppSchema, issues: &mut Vec<ValidationIssue>) {
    let entity_ids: HashSet<String> = schema.entities.iter().map(|e| e.id.clone()).collect();

    for (i, page) in schema.pages.iter_mut().enumerate() {
        if let Some(entity) = &page.entity
            && !entity_ids.contains(entity)
        {
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                format!("pages[{i}].entity"),
                format!("page referenced unknown entity {entity}; binding cleared"),
            ));
            page.entity = None;
        }
    }

    for (i, entity) in schema.entities.iter_mut().enumerate() {
        for (j, field) in entity.fields.iter_mut().enumerate() {
            if field.field_type == FieldType::Reference
                && let Some(reference) = &field.reference
                && !entity_ids.contains(&reference.entity)
            {
                issues.push(ValidationIssue::fixed(
                    Severity::Warning,
                    format!("entities[{i}].fields[{j}]"),
                    format!(
                        "reference target {} does not exist; demoted to string",
                        reference.entity
                    ),
                ));
                field.field_type = FieldType::String;
                field.reference = None;
            }
        }
    }

    for (i, workflow) in schema.workflows.iter_mut().enumerate() {
        if let Some(entity) = &workflow.trigger.entity
            && !entity_ids.contains(entity)
        {
            issues.push(ValidationIssue::fixed(
                Severity::Warning,
                format!("workflows[{i}].trigger.entity"),
                format!("trigger bound to unknown entity {entity}; binding cleared"),
            ));
            workflow.trigger.entity = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Pass 8: no blank pages
// ---------------------------------------------------------------------------

fn check_blank_pages(schema: &mut AppSchema, issues: &mut Vec<ValidationIssue>) {
    for (i, page) in schema.pages.iter_mut().enumerate() {
        if !page.components.is_empty() {
            continue;
        }
        page.components = preview_components(page);
        issues.push(ValidationIssue::fixed(
            Severity::Info,
            format!("pages[{i}].components"),
            "page had no visible content; seeded a preview layout",
        ));
    }
}

/// Minimal content for hosts that render page definitions directly.  The
/// materializer rebuilds component trees from scratch and overwrites these.
fn preview_components(page: &PageDef) -> Vec<ComponentDef> {
    let mut components = vec![
        component(
            format!("{}-header", page.id),
            "page-header",
            json!({ "title": page.name }),
        ),
        component(
            format!("{}-welcome", page.id),
            "text",
            json!({ "content": format!("Welcome to {}", page.name) }),
        ),
    ];
    if let Some(entity) = &page.entity {
        components.push(component(
            format!("{}-records", page.id),
            "record-list",
            json!({ "entity": entity }),
        ));
    }
    components
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Slugify `name`, falling back when it has no usable characters.
fn fallback_slug(name: &str, fallback: impl FnOnce() -> String) -> String {
    let derived = slug(name);
    if derived.is_empty() { fallback() } else { derived }
}

fn component(id: String, component_id: &str, props: Value) -> ComponentDef {
    let props = match props {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    ComponentDef {
        id,
        component_id: component_id.to_string(),
        props,
        children: Vec::new(),
        intent: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use appforge_schema::{EntityDef, FieldDef, ReferenceConfig, TriggerDef, WorkflowDef};

    #[test]
    fn empty_schema_repairs_to_renderable() {
        let outcome = validate(&AppSchema::default());
        assert!(outcome.valid);
        assert!(outcome.repaired());

        let schema = &outcome.schema;
        assert!(!schema.entities.is_empty());
        assert!(!schema.pages.is_empty());
        assert!(!schema.workflows.is_empty());
        assert!(schema.page(&schema.navigation.default_page).is_some());
        assert!(schema.theme.is_renderable());
        assert!(schema.entities.iter().all(|e| e.field("id").is_some()));
    }

    #[test]
    fn plural_name_derives_from_name() {
        let mut schema = AppSchema::new("Test");
        let mut entity = EntityDef::new("client", "Client", base_fields());
        entity.plural_name = String::new();
        schema.entities.push(entity);

        let outcome = validate(&schema);
        assert_eq!(outcome.schema.entities[0].plural_name, "Clients");
    }

    #[test]
    fn reference_to_missing_entity_demotes_to_string() {
        let mut schema = AppSchema::new("Test");
        let mut fields = base_fields();
        fields.push(
            FieldDef::new("owner", "Owner", FieldType::Reference).with_reference(ReferenceConfig {
                entity: "ghost".to_string(),
                display_field: "name".to_string(),
                relationship: Default::default(),
            }),
        );
        schema.entities.push(EntityDef::new("job", "Job", fields));

        let outcome = validate(&schema);
        let owner = outcome.schema.entities[0].field("owner").unwrap();
        assert_eq!(owner.field_type, FieldType::String);
        assert!(owner.reference.is_none());
        assert!(outcome.issues.iter().any(|i| {
            i.severity == Severity::Warning && i.auto_fixed && i.message.contains("ghost")
        }));
    }

    #[test]
    fn home_route_gets_exactly_one_owner() {
        let mut schema = AppSchema::new("Test");
        schema.entities.push(item_entity());
        schema
            .pages
            .push(PageDef::new("one", "One", "/", PageType::List));
        schema
            .pages
            .push(PageDef::new("two", "Two", "/", PageType::List));

        let outcome = validate(&schema);
        let homes: Vec<_> = outcome
            .schema
            .pages
            .iter()
            .filter(|p| p.route == "/")
            .collect();
        assert_eq!(homes.len(), 1);
        assert_eq!(homes[0].id, "one");
        assert_eq!(outcome.schema.page("two").unwrap().route, "/two");
    }

    #[test]
    fn unparseable_cron_disables_workflow() {
        let mut schema = AppSchema::new("Test");
        schema.entities.push(item_entity());
        let mut trigger = TriggerDef::of(TriggerType::Schedule);
        trigger.schedule = Some("every tuesday-ish".to_string());
        schema.workflows.push(WorkflowDef::new(
            "digest",
            "Digest",
            trigger,
            vec![ActionDef::new("a1", ActionType::SendEmail)],
        ));

        let outcome = validate(&schema);
        assert!(!outcome.schema.workflow("digest").unwrap().enabled);
        assert!(
            outcome
                .issues
                .iter()
                .any(|i| i.path.contains("trigger.schedule"))
        );
    }

    #[test]
    fn five_field_cron_is_accepted() {
        assert!(cron_parses("0 9 * * 1"));
        assert!(cron_parses("0 0 9 * * Mon"));
        assert!(!cron_parses("not cron"));
        assert!(!cron_parses(""));
    }

    #[test]
    fn caller_schema_is_untouched() {
        let schema = AppSchema::default();
        let before = schema.clone();
        let _ = validate(&schema);
        assert_eq!(schema, before);
    }

    #[test]
    fn revalidation_reports_no_new_fixes() {
        let outcome = validate(&AppSchema::default());
        let again = validate(&outcome.schema);
        assert!(again.valid);
        assert!(
            !again.repaired(),
            "second pass still fixed: {:?}",
            again.issues
        );
    }
}
