//! Per-page-type component builders.
//!
//! Each builder turns one abstract [`PageDef`] into concrete component
//! trees for the renderer registry.  Builders never invent data bindings:
//! a page whose entity cannot be resolved gets an explicit empty state
//! instead of someone else's records.

use serde_json::{Map, Value, json};
use tracing::trace;

use appforge_design::IndustryProfile;
use appforge_schema::{
    ComponentDef, ComponentIntent, Emphasis, EntityDef, FieldDef, FieldType, LayoutHint, PageDef,
    PageType, SectionPriority, SectionRole, TimeScope,
};

use crate::dashboard::{DashboardSection, compose};
use crate::display::{column_format, input_kind, is_person_entity, visible_fields};

/// Build the component trees for one page.
pub fn build_components(
    page: &PageDef,
    entity: Option<&EntityDef>,
    entities: &[EntityDef],
    profile: &IndustryProfile,
) -> Vec<ComponentDef> {
    trace!(page = %page.id, kind = %page.page_type, "building components");
    match page.page_type {
        PageType::Dashboard => build_dashboard(entities, profile),
        PageType::Settings => build_settings(page),
        PageType::List => with_entity(page, entity, |e| build_list(page, e, false)),
        PageType::Table => with_entity(page, entity, |e| build_list(page, e, true)),
        PageType::Form => with_entity(page, entity, |e| build_form(page, e)),
        PageType::Detail => with_entity(page, entity, |e| build_detail(page, e)),
        PageType::Calendar => with_entity(page, entity, |e| build_calendar(page, e)),
        PageType::Kanban => with_entity(page, entity, |e| build_kanban(page, e)),
        PageType::Chat => with_entity(page, entity, |e| build_chat(page, e)),
    }
}

fn with_entity(
    page: &PageDef,
    entity: Option<&EntityDef>,
    build: impl FnOnce(&EntityDef) -> Vec<ComponentDef>,
) -> Vec<ComponentDef> {
    match entity {
        Some(entity) => build(entity),
        None => missing_entity(page),
    }
}

// ---------------------------------------------------------------------------
// Collection pages
// ---------------------------------------------------------------------------

fn build_list(page: &PageDef, entity: &EntityDef, force_table: bool) -> Vec<ComponentDef> {
    let add = json!({
        "id": format!("{}-add", entity.id),
        "label": format!("Add {}", entity.name.to_lowercase()),
        "target": format!("{}-form", entity.id),
    });
    let header = header(page, Some(add));

    let main = if !force_table && is_person_entity(entity) {
        card_list(entity)
    } else {
        data_table(page, entity)
    };

    vec![header, main]
}

fn data_table(page: &PageDef, entity: &EntityDef) -> ComponentDef {
    let columns: Vec<Value> = visible_fields(entity)
        .into_iter()
        .map(|f| column(f))
        .collect();

    component(
        format!("{}-table", entity.id),
        "data-table",
        json!({
            "entity": entity.id,
            "columns": columns,
            "paginated": page.settings.paginated,
            "pageSize": page.settings.page_size,
            "searchable": page.settings.searchable,
            "searchFields": entity.display.search_fields,
            "rowTarget": format!("{}-detail", entity.id),
        }),
    )
}

fn card_list(entity: &EntityDef) -> ComponentDef {
    let meta: Vec<&String> = entity
        .display
        .list_fields
        .iter()
        .filter(|id| **id != entity.display.title_field)
        .collect();

    component(
        format!("{}-cards", entity.id),
        "card-list",
        json!({
            "entity": entity.id,
            "titleField": entity.display.title_field,
            "metaFields": meta,
            "searchable": true,
            "cardTarget": format!("{}-detail", entity.id),
        }),
    )
}

fn column(field: &FieldDef) -> Value {
    let mut col = json!({
        "field": field.id,
        "label": field.name,
        "format": column_format(field),
    });
    // Badge columns carry their option colors so the renderer does not have
    // to chase the entity definition.
    if field.field_type == FieldType::Enum
        && let Some(options) = &field.enum_options
        && let Some(map) = col.as_object_mut()
    {
        let badges: Map<String, Value> = options
            .iter()
            .filter_map(|o| {
                o.color
                    .as_ref()
                    .map(|c| (o.value.clone(), Value::String(c.clone())))
            })
            .collect();
        map.insert("badges".to_string(), Value::Object(badges));
    }
    col
}

// ---------------------------------------------------------------------------
// Record pages
// ---------------------------------------------------------------------------

fn build_form(page: &PageDef, entity: &EntityDef) -> Vec<ComponentDef> {
    let fields: Vec<Value> = visible_fields(entity)
        .into_iter()
        .map(|f| {
            let mut input = json!({
                "field": f.id,
                "label": f.name,
                "input": input_kind(f),
                "required": f.required,
            });
            if let Some(map) = input.as_object_mut() {
                if let Some(options) = &f.enum_options {
                    let opts: Vec<Value> = options
                        .iter()
                        .map(|o| json!({ "value": o.value, "label": o.label }))
                        .collect();
                    map.insert("options".to_string(), Value::Array(opts));
                }
                if let Some(reference) = &f.reference {
                    map.insert("source".to_string(), json!(reference.entity));
                    map.insert("displayField".to_string(), json!(reference.display_field));
                }
            }
            input
        })
        .collect();

    vec![
        header(page, None),
        // The component id doubles as the form_submit trigger binding.
        component(
            format!("{}-form", entity.id),
            "form",
            json!({
                "entity": entity.id,
                "fields": fields,
                "submitLabel": format!("Save {}", entity.name.to_lowercase()),
            }),
        ),
    ]
}

fn build_detail(page: &PageDef, entity: &EntityDef) -> Vec<ComponentDef> {
    let rows: Vec<Value> = visible_fields(entity)
        .into_iter()
        .map(|f| {
            json!({
                "field": f.id,
                "label": f.name,
                "format": column_format(f),
            })
        })
        .collect();

    let mut record = component(
        format!("{}-record", entity.id),
        "record-detail",
        json!({
            "entity": entity.id,
            "titleField": entity.display.title_field,
            "fields": rows,
        }),
    );
    // Button ids double as button_click trigger bindings for the CRUD
    // workflows.
    record.children = vec![
        button(format!("{}-save-button", entity.id), "Save", "primary"),
        button(format!("{}-delete-button", entity.id), "Delete", "danger"),
    ];

    vec![header(page, None), record]
}

// ---------------------------------------------------------------------------
// Specialized views
// ---------------------------------------------------------------------------

fn build_calendar(page: &PageDef, entity: &EntityDef) -> Vec<ComponentDef> {
    let Some(date_field) = entity.date_field() else {
        return empty_state(page, "Add a date field to schedule records on a calendar.");
    };
    vec![
        header(page, None),
        component(
            format!("{}-schedule", entity.id),
            "calendar",
            json!({
                "entity": entity.id,
                "dateField": date_field.id,
                "titleField": entity.display.title_field,
            }),
        ),
    ]
}

fn build_kanban(page: &PageDef, entity: &EntityDef) -> Vec<ComponentDef> {
    let Some(status) = entity.status_field() else {
        return empty_state(page, "Add a status field to organize records on a board.");
    };
    let columns: Vec<Value> = status
        .enum_options
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|o| json!({ "value": o.value, "label": o.label, "color": o.color }))
        .collect();

    vec![
        header(page, None),
        component(
            format!("{}-columns", entity.id),
            "kanban-board",
            json!({
                "entity": entity.id,
                "statusField": status.id,
                "columns": columns,
                "cardTitleField": entity.display.title_field,
            }),
        ),
    ]
}

fn build_chat(page: &PageDef, entity: &EntityDef) -> Vec<ComponentDef> {
    let message_field = visible_fields(entity)
        .into_iter()
        .find(|f| matches!(f.field_type, FieldType::Richtext | FieldType::String))
        .map(|f| f.id.clone())
        .unwrap_or_else(|| entity.display.title_field.clone());

    vec![
        header(page, None),
        component(
            format!("{}-thread", entity.id),
            "message-thread",
            json!({
                "entity": entity.id,
                "messageField": message_field,
                "sortField": "createdAt",
            }),
        ),
    ]
}

fn build_settings(page: &PageDef) -> Vec<ComponentDef> {
    vec![
        header(page, None),
        component(
            "settings-panels",
            "settings-form",
            json!({ "sections": ["general", "appearance", "features"] }),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn build_dashboard(entities: &[EntityDef], profile: &IndustryProfile) -> Vec<ComponentDef> {
    let intent = compose(entities, profile);
    let mut components: Vec<ComponentDef> = intent.sections.iter().map(section_component).collect();
    components.push(activity_feed());
    components
}

fn section_component(section: &DashboardSection) -> ComponentDef {
    let (key, props) = match section.role {
        SectionRole::Today => (
            "stats-grid",
            json!({ "title": section.title, "metrics": section.metrics }),
        ),
        SectionRole::InProgress | SectionRole::Upcoming => (
            "action-card",
            json!({
                "title": section.title,
                "entity": section.entity,
                "list": section.list,
                "actions": section.actions,
            }),
        ),
        SectionRole::Summary => (
            "stat-row",
            json!({ "title": section.title, "metrics": section.metrics }),
        ),
        SectionRole::History => (
            "records-table",
            json!({
                "title": section.title,
                "entity": section.entity,
                "list": section.list,
            }),
        ),
    };

    let (layout_hint, emphasis) = hint_for(section.role);
    let mut node = component(format!("section-{}", section.id), key, props);
    node.intent = Some(ComponentIntent {
        role: section.role,
        priority: section.priority,
        time_scope: section.time_scope,
        layout_hint: Some(layout_hint),
        emphasis: Some(emphasis),
    });
    node
}

fn activity_feed() -> ComponentDef {
    let mut node = component(
        "activity-feed",
        "activity-feed",
        json!({ "title": "Recent activity", "limit": 20 }),
    );
    node.intent = Some(ComponentIntent {
        role: SectionRole::History,
        priority: SectionPriority::Tertiary,
        time_scope: Some(TimeScope::AllTime),
        layout_hint: Some(LayoutHint::Feed),
        emphasis: Some(Emphasis::Muted),
    });
    node
}

fn hint_for(role: SectionRole) -> (LayoutHint, Emphasis) {
    match role {
        SectionRole::Today => (LayoutHint::Grid, Emphasis::Hero),
        SectionRole::InProgress => (LayoutHint::Column, Emphasis::Standard),
        SectionRole::Upcoming => (LayoutHint::Row, Emphasis::Standard),
        SectionRole::Summary => (LayoutHint::Row, Emphasis::Muted),
        SectionRole::History => (LayoutHint::Column, Emphasis::Muted),
    }
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn header(page: &PageDef, action: Option<Value>) -> ComponentDef {
    let mut props = json!({ "title": page.name });
    if let Some(action) = action
        && let Some(map) = props.as_object_mut()
    {
        map.insert("action".to_string(), action);
    }
    component(format!("{}-header", page.id), "page-header", props)
}

fn button(id: String, label: &str, kind: &str) -> ComponentDef {
    component(id, "button", json!({ "label": label, "kind": kind }))
}

fn missing_entity(page: &PageDef) -> Vec<ComponentDef> {
    empty_state(page, "Connect this page to an entity to see data here.")
}

fn empty_state(page: &PageDef, message: &str) -> Vec<ComponentDef> {
    vec![
        header(page, None),
        component(
            format!("{}-empty", page.id),
            "empty-state",
            json!({ "message": message }),
        ),
    ]
}

fn component(id: impl Into<String>, component_id: &str, props: Value) -> ComponentDef {
    let props = match props {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    ComponentDef {
        id: id.into(),
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
    use appforge_design::profile_for_industry;
    use appforge_schema::{EnumOption, base_fields};

    fn invoice() -> EntityDef {
        let mut fields = base_fields();
        fields.insert(
            1,
            FieldDef::new("number", "Number", FieldType::String).required(),
        );
        fields.insert(
            2,
            FieldDef::new("amount", "Amount", FieldType::Currency).required(),
        );
        fields.insert(
            3,
            FieldDef::new("status", "Status", FieldType::Enum).with_options(vec![
                EnumOption::new("draft", "Draft").with_color("#94a3b8"),
                EnumOption::new("paid", "Paid").with_color("#22c55e"),
            ]),
        );
        EntityDef::new("invoice", "Invoice", fields)
    }

    fn patient() -> EntityDef {
        let mut fields = base_fields();
        fields.insert(1, FieldDef::new("name", "Name", FieldType::String).required());
        EntityDef::new("patient", "Patient", fields)
    }

    fn list_page(entity: &EntityDef) -> PageDef {
        PageDef::new(
            format!("{}s-list", entity.id),
            entity.plural_name.clone(),
            format!("/{}s", entity.id),
            PageType::List,
        )
        .with_entity(&entity.id)
    }

    #[test]
    fn transactional_entities_get_a_data_table() {
        let entity = invoice();
        let page = list_page(&entity);
        let components = build_components(&page, Some(&entity), &[entity.clone()], profile_for_industry("general"));
        assert_eq!(components[1].component_id, "data-table");
        let columns = components[1].props["columns"].as_array().unwrap();
        // Internal fields are hidden.
        assert!(columns.iter().all(|c| c["field"] != "id"));
        let status = columns.iter().find(|c| c["field"] == "status").unwrap();
        assert_eq!(status["format"], "badge");
        assert_eq!(status["badges"]["paid"], "#22c55e");
    }

    #[test]
    fn person_entities_get_cards_unless_forced_tabular() {
        let entity = patient();
        let page = list_page(&entity);
        let components = build_components(&page, Some(&entity), &[entity.clone()], profile_for_industry("medical"));
        assert_eq!(components[1].component_id, "card-list");

        let mut table = list_page(&entity);
        table.page_type = PageType::Table;
        let components = build_components(&table, Some(&entity), &[entity.clone()], profile_for_industry("medical"));
        assert_eq!(components[1].component_id, "data-table");
    }

    #[test]
    fn form_component_id_matches_the_submit_trigger() {
        let entity = invoice();
        let page = PageDef::new("invoice-form", "New Invoice", "/invoices/new", PageType::Form)
            .with_entity("invoice");
        let components = build_components(&page, Some(&entity), &[entity.clone()], profile_for_industry("general"));
        let form = components.iter().find(|c| c.component_id == "form").unwrap();
        assert_eq!(form.id, "invoice-form");
        let fields = form.props["fields"].as_array().unwrap();
        let status = fields.iter().find(|f| f["field"] == "status").unwrap();
        assert_eq!(status["input"], "select");
        assert!(status["options"].as_array().is_some());
    }

    #[test]
    fn detail_page_carries_save_and_delete_buttons() {
        let entity = invoice();
        let page = PageDef::new("invoice-detail", "Invoice Details", "/invoices/:id", PageType::Detail)
            .with_entity("invoice");
        let components = build_components(&page, Some(&entity), &[entity.clone()], profile_for_industry("general"));
        let record = components.iter().find(|c| c.component_id == "record-detail").unwrap();
        let ids: Vec<&str> = record.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["invoice-save-button", "invoice-delete-button"]);
    }

    #[test]
    fn kanban_columns_mirror_the_status_options() {
        let entity = invoice();
        let page = PageDef::new("invoice-board", "Invoice Board", "/invoices/board", PageType::Kanban)
            .with_entity("invoice");
        let components = build_components(&page, Some(&entity), &[entity.clone()], profile_for_industry("general"));
        let board = components.iter().find(|c| c.component_id == "kanban-board").unwrap();
        let columns = board.props["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0]["value"], "draft");
    }

    #[test]
    fn dashboard_always_ends_with_the_activity_feed() {
        let entities = vec![invoice(), patient()];
        let page = PageDef::new("dashboard", "Dashboard", "/", PageType::Dashboard);
        let components =
            build_components(&page, None, &entities, profile_for_industry("medical"));
        assert!(components.len() >= 2);
        assert_eq!(components.last().unwrap().component_id, "activity-feed");
        // Section components carry intent metadata for the renderer.
        assert!(components.iter().all(|c| c.intent.is_some()));
    }

    #[test]
    fn unresolved_entity_yields_an_empty_state_not_wrong_data() {
        let entity = invoice();
        let page = list_page(&entity);
        let components = build_components(&page, None, &[entity], profile_for_industry("general"));
        assert_eq!(components[1].component_id, "empty-state");
    }
}
