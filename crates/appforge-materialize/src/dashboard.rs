//! Dashboard intent composition.
//!
//! A dashboard is composed as a narrative, not a grid of widgets: first what
//! is happening *now*, then the work to act on, then the surrounding
//! context.  [`compose`] builds that narrative from the app's entities and
//! [`normalize`] enforces the canonical shape on any intent, composed or
//! supplied by a caller:
//!
//! - sections ordered by role (today, in-progress, upcoming, summary,
//!   history), then by priority;
//! - `summary` never first while a non-summary section exists;
//! - non-actionable roles carry no actions;
//! - at most two `primary` sections, extras demoted to `secondary`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use appforge_design::IndustryProfile;
use appforge_schema::{
    Behavior, EntityDef, FieldDef, FieldType, SectionPriority, SectionRole, TimeScope,
};

// ---------------------------------------------------------------------------
// Intent model
// ---------------------------------------------------------------------------

/// How a metric aggregates records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricAggregate {
    Count,
    Sum,
    Average,
}

/// One KPI cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSpec {
    pub id: String,
    pub label: String,
    /// Entity the metric aggregates over.
    pub entity: String,
    pub aggregate: MetricAggregate,
    /// Field to aggregate; `None` for counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Window the aggregation is scoped to.
    pub time_scope: TimeScope,
}

/// A record-list binding carried by a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBinding {
    pub entity: String,
    /// Filter field, usually the status field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_field: Option<String>,
    /// Values the filter field must take.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter_values: Vec<String>,
    /// Sort field, ascending for upcoming work, descending for history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub descending: bool,
    pub limit: u32,
}

/// A button rendered inside an actionable section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualAction {
    pub id: String,
    pub label: String,
    /// Navigation target (a page id) or workflow trigger component id.
    pub target: String,
}

/// One dashboard section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSection {
    pub id: String,
    pub role: SectionRole,
    #[serde(default)]
    pub priority: SectionPriority,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_scope: Option<TimeScope>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<MetricSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ContextualAction>,
}

/// The composed dashboard narrative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardIntent {
    pub sections: Vec<DashboardSection>,
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Compose the canonical dashboard for a set of entities.  Deterministic:
/// the same entities and profile always produce the same intent.
pub fn compose(entities: &[EntityDef], profile: &IndustryProfile) -> DashboardIntent {
    let mut sections = Vec::new();

    sections.push(today_section(entities, profile));

    let mut first_work = true;
    for entity in entities.iter().filter(|e| e.status_field().is_some()) {
        sections.push(in_progress_section(entity, first_work));
        first_work = false;
    }

    for entity in entities.iter().filter(|e| is_schedulable(e)) {
        sections.push(upcoming_section(entity));
    }

    sections.push(summary_section(entities));

    if let Some(entity) = most_transactional(entities) {
        sections.push(history_section(entity));
    }

    debug!(sections = sections.len(), "dashboard composed");
    normalize(DashboardIntent { sections })
}

/// Enforce the canonical dashboard shape.  Idempotent.
pub fn normalize(mut intent: DashboardIntent) -> DashboardIntent {
    intent
        .sections
        .sort_by_key(|s| (s.role.order_index(), s.priority.order_index()));

    // Summary is context; it never leads while anything else exists.
    if intent
        .sections
        .first()
        .is_some_and(|s| s.role == SectionRole::Summary)
        && let Some(pos) = intent
            .sections
            .iter()
            .position(|s| s.role != SectionRole::Summary)
    {
        intent.sections.swap(0, pos);
    }

    let mut primaries = 0usize;
    for section in &mut intent.sections {
        if !section.role.is_actionable() {
            section.actions.clear();
        }
        if section.priority == SectionPriority::Primary {
            primaries += 1;
            if primaries > 2 {
                section.priority = SectionPriority::Secondary;
            }
        }
    }

    intent
}

// ---------------------------------------------------------------------------
// Section builders
// ---------------------------------------------------------------------------

fn today_section(entities: &[EntityDef], profile: &IndustryProfile) -> DashboardSection {
    let mut metrics: Vec<MetricSpec> = entities
        .iter()
        .map(|e| MetricSpec {
            id: format!("{}-today", e.id),
            label: format!("New {}", e.plural_name.to_lowercase()),
            entity: e.id.clone(),
            aggregate: MetricAggregate::Count,
            field: None,
            time_scope: TimeScope::Today,
        })
        .collect();

    // Money metric label speaks the industry's language ("Estimate total"
    // for contractors, "Bill total" for clinics).
    if let Some((entity, field)) = first_currency_field(entities) {
        metrics.push(MetricSpec {
            id: format!("{}-{}-today", entity.id, field.id),
            label: format!("{} total today", capitalize(profile.vocabulary.money_term)),
            entity: entity.id.clone(),
            aggregate: MetricAggregate::Sum,
            field: Some(field.id.clone()),
            time_scope: TimeScope::Today,
        });
    }

    DashboardSection {
        id: "today".to_string(),
        role: SectionRole::Today,
        priority: SectionPriority::Primary,
        title: "Today".to_string(),
        entity: None,
        time_scope: Some(TimeScope::Today),
        metrics,
        list: None,
        actions: Vec::new(),
    }
}

fn in_progress_section(entity: &EntityDef, first: bool) -> DashboardSection {
    // status_field is checked by the caller.
    let status = entity.status_field();
    let filter_field = status.map(|f| f.id.clone());
    let filter_values = status.map(active_status_values).unwrap_or_default();

    DashboardSection {
        id: format!("{}-in-progress", entity.id),
        role: SectionRole::InProgress,
        priority: if first {
            SectionPriority::Primary
        } else {
            SectionPriority::Secondary
        },
        title: format!("{} in progress", entity.plural_name),
        entity: Some(entity.id.clone()),
        time_scope: Some(TimeScope::AllTime),
        metrics: Vec::new(),
        list: Some(ListBinding {
            entity: entity.id.clone(),
            filter_field,
            filter_values,
            sort_field: Some("updatedAt".to_string()),
            descending: true,
            limit: 5,
        }),
        actions: vec![
            ContextualAction {
                id: format!("{}-add", entity.id),
                label: format!("Add {}", entity.name.to_lowercase()),
                target: format!("{}-form", entity.id),
            },
            ContextualAction {
                id: format!("{}-view-all", entity.id),
                label: "View all".to_string(),
                target: list_target(entity),
            },
        ],
    }
}

fn upcoming_section(entity: &EntityDef) -> DashboardSection {
    let sort_field = entity.date_field().map(|f| f.id.clone());

    DashboardSection {
        id: format!("{}-upcoming", entity.id),
        role: SectionRole::Upcoming,
        priority: SectionPriority::Secondary,
        title: format!("Upcoming {}", entity.plural_name.to_lowercase()),
        entity: Some(entity.id.clone()),
        time_scope: Some(TimeScope::ThisWeek),
        metrics: Vec::new(),
        list: Some(ListBinding {
            entity: entity.id.clone(),
            filter_field: None,
            filter_values: Vec::new(),
            sort_field,
            descending: false,
            limit: 5,
        }),
        actions: vec![ContextualAction {
            id: format!("{}-schedule", entity.id),
            label: format!("New {}", entity.name.to_lowercase()),
            target: format!("{}-form", entity.id),
        }],
    }
}

fn summary_section(entities: &[EntityDef]) -> DashboardSection {
    let metrics = entities
        .iter()
        .map(|e| MetricSpec {
            id: format!("{}-total", e.id),
            label: format!("Total {}", e.plural_name.to_lowercase()),
            entity: e.id.clone(),
            aggregate: MetricAggregate::Count,
            field: None,
            time_scope: TimeScope::AllTime,
        })
        .collect();

    DashboardSection {
        id: "summary".to_string(),
        role: SectionRole::Summary,
        priority: SectionPriority::Secondary,
        title: "At a glance".to_string(),
        entity: None,
        time_scope: Some(TimeScope::AllTime),
        metrics,
        list: None,
        actions: Vec::new(),
    }
}

fn history_section(entity: &EntityDef) -> DashboardSection {
    DashboardSection {
        id: format!("{}-history", entity.id),
        role: SectionRole::History,
        priority: SectionPriority::Tertiary,
        title: format!("Recent {}", entity.plural_name.to_lowercase()),
        entity: Some(entity.id.clone()),
        time_scope: Some(TimeScope::AllTime),
        metrics: Vec::new(),
        list: Some(ListBinding {
            entity: entity.id.clone(),
            filter_field: None,
            filter_values: Vec::new(),
            sort_field: Some("createdAt".to_string()),
            descending: true,
            limit: 10,
        }),
        actions: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Entity heuristics
// ---------------------------------------------------------------------------

fn is_schedulable(entity: &EntityDef) -> bool {
    entity.has_behavior(Behavior::Schedulable) || entity.date_field().is_some()
}

/// Status values that represent live work.  Terminal states are excluded so
/// the in-progress list never shows finished records.
fn active_status_values(field: &FieldDef) -> Vec<String> {
    const TERMINAL: &[&str] = &[
        "done",
        "complete",
        "completed",
        "paid",
        "cancelled",
        "canceled",
        "closed",
        "archived",
        "lost",
        "expired",
    ];
    field
        .enum_options
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter(|o| !TERMINAL.contains(&o.value.as_str()))
        .map(|o| o.value.clone())
        .collect()
}

/// The entity whose records read like transactions: prefer one with a
/// currency field, else the one with the most fields.
fn most_transactional(entities: &[EntityDef]) -> Option<&EntityDef> {
    entities
        .iter()
        .find(|e| {
            e.fields
                .iter()
                .any(|f| f.field_type == FieldType::Currency)
        })
        .or_else(|| entities.iter().max_by_key(|e| e.fields.len()))
}

fn first_currency_field(entities: &[EntityDef]) -> Option<(&EntityDef, &FieldDef)> {
    entities.iter().find_map(|e| {
        e.fields
            .iter()
            .find(|f| f.field_type == FieldType::Currency)
            .map(|f| (e, f))
    })
}

fn list_target(entity: &EntityDef) -> String {
    if entity.id == "message" {
        "messages-chat".to_string()
    } else {
        format!("{}s-list", entity.id)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
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
            FieldDef::new("amount", "Amount", FieldType::Currency).required(),
        );
        fields.insert(
            2,
            FieldDef::new("status", "Status", FieldType::Enum).with_options(vec![
                EnumOption::new("draft", "Draft"),
                EnumOption::new("sent", "Sent"),
                EnumOption::new("paid", "Paid"),
            ]),
        );
        EntityDef::new("invoice", "Invoice", fields)
    }

    fn appointment() -> EntityDef {
        let mut fields = base_fields();
        fields.insert(
            1,
            FieldDef::new("startsAt", "Starts At", FieldType::Datetime).required(),
        );
        EntityDef::new("appointment", "Appointment", fields)
            .with_behaviors(vec![Behavior::Schedulable])
    }

    fn section(role: SectionRole, priority: SectionPriority) -> DashboardSection {
        DashboardSection {
            id: format!("{role:?}-{priority:?}").to_lowercase(),
            role,
            priority,
            title: String::new(),
            entity: None,
            time_scope: None,
            metrics: Vec::new(),
            list: None,
            actions: Vec::new(),
        }
    }

    #[test]
    fn narrative_reads_now_work_context() {
        let entities = vec![invoice(), appointment()];
        let intent = compose(&entities, profile_for_industry("general"));
        let roles: Vec<SectionRole> = intent.sections.iter().map(|s| s.role).collect();
        let mut sorted = roles.clone();
        sorted.sort_by_key(|r| r.order_index());
        assert_eq!(roles, sorted);
        assert_eq!(roles[0], SectionRole::Today);
        assert_eq!(*roles.last().unwrap(), SectionRole::History);
    }

    #[test]
    fn compose_is_deterministic() {
        let entities = vec![invoice(), appointment()];
        let profile = profile_for_industry("finance");
        assert_eq!(compose(&entities, profile), compose(&entities, profile));
    }

    #[test]
    fn today_section_carries_count_and_sum_metrics() {
        let intent = compose(&[invoice()], profile_for_industry("general"));
        let today = &intent.sections[0];
        assert_eq!(today.role, SectionRole::Today);
        assert!(
            today
                .metrics
                .iter()
                .any(|m| m.aggregate == MetricAggregate::Count)
        );
        let sum = today
            .metrics
            .iter()
            .find(|m| m.aggregate == MetricAggregate::Sum)
            .unwrap();
        assert_eq!(sum.field.as_deref(), Some("amount"));
    }

    #[test]
    fn in_progress_filters_out_terminal_statuses() {
        let intent = compose(&[invoice()], profile_for_industry("general"));
        let work = intent
            .sections
            .iter()
            .find(|s| s.role == SectionRole::InProgress)
            .unwrap();
        let list = work.list.as_ref().unwrap();
        assert_eq!(list.filter_field.as_deref(), Some("status"));
        assert_eq!(list.filter_values, vec!["draft", "sent"]);
    }

    #[test]
    fn normalize_caps_primaries_at_two() {
        let intent = DashboardIntent {
            sections: vec![
                section(SectionRole::Today, SectionPriority::Primary),
                section(SectionRole::InProgress, SectionPriority::Primary),
                section(SectionRole::Upcoming, SectionPriority::Primary),
            ],
        };
        let normalized = normalize(intent);
        let primaries = normalized
            .sections
            .iter()
            .filter(|s| s.priority == SectionPriority::Primary)
            .count();
        assert_eq!(primaries, 2);
        assert_eq!(normalized.sections[2].priority, SectionPriority::Secondary);
    }

    #[test]
    fn normalize_strips_actions_from_context_sections() {
        let mut summary = section(SectionRole::Summary, SectionPriority::Secondary);
        summary.actions.push(ContextualAction {
            id: "x".to_string(),
            label: "X".to_string(),
            target: "y".to_string(),
        });
        let normalized = normalize(DashboardIntent {
            sections: vec![section(SectionRole::Today, SectionPriority::Primary), summary],
        });
        assert!(normalized.sections[1].actions.is_empty());
    }

    #[test]
    fn summary_never_leads_while_other_sections_exist() {
        let intent = DashboardIntent {
            sections: vec![
                section(SectionRole::Summary, SectionPriority::Primary),
                section(SectionRole::History, SectionPriority::Secondary),
            ],
        };
        let normalized = normalize(intent);
        assert_eq!(normalized.sections[0].role, SectionRole::History);
    }

    #[test]
    fn normalize_is_idempotent() {
        let entities = vec![invoice(), appointment()];
        let intent = compose(&entities, profile_for_industry("general"));
        assert_eq!(normalize(intent.clone()), intent);
    }
}
