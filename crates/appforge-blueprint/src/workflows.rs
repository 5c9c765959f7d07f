//! CRUD workflow generation.
//!
//! One create/update/delete trio per entity.  The validator's backfill pass
//! calls the same generator, so repaired schemas and freshly synthesized
//! ones carry identical workflows.

use serde_json::json;
use tracing::debug;

use appforge_schema::{
    ActionDef, ActionType, EntityDef, ErrorAction, OnErrorPolicy, TriggerDef, TriggerType,
    WorkflowDef, pluralize,
};

use crate::entities::slug;

/// Generate the standard workflows for a list of entities.
pub fn generate_workflows(entities: &[EntityDef]) -> Vec<WorkflowDef> {
    let mut workflows = Vec::new();
    for entity in entities {
        workflows.extend(crud_workflows(entity));
    }
    debug!(count = workflows.len(), "workflows generated");
    workflows
}

/// The create/update/delete trio for one entity.
pub fn crud_workflows(entity: &EntityDef) -> Vec<WorkflowDef> {
    vec![
        create_workflow(entity),
        update_workflow(entity),
        delete_workflow(entity),
    ]
}

fn list_page_id(entity: &EntityDef) -> String {
    if entity.id == "message" {
        format!("{}-chat", slug(&pluralize(&entity.id)))
    } else {
        format!("{}-list", slug(&pluralize(&entity.id)))
    }
}

fn create_workflow(entity: &EntityDef) -> WorkflowDef {
    let mut wf = WorkflowDef::new(
        format!("{}-create", entity.id),
        format!("Create {}", entity.name),
        TriggerDef::of(TriggerType::FormSubmit)
            .on_component(format!("{}-form", entity.id))
            .on_entity(&entity.id),
        vec![
            ActionDef::new("a1", ActionType::CreateRecord).with_config(json!({
                "entity": entity.id,
                "data": "{form}",
            })),
            ActionDef::new("a2", ActionType::ShowNotification).with_config(json!({
                "message": format!("{} created", entity.name),
                "severity": "success",
            })),
            ActionDef::new("a3", ActionType::Navigate).with_config(json!({
                "page": list_page_id(entity),
            })),
        ],
    )
    .with_on_error(OnErrorPolicy {
        action: ErrorAction::Stop,
        message: Some(format!("Could not create the {}", entity.name.to_lowercase())),
    });
    wf.description = Some(format!("Save a new {} from the form", entity.name.to_lowercase()));
    wf
}

fn update_workflow(entity: &EntityDef) -> WorkflowDef {
    WorkflowDef::new(
        format!("{}-update", entity.id),
        format!("Update {}", entity.name),
        TriggerDef::of(TriggerType::ButtonClick)
            .on_component(format!("{}-save-button", entity.id))
            .on_entity(&entity.id),
        vec![
            ActionDef::new("a1", ActionType::UpdateRecord).with_config(json!({
                "entity": entity.id,
                "recordId": "{record.id}",
                "data": "{form}",
            })),
            ActionDef::new("a2", ActionType::ShowNotification).with_config(json!({
                "message": format!("{} updated", entity.name),
                "severity": "success",
            })),
            ActionDef::new("a3", ActionType::RefreshData).with_config(json!({
                "entity": entity.id,
            })),
        ],
    )
}

fn delete_workflow(entity: &EntityDef) -> WorkflowDef {
    WorkflowDef::new(
        format!("{}-delete", entity.id),
        format!("Delete {}", entity.name),
        TriggerDef::of(TriggerType::ButtonClick)
            .on_component(format!("{}-delete-button", entity.id))
            .on_entity(&entity.id),
        vec![
            ActionDef::new("a1", ActionType::Conditional).with_config(json!({
                "condition": format!("confirm(Delete this {}?)", entity.name.to_lowercase()),
            })),
            ActionDef::new("a2", ActionType::DeleteRecord).with_config(json!({
                "entity": entity.id,
                "recordId": "{record.id}",
            })),
            ActionDef::new("a3", ActionType::ShowNotification).with_config(json!({
                "message": format!("{} deleted", entity.name),
                "severity": "info",
            })),
            ActionDef::new("a4", ActionType::Navigate).with_config(json!({
                "page": list_page_id(entity),
            })),
        ],
    )
    .with_on_error(OnErrorPolicy {
        action: ErrorAction::Stop,
        message: None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::customer_entity;

    #[test]
    fn every_entity_gets_the_crud_trio() {
        let workflows = generate_workflows(&[customer_entity()]);
        let ids: Vec<&str> = workflows.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["customer-create", "customer-update", "customer-delete"]
        );
        assert!(workflows.iter().all(|w| w.enabled));
        assert!(workflows.iter().all(|w| !w.actions.is_empty()));
    }

    #[test]
    fn create_fires_on_form_submit() {
        let wf = &crud_workflows(&customer_entity())[0];
        assert_eq!(wf.trigger.trigger_type, TriggerType::FormSubmit);
        assert_eq!(wf.trigger.entity.as_deref(), Some("customer"));
        assert_eq!(wf.trigger.component.as_deref(), Some("customer-form"));
        assert_eq!(wf.actions[0].action_type, ActionType::CreateRecord);
        assert_eq!(wf.error_action(), ErrorAction::Stop);
    }

    #[test]
    fn delete_asks_for_confirmation_first() {
        let wf = &crud_workflows(&customer_entity())[2];
        assert_eq!(wf.actions[0].action_type, ActionType::Conditional);
        assert!(
            wf.actions[0]
                .config_str("condition")
                .unwrap()
                .starts_with("confirm(")
        );
    }

    #[test]
    fn navigation_targets_the_list_page() {
        let wf = &crud_workflows(&customer_entity())[0];
        let nav = wf.actions.last().unwrap();
        assert_eq!(nav.config_str("page"), Some("customers-list"));
    }
}
