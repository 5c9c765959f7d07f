//! Field presentation rules shared by the page builders.

use appforge_schema::{EntityDef, FieldDef, FieldType};

/// Renderer format tag for a table column.
pub fn column_format(field: &FieldDef) -> &'static str {
    match field.field_type {
        FieldType::String | FieldType::Richtext => "text",
        FieldType::Number => "number",
        FieldType::Boolean => "boolean",
        FieldType::Date => "date",
        FieldType::Datetime => "datetime",
        FieldType::Email => "email",
        FieldType::Phone => "phone",
        FieldType::Url => "url",
        FieldType::Currency => "currency",
        FieldType::Percentage => "percent",
        FieldType::Enum => "badge",
        FieldType::Reference => "reference",
    }
}

/// Input widget kind for a form field.
pub fn input_kind(field: &FieldDef) -> &'static str {
    match field.field_type {
        FieldType::String => "text",
        FieldType::Richtext => "textarea",
        FieldType::Number => "number",
        FieldType::Boolean => "checkbox",
        FieldType::Date => "date",
        FieldType::Datetime => "datetime",
        FieldType::Email => "email",
        FieldType::Phone => "tel",
        FieldType::Url => "url",
        FieldType::Currency => "currency",
        FieldType::Percentage => "percent",
        FieldType::Enum | FieldType::Reference => "select",
    }
}

/// Whether records of this entity read as people.  Person-like collections
/// render as card lists; everything else gets the structured table.
pub fn is_person_entity(entity: &EntityDef) -> bool {
    const PERSON_WORDS: &[&str] = &[
        "client", "customer", "patient", "member", "contact", "staff", "employee", "lead",
        "student", "guest", "vendor", "person", "user",
    ];
    let name = entity.name.to_lowercase();
    PERSON_WORDS.iter().any(|w| name.contains(w))
}

/// The non-internal fields of an entity, in declaration order.
pub fn visible_fields(entity: &EntityDef) -> Vec<&FieldDef> {
    entity.fields.iter().filter(|f| !f.is_internal()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use appforge_schema::base_fields;

    #[test]
    fn person_heuristic_keys_on_entity_name() {
        let patient = EntityDef::new("patient", "Patient", base_fields());
        let invoice = EntityDef::new("invoice", "Invoice", base_fields());
        assert!(is_person_entity(&patient));
        assert!(!is_person_entity(&invoice));
    }

    #[test]
    fn internal_fields_are_not_visible() {
        let entity = EntityDef::new(
            "task",
            "Task",
            {
                let mut fields = base_fields();
                fields.insert(1, FieldDef::new("title", "Title", FieldType::String));
                fields
            },
        );
        let visible: Vec<&str> = visible_fields(&entity).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(visible, vec!["title"]);
    }

    #[test]
    fn enums_render_as_badges_and_edit_as_selects() {
        let field = FieldDef::new("status", "Status", FieldType::Enum);
        assert_eq!(column_format(&field), "badge");
        assert_eq!(input_kind(&field), "select");
    }
}
