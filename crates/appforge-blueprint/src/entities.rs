//! Entity derivation.
//!
//! The waterfall, in order of preference:
//!
//! 1. NLU entity hints → full entity definitions with inferred field types.
//! 2. Detected features → each feature's implied entity.
//! 3. The main noun of the free-text prompt → a single named entity.
//! 4. The generic "Item" entity.
//!
//! Every step degrades rather than fails; lower steps push a warning so the
//! caller can tell the user what was assumed.

use tracing::debug;

use appforge_schema::{Behavior, EntityDef, EnumOption, FieldDef, FieldType, base_fields};

use crate::intelligence::{EntityHint, GenerationContext};

/// Derive the app's entities from the generation context.
pub fn derive_entities(ctx: &GenerationContext, warnings: &mut Vec<String>) -> Vec<EntityDef> {
    if let Some(intelligence) = &ctx.intelligence
        && !intelligence.entities.is_empty()
    {
        let mut entities: Vec<EntityDef> = Vec::new();
        for hint in &intelligence.entities {
            let entity = entity_from_hint(hint);
            if entities.iter().any(|e| e.id == entity.id) {
                warnings.push(format!("duplicate entity hint '{}' ignored", hint.name));
                continue;
            }
            entities.push(entity);
        }
        if !entities.is_empty() {
            debug!(count = entities.len(), "entities derived from hints");
            return entities;
        }
    }

    let features = ctx.features();
    if !features.is_empty() {
        let mut entities: Vec<EntityDef> = Vec::new();
        for feature in &features {
            if let Some(entity) = feature_entity(feature)
                && !entities.iter().any(|e| e.id == entity.id)
            {
                entities.push(entity);
            }
        }
        if !entities.is_empty() {
            debug!(count = entities.len(), "entities derived from features");
            return entities;
        }
        warnings.push(format!(
            "no entity implied by features {features:?}; falling back to text"
        ));
    }

    if let Some(noun) = ctx.prompt.as_deref().and_then(main_noun) {
        warnings.push(format!(
            "no structured entities provided; guessed '{noun}' from the prompt"
        ));
        debug!(noun = %noun, "entity derived from main noun");
        return vec![entity_from_noun(&noun)];
    }

    warnings.push("no entity signal at all; starting from a generic item".to_string());
    vec![item_entity()]
}

/// Build an entity definition from an NLU hint.
pub fn entity_from_hint(hint: &EntityHint) -> EntityDef {
    let name = title_case(hint.name.trim());
    let id = slug(&singularize(&name));

    let domain: Vec<FieldDef> = if hint.fields.is_empty() {
        vec![
            FieldDef::new("name", "Name", FieldType::String).required(),
            FieldDef::new("notes", "Notes", FieldType::Richtext),
        ]
    } else {
        hint.fields.iter().map(|f| field_from_name(f)).collect()
    };

    let mut entity = EntityDef::new(id, name, with_base(domain));
    entity.behaviors = hint.behaviors.clone();
    entity.icon = hint.icon.clone();
    entity
}

/// The entity implied by a detected feature id, if any.
pub fn feature_entity(feature: &str) -> Option<EntityDef> {
    match feature {
        "scheduling" | "appointments" | "booking" | "calendar" => Some(appointment_entity()),
        "invoicing" | "billing" | "payments" => Some(invoice_entity()),
        "crm" | "customers" | "clients" | "contacts" => Some(customer_entity()),
        "inventory" | "products" | "stock" => Some(product_entity()),
        "messaging" | "chat" => Some(message_entity()),
        "tasks" | "todos" | "projects" => Some(task_entity()),
        _ => None,
    }
}

/// A single entity named after the prompt's main noun.
pub fn entity_from_noun(noun: &str) -> EntityDef {
    let name = title_case(&singularize(noun));
    let id = slug(&name);
    EntityDef::new(
        id,
        name,
        with_base(vec![
            FieldDef::new("name", "Name", FieldType::String).required(),
            FieldDef::new("notes", "Notes", FieldType::Richtext),
        ]),
    )
}

// ---------------------------------------------------------------------------
// Entity templates
// ---------------------------------------------------------------------------

/// The generic fallback entity.
pub fn item_entity() -> EntityDef {
    EntityDef::new(
        "item",
        "Item",
        with_base(vec![
            FieldDef::new("name", "Name", FieldType::String).required(),
            FieldDef::new("description", "Description", FieldType::Richtext),
        ]),
    )
    .with_icon("box")
}

pub fn customer_entity() -> EntityDef {
    EntityDef::new(
        "customer",
        "Customer",
        with_base(vec![
            FieldDef::new("name", "Name", FieldType::String).required(),
            FieldDef::new("email", "Email", FieldType::Email),
            FieldDef::new("phone", "Phone", FieldType::Phone),
            FieldDef::new("notes", "Notes", FieldType::Richtext),
        ]),
    )
    .with_icon("users")
}

pub fn appointment_entity() -> EntityDef {
    EntityDef::new(
        "appointment",
        "Appointment",
        with_base(vec![
            FieldDef::new("title", "Title", FieldType::String).required(),
            FieldDef::new("startsAt", "Starts at", FieldType::Datetime).required(),
            FieldDef::new("status", "Status", FieldType::Enum).with_options(vec![
                EnumOption::new("scheduled", "Scheduled").with_color("#3b82f6"),
                EnumOption::new("confirmed", "Confirmed").with_color("#22c55e"),
                EnumOption::new("completed", "Completed").with_color("#6b7280"),
                EnumOption::new("cancelled", "Cancelled").with_color("#ef4444"),
            ]),
            FieldDef::new("notes", "Notes", FieldType::Richtext),
        ]),
    )
    .with_behaviors(vec![Behavior::Schedulable, Behavior::Assignable])
    .with_icon("calendar")
}

pub fn invoice_entity() -> EntityDef {
    EntityDef::new(
        "invoice",
        "Invoice",
        with_base(vec![
            FieldDef::new("number", "Number", FieldType::String).required().unique(),
            FieldDef::new("amount", "Amount", FieldType::Currency).required(),
            FieldDef::new("status", "Status", FieldType::Enum).with_options(vec![
                EnumOption::new("draft", "Draft").with_color("#6b7280"),
                EnumOption::new("sent", "Sent").with_color("#3b82f6"),
                EnumOption::new("paid", "Paid").with_color("#22c55e"),
                EnumOption::new("overdue", "Overdue").with_color("#ef4444"),
            ]),
            FieldDef::new("dueDate", "Due date", FieldType::Date),
            FieldDef::new("notes", "Notes", FieldType::Richtext),
        ]),
    )
    .with_behaviors(vec![Behavior::Billable])
    .with_icon("file-text")
}

pub fn product_entity() -> EntityDef {
    EntityDef::new(
        "product",
        "Product",
        with_base(vec![
            FieldDef::new("name", "Name", FieldType::String).required(),
            FieldDef::new("sku", "SKU", FieldType::String).unique(),
            FieldDef::new("price", "Price", FieldType::Currency),
            FieldDef::new("quantity", "Quantity", FieldType::Number),
            FieldDef::new("category", "Category", FieldType::String),
        ]),
    )
    .with_icon("package")
}

pub fn message_entity() -> EntityDef {
    EntityDef::new(
        "message",
        "Message",
        with_base(vec![
            FieldDef::new("subject", "Subject", FieldType::String),
            FieldDef::new("body", "Body", FieldType::Richtext).required(),
            FieldDef::new("sentAt", "Sent at", FieldType::Datetime),
        ]),
    )
    .with_icon("message-circle")
}

pub fn task_entity() -> EntityDef {
    EntityDef::new(
        "task",
        "Task",
        with_base(vec![
            FieldDef::new("title", "Title", FieldType::String).required(),
            FieldDef::new("status", "Status", FieldType::Enum).with_options(vec![
                EnumOption::new("todo", "To do").with_color("#6b7280"),
                EnumOption::new("in_progress", "In progress").with_color("#3b82f6"),
                EnumOption::new("done", "Done").with_color("#22c55e"),
            ]),
            FieldDef::new("dueDate", "Due date", FieldType::Date),
            FieldDef::new("priority", "Priority", FieldType::Enum).with_options(vec![
                EnumOption::new("low", "Low"),
                EnumOption::new("medium", "Medium").with_color("#f59e0b"),
                EnumOption::new("high", "High").with_color("#ef4444"),
            ]),
        ]),
    )
    .with_behaviors(vec![Behavior::Assignable])
    .with_icon("check-square")
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// Wrap domain fields with the standard bookkeeping fields: `id` first,
/// timestamps last.
pub fn with_base(domain: Vec<FieldDef>) -> Vec<FieldDef> {
    let mut fields = base_fields();
    fields.splice(1..1, domain);
    fields
}

/// Pick the most likely subject noun from free text, skipping filler words.
pub fn main_noun(text: &str) -> Option<String> {
    const STOPWORDS: &[&str] = &[
        "a", "an", "the", "app", "application", "for", "my", "our", "to", "i", "we", "want",
        "need", "build", "create", "make", "manage", "track", "managing", "tracking", "with",
        "and", "of", "that", "this", "system", "tool", "business", "simple", "new", "please",
        "help", "me", "like", "would",
    ];

    text.split(|c: char| !c.is_alphanumeric())
        .map(|w| w.trim().to_lowercase())
        .find(|w| w.len() > 2 && !STOPWORDS.contains(&w.as_str()))
}

/// Lowercase slug: non-alphanumerics collapse to single hyphens.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_hyphen = true;
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            out.push('-');
            last_hyphen = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Naive singular form: strip one trailing `s` unless the word ends in
/// `ss`.  Matches the schema's equally naive `name + "s"` pluralization.
pub fn singularize(word: &str) -> String {
    let trimmed = word.trim();
    if trimmed.len() > 3 && trimmed.ends_with('s') && !trimmed.ends_with("ss") {
        trimmed[..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Capitalize the first letter of each word.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// camelCase field id from a human name.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if upper_next && !out.is_empty() {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    out
}

/// Build a field from a bare name, inferring the type from keywords.
pub fn field_from_name(name: &str) -> FieldDef {
    let id = camel_case(name);
    let display = title_case(name.trim());
    let lowered = id.to_lowercase();

    let field_type = if lowered.contains("email") {
        FieldType::Email
    } else if lowered.contains("phone") || lowered.contains("mobile") {
        FieldType::Phone
    } else if lowered.contains("url") || lowered.contains("website") || lowered.contains("link") {
        FieldType::Url
    } else if lowered.contains("price")
        || lowered.contains("cost")
        || lowered.contains("amount")
        || lowered.contains("total")
        || lowered.contains("fee")
        || lowered.contains("rate")
    {
        FieldType::Currency
    } else if lowered.contains("percent") {
        FieldType::Percentage
    } else if lowered == "date" || lowered.ends_with("date") || lowered.ends_with("day") {
        FieldType::Date
    } else if lowered.contains("time") || lowered.contains("at") && lowered.ends_with("at") {
        FieldType::Datetime
    } else if lowered.contains("status") || lowered.contains("stage") {
        FieldType::Enum
    } else if lowered.contains("count")
        || lowered.contains("quantity")
        || lowered.contains("number")
        || lowered == "age"
    {
        FieldType::Number
    } else if lowered.starts_with("is")
        || lowered.starts_with("has")
        || lowered == "active"
        || lowered == "paid"
        || lowered == "completed"
    {
        FieldType::Boolean
    } else if lowered.contains("notes") || lowered.contains("description") {
        FieldType::Richtext
    } else {
        FieldType::String
    };

    let mut field = FieldDef::new(id, display, field_type);
    if field_type == FieldType::Enum {
        field.enum_options = Some(vec![
            EnumOption::new("new", "New").with_color("#6b7280"),
            EnumOption::new("in_progress", "In progress").with_color("#3b82f6"),
            EnumOption::new("done", "Done").with_color("#22c55e"),
        ]);
    }
    field
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::IntelligenceInput;

    #[test]
    fn hints_win_over_features() {
        let ctx = GenerationContext::default().with_intelligence(IntelligenceInput {
            entities: vec![EntityHint::named("Patient")],
            features: vec!["invoicing".into()],
            ..IntelligenceInput::default()
        });
        let mut warnings = Vec::new();
        let entities = derive_entities(&ctx, &mut warnings);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, "patient");
        assert!(warnings.is_empty());
    }

    #[test]
    fn features_imply_entities() {
        let ctx = GenerationContext::default().with_intelligence(IntelligenceInput {
            features: vec!["scheduling".into(), "invoicing".into()],
            ..IntelligenceInput::default()
        });
        let mut warnings = Vec::new();
        let entities = derive_entities(&ctx, &mut warnings);
        let ids: Vec<&str> = entities.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["appointment", "invoice"]);
    }

    #[test]
    fn prompt_noun_is_the_next_fallback() {
        let ctx = GenerationContext::from_prompt("an app to manage recipes for my bakery");
        let mut warnings = Vec::new();
        let entities = derive_entities(&ctx, &mut warnings);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, "recipe");
        assert_eq!(entities[0].name, "Recipe");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn empty_context_yields_generic_item() {
        let mut warnings = Vec::new();
        let entities = derive_entities(&GenerationContext::default(), &mut warnings);
        assert_eq!(entities[0].id, "item");
        assert!(!warnings.is_empty());
    }

    #[test]
    fn hint_fields_get_inferred_types() {
        let hint = EntityHint {
            name: "Job".into(),
            fields: vec![
                "title".into(),
                "customer email".into(),
                "total cost".into(),
                "due date".into(),
                "status".into(),
            ],
            ..EntityHint::default()
        };
        let entity = entity_from_hint(&hint);
        assert_eq!(entity.field("customerEmail").unwrap().field_type, FieldType::Email);
        assert_eq!(entity.field("totalCost").unwrap().field_type, FieldType::Currency);
        assert_eq!(entity.field("dueDate").unwrap().field_type, FieldType::Date);
        assert!(entity.status_field().is_some());
        // Bookkeeping fields wrap the domain fields.
        assert_eq!(entity.fields.first().unwrap().id, "id");
        assert_eq!(entity.fields.last().unwrap().id, "updatedAt");
    }

    #[test]
    fn every_template_passes_basic_invariants() {
        for entity in [
            item_entity(),
            customer_entity(),
            appointment_entity(),
            invoice_entity(),
            product_entity(),
            message_entity(),
            task_entity(),
        ] {
            assert!(entity.field("id").is_some(), "{} lacks id", entity.id);
            assert!(!entity.plural_name.is_empty());
            assert!(entity.display.is_consistent_with(&entity.fields));
        }
    }

    #[test]
    fn slug_and_case_helpers() {
        assert_eq!(slug("Real Estate Listing"), "real-estate-listing");
        assert_eq!(singularize("customers"), "customer");
        assert_eq!(singularize("boss"), "boss");
        assert_eq!(camel_case("customer email"), "customerEmail");
        assert_eq!(title_case("due date"), "Due Date");
    }

    #[test]
    fn main_noun_skips_filler() {
        assert_eq!(
            main_noun("I want to build an app for my gym"),
            Some("gym".to_string())
        );
        assert_eq!(main_noun("please help me"), None);
    }
}
