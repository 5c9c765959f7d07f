//! Entity and field definitions.
//!
//! An [`EntityDef`] describes one kind of record the generated application
//! manages (customers, appointments, invoices, …): its fields, how it is
//! displayed, and behavioral tags that downstream generators key off.  The
//! schema serializes with camelCase names because it is consumed directly by
//! the rendering front end.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

// ---------------------------------------------------------------------------
// Field model
// ---------------------------------------------------------------------------

/// The data type of a single entity field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free-form short text.
    #[default]
    String,
    /// Numeric value (integer or decimal).
    Number,
    /// True/false flag.
    Boolean,
    /// Calendar date without a time component.
    Date,
    /// Date and time of day.
    Datetime,
    /// Email address with format validation.
    Email,
    /// Phone number.
    Phone,
    /// Web address.
    Url,
    /// Monetary amount rendered with a currency symbol.
    Currency,
    /// Percentage value.
    Percentage,
    /// Rich text with formatting.
    Richtext,
    /// One value out of a fixed option list.
    Enum,
    /// Link to a record of another entity.
    Reference,
}

impl FieldType {
    /// Whether this type carries a date component (used for calendar
    /// bindings and time-scope filtering).
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Datetime)
    }

    /// Canonical lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::Richtext => "richtext",
            Self::Enum => "enum",
            Self::Reference => "reference",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "text" => Ok(Self::String),
            "number" | "integer" | "float" => Ok(Self::Number),
            "boolean" | "bool" => Ok(Self::Boolean),
            "date" => Ok(Self::Date),
            "datetime" | "timestamp" => Ok(Self::Datetime),
            "email" => Ok(Self::Email),
            "phone" | "tel" => Ok(Self::Phone),
            "url" | "link" => Ok(Self::Url),
            "currency" | "money" => Ok(Self::Currency),
            "percentage" | "percent" => Ok(Self::Percentage),
            "richtext" => Ok(Self::Richtext),
            "enum" | "select" => Ok(Self::Enum),
            "reference" | "relation" => Ok(Self::Reference),
            other => Err(SchemaError::UnknownFieldType {
                value: other.to_string(),
            }),
        }
    }
}

/// How two entities relate through a reference field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    OneToOne,
    OneToMany,
    #[default]
    ManyToOne,
    ManyToMany,
}

/// Configuration carried by a `reference`-typed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceConfig {
    /// Id of the target entity.
    pub entity: String,
    /// Field of the target entity shown when rendering the link.
    #[serde(default = "default_display_field")]
    pub display_field: String,
    /// Cardinality of the relationship.
    #[serde(default)]
    pub relationship: RelationshipKind,
}

fn default_display_field() -> String {
    "name".to_string()
}

/// One selectable option of an `enum`-typed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumOption {
    /// Stored value.
    pub value: String,
    /// Human-readable label.
    pub label: String,
    /// Optional badge color (hex).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl EnumOption {
    /// Build an option whose label is derived from the value.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            color: None,
        }
    }

    /// Attach a badge color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A single field of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    /// Field identifier, unique within the entity (camelCase).
    pub id: String,
    /// Human-readable field name.
    pub name: String,
    /// Data type of the field.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether a value is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Whether values must be unique across records.
    #[serde(default)]
    pub unique: bool,
    /// Reference configuration; only meaningful for `reference` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceConfig>,
    /// Option list; only meaningful for `enum` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_options: Option<Vec<EnumOption>>,
}

impl FieldDef {
    /// Convenience constructor for a plain field.
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            ..Self::default()
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Attach enum options and set the type to `enum`.
    pub fn with_options(mut self, options: Vec<EnumOption>) -> Self {
        self.field_type = FieldType::Enum;
        self.enum_options = Some(options);
        self
    }

    /// Attach a reference target and set the type to `reference`.
    pub fn with_reference(mut self, reference: ReferenceConfig) -> Self {
        self.field_type = FieldType::Reference;
        self.reference = Some(reference);
        self
    }

    /// Whether this is one of the bookkeeping fields hidden from forms and
    /// table columns (`id`, `createdAt`, `updatedAt`).
    pub fn is_internal(&self) -> bool {
        matches!(self.id.as_str(), "id" | "createdAt" | "updatedAt")
    }
}

// ---------------------------------------------------------------------------
// Entity model
// ---------------------------------------------------------------------------

/// Behavioral tags that downstream generators key off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Records have a date/time dimension worth a calendar view.
    Schedulable,
    /// Records carry money and participate in invoicing.
    Billable,
    /// Records can be assigned to a person.
    Assignable,
}

/// Display preferences controlling how records of an entity are rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    /// Field used as the record title.
    pub title_field: String,
    /// Fields shown in list/table views, in order.
    #[serde(default)]
    pub list_fields: Vec<String>,
    /// Fields searched by the list search box.
    #[serde(default)]
    pub search_fields: Vec<String>,
}

impl DisplayConfig {
    /// Derive a display config from an entity's fields: the first
    /// non-internal string-ish field titles the record, the first few
    /// non-internal fields make up the list columns, and text-bearing
    /// fields are searchable.
    pub fn derive(fields: &[FieldDef]) -> Self {
        let title_field = fields
            .iter()
            .find(|f| !f.is_internal() && matches!(f.field_type, FieldType::String | FieldType::Email))
            .or_else(|| fields.iter().find(|f| !f.is_internal()))
            .map(|f| f.id.clone())
            .unwrap_or_else(|| "id".to_string());

        let list_fields: Vec<String> = fields
            .iter()
            .filter(|f| !f.is_internal())
            .take(4)
            .map(|f| f.id.clone())
            .collect();

        let search_fields: Vec<String> = fields
            .iter()
            .filter(|f| {
                !f.is_internal()
                    && matches!(
                        f.field_type,
                        FieldType::String | FieldType::Email | FieldType::Phone | FieldType::Richtext
                    )
            })
            .map(|f| f.id.clone())
            .collect();

        Self {
            title_field,
            list_fields,
            search_fields,
        }
    }

    /// Whether every referenced field id exists in `fields`.
    pub fn is_consistent_with(&self, fields: &[FieldDef]) -> bool {
        let has = |id: &str| fields.iter().any(|f| f.id == id);
        !self.title_field.is_empty()
            && has(&self.title_field)
            && self.list_fields.iter().all(|id| has(id))
            && self.search_fields.iter().all(|id| has(id))
    }
}

/// One kind of record managed by the generated application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDef {
    /// Entity identifier (lowercase singular slug, e.g. `customer`).
    pub id: String,
    /// Singular display name.
    pub name: String,
    /// Plural display name; derived as `name + "s"` when absent.
    #[serde(default)]
    pub plural_name: String,
    /// Ordered field list.  Always contains a required, unique `id` field
    /// once the schema has passed validation.
    pub fields: Vec<FieldDef>,
    /// Display preferences.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Optional icon name for navigation and cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Behavioral tags.
    #[serde(default)]
    pub behaviors: Vec<Behavior>,
}

impl EntityDef {
    /// Create an entity with a derived plural name and display config.
    pub fn new(id: impl Into<String>, name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        let name = name.into();
        let display = DisplayConfig::derive(&fields);
        Self {
            id: id.into(),
            plural_name: pluralize(&name),
            name,
            fields,
            display,
            icon: None,
            behaviors: Vec::new(),
        }
    }

    /// Attach behavioral tags.
    pub fn with_behaviors(mut self, behaviors: Vec<Behavior>) -> Self {
        self.behaviors = behaviors;
        self
    }

    /// Attach an icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Look up a field by id.
    pub fn field(&self, id: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Whether the entity carries the given behavior tag.
    pub fn has_behavior(&self, behavior: Behavior) -> bool {
        self.behaviors.contains(&behavior)
    }

    /// First enum field that looks like a workflow status (`status`,
    /// `stage`, `state`).  Kanban boards and in-progress dashboard sections
    /// bind to this field.
    pub fn status_field(&self) -> Option<&FieldDef> {
        self.fields.iter().find(|f| {
            f.field_type == FieldType::Enum && {
                let id = f.id.to_lowercase();
                id.contains("status") || id.contains("stage") || id.contains("state")
            }
        })
    }

    /// First date or datetime field, used for calendar bindings and
    /// time-scope filtering.  Bookkeeping timestamps are skipped.
    pub fn date_field(&self) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|f| f.field_type.is_temporal() && !f.is_internal())
    }

    /// Insert the mandatory `id` field at the front if it is missing.
    /// Returns `true` when a field was inserted.
    pub fn ensure_id_field(&mut self) -> bool {
        if self.field("id").is_some() {
            return false;
        }
        self.fields.insert(
            0,
            FieldDef::new("id", "ID", FieldType::String).required().unique(),
        );
        true
    }
}

/// Derive a plural display name.  The schema invariant is exactly
/// `name + "s"`; smarter inflection belongs to the rendering layer.
pub fn pluralize(name: &str) -> String {
    format!("{name}s")
}

/// The standard bookkeeping fields every generated entity starts with.
pub fn base_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::new("id", "ID", FieldType::String).required().unique(),
        FieldDef::new("createdAt", "Created", FieldType::Datetime),
        FieldDef::new("updatedAt", "Updated", FieldType::Datetime),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
