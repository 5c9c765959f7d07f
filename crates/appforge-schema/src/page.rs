//! Page and component definitions.
//!
//! A [`PageDef`] is an abstract description of one screen of the generated
//! application.  Pages carry an ordered list of [`ComponentDef`] trees; the
//! materializer expands them into concrete renderable components at render
//! time.  Dashboard components additionally carry a [`ComponentIntent`]
//! describing their semantic role in the dashboard narrative.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SchemaError;

// ---------------------------------------------------------------------------
// Page model
// ---------------------------------------------------------------------------

/// The kind of screen a page renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    /// Overview screen composed from dashboard sections.
    Dashboard,
    /// Collection view (table or cards) over one entity.
    #[default]
    List,
    /// Create/edit form for one entity.
    Form,
    /// Single-record view with actions.
    Detail,
    /// Date-bound schedule view.
    Calendar,
    /// Status-column board.
    Kanban,
    /// Forced tabular collection view.
    Table,
    /// Conversation thread.
    Chat,
    /// Application settings shell.
    Settings,
}

impl PageType {
    /// Pages of these kinds are reached through buttons and modals rather
    /// than top-level navigation.
    pub fn is_auxiliary(self) -> bool {
        matches!(self, Self::Form | Self::Detail)
    }

    /// Canonical snake_case name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::List => "list",
            Self::Form => "form",
            Self::Detail => "detail",
            Self::Calendar => "calendar",
            Self::Kanban => "kanban",
            Self::Table => "table",
            Self::Chat => "chat",
            Self::Settings => "settings",
        }
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PageType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" | "home" | "overview" => Ok(Self::Dashboard),
            "list" => Ok(Self::List),
            "form" | "create" | "edit" => Ok(Self::Form),
            "detail" | "view" => Ok(Self::Detail),
            "calendar" | "schedule" => Ok(Self::Calendar),
            "kanban" | "board" => Ok(Self::Kanban),
            "table" | "grid" => Ok(Self::Table),
            "chat" | "messages" => Ok(Self::Chat),
            "settings" => Ok(Self::Settings),
            other => Err(SchemaError::UnknownPageType {
                value: other.to_string(),
            }),
        }
    }
}

/// Column arrangement of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLayout {
    #[default]
    SingleColumn,
    TwoColumn,
    FullWidth,
    Centered,
}

/// The audience a page is built for.  Multi-surface products partition
/// their pages by audience and get one navigation tree per surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Admin,
    Staff,
    Customer,
    Provider,
    Patient,
}

impl Surface {
    /// All surfaces in a stable order.
    pub const ALL: [Surface; 5] = [
        Surface::Admin,
        Surface::Staff,
        Surface::Customer,
        Surface::Provider,
        Surface::Patient,
    ];

    /// Display label for navigation headers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Staff => "Staff",
            Self::Customer => "Customer",
            Self::Provider => "Provider",
            Self::Patient => "Patient",
        }
    }
}

/// Sidebar placement preferences of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNavigation {
    /// Whether the page appears in the sidebar at all.
    #[serde(default)]
    pub show_in_sidebar: bool,
    /// Sort order within the sidebar (ascending).
    #[serde(default)]
    pub order: u32,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Collection-view behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    /// Whether the collection is paginated.
    #[serde(default = "default_true")]
    pub paginated: bool,
    /// Page size when paginated.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Whether a search box is shown.
    #[serde(default = "default_true")]
    pub searchable: bool,
    /// Whether filter controls are shown.
    #[serde(default)]
    pub filterable: bool,
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> u32 {
    25
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            paginated: true,
            page_size: default_page_size(),
            searchable: true,
            filterable: false,
        }
    }
}

/// One screen of the generated application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDef {
    /// Page identifier (kebab slug, e.g. `customers-list`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Route path (e.g. `/customers`).  Exactly one page owns `/`.
    pub route: String,
    /// The kind of screen.
    #[serde(rename = "type")]
    pub page_type: PageType,
    /// Bound entity id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Column arrangement.
    #[serde(default)]
    pub layout: PageLayout,
    /// Ordered component trees.  Every validated page renders at least one
    /// visible component.
    #[serde(default)]
    pub components: Vec<ComponentDef>,
    /// Sidebar placement.
    #[serde(default)]
    pub navigation: PageNavigation,
    /// Collection-view behavior.
    #[serde(default)]
    pub settings: PageSettings,
    /// Audience tag for multi-surface products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<Surface>,
}

impl PageDef {
    /// Create a page with sensible defaults for the given type.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        route: impl Into<String>,
        page_type: PageType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            route: route.into(),
            page_type,
            navigation: PageNavigation {
                show_in_sidebar: !page_type.is_auxiliary(),
                order: 0,
                icon: None,
            },
            ..Self::default()
        }
    }

    /// Bind the page to an entity.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Tag the page with an audience surface.
    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Set the sidebar order.
    pub fn with_order(mut self, order: u32) -> Self {
        self.navigation.order = order;
        self
    }
}

// ---------------------------------------------------------------------------
// Component model
// ---------------------------------------------------------------------------

/// A component tree node.  `component_id` is the renderer-registry key the
/// front end dispatches on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDef {
    /// Unique id within the page.
    pub id: String,
    /// Renderer-registry key (e.g. `data-table`, `stat-card`).
    pub component_id: String,
    /// Renderer props.
    #[serde(default)]
    pub props: Map<String, Value>,
    /// Child components.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentDef>,
    /// Dashboard-section intent metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<ComponentIntent>,
}

/// Layout intent metadata carried by dashboard-section components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentIntent {
    /// Narrative role of the section.
    pub role: SectionRole,
    /// Visual weight of the section.
    #[serde(default)]
    pub priority: SectionPriority,
    /// Time window the section's data is scoped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_scope: Option<TimeScope>,
    /// Renderer layout hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_hint: Option<LayoutHint>,
    /// Renderer emphasis hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Emphasis>,
}

/// The narrative role of a dashboard section.  Canonical dashboards read
/// "Now → Work → Context": today first, history last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionRole {
    /// What is happening right now (KPI metrics).
    #[default]
    Today,
    /// Active work the user should act on.
    InProgress,
    /// What is coming next.
    Upcoming,
    /// Aggregate context.
    Summary,
    /// The long tail of past records.
    History,
}

impl SectionRole {
    /// Fixed canonical ordering index.
    pub fn order_index(self) -> usize {
        match self {
            Self::Today => 0,
            Self::InProgress => 1,
            Self::Upcoming => 2,
            Self::Summary => 3,
            Self::History => 4,
        }
    }

    /// Whether sections of this role may carry contextual actions.
    /// `summary` and `history` are read-only context by definition.
    pub fn is_actionable(self) -> bool {
        matches!(self, Self::Today | Self::InProgress | Self::Upcoming)
    }
}

/// The visual weight of a dashboard section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionPriority {
    Primary,
    #[default]
    Secondary,
    Tertiary,
}

impl SectionPriority {
    /// Fixed ordering index used when sorting sections of the same role.
    pub fn order_index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
            Self::Tertiary => 2,
        }
    }
}

/// Renderer layout hint for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutHint {
    Grid,
    Row,
    Column,
    Feed,
}

/// Renderer emphasis hint for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Emphasis {
    Hero,
    Standard,
    Muted,
}

// ---------------------------------------------------------------------------
// Time scopes
// ---------------------------------------------------------------------------

/// The time window a dashboard section or metric is scoped to.  Used both
/// to filter record data and to label metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeScope {
    /// Within an hour of the reference instant.
    Now,
    /// Same UTC calendar day.
    #[default]
    Today,
    /// Same ISO week.
    ThisWeek,
    /// Same calendar month.
    ThisMonth,
    /// No time bound.
    AllTime,
}

impl TimeScope {
    /// Whether `value` falls inside this scope relative to `now`.
    pub fn contains(self, value: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::Now => (value - now).abs() <= Duration::hours(1),
            Self::Today => value.date_naive() == now.date_naive(),
            Self::ThisWeek => value.iso_week() == now.iso_week(),
            Self::ThisMonth => value.year() == now.year() && value.month() == now.month(),
            Self::AllTime => true,
        }
    }

    /// Human-readable label for metric subtitles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Now => "right now",
            Self::Today => "today",
            Self::ThisWeek => "this week",
            Self::ThisMonth => "this month",
            Self::AllTime => "all time",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn auxiliary_pages_stay_out_of_sidebar() {
        let form = PageDef::new("job-form", "New Job", "/jobs/new", PageType::Form);
        assert!(!form.navigation.show_in_sidebar);

        let list = PageDef::new("jobs", "Jobs", "/jobs", PageType::List);
        assert!(list.navigation.show_in_sidebar);
    }

    #[test]
    fn role_order_is_canonical() {
        let roles = [
            SectionRole::Today,
            SectionRole::InProgress,
            SectionRole::Upcoming,
            SectionRole::Summary,
            SectionRole::History,
        ];
        for (i, role) in roles.iter().enumerate() {
            assert_eq!(role.order_index(), i);
        }
        assert!(!SectionRole::Summary.is_actionable());
        assert!(!SectionRole::History.is_actionable());
        assert!(SectionRole::Today.is_actionable());
    }

    #[test]
    fn section_role_serializes_kebab_case() {
        let json = serde_json::to_string(&SectionRole::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let scope: TimeScope = serde_json::from_str("\"this-week\"").unwrap();
        assert_eq!(scope, TimeScope::ThisWeek);
    }

    #[test]
    fn time_scope_predicates() {
        let now = Utc.with_ymd_and_hms(2025, 6, 11, 14, 30, 0).unwrap(); // Wednesday
        let in_forty_minutes = now + Duration::minutes(40);
        let tomorrow = now + Duration::days(1);
        let next_monday = now + Duration::days(5);
        let last_month = now - Duration::days(40);

        assert!(TimeScope::Now.contains(in_forty_minutes, now));
        assert!(!TimeScope::Now.contains(tomorrow, now));

        assert!(TimeScope::Today.contains(in_forty_minutes, now));
        assert!(!TimeScope::Today.contains(tomorrow, now));

        assert!(TimeScope::ThisWeek.contains(tomorrow, now));
        assert!(!TimeScope::ThisWeek.contains(next_monday, now));

        assert!(TimeScope::ThisMonth.contains(tomorrow, now));
        assert!(!TimeScope::ThisMonth.contains(last_month, now));

        assert!(TimeScope::AllTime.contains(last_month, now));
    }

    #[test]
    fn page_type_parsing_accepts_aliases() {
        assert_eq!("board".parse::<PageType>().unwrap(), PageType::Kanban);
        assert_eq!("overview".parse::<PageType>().unwrap(), PageType::Dashboard);
        assert!("wormhole".parse::<PageType>().is_err());
    }
}
