//! Shared schema types for AppForge.
//!
//! This crate defines the data model every other AppForge crate operates on:
//!
//! - **Entities**: Field and entity definitions with behaviors via
//!   [`entity::EntityDef`].
//! - **Pages**: Page, component, and semantic-intent definitions via
//!   [`page::PageDef`] and [`page::ComponentIntent`].
//! - **Workflows**: Trigger and action definitions via
//!   [`workflow::WorkflowDef`].
//! - **Navigation**: Sidebar, per-surface trees, and audience rules via
//!   [`navigation::NavigationDef`].
//! - **Theme**: Visual theme and atmosphere via [`theme::ThemeDef`].
//! - **App root**: The aggregate [`app::AppSchema`] plus settings and
//!   generation metadata.
//!
//! All types serialize to camelCase JSON so a JavaScript renderer can consume
//! them without a translation layer.

pub mod app;
pub mod entity;
pub mod error;
pub mod navigation;
pub mod page;
pub mod theme;
pub mod workflow;

pub use app::{AppMetadata, AppSchema, AppSettings, new_app_id};
pub use entity::{
    Behavior, DisplayConfig, EntityDef, EnumOption, FieldDef, FieldType, ReferenceConfig,
    RelationshipKind, base_fields, pluralize,
};
pub use error::{Result, SchemaError};
pub use navigation::{NavItem, NavigationDef, NavigationRule, Sidebar, SurfaceNavigation};
pub use page::{
    ComponentDef, ComponentIntent, Emphasis, LayoutHint, PageDef, PageLayout, PageNavigation,
    PageSettings, PageType, SectionPriority, SectionRole, Surface, TimeScope,
};
pub use theme::{
    AnimationPrefs, Atmosphere, Backdrop, Decoration, ShadowLevel, ThemeColors, ThemeDef,
    ThemeMode, ThemeTypography,
};
pub use workflow::{
    ActionDef, ActionType, ErrorAction, OnErrorPolicy, TriggerDef, TriggerType, WorkflowDef,
};
