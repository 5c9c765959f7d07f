//! Schema to renderable app.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use appforge_design::profile_for_industry;
use appforge_schema::{
    AppSchema, EntityDef, NavItem, NavigationDef, PageDef, Sidebar, Surface, SurfaceNavigation,
    ThemeDef, WorkflowDef,
};

use crate::builders::build_components;
use crate::shell::{ShellKind, select_shell};

/// Knobs for one materialization run.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterializeOptions {
    /// Materialize for one audience surface: pages tagged for other
    /// surfaces are dropped and that surface's navigation tree becomes the
    /// sidebar.
    pub surface: Option<Surface>,
    /// Force a shell instead of deriving one.
    pub shell: Option<ShellKind>,
}

/// The concrete, renderable application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedApp {
    pub pages: Vec<PageDef>,
    pub navigation: NavigationDef,
    pub theme: ThemeDef,
    pub entities: Vec<EntityDef>,
    pub workflows: Vec<WorkflowDef>,
    pub shell: ShellKind,
}

/// Stateless page materializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Materializer;

impl Materializer {
    pub fn new() -> Self {
        Self
    }

    /// Expand every page of the schema into concrete component trees and
    /// assemble the final navigation and shell.
    ///
    /// Abstract component lists on the input pages are treated as preview
    /// fallbacks and replaced wholesale; the builders are the single source
    /// of render trees.
    pub fn materialize(&self, schema: &AppSchema, options: &MaterializeOptions) -> MaterializedApp {
        let profile = profile_for_industry(schema.metadata.industry.as_deref().unwrap_or(""));

        let mut pages: Vec<PageDef> = schema
            .pages
            .iter()
            .map(|page| {
                let entity = resolve_entity(page, &schema.entities);
                let mut materialized = page.clone();
                materialized.components =
                    build_components(page, entity, &schema.entities, profile);
                materialized
            })
            .collect();

        if let Some(surface) = options.surface {
            pages.retain(|p| p.surface.is_none() || p.surface == Some(surface));
        }

        let navigation = assemble_navigation(schema, &pages, options.surface);
        let shell = options
            .shell
            .unwrap_or_else(|| select_shell(profile, &schema.settings.features));

        info!(
            app = %schema.name,
            pages = pages.len(),
            shell = ?shell,
            "app materialized"
        );

        MaterializedApp {
            pages,
            navigation,
            theme: schema.theme.clone(),
            entities: schema.entities.clone(),
            workflows: schema.workflows.clone(),
            shell,
        }
    }
}

// ---------------------------------------------------------------------------
// Entity resolution
// ---------------------------------------------------------------------------

/// Resolve the entity a page is bound to.  Exact id first, then a
/// case-insensitive name or plural match, then the route's first segment.
/// No match means no entity; pages never borrow another entity's data.
pub fn resolve_entity<'a>(page: &PageDef, entities: &'a [EntityDef]) -> Option<&'a EntityDef> {
    if let Some(binding) = page.entity.as_deref() {
        if let Some(hit) = entities.iter().find(|e| e.id == binding) {
            return Some(hit);
        }
        let lower = binding.to_lowercase();
        return entities
            .iter()
            .find(|e| e.name.to_lowercase() == lower || e.plural_name.to_lowercase() == lower);
    }

    let segment = page
        .route
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or("");
    if segment.is_empty() {
        return None;
    }
    entities
        .iter()
        .find(|e| segment == e.id || segment == slugify(&e.plural_name))
}

fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

// ---------------------------------------------------------------------------
// Navigation assembly
// ---------------------------------------------------------------------------

/// Rebuild navigation against the materialized pages: auxiliary pages are
/// kept out of the sidebar, dangling items are dropped, sidebar-worthy
/// pages missing from the declared sidebar are appended, and surface trees
/// are filtered to pages that survived.
fn assemble_navigation(
    schema: &AppSchema,
    pages: &[PageDef],
    surface: Option<Surface>,
) -> NavigationDef {
    let sidebar_worthy = |id: &str| {
        pages
            .iter()
            .any(|p| p.id == id && !p.page_type.is_auxiliary() && p.navigation.show_in_sidebar)
    };

    let mut items: Vec<NavItem> = schema
        .navigation
        .sidebar
        .items
        .iter()
        .filter(|i| sidebar_worthy(&i.page))
        .cloned()
        .collect();
    for page in pages {
        if sidebar_worthy(&page.id) && !items.iter().any(|i| i.page == page.id) {
            items.push(NavItem {
                page: page.id.clone(),
                label: page.name.clone(),
                icon: page.navigation.icon.clone(),
                order: page.navigation.order,
            });
        }
    }
    items.sort_by_key(|i| i.order);

    let surfaces: Vec<SurfaceNavigation> = schema
        .navigation
        .surfaces
        .iter()
        .filter_map(|tree| {
            let items: Vec<NavItem> = tree
                .items
                .iter()
                .filter(|i| sidebar_worthy(&i.page))
                .cloned()
                .collect();
            if items.is_empty() {
                return None;
            }
            let default_page = tree
                .default_page
                .clone()
                .filter(|id| items.iter().any(|i| &i.page == id))
                .or_else(|| items.first().map(|i| i.page.clone()));
            Some(SurfaceNavigation {
                surface: tree.surface,
                items,
                default_page,
            })
        })
        .collect();

    // A surface-scoped materialization promotes that surface's tree to the
    // main sidebar.
    if let Some(surface) = surface {
        match surfaces.iter().find(|t| t.surface == surface) {
            Some(tree) => items = tree.items.clone(),
            None => debug!(surface = surface.label(), "no navigation tree for surface"),
        }
    }

    let default_page = Some(schema.navigation.default_page.clone())
        .filter(|id| !id.is_empty() && pages.iter().any(|p| &p.id == id))
        .or_else(|| items.first().map(|i| i.page.clone()))
        .or_else(|| pages.first().map(|p| p.id.clone()))
        .unwrap_or_default();

    let rules = schema
        .navigation
        .rules
        .iter()
        .filter(|r| pages.iter().any(|p| p.id == r.page))
        .cloned()
        .collect();

    NavigationDef {
        sidebar: Sidebar { items },
        rules,
        default_page,
        surfaces,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use appforge_schema::{FieldDef, FieldType, PageType, base_fields};

    fn customer() -> EntityDef {
        let mut fields = base_fields();
        fields.insert(1, FieldDef::new("name", "Name", FieldType::String).required());
        EntityDef::new("customer", "Customer", fields)
    }

    #[test]
    fn resolution_prefers_exact_id() {
        let entities = vec![customer()];
        let page = PageDef::new("x", "X", "/x", PageType::List).with_entity("customer");
        assert_eq!(resolve_entity(&page, &entities).unwrap().id, "customer");
    }

    #[test]
    fn resolution_accepts_display_names() {
        let entities = vec![customer()];
        let page = PageDef::new("x", "X", "/x", PageType::List).with_entity("Customers");
        assert_eq!(resolve_entity(&page, &entities).unwrap().id, "customer");
    }

    #[test]
    fn resolution_falls_back_to_the_route_segment() {
        let entities = vec![customer()];
        let page = PageDef::new("x", "X", "/customers/archive", PageType::List);
        assert_eq!(resolve_entity(&page, &entities).unwrap().id, "customer");
    }

    #[test]
    fn resolution_never_guesses() {
        let entities = vec![customer()];
        let page = PageDef::new("x", "X", "/orders", PageType::List).with_entity("order");
        assert!(resolve_entity(&page, &entities).is_none());
    }
}
