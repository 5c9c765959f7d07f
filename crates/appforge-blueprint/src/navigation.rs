//! Navigation assembly.
//!
//! The sidebar lists every non-auxiliary page in order.  Multi-audience
//! industries additionally get one navigation tree per surface: admins see
//! everything, staff see everything but settings, and external audiences
//! (customer/provider/patient) only see the pages for entities they
//! interact with, which in practice means schedulable and billable ones.

use tracing::debug;

use appforge_schema::{
    Behavior, EntityDef, NavItem, NavigationDef, NavigationRule, PageDef, PageType, Sidebar,
    Surface, SurfaceNavigation,
};

use appforge_design::IndustryProfile;

/// Build the complete navigation for a generated app.
pub fn build_navigation(
    entities: &[EntityDef],
    pages: &[PageDef],
    profile: &IndustryProfile,
    features: &[String],
) -> NavigationDef {
    let mut sidebar_pages: Vec<&PageDef> = pages
        .iter()
        .filter(|p| p.navigation.show_in_sidebar && !p.page_type.is_auxiliary())
        .collect();
    sidebar_pages.sort_by_key(|p| p.navigation.order);

    let items: Vec<NavItem> = sidebar_pages.iter().map(|p| nav_item(p)).collect();

    let default_page = pages
        .iter()
        .find(|p| p.page_type == PageType::Dashboard)
        .or_else(|| sidebar_pages.first().copied())
        .or_else(|| pages.first())
        .map(|p| p.id.clone())
        .unwrap_or_default();

    let audiences = surfaces_for(profile, features);
    let mut surfaces = Vec::new();
    let mut rules = Vec::new();

    if !audiences.is_empty() {
        for surface in &audiences {
            let visible: Vec<&&PageDef> = sidebar_pages
                .iter()
                .filter(|p| visible_to(p, *surface, entities))
                .collect();
            if visible.is_empty() {
                continue;
            }
            surfaces.push(SurfaceNavigation {
                surface: *surface,
                items: visible.iter().map(|p| nav_item(p)).collect(),
                default_page: Some(
                    visible
                        .iter()
                        .find(|p| p.page_type == PageType::Dashboard)
                        .unwrap_or(&visible[0])
                        .id
                        .clone(),
                ),
            });
        }

        // Settings is an admin concern once audiences are split.
        if let Some(settings) = pages.iter().find(|p| p.page_type == PageType::Settings) {
            rules.push(NavigationRule {
                page: settings.id.clone(),
                audience: Surface::Admin,
            });
        }
    }

    debug!(
        items = items.len(),
        surfaces = surfaces.len(),
        default_page = %default_page,
        "navigation assembled"
    );

    NavigationDef {
        sidebar: Sidebar { items },
        rules,
        default_page,
        surfaces,
    }
}

/// The audience surfaces an industry splits into.  Single-audience
/// industries return an empty list and get only the main sidebar.
pub fn surfaces_for(profile: &IndustryProfile, features: &[String]) -> Vec<Surface> {
    let mut surfaces: Vec<Surface> = match profile.id {
        "medical" | "dental" => vec![Surface::Admin, Surface::Provider, Surface::Patient],
        "contractor" | "construction" | "education" => {
            vec![Surface::Admin, Surface::Staff, Surface::Customer]
        }
        "salon" | "spa" | "fitness" | "restaurant" => vec![Surface::Admin, Surface::Customer],
        _ => Vec::new(),
    };

    // A requested portal implies an external audience even for industries
    // that are otherwise single-surface.
    if features.iter().any(|f| f.contains("portal")) {
        if surfaces.is_empty() {
            surfaces.push(Surface::Admin);
        }
        if !surfaces.contains(&Surface::Customer) && !surfaces.contains(&Surface::Patient) {
            surfaces.push(Surface::Customer);
        }
    }

    surfaces
}

fn nav_item(page: &PageDef) -> NavItem {
    NavItem {
        page: page.id.clone(),
        label: page.name.clone(),
        icon: page.navigation.icon.clone(),
        order: page.navigation.order,
    }
}

fn visible_to(page: &PageDef, surface: Surface, entities: &[EntityDef]) -> bool {
    match surface {
        Surface::Admin => true,
        Surface::Staff => page.page_type != PageType::Settings,
        Surface::Customer | Surface::Provider | Surface::Patient => {
            if matches!(page.page_type, PageType::Dashboard | PageType::Settings) {
                return false;
            }
            if page.page_type == PageType::Chat {
                return true;
            }
            let Some(entity_id) = page.entity.as_deref() else {
                return false;
            };
            entities.iter().any(|e| {
                e.id == entity_id
                    && (e.has_behavior(Behavior::Schedulable) || e.has_behavior(Behavior::Billable))
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{appointment_entity, customer_entity};
    use crate::pages::generate_pages;
    use appforge_design::profile_for_industry;

    fn medical_fixture() -> (Vec<EntityDef>, Vec<PageDef>) {
        let entities = vec![customer_entity(), appointment_entity()];
        let pages = generate_pages(&entities);
        (entities, pages)
    }

    #[test]
    fn sidebar_lists_non_auxiliary_pages_in_order() {
        let (entities, pages) = medical_fixture();
        let nav = build_navigation(&entities, &pages, profile_for_industry("technology"), &[]);
        assert_eq!(nav.sidebar.items[0].page, "dashboard");
        assert!(nav.sidebar.items.iter().all(|i| !i.page.ends_with("-form")));
        assert_eq!(nav.default_page, "dashboard");
        assert!(nav.surfaces.is_empty());
    }

    #[test]
    fn medical_apps_split_into_three_surfaces() {
        let (entities, pages) = medical_fixture();
        let nav = build_navigation(&entities, &pages, profile_for_industry("medical"), &[]);
        let audiences: Vec<Surface> = nav.surfaces.iter().map(|s| s.surface).collect();
        assert_eq!(
            audiences,
            vec![Surface::Admin, Surface::Provider, Surface::Patient]
        );
        // Patients only see schedulable/billable entity pages.
        let patient = nav.surface(Surface::Patient).unwrap();
        assert!(
            patient
                .items
                .iter()
                .all(|i| i.page.starts_with("appointment"))
        );
        // Settings is restricted to admins.
        assert!(
            nav.rules
                .iter()
                .any(|r| r.page == "settings" && r.audience == Surface::Admin)
        );
    }

    #[test]
    fn portal_feature_adds_a_customer_surface() {
        let (entities, pages) = medical_fixture();
        let nav = build_navigation(
            &entities,
            &pages,
            profile_for_industry("technology"),
            &["customer-portal".to_string()],
        );
        assert!(nav.surface(Surface::Customer).is_some());
        assert!(nav.surface(Surface::Admin).is_some());
    }

    #[test]
    fn admin_surface_sees_everything() {
        let (entities, pages) = medical_fixture();
        let nav = build_navigation(&entities, &pages, profile_for_industry("medical"), &[]);
        let admin = nav.surface(Surface::Admin).unwrap();
        assert_eq!(admin.items.len(), nav.sidebar.items.len());
        assert_eq!(admin.default_page.as_deref(), Some("dashboard"));
    }
}
