//! Page generation.
//!
//! Each entity gets a list, detail, and form page; a calendar when it is
//! schedulable (or has a usable date field); a kanban board when it has a
//! status field.  Apps with two or more entities get a dashboard at `/`;
//! single-entity apps make the entity's list page the home route.  Message
//! entities get a chat page instead of a list.  Components stay empty at
//! this stage; the materializer expands pages at render time.

use tracing::debug;

use appforge_schema::{Behavior, EntityDef, PageDef, PageType, pluralize};

use crate::entities::slug;

/// Generate all pages for the derived entities.
pub fn generate_pages(entities: &[EntityDef]) -> Vec<PageDef> {
    let mut pages = Vec::new();
    let multi_entity = entities.len() >= 2;

    if multi_entity {
        pages.push(dashboard_page());
    }

    let mut order = 1u32;
    for entity in entities {
        let entity_pages = pages_for_entity(entity, &mut order);
        pages.extend(entity_pages);
    }

    // Single-entity apps use the main collection page as the home route.
    if !multi_entity
        && let Some(first) = pages.iter_mut().find(|p| !p.page_type.is_auxiliary())
    {
        first.route = "/".to_string();
    }

    pages.push(settings_page());
    debug!(count = pages.len(), "pages generated");
    pages
}

/// Pages for a single entity.  `order` advances across calls so sidebar
/// entries keep the entity ordering.
pub fn pages_for_entity(entity: &EntityDef, order: &mut u32) -> Vec<PageDef> {
    let plural_slug = slug(&pluralize(&entity.id));
    let base_route = format!("/{plural_slug}");
    let mut pages = Vec::new();

    if entity.id == "message" {
        // Conversations get a chat surface instead of a table.
        let mut chat = PageDef::new(
            format!("{plural_slug}-chat"),
            entity.plural_name.clone(),
            base_route.clone(),
            PageType::Chat,
        )
        .with_entity(&entity.id)
        .with_order(*order);
        chat.navigation.icon = entity.icon.clone();
        pages.push(chat);
        *order += 1;
    } else {
        let mut list = PageDef::new(
            format!("{plural_slug}-list"),
            entity.plural_name.clone(),
            base_route.clone(),
            PageType::List,
        )
        .with_entity(&entity.id)
        .with_order(*order);
        list.navigation.icon = entity.icon.clone();
        pages.push(list);
        *order += 1;

        pages.push(
            PageDef::new(
                format!("{}-detail", entity.id),
                format!("{} Details", entity.name),
                format!("{base_route}/:id"),
                PageType::Detail,
            )
            .with_entity(&entity.id),
        );
    }

    pages.push(
        PageDef::new(
            format!("{}-form", entity.id),
            format!("New {}", entity.name),
            format!("{base_route}/new"),
            PageType::Form,
        )
        .with_entity(&entity.id),
    );

    if entity.has_behavior(Behavior::Schedulable) || entity.date_field().is_some() {
        let mut calendar = PageDef::new(
            format!("{}-calendar", entity.id),
            format!("{} Calendar", entity.plural_name),
            format!("{base_route}/calendar"),
            PageType::Calendar,
        )
        .with_entity(&entity.id)
        .with_order(*order);
        calendar.navigation.icon = Some("calendar".to_string());
        pages.push(calendar);
        *order += 1;
    }

    if entity.status_field().is_some() {
        let mut board = PageDef::new(
            format!("{}-board", entity.id),
            format!("{} Board", entity.plural_name),
            format!("{base_route}/board"),
            PageType::Kanban,
        )
        .with_entity(&entity.id)
        .with_order(*order);
        board.navigation.icon = Some("columns".to_string());
        pages.push(board);
        *order += 1;
    }

    pages
}

/// The overview dashboard at `/`.
pub fn dashboard_page() -> PageDef {
    let mut page = PageDef::new("dashboard", "Dashboard", "/", PageType::Dashboard).with_order(0);
    page.navigation.icon = Some("home".to_string());
    page
}

/// The settings shell, pinned to the bottom of the sidebar.
pub fn settings_page() -> PageDef {
    let mut page =
        PageDef::new("settings", "Settings", "/settings", PageType::Settings).with_order(99);
    page.navigation.icon = Some("settings".to_string());
    page
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{appointment_entity, customer_entity, item_entity, message_entity};

    #[test]
    fn schedulable_entity_gets_calendar_and_board() {
        let mut order = 1;
        let pages = pages_for_entity(&appointment_entity(), &mut order);
        let types: Vec<PageType> = pages.iter().map(|p| p.page_type).collect();
        assert!(types.contains(&PageType::List));
        assert!(types.contains(&PageType::Detail));
        assert!(types.contains(&PageType::Form));
        assert!(types.contains(&PageType::Calendar));
        assert!(types.contains(&PageType::Kanban));
    }

    #[test]
    fn plain_entity_gets_only_the_core_trio() {
        let mut order = 1;
        let pages = pages_for_entity(&item_entity(), &mut order);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].route, "/items");
        assert_eq!(pages[1].route, "/items/:id");
        assert_eq!(pages[2].route, "/items/new");
    }

    #[test]
    fn message_entity_gets_a_chat_page() {
        let mut order = 1;
        let pages = pages_for_entity(&message_entity(), &mut order);
        assert_eq!(pages[0].page_type, PageType::Chat);
        assert!(pages.iter().all(|p| p.page_type != PageType::List));
    }

    #[test]
    fn multi_entity_apps_get_a_dashboard_at_root() {
        let pages = generate_pages(&[customer_entity(), appointment_entity()]);
        let dashboard = pages.iter().find(|p| p.page_type == PageType::Dashboard);
        assert_eq!(dashboard.unwrap().route, "/");
        assert_eq!(pages.iter().filter(|p| p.route == "/").count(), 1);
    }

    #[test]
    fn single_entity_apps_promote_the_list_to_home() {
        let pages = generate_pages(&[customer_entity()]);
        assert!(pages.iter().all(|p| p.page_type != PageType::Dashboard));
        let home = pages.iter().find(|p| p.route == "/").unwrap();
        assert_eq!(home.page_type, PageType::List);
    }

    #[test]
    fn auxiliary_pages_stay_out_of_the_sidebar() {
        let pages = generate_pages(&[customer_entity(), appointment_entity()]);
        for page in pages {
            if page.page_type.is_auxiliary() {
                assert!(!page.navigation.show_in_sidebar, "{}", page.id);
            }
        }
    }
}
