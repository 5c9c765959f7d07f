//! Navigation model.
//!
//! One sidebar for single-audience apps; multi-surface products additionally
//! carry one [`SurfaceNavigation`] per audience, each filtered to that
//! surface's pages.

use serde::{Deserialize, Serialize};

use crate::page::Surface;

/// A single sidebar entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    /// Target page id.
    pub page: String,
    /// Display label.
    pub label: String,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Sort order (ascending).
    #[serde(default)]
    pub order: u32,
}

/// The sidebar itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidebar {
    /// Ordered entries.
    #[serde(default)]
    pub items: Vec<NavItem>,
}

/// Restricts a page to one audience in the navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRule {
    /// The page the rule applies to.
    pub page: String,
    /// The only audience that sees the page.
    pub audience: Surface,
}

/// A navigation tree for one audience surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceNavigation {
    /// The audience this tree belongs to.
    pub surface: Surface,
    /// Ordered entries, filtered to the surface's pages.
    #[serde(default)]
    pub items: Vec<NavItem>,
    /// Landing page for this surface, when it differs from the app default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_page: Option<String>,
}

/// The complete navigation definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationDef {
    /// The main sidebar.
    #[serde(default)]
    pub sidebar: Sidebar,
    /// Audience visibility rules.
    #[serde(default)]
    pub rules: Vec<NavigationRule>,
    /// Id of the page shown on app load.  Validation guarantees it
    /// resolves to a real page.
    #[serde(default)]
    pub default_page: String,
    /// Per-audience navigation trees (empty for single-audience apps).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub surfaces: Vec<SurfaceNavigation>,
}

impl NavigationDef {
    /// Look up the navigation tree for an audience surface.
    pub fn surface(&self, surface: Surface) -> Option<&SurfaceNavigation> {
        self.surfaces.iter().find(|s| s.surface == surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_lookup() {
        let nav = NavigationDef {
            surfaces: vec![SurfaceNavigation {
                surface: Surface::Staff,
                items: vec![NavItem {
                    page: "jobs".into(),
                    label: "Jobs".into(),
                    icon: None,
                    order: 0,
                }],
                default_page: Some("jobs".into()),
            }],
            ..NavigationDef::default()
        };
        assert!(nav.surface(Surface::Staff).is_some());
        assert!(nav.surface(Surface::Customer).is_none());
    }

    #[test]
    fn empty_surfaces_are_omitted_from_json() {
        let nav = NavigationDef::default();
        let json = serde_json::to_value(&nav).unwrap();
        assert!(json.get("surfaces").is_none());
        assert!(json.get("rules").is_some());
    }
}
