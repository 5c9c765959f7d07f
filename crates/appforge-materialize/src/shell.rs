//! Application shell selection.

use serde::{Deserialize, Serialize};

use appforge_design::IndustryProfile;

/// The outer layout the renderer wraps pages in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellKind {
    /// Persistent left sidebar.  The default for back-office work.
    #[default]
    Sidebar,
    /// Horizontal navigation bar for front-of-house, touch-friendly use.
    Topbar,
    /// Two-pane layout with a persistent list beside the content area.
    Split,
    /// Minimal chrome around a single task.
    Focus,
}

/// Pick a shell from the industry profile and enabled features.
///
/// Messaging-centric apps need the conversation list always on screen;
/// counter-service industries work standing up on tablets; a pure booking
/// app is one task and gets minimal chrome.  Everything else is a desk app.
pub fn select_shell(profile: &IndustryProfile, features: &[String]) -> ShellKind {
    if features.iter().any(|f| f == "messaging" || f == "chat") {
        return ShellKind::Split;
    }
    if matches!(profile.id, "restaurant" | "salon" | "spa" | "fitness") {
        return ShellKind::Topbar;
    }
    // Only a generic single-purpose booking app drops the chrome; industry
    // apps keep their full navigation.
    if profile.id == "general"
        && features.len() == 1
        && matches!(features[0].as_str(), "booking" | "scheduling")
    {
        return ShellKind::Focus;
    }
    ShellKind::Sidebar
}

#[cfg(test)]
mod tests {
    use super::*;
    use appforge_design::profile_for_industry;

    #[test]
    fn messaging_wins_over_industry() {
        let shell = select_shell(
            profile_for_industry("restaurant"),
            &["messaging".to_string()],
        );
        assert_eq!(shell, ShellKind::Split);
    }

    #[test]
    fn counter_service_industries_get_a_topbar() {
        assert_eq!(
            select_shell(profile_for_industry("salon"), &[]),
            ShellKind::Topbar
        );
    }

    #[test]
    fn single_purpose_booking_gets_focus_chrome() {
        assert_eq!(
            select_shell(profile_for_industry("general"), &["booking".to_string()]),
            ShellKind::Focus
        );
    }

    #[test]
    fn default_is_a_sidebar_desk_app() {
        assert_eq!(
            select_shell(profile_for_industry("technology"), &[]),
            ShellKind::Sidebar
        );
    }
}
