//! Concrete theme carried by a schema.
//!
//! A [`ThemeDef`] is the flattened, single-mode projection of a design
//! system: the values a renderer applies directly.  Themes are never built
//! by hand; the design crate projects them from its fixed system registry,
//! and the validator refills broken ones from the default system.

use serde::{Deserialize, Serialize};

/// Light or dark rendering mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Resolved color values (hex strings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Primary brand/action color.
    pub primary: String,
    /// Secondary accent color.
    pub accent: String,
    /// Page background.
    pub background: String,
    /// Card/panel surface.
    pub surface: String,
    /// Main text color.
    pub text: String,
    /// Secondary text color.
    pub text_muted: String,
    /// Success state color.
    pub success: String,
    /// Warning state color.
    pub warning: String,
    /// Error state color.
    pub danger: String,
}

/// Font choices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTypography {
    /// Body font stack.
    pub font_family: String,
    /// Heading font stack (falls back to the body stack).
    pub heading_family: String,
    /// Base font size (CSS length, e.g. `15px`).
    pub base_size: String,
}

/// Shadow depth preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowLevel {
    None,
    #[default]
    Subtle,
    Medium,
    Pronounced,
}

/// Motion preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationPrefs {
    /// Transition duration (CSS time, e.g. `150ms`).
    pub speed: String,
    /// Easing curve.
    pub easing: String,
}

/// The decorative backdrop a surface renders behind its content.  Always
/// derived from the design system id, never chosen independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backdrop {
    #[default]
    Solid,
    SoftGradient,
    Mesh,
    Paper,
    Carbon,
}

/// Optional repeating decoration over the backdrop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decoration {
    #[default]
    None,
    Dots,
    Grid,
    Waves,
}

/// The surface atmosphere derived from a design system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Atmosphere {
    /// Backdrop style.
    pub backdrop: Backdrop,
    /// Repeating decoration.
    pub decoration: Decoration,
}

/// The complete theme applied to a generated application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDef {
    /// Id of the design system this theme was projected from.
    pub design_system: String,
    /// Light or dark mode.
    #[serde(default)]
    pub mode: ThemeMode,
    /// Resolved colors.
    pub colors: ThemeColors,
    /// Font choices.
    pub typography: ThemeTypography,
    /// Corner radius (CSS length, e.g. `8px`).
    pub border_radius: String,
    /// Base spacing unit (CSS length).
    pub spacing_unit: String,
    /// Shadow depth.
    #[serde(default)]
    pub shadow: ShadowLevel,
    /// Motion preset.
    pub animation: AnimationPrefs,
    /// Derived surface atmosphere.
    #[serde(default)]
    pub atmosphere: Atmosphere,
}

impl ThemeDef {
    /// Whether the theme carries the minimum a renderer needs: a primary
    /// color, a mode, and a border radius.  Used by the validator.
    pub fn is_renderable(&self) -> bool {
        !self.colors.primary.is_empty() && !self.border_radius.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_not_renderable() {
        assert!(!ThemeDef::default().is_renderable());
    }

    #[test]
    fn mode_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
    }
}
