//! Projection from a design system to a concrete theme.
//!
//! Projection is pure: the same system and mode always produce the same
//! [`ThemeDef`], and the atmosphere comes from the system id alone.

use tracing::debug;

use appforge_schema::{
    AnimationPrefs, Atmosphere, Backdrop, Decoration, ThemeColors, ThemeDef, ThemeMode,
    ThemeTypography,
};

use crate::systems::{DesignSystem, DesignSystemId, MODERN, Palette};

/// Flatten a design system into the theme a renderer consumes.
pub fn design_system_to_theme(system: &DesignSystem, mode: ThemeMode) -> ThemeDef {
    let palette = match mode {
        ThemeMode::Light => &system.light,
        ThemeMode::Dark => &system.dark,
    };

    debug!(system = %system.id, mode = ?mode, "projecting design system to theme");

    ThemeDef {
        design_system: system.id.as_str().to_string(),
        mode,
        colors: colors_from(palette),
        typography: ThemeTypography {
            font_family: system.typography.font_family.to_string(),
            heading_family: system.typography.heading_family.to_string(),
            base_size: system.typography.base_size.to_string(),
        },
        border_radius: system.border_radius.to_string(),
        spacing_unit: system.spacing_unit.to_string(),
        shadow: system.shadow,
        animation: AnimationPrefs {
            speed: system.animation_speed.to_string(),
            easing: system.animation_easing.to_string(),
        },
        atmosphere: atmosphere_for(system.id),
    }
}

/// The neutral default theme used when no industry signal exists.
pub fn default_theme(mode: ThemeMode) -> ThemeDef {
    design_system_to_theme(&MODERN, mode)
}

/// Atmosphere for a system id.  Fixed pairing, never chosen independently
/// of the system.
pub fn atmosphere_for(id: DesignSystemId) -> Atmosphere {
    let (backdrop, decoration) = match id {
        DesignSystemId::Trust => (Backdrop::Solid, Decoration::None),
        DesignSystemId::Care => (Backdrop::SoftGradient, Decoration::None),
        DesignSystemId::Industrial => (Backdrop::Carbon, Decoration::Grid),
        DesignSystemId::Craft => (Backdrop::Paper, Decoration::Dots),
        DesignSystemId::Modern => (Backdrop::Solid, Decoration::None),
        DesignSystemId::Luxury => (Backdrop::Solid, Decoration::None),
        DesignSystemId::Friendly => (Backdrop::SoftGradient, Decoration::Waves),
        DesignSystemId::Precision => (Backdrop::Solid, Decoration::Grid),
        DesignSystemId::Expressive => (Backdrop::Mesh, Decoration::Dots),
        DesignSystemId::Energy => (Backdrop::Carbon, Decoration::None),
    };
    Atmosphere {
        backdrop,
        decoration,
    }
}

fn colors_from(palette: &Palette) -> ThemeColors {
    ThemeColors {
        primary: palette.primary.to_string(),
        accent: palette.accent.to_string(),
        background: palette.background.to_string(),
        surface: palette.surface.to_string(),
        text: palette.text.to_string(),
        text_muted: palette.text_muted.to_string(),
        success: palette.success.to_string(),
        warning: palette.warning.to_string(),
        danger: palette.danger.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
