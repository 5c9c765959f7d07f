//! The fixed design system registry.
//!
//! Every generated app uses exactly one of the systems defined here.
//! Palettes are never synthesized at runtime; selection picks a whole
//! system, and the theme projection flattens it for one mode.  Each system
//! corresponds to one psychological category (trust, care, industrial
//! strength, and so on), which is also the order used to break ties during
//! keyword matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use appforge_schema::ShadowLevel;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Identifier of a design system.  Declaration order is the category
/// priority order used to break keyword-match ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignSystemId {
    /// Trust and authority (finance, legal, insurance).
    Trust,
    /// Care and calm (medical, wellness).
    Care,
    /// Industrial strength (trades, construction, logistics).
    Industrial,
    /// Warmth and craft (food, artisan goods).
    Craft,
    /// Tech-modern.  The default when nothing else matches.
    #[default]
    Modern,
    /// Luxury and refinement (salons, boutiques).
    Luxury,
    /// Approachability (education, community, pets).
    Friendly,
    /// Data precision (analytics, engineering).
    Precision,
    /// Creative expressiveness (studios, media).
    Expressive,
    /// Energy and motion (fitness, events).
    Energy,
}

impl DesignSystemId {
    /// All ids in category priority order.
    pub const ALL: [Self; 10] = [
        Self::Trust,
        Self::Care,
        Self::Industrial,
        Self::Craft,
        Self::Modern,
        Self::Luxury,
        Self::Friendly,
        Self::Precision,
        Self::Expressive,
        Self::Energy,
    ];

    /// The stable string form stored in a theme's `designSystem` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trust => "trust",
            Self::Care => "care",
            Self::Industrial => "industrial",
            Self::Craft => "craft",
            Self::Modern => "modern",
            Self::Luxury => "luxury",
            Self::Friendly => "friendly",
            Self::Precision => "precision",
            Self::Expressive => "expressive",
            Self::Energy => "energy",
        }
    }
}

impl fmt::Display for DesignSystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DesignSystemId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trust" => Ok(Self::Trust),
            "care" => Ok(Self::Care),
            "industrial" => Ok(Self::Industrial),
            "craft" => Ok(Self::Craft),
            "modern" => Ok(Self::Modern),
            "luxury" => Ok(Self::Luxury),
            "friendly" => Ok(Self::Friendly),
            "precision" => Ok(Self::Precision),
            "expressive" => Ok(Self::Expressive),
            "energy" => Ok(Self::Energy),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One mode's worth of colors (hex strings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub danger: &'static str,
}

/// Font choices for a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typography {
    pub font_family: &'static str,
    pub heading_family: &'static str,
    pub base_size: &'static str,
}

/// Button corner treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonShape {
    Rounded,
    Pill,
    Sharp,
}

/// Card elevation treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStyle {
    Flat,
    Elevated,
    Outlined,
}

/// Table row density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableDensity {
    Comfortable,
    Compact,
}

/// Component style defaults carried by a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentPrefs {
    pub button_shape: ButtonShape,
    pub card_style: CardStyle,
    pub table_density: TableDensity,
}

/// An immutable design system record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignSystem {
    pub id: DesignSystemId,
    pub name: &'static str,
    pub light: Palette,
    pub dark: Palette,
    pub typography: Typography,
    pub border_radius: &'static str,
    pub spacing_unit: &'static str,
    pub shadow: ShadowLevel,
    pub animation_speed: &'static str,
    pub animation_easing: &'static str,
    pub components: ComponentPrefs,
}

// ---------------------------------------------------------------------------
// The registry
// ---------------------------------------------------------------------------

pub static TRUST: DesignSystem = DesignSystem {
    id: DesignSystemId::Trust,
    name: "Trust",
    light: Palette {
        primary: "#1d4ed8",
        accent: "#0ea5e9",
        background: "#f8fafc",
        surface: "#ffffff",
        text: "#0f172a",
        text_muted: "#64748b",
        success: "#16a34a",
        warning: "#d97706",
        danger: "#dc2626",
    },
    dark: Palette {
        primary: "#3b82f6",
        accent: "#38bdf8",
        background: "#0f172a",
        surface: "#1e293b",
        text: "#f1f5f9",
        text_muted: "#94a3b8",
        success: "#22c55e",
        warning: "#f59e0b",
        danger: "#ef4444",
    },
    typography: Typography {
        font_family: "Inter, system-ui, sans-serif",
        heading_family: "Inter, system-ui, sans-serif",
        base_size: "15px",
    },
    border_radius: "6px",
    spacing_unit: "8px",
    shadow: ShadowLevel::Subtle,
    animation_speed: "150ms",
    animation_easing: "ease-out",
    components: ComponentPrefs {
        button_shape: ButtonShape::Rounded,
        card_style: CardStyle::Outlined,
        table_density: TableDensity::Comfortable,
    },
};

pub static CARE: DesignSystem = DesignSystem {
    id: DesignSystemId::Care,
    name: "Care",
    light: Palette {
        primary: "#0d9488",
        accent: "#06b6d4",
        background: "#f0fdfa",
        surface: "#ffffff",
        text: "#134e4a",
        text_muted: "#6b7280",
        success: "#16a34a",
        warning: "#d97706",
        danger: "#dc2626",
    },
    dark: Palette {
        primary: "#2dd4bf",
        accent: "#22d3ee",
        background: "#042f2e",
        surface: "#134e4a",
        text: "#ccfbf1",
        text_muted: "#94a3b8",
        success: "#4ade80",
        warning: "#fbbf24",
        danger: "#f87171",
    },
    typography: Typography {
        font_family: "'Nunito Sans', system-ui, sans-serif",
        heading_family: "'Nunito Sans', system-ui, sans-serif",
        base_size: "15px",
    },
    border_radius: "12px",
    spacing_unit: "8px",
    shadow: ShadowLevel::Subtle,
    animation_speed: "200ms",
    animation_easing: "ease-in-out",
    components: ComponentPrefs {
        button_shape: ButtonShape::Pill,
        card_style: CardStyle::Elevated,
        table_density: TableDensity::Comfortable,
    },
};

pub static INDUSTRIAL: DesignSystem = DesignSystem {
    id: DesignSystemId::Industrial,
    name: "Industrial",
    light: Palette {
        primary: "#1e293b",
        accent: "#f59e0b",
        background: "#f1f5f9",
        surface: "#ffffff",
        text: "#0f172a",
        text_muted: "#64748b",
        success: "#16a34a",
        warning: "#d97706",
        danger: "#b91c1c",
    },
    dark: Palette {
        primary: "#475569",
        accent: "#fbbf24",
        background: "#0f172a",
        surface: "#1e293b",
        text: "#e2e8f0",
        text_muted: "#94a3b8",
        success: "#22c55e",
        warning: "#fbbf24",
        danger: "#ef4444",
    },
    typography: Typography {
        font_family: "Barlow, system-ui, sans-serif",
        heading_family: "'Barlow Condensed', system-ui, sans-serif",
        base_size: "15px",
    },
    border_radius: "4px",
    spacing_unit: "8px",
    shadow: ShadowLevel::Medium,
    animation_speed: "100ms",
    animation_easing: "ease-out",
    components: ComponentPrefs {
        button_shape: ButtonShape::Sharp,
        card_style: CardStyle::Outlined,
        table_density: TableDensity::Compact,
    },
};

pub static CRAFT: DesignSystem = DesignSystem {
    id: DesignSystemId::Craft,
    name: "Craft",
    light: Palette {
        primary: "#c2410c",
        accent: "#ca8a04",
        background: "#fffbeb",
        surface: "#ffffff",
        text: "#431407",
        text_muted: "#78716c",
        success: "#65a30d",
        warning: "#d97706",
        danger: "#dc2626",
    },
    dark: Palette {
        primary: "#fb923c",
        accent: "#facc15",
        background: "#1c1917",
        surface: "#292524",
        text: "#fafaf9",
        text_muted: "#a8a29e",
        success: "#84cc16",
        warning: "#fbbf24",
        danger: "#f87171",
    },
    typography: Typography {
        font_family: "Karla, system-ui, sans-serif",
        heading_family: "Lora, Georgia, serif",
        base_size: "15px",
    },
    border_radius: "10px",
    spacing_unit: "8px",
    shadow: ShadowLevel::Subtle,
    animation_speed: "250ms",
    animation_easing: "ease-in-out",
    components: ComponentPrefs {
        button_shape: ButtonShape::Rounded,
        card_style: CardStyle::Elevated,
        table_density: TableDensity::Comfortable,
    },
};

pub static MODERN: DesignSystem = DesignSystem {
    id: DesignSystemId::Modern,
    name: "Modern",
    light: Palette {
        primary: "#6366f1",
        accent: "#8b5cf6",
        background: "#fafafa",
        surface: "#ffffff",
        text: "#18181b",
        text_muted: "#71717a",
        success: "#22c55e",
        warning: "#f59e0b",
        danger: "#ef4444",
    },
    dark: Palette {
        primary: "#818cf8",
        accent: "#a78bfa",
        background: "#09090b",
        surface: "#18181b",
        text: "#fafafa",
        text_muted: "#a1a1aa",
        success: "#4ade80",
        warning: "#fbbf24",
        danger: "#f87171",
    },
    typography: Typography {
        font_family: "Inter, system-ui, sans-serif",
        heading_family: "Inter, system-ui, sans-serif",
        base_size: "15px",
    },
    border_radius: "8px",
    spacing_unit: "8px",
    shadow: ShadowLevel::Subtle,
    animation_speed: "150ms",
    animation_easing: "cubic-bezier(0.4, 0, 0.2, 1)",
    components: ComponentPrefs {
        button_shape: ButtonShape::Rounded,
        card_style: CardStyle::Flat,
        table_density: TableDensity::Comfortable,
    },
};

pub static LUXURY: DesignSystem = DesignSystem {
    id: DesignSystemId::Luxury,
    name: "Luxury",
    light: Palette {
        primary: "#1c1917",
        accent: "#ca8a04",
        background: "#fafaf9",
        surface: "#ffffff",
        text: "#1c1917",
        text_muted: "#78716c",
        success: "#15803d",
        warning: "#b45309",
        danger: "#b91c1c",
    },
    dark: Palette {
        primary: "#e7e5e4",
        accent: "#eab308",
        background: "#0c0a09",
        surface: "#1c1917",
        text: "#f5f5f4",
        text_muted: "#a8a29e",
        success: "#22c55e",
        warning: "#eab308",
        danger: "#ef4444",
    },
    typography: Typography {
        font_family: "Montserrat, system-ui, sans-serif",
        heading_family: "'Cormorant Garamond', Georgia, serif",
        base_size: "15px",
    },
    border_radius: "2px",
    spacing_unit: "10px",
    shadow: ShadowLevel::Medium,
    animation_speed: "300ms",
    animation_easing: "ease",
    components: ComponentPrefs {
        button_shape: ButtonShape::Sharp,
        card_style: CardStyle::Elevated,
        table_density: TableDensity::Comfortable,
    },
};

pub static FRIENDLY: DesignSystem = DesignSystem {
    id: DesignSystemId::Friendly,
    name: "Friendly",
    light: Palette {
        primary: "#ea580c",
        accent: "#0284c7",
        background: "#fff7ed",
        surface: "#ffffff",
        text: "#1f2937",
        text_muted: "#6b7280",
        success: "#16a34a",
        warning: "#d97706",
        danger: "#dc2626",
    },
    dark: Palette {
        primary: "#fb923c",
        accent: "#38bdf8",
        background: "#1c1917",
        surface: "#292524",
        text: "#fafaf9",
        text_muted: "#a8a29e",
        success: "#4ade80",
        warning: "#fbbf24",
        danger: "#f87171",
    },
    typography: Typography {
        font_family: "Nunito, system-ui, sans-serif",
        heading_family: "Quicksand, system-ui, sans-serif",
        base_size: "16px",
    },
    border_radius: "16px",
    spacing_unit: "8px",
    shadow: ShadowLevel::Subtle,
    animation_speed: "200ms",
    animation_easing: "ease-out",
    components: ComponentPrefs {
        button_shape: ButtonShape::Pill,
        card_style: CardStyle::Elevated,
        table_density: TableDensity::Comfortable,
    },
};

pub static PRECISION: DesignSystem = DesignSystem {
    id: DesignSystemId::Precision,
    name: "Precision",
    light: Palette {
        primary: "#334155",
        accent: "#0891b2",
        background: "#ffffff",
        surface: "#f8fafc",
        text: "#0f172a",
        text_muted: "#64748b",
        success: "#059669",
        warning: "#d97706",
        danger: "#dc2626",
    },
    dark: Palette {
        primary: "#64748b",
        accent: "#22d3ee",
        background: "#020617",
        surface: "#0f172a",
        text: "#e2e8f0",
        text_muted: "#94a3b8",
        success: "#34d399",
        warning: "#fbbf24",
        danger: "#f87171",
    },
    typography: Typography {
        font_family: "'IBM Plex Sans', system-ui, sans-serif",
        heading_family: "'IBM Plex Sans', system-ui, sans-serif",
        base_size: "14px",
    },
    border_radius: "4px",
    spacing_unit: "6px",
    shadow: ShadowLevel::None,
    animation_speed: "100ms",
    animation_easing: "linear",
    components: ComponentPrefs {
        button_shape: ButtonShape::Sharp,
        card_style: CardStyle::Outlined,
        table_density: TableDensity::Compact,
    },
};

pub static EXPRESSIVE: DesignSystem = DesignSystem {
    id: DesignSystemId::Expressive,
    name: "Expressive",
    light: Palette {
        primary: "#c026d3",
        accent: "#7c3aed",
        background: "#fdf4ff",
        surface: "#ffffff",
        text: "#1e1b4b",
        text_muted: "#6b7280",
        success: "#16a34a",
        warning: "#d97706",
        danger: "#e11d48",
    },
    dark: Palette {
        primary: "#e879f9",
        accent: "#a78bfa",
        background: "#13111c",
        surface: "#221d2e",
        text: "#faf5ff",
        text_muted: "#9ca3af",
        success: "#4ade80",
        warning: "#fbbf24",
        danger: "#fb7185",
    },
    typography: Typography {
        font_family: "'Work Sans', system-ui, sans-serif",
        heading_family: "'Space Grotesk', system-ui, sans-serif",
        base_size: "15px",
    },
    border_radius: "20px",
    spacing_unit: "8px",
    shadow: ShadowLevel::Pronounced,
    animation_speed: "300ms",
    animation_easing: "cubic-bezier(0.68, -0.55, 0.265, 1.55)",
    components: ComponentPrefs {
        button_shape: ButtonShape::Pill,
        card_style: CardStyle::Elevated,
        table_density: TableDensity::Comfortable,
    },
};

pub static ENERGY: DesignSystem = DesignSystem {
    id: DesignSystemId::Energy,
    name: "Energy",
    light: Palette {
        primary: "#dc2626",
        accent: "#f59e0b",
        background: "#fef2f2",
        surface: "#ffffff",
        text: "#1c1917",
        text_muted: "#71717a",
        success: "#16a34a",
        warning: "#d97706",
        danger: "#991b1b",
    },
    dark: Palette {
        primary: "#ef4444",
        accent: "#fbbf24",
        background: "#0a0a0a",
        surface: "#171717",
        text: "#fafafa",
        text_muted: "#a3a3a3",
        success: "#4ade80",
        warning: "#fbbf24",
        danger: "#fca5a5",
    },
    typography: Typography {
        font_family: "Archivo, system-ui, sans-serif",
        heading_family: "'Archivo Black', system-ui, sans-serif",
        base_size: "15px",
    },
    border_radius: "6px",
    spacing_unit: "8px",
    shadow: ShadowLevel::Medium,
    animation_speed: "100ms",
    animation_easing: "ease-in",
    components: ComponentPrefs {
        button_shape: ButtonShape::Sharp,
        card_style: CardStyle::Flat,
        table_density: TableDensity::Comfortable,
    },
};

/// All systems in category priority order.
pub static REGISTRY: [&DesignSystem; 10] = [
    &TRUST,
    &CARE,
    &INDUSTRIAL,
    &CRAFT,
    &MODERN,
    &LUXURY,
    &FRIENDLY,
    &PRECISION,
    &EXPRESSIVE,
    &ENERGY,
];

/// Look up a system by id.
pub fn system(id: DesignSystemId) -> &'static DesignSystem {
    match id {
        DesignSystemId::Trust => &TRUST,
        DesignSystemId::Care => &CARE,
        DesignSystemId::Industrial => &INDUSTRIAL,
        DesignSystemId::Craft => &CRAFT,
        DesignSystemId::Modern => &MODERN,
        DesignSystemId::Luxury => &LUXURY,
        DesignSystemId::Friendly => &FRIENDLY,
        DesignSystemId::Precision => &PRECISION,
        DesignSystemId::Expressive => &EXPRESSIVE,
        DesignSystemId::Energy => &ENERGY,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_id_once() {
        assert_eq!(REGISTRY.len(), DesignSystemId::ALL.len());
        for (sys, id) in REGISTRY.iter().zip(DesignSystemId::ALL) {
            assert_eq!(sys.id, id);
            assert!(std::ptr::eq(*sys, system(id)));
        }
    }

    #[test]
    fn pinned_brand_colors() {
        assert_eq!(CARE.light.primary, "#0d9488");
        assert_eq!(INDUSTRIAL.light.primary, "#1e293b");
    }

    #[test]
    fn every_palette_is_fully_specified() {
        for sys in REGISTRY {
            for palette in [&sys.light, &sys.dark] {
                for color in [
                    palette.primary,
                    palette.accent,
                    palette.background,
                    palette.surface,
                    palette.text,
                    palette.text_muted,
                    palette.success,
                    palette.warning,
                    palette.danger,
                ] {
                    assert!(color.starts_with('#'), "{}: bad color {color}", sys.name);
                    assert_eq!(color.len(), 7, "{}: bad color {color}", sys.name);
                }
            }
            assert!(!sys.border_radius.is_empty());
            assert!(!sys.typography.font_family.is_empty());
        }
    }

    #[test]
    fn id_string_round_trip() {
        for id in DesignSystemId::ALL {
            assert_eq!(id.as_str().parse::<DesignSystemId>(), Ok(id));
        }
        assert!("neon".parse::<DesignSystemId>().is_err());
    }

    #[test]
    fn id_serializes_snake_case() {
        let json = serde_json::to_string(&DesignSystemId::Modern).unwrap();
        assert_eq!(json, "\"modern\"");
    }

    #[test]
    fn default_id_is_modern() {
        assert_eq!(DesignSystemId::default(), DesignSystemId::Modern);
    }
}
