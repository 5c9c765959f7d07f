//! Design system selection for AppForge.
//!
//! This crate provides:
//!
//! - **System registry**: Ten fixed design systems, one per psychological
//!   category, via [`systems::REGISTRY`].
//! - **Selection**: Deterministic industry lookup and keyword matching via
//!   [`selector::for_industry`] and [`selector::by_intent`].
//! - **Industry profiles**: Domain vocabulary per industry via
//!   [`profiles::profile_for_industry`].
//! - **Theme projection**: Pure flattening of a system into a renderable
//!   theme via [`theme::design_system_to_theme`].
//!
//! Systems are never blended and palettes are never synthesized; an app
//! picks exactly one system and projects it for one mode.

pub mod profiles;
pub mod selector;
pub mod systems;
pub mod theme;

pub use profiles::{GENERIC, IndustryProfile, IndustryVocabulary, PROFILES, profile_for_industry};
pub use selector::{by_intent, by_text, for_industry, industry_system_id};
pub use systems::{
    ButtonShape, CardStyle, ComponentPrefs, DesignSystem, DesignSystemId, Palette, REGISTRY,
    TableDensity, Typography, system,
};
pub use theme::{atmosphere_for, default_theme, design_system_to_theme};
