//! Schema synthesis for AppForge.
//!
//! This crate turns a [`GenerationContext`] (free-text prompt plus optional
//! structured NLU output) into a complete [`appforge_schema::AppSchema`]:
//!
//! - **Entities**: derived from hints, features, or the prompt's main noun,
//!   degrading to a generic item tracker ([`entities`]).
//! - **Pages**: list/detail/form per entity, plus calendar, board, chat,
//!   dashboard, and settings where the entities call for them ([`pages`]).
//! - **Workflows**: a create/update/delete trio per entity ([`workflows`]).
//! - **Navigation**: sidebar plus per-audience surfaces ([`navigation`]).
//! - **Revision**: narrow patches over an existing schema ([`revision`]).
//!
//! Entry point: [`Synthesizer::generate`].  Generation never fails; missing
//! signal degrades to defaults and is reported through
//! [`GenerationOutcome::warnings`].

pub mod entities;
pub mod intelligence;
pub mod navigation;
pub mod pages;
pub mod revision;
pub mod synthesizer;
pub mod workflows;

pub use entities::{derive_entities, entity_from_hint, feature_entity};
pub use intelligence::{
    EntityHint, GenerationContext, IntelligenceInput, ParsedUtterance,
};
pub use navigation::{build_navigation, surfaces_for};
pub use pages::{generate_pages, pages_for_entity};
pub use revision::{RevisionKind, classify, revise};
pub use synthesizer::{GenerationOutcome, Synthesizer};
pub use workflows::{crud_workflows, generate_workflows};
