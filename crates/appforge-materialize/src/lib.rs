//! Page materialization for AppForge.
//!
//! The synthesizer produces abstract page definitions; this crate expands
//! them into concrete component trees a renderer can draw:
//!
//! - **Dashboard composition**: the "Now → Work → Context" section
//!   narrative with canonical ordering rules ([`dashboard`]).
//! - **Page builders**: one builder per page type, from data tables and
//!   forms to kanban boards and chat threads ([`builders`]).
//! - **Shell selection**: the outer layout preset ([`shell`]).
//! - **Assembly**: [`Materializer::materialize`] resolves entity bindings,
//!   runs the builders, and rebuilds navigation against the pages that
//!   actually exist.

pub mod builders;
pub mod dashboard;
pub mod display;
pub mod materializer;
pub mod shell;

pub use builders::build_components;
pub use dashboard::{
    ContextualAction, DashboardIntent, DashboardSection, ListBinding, MetricAggregate, MetricSpec,
    compose, normalize,
};
pub use display::{column_format, input_kind, is_person_entity};
pub use materializer::{MaterializeOptions, MaterializedApp, Materializer, resolve_entity};
pub use shell::{ShellKind, select_shell};
