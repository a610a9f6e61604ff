//! Screen-level views.
//!
//! ARCHITECTURE
//! ============
//! Each page pairs a plain state type (form or filter fields, results,
//! loading and error flags) with a Leptos component that owns it in an
//! `RwSignal`. Components read the session and gateway from context; the
//! state types take them as arguments, which is how the terminal front end
//! and the unit tests drive them without a reactive runtime.

pub mod auth;
pub mod dashboard;
pub mod explorer;
