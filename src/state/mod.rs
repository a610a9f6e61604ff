//! Client state shared across pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser shell provides the session store to every page through a
//! `RwSignal<SessionStore>` context; `shell` decides which screen it shows.

pub mod session;
pub mod shell;
