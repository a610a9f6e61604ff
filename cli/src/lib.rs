//! Terminal front end for the Agricompass marketplace client.
//!
//! ARCHITECTURE
//! ============
//! [`terminal::Terminal`] plays the part the browser shell plays in the web
//! build: it owns the session store (persisted by [`storage::FileStorage`])
//! and the gateway, drives the page state types from `agricompass::pages`,
//! and hands them to [`render`] for text output. `main.rs` maps subcommands
//! onto it.

pub mod config;
pub mod render;
pub mod storage;
pub mod terminal;
