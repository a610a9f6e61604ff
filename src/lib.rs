//! Agricompass marketplace client.
//!
//! ARCHITECTURE
//! ============
//! `state::session` holds the signed-in identity and bearer credential,
//! `net::api` is the REST gateway every request goes through, `pages` pair
//! each screen's plain state with its Leptos component, and `app::App`
//! composes them into the two-screen shell. The browser build hydrates
//! [`app::App`]; the `agricompass-cli` crate drives the same state types
//! from a terminal.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger unavailable: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
