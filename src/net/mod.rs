//! Networking for the marketplace REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the gateway views call and `types` defines the wire schema.
//! Requests leave through a transport: `browser` (`gloo-net` fetch) in the
//! hydrated client, `http` (`reqwest`) for native callers.

pub mod api;
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;
pub mod types;
