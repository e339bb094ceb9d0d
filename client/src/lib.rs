//! # client
//!
//! Leptos + WASM administration console for the Billun fleet backend.
//!
//! Pages and components live here; the data model, session, API client,
//! form state machine and freshness poller come from the `fleet` crate. The
//! browser transport and token storage are gated behind the `csr` feature so
//! the pure helpers build and test natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod util;

/// WASM entry point: install panic and log hooks, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
