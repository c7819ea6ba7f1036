//! EcoScan Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod config;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    gloo::console::log!(format!("EcoScan client using {}", config::api_url()));
    leptos::mount::mount_to_body(app::App);
}
