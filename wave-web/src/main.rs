//! Wave Portal Web App - Leptos Frontend
//!
//! WASM entry point. Everything else hangs off [`app::App`].

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

mod app;
mod components;
mod services;
mod state;
mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Panic messages should reach the browser console, not vanish
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("wave portal starting");

    leptos::mount::mount_to_body(|| view! { <App/> });
}
