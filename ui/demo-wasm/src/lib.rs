//! NFTauth Demo Client
//!
//! Pure Rust + WASM rendition of the NFTauth redirect-flow demo pages.
//! Modularised for extensibility: each concern lives in its own module.

pub mod config;
pub mod dashboard;
pub mod dom;
pub mod home;
pub mod login;
pub mod nav;
pub mod register;
pub mod storage;

use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let path = dom::window()
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".into());
    render(&path);

    Ok(())
}

/// Client-side route dispatch. `BrowserNavigation::route_to` re-enters here
/// after a pushState.
pub fn render(path: &str) {
    match path {
        "/register" => register::mount(),
        "/login" => login::mount(),
        "/dashboard" => dashboard::mount(),
        _ => home::mount(),
    }
}
