/// Issue Link Copier - Chrome Extension for copying issue / pull request links
/// Built with Rust + WASM + Yew

pub mod config;
pub mod contribution;
pub mod controller;
pub mod error;
pub mod gateways;
pub mod page_title;
pub mod recency;
pub mod ui;
pub mod view_model;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the title parser for JavaScript access; null when the page is not applicable
#[wasm_bindgen]
pub fn parse_page_title(title: &str, url: &str) -> Result<JsValue, JsValue> {
    match page_title::parse_page(title, url) {
        Ok(Some(meta)) => serde_wasm_bindgen::to_value(&meta)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize: {:?}", e))),
        Ok(None) => Ok(JsValue::NULL),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
