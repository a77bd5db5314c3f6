mod api;
mod config;
pub mod controller;
mod error;
mod helpers;
pub mod models;
pub mod view;

use wasm_bindgen::prelude::*;

pub use config::AppConfig;
pub use error::{Aquiesce, Error, JsResult};
pub use helpers::{AsHtmlExt, QueryExt, document, window};

/// Entry point called by the page once the module and Leaflet are loaded.
#[wasm_bindgen]
pub fn setup() -> JsResult {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_page();

    console_log::init_with_level(
        config
            .as_ref()
            .map(AppConfig::log_level)
            .unwrap_or(log::Level::Info),
    )
    .aquiesce();

    let config = config.unwrap_or_else(|e| {
        log::error!("Ignoring unreadable appConfig: {e}");
        AppConfig::default()
    });

    view::map::setup(&config)?;

    Ok(())
}
