use crate::{Error, helpers::window, models::Position};
use log::Level;
use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Page-level settings, read from the optional `window.appConfig` object the
/// template renders before loading the module.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub debug: bool,
    pub container_id: String,
    pub endpoint: String,
    pub tile_url: String,
    pub fallback_center: (f64, f64),
    pub fallback_zoom: f64,
    pub located_zoom: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            container_id: "map".into(),
            endpoint: "/api/entries".into(),
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            fallback_center: (38.028273, -118.401568),
            fallback_zoom: 10.0,
            located_zoom: 15.0,
        }
    }
}

impl AppConfig {
    pub fn from_page() -> Result<Self, Error> {
        let value =
            js_sys::Reflect::get(&JsValue::from(window()?), &JsValue::from_str("appConfig"))?;

        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }

        Ok(serde_wasm_bindgen::from_value(value)?)
    }

    pub fn fallback_center(&self) -> Position {
        self.fallback_center.into()
    }

    pub fn log_level(&self) -> Level {
        if self.debug { Level::Debug } else { Level::Info }
    }
}

#[test]
fn test_config_defaults_when_empty() {
    let config: AppConfig = serde_json::from_str("{}").unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.fallback_center(), Position::new(38.028273, -118.401568));
    assert_eq!(config.log_level(), Level::Info);
}

#[test]
fn test_config_partial_override() {
    let config: AppConfig = serde_json::from_str(
        r#"{"debug": true, "endpoint": "/v2/entries", "fallbackCenter": [48.8566, 2.3522]}"#,
    )
    .unwrap();

    assert_eq!(config.endpoint, "/v2/entries");
    assert_eq!(config.fallback_center(), Position::new(48.8566, 2.3522));
    assert_eq!(config.container_id, "map");
    assert_eq!(config.located_zoom, 15.0);
    assert_eq!(config.log_level(), Level::Debug);
}
