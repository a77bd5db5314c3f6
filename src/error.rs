use std::thread::AccessError;
use wasm_bindgen::{JsCast, JsValue};

pub type JsResult<T = ()> = Result<T, JsValue>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("JS failure: {0}")]
    Js(String),
    #[error(transparent)]
    SerdeWasm(#[from] serde_wasm_bindgen::Error),
    #[error(transparent)]
    ThreadVariable(#[from] AccessError),
    #[error("Failed to access global window")]
    NoWindow,
    #[error("Failed to access document on global window")]
    NoDocument,
    #[error("Failed to access element with id {0}")]
    NoElementId(String),
    #[error("Map already initialized")]
    MapInit,
    #[error("Geolocation is not supported by this browser")]
    GeolocationUnsupported,
    #[error("Geolocation request failed ({0}): {1}")]
    GeolocationFailed(u16, String),
    #[error("Server answered with status {0}")]
    HttpStatus(u16),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    OsChannelRecv(#[from] futures::channel::oneshot::Canceled),
}

impl Error {
    pub fn malformed(error: impl std::fmt::Display) -> Self {
        Error::MalformedResponse(error.to_string())
    }
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Js(
            value
                .as_string()
                .or_else(|| {
                    value
                        .dyn_ref::<js_sys::Error>()
                        .map(|e| String::from(e.message()))
                })
                .unwrap_or_else(|| "Unknown JS error".to_string()),
        )
    }
}

impl From<Error> for JsValue {
    fn from(value: Error) -> Self {
        JsValue::from_str(&value.to_string())
    }
}

pub trait Aquiesce {
    fn aquiesce(self);
}

impl<E: std::error::Error> Aquiesce for Result<(), E> {
    fn aquiesce(self) {
        if let Err(e) = self {
            log::error!("Error: {}", e);
        }
    }
}

#[test]
fn test_logger_setup_failure_is_aquiescable() {
    fn aquiescable<E: std::error::Error>() {}

    aquiescable::<log::SetLoggerError>();
    Ok::<(), log::SetLoggerError>(()).aquiesce();
}
