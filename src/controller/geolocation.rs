use crate::{Error, helpers::window, models::Position};
use futures::channel::oneshot;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Position as GeoPosition, PositionError};

type Reply = Rc<RefCell<Option<oneshot::Sender<Result<Position, Error>>>>>;

/// Ask the browser for the current position, once.
pub async fn current_position() -> Result<Position, Error> {
    let navigator = window()?.navigator();

    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("geolocation"))? {
        return Err(Error::GeolocationUnsupported);
    }

    let geolocation = navigator
        .geolocation()
        .map_err(|_| Error::GeolocationUnsupported)?;

    let (tx, rx) = oneshot::channel();
    let tx: Reply = Rc::new(RefCell::new(Some(tx)));

    let reply = tx.clone();
    let on_success = Closure::once(move |position: GeoPosition| {
        let coords = position.coords();
        respond(&reply, Ok(Position::new(coords.latitude(), coords.longitude())));
    });

    let reply = tx;
    let on_error = Closure::once(move |error: PositionError| {
        respond(&reply, Err(Error::GeolocationFailed(error.code(), error.message())));
    });

    geolocation.get_current_position_with_error_callback(
        on_success.as_ref().unchecked_ref(),
        Some(on_error.as_ref().unchecked_ref()),
    )?;

    // Both closures stay alive until the browser has answered
    let position = rx.await?;

    drop((on_success, on_error));

    position
}

fn respond(reply: &Reply, value: Result<Position, Error>) {
    if let Some(tx) = reply.borrow_mut().take() {
        if tx.send(value).is_err() {
            log::debug!("Position arrived after the request was dropped");
        }
    }
}
