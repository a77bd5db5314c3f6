use crate::{
    Error,
    helpers::window,
    models::{BoundingBox, Entry, parse_entries},
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, UrlSearchParams};

/// POST the visible bounds as a form and parse the entries found inside.
pub async fn fetch_entries(endpoint: &str, bounds: &BoundingBox) -> Result<Vec<Entry>, Error> {
    let params = UrlSearchParams::new()?;
    for (key, value) in bounds.form_pairs() {
        params.append(key, &value);
    }

    if !bounds.is_ordered() {
        log::warn!("Viewport crosses the antimeridian, the server may return nothing");
    }

    log::debug!(
        "Requesting entries in {}",
        serde_json::to_string(bounds).unwrap_or_default()
    );

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&params);

    let request = Request::new_with_str_and_init(endpoint, &init)?;
    let started = instant::Instant::now();

    let response: Response = JsFuture::from(window()?.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    if !response.ok() {
        return Err(Error::HttpStatus(response.status()));
    }

    let body = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| Error::malformed("response body is not text"))?;

    log::debug!(
        "Fetched {} bytes in {}s",
        body.len(),
        started.elapsed().as_secs_f32()
    );

    parse_entries(&body)
}
