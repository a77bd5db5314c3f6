use crate::{
    Aquiesce, AppConfig, Error, QueryExt, api,
    controller::{self, MapController, MapSurface},
    models::{BoundingBox, Position},
    view::popup,
};
use leaflet::{
    LatLng, LayerGroup, Map, MapOptions, Marker, MarkerOptions, Popup, PopupOptions, TileLayer,
};
use std::{
    cell::{OnceCell, RefCell},
    rc::Rc,
};
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

struct Session {
    controller: RefCell<MapController<LeafletSurface>>,
    endpoint: String,
}

thread_local! {
static SESSION: OnceCell<Rc<Session>> = const { OnceCell::new() };
}

fn lat_lng(position: Position) -> LatLng {
    LatLng::new(position.lat, position.lng)
}

fn position(lat_lng: &LatLng) -> Position {
    Position::new(lat_lng.lat(), lat_lng.lng())
}

/// Leaflet map with a tile layer, a layer group holding the entry markers and
/// one popup reused for informational messages.
pub struct LeafletSurface {
    map: Map,
    markers: LayerGroup,
    info: Popup,
}

impl LeafletSurface {
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        let map = Map::new_with_element(
            &config.container_id.query_id_into::<HtmlElement>()?,
            &MapOptions::default(),
        );

        TileLayer::new(&config.tile_url).add_to(&map);

        let markers = LayerGroup::new();
        markers.add_to(&map);

        Ok(Self {
            map,
            markers,
            info: Popup::new(&PopupOptions::default(), None),
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }
}

impl MapSurface for LeafletSurface {
    type Pin = Marker;

    fn set_view(&self, center: Position, zoom: f64) {
        self.map.set_view(&lat_lng(center), zoom);
    }

    fn center(&self) -> Position {
        position(&self.map.get_center())
    }

    fn zoom(&self) -> f64 {
        self.map.get_zoom()
    }

    fn bounds(&self) -> BoundingBox {
        let bounds = self.map.get_bounds();

        BoundingBox::from_south_west_north_east(
            position(&bounds.get_south_west()),
            position(&bounds.get_north_east()),
        )
    }

    fn show_info(&self, at: Position, message: &str) {
        self.info.set_lat_lng(&lat_lng(at));
        self.info.set_content(&JsValue::from_str(message));
        self.info.open_on(&self.map);
    }

    fn place_pin(&self, position: Position, title: &str, content: &str) -> Result<Marker, Error> {
        let options = MarkerOptions::default();
        options.set_title(title.to_string());

        let marker = Marker::new_with_options(&lat_lng(position), &options);

        // Leaflet opens a bound popup when its marker is clicked
        let details = Popup::new(&PopupOptions::default(), None);
        details.set_content(&JsValue::from(popup::card(title, content)?));
        marker.bind_popup(&details);

        self.markers.add_layer(&marker);

        Ok(marker)
    }
}

pub fn setup(config: &AppConfig) -> Result<(), Error> {
    if SESSION.try_with(|oc| oc.get().is_some())? {
        return Err(Error::MapInit);
    }

    let surface = LeafletSurface::new(config)?;
    let controller = MapController::new(surface, config);

    // Registered after the fallback view so the first fetch is the explicit one below
    controller.surface().map().on_move_end(Box::new(|_| refresh()));

    let session = Rc::new(Session {
        controller: RefCell::new(controller),
        endpoint: config.endpoint.clone(),
    });

    SESSION
        .try_with(|oc| oc.set(session))?
        .map_err(|_| Error::MapInit)?;

    wasm_bindgen_futures::spawn_local(locate());

    refresh();

    Ok(())
}

fn session() -> Option<Rc<Session>> {
    SESSION.with(|oc| oc.get().cloned())
}

async fn locate() {
    let location = controller::current_position().await;

    if let Some(session) = session() {
        session.controller.borrow().apply_location(location);
    }
}

/// Fetch the entries inside the current viewport. Nothing tracks requests in
/// flight; responses are applied as they arrive.
fn refresh() {
    let Some(session) = session() else {
        return;
    };

    let bounds = match session.controller.try_borrow() {
        Ok(controller) => controller.viewport_bounds(),
        Err(_) => {
            log::debug!("Viewport settled while markers were being placed, skipping");
            return;
        }
    };

    wasm_bindgen_futures::spawn_local(async move {
        fetch_and_place(&session, bounds).await.aquiesce();
    });
}

async fn fetch_and_place(session: &Session, bounds: BoundingBox) -> Result<(), Error> {
    let entries = api::fetch_entries(&session.endpoint, &bounds).await?;

    let mut controller = session.controller.borrow_mut();
    let created = controller.place_entries(entries)?;
    log::debug!(
        "Placed {created} new markers, {} on the map",
        controller.markers().len()
    );

    Ok(())
}
