use crate::{
    AppConfig, Error,
    models::{BoundingBox, Entry, Position},
};

mod geolocation;
mod markers;

pub use geolocation::current_position;
pub use markers::{MarkerRecord, MarkerSet};

pub static GEOLOCATION_FAILED: &str = "Error: The Geolocation service failed.";
pub static GEOLOCATION_UNSUPPORTED: &str = "Error: Your browser doesn't support geolocation.";

/// The operations the controller needs from the mapping library.
pub trait MapSurface {
    /// Handle to whatever the library keeps for a placed marker.
    type Pin;

    fn set_view(&self, center: Position, zoom: f64);

    fn center(&self) -> Position;

    fn zoom(&self) -> f64;

    fn bounds(&self) -> BoundingBox;

    /// Open the shared info popup at `at` with a plain text message.
    fn show_info(&self, at: Position, message: &str);

    /// Add a marker whose popup opens on click and shows `title` followed by
    /// the lines of `content`.
    fn place_pin(&self, position: Position, title: &str, content: &str) -> Result<Self::Pin, Error>;
}

pub struct MapController<S: MapSurface> {
    surface: S,
    markers: MarkerSet<S::Pin>,
    located_zoom: f64,
}

impl<S: MapSurface> MapController<S> {
    /// Take ownership of `surface` and show the fallback view.
    pub fn new(surface: S, config: &AppConfig) -> Self {
        surface.set_view(config.fallback_center(), config.fallback_zoom);

        Self {
            surface,
            markers: MarkerSet::default(),
            located_zoom: config.located_zoom,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn markers(&self) -> &MarkerSet<S::Pin> {
        &self.markers
    }

    /// Recenter on a located position, or explain in the info popup why the
    /// map stays where it is.
    pub fn apply_location(&self, location: Result<Position, Error>) {
        match location {
            Ok(position) => {
                log::info!("Location found.");
                self.surface.set_view(position, self.located_zoom);
            }
            Err(e) => {
                log::warn!("Could not get location: {e}");

                let message = match e {
                    Error::GeolocationUnsupported => GEOLOCATION_UNSUPPORTED,
                    _ => GEOLOCATION_FAILED,
                };

                self.surface.show_info(self.surface.center(), message);
            }
        }
    }

    pub fn viewport_bounds(&self) -> BoundingBox {
        self.surface.bounds()
    }

    /// Place a marker for every entry not seen before. Returns how many were
    /// created.
    pub fn place_entries(&mut self, entries: Vec<Entry>) -> Result<usize, Error> {
        let mut created = 0;

        for entry in entries {
            let content = entry.details().join("\n");

            if self.markers.place(
                &self.surface,
                entry.position(),
                entry.id,
                &entry.name,
                &content,
            )? {
                created += 1;
            }
        }

        Ok(created)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::MapSurface;
    use crate::{
        Error,
        models::{BoundingBox, Position},
    };
    use std::cell::RefCell;

    /// In-memory surface; the viewport spans one degree per zoom step below 11.
    #[derive(Default)]
    pub struct FakeSurface {
        view: RefCell<(Position, f64)>,
        info: RefCell<Option<(Position, String)>>,
        pins: RefCell<Vec<(Position, String, String)>>,
        fail_pins: bool,
    }

    impl FakeSurface {
        pub fn failing_pins() -> Self {
            Self {
                fail_pins: true,
                ..Default::default()
            }
        }

        pub fn info(&self) -> Option<(Position, String)> {
            self.info.borrow().clone()
        }

        pub fn pins(&self) -> Vec<(Position, String, String)> {
            self.pins.borrow().clone()
        }
    }

    impl MapSurface for FakeSurface {
        type Pin = usize;

        fn set_view(&self, center: Position, zoom: f64) {
            *self.view.borrow_mut() = (center, zoom);
        }

        fn center(&self) -> Position {
            self.view.borrow().0
        }

        fn zoom(&self) -> f64 {
            self.view.borrow().1
        }

        fn bounds(&self) -> BoundingBox {
            let (center, zoom) = *self.view.borrow();
            let half = (11.0 - zoom).max(0.01);

            BoundingBox::from_corners(
                Position::new(center.lat + half / 2.0, center.lng - half),
                Position::new(center.lat - half / 2.0, center.lng + half),
            )
        }

        fn show_info(&self, at: Position, message: &str) {
            *self.info.borrow_mut() = Some((at, message.to_string()));
        }

        fn place_pin(&self, position: Position, title: &str, content: &str) -> Result<usize, Error> {
            if self.fail_pins {
                return Err(Error::Js("marker rejected".into()));
            }

            let mut pins = self.pins.borrow_mut();
            pins.push((position, title.to_string(), content.to_string()));

            Ok(pins.len() - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fake::FakeSurface, *};
    use crate::models::parse_entries;

    fn controller() -> MapController<FakeSurface> {
        MapController::new(FakeSurface::default(), &AppConfig::default())
    }

    const FALLBACK: Position = Position {
        lat: 38.028273,
        lng: -118.401568,
    };

    #[test]
    fn test_bootstrap_shows_fallback() {
        let c = controller();

        assert_eq!(c.surface().center(), FALLBACK);
        assert_eq!(c.surface().zoom(), 10.0);
        assert!(c.markers().is_empty());
    }

    #[test]
    fn test_geolocation_denied() {
        let c = controller();

        c.apply_location(Err(Error::GeolocationFailed(1, "User denied Geolocation".into())));

        assert_eq!(c.surface().center(), FALLBACK);
        assert_eq!(c.surface().zoom(), 10.0);
        assert_eq!(
            c.surface().info(),
            Some((FALLBACK, GEOLOCATION_FAILED.to_string()))
        );
    }

    #[test]
    fn test_geolocation_unsupported() {
        let c = controller();

        c.apply_location(Err(Error::GeolocationUnsupported));

        assert_eq!(c.surface().center(), FALLBACK);
        insta::assert_snapshot!(
            c.surface().info().unwrap().1,
            @"Error: Your browser doesn't support geolocation."
        );
    }

    #[test]
    fn test_geolocation_success() {
        let c = controller();

        c.apply_location(Ok(Position::new(37.0, -122.0)));

        assert_eq!(c.surface().center(), Position::new(37.0, -122.0));
        assert_eq!(c.surface().zoom(), 15.0);
        assert_eq!(c.surface().info(), None);
    }

    #[test]
    fn test_viewport_bounds_ordered() {
        let c = controller();

        for (center, zoom) in [
            (FALLBACK, 10.0),
            (Position::new(37.0, -122.0), 15.0),
            (Position::new(-33.86, 151.2), 3.0),
            (Position::new(0.0, 0.0), 1.0),
        ] {
            c.surface().set_view(center, zoom);
            let bounds = c.viewport_bounds();

            assert!(bounds.is_ordered(), "{bounds:?}");
            assert!(bounds.contains(center));
        }
    }

    #[test]
    fn test_empty_response_leaves_markers() {
        let mut c = controller();

        let added = c
            .place_entries(parse_entries(
                r#"[{"_id": "a1", "coords": {"lat": 38.0, "lon": -118.4}, "name": "Taqueria"}]"#,
            ).unwrap())
            .unwrap();
        assert_eq!(added, 1);

        let added = c.place_entries(parse_entries("[]").unwrap()).unwrap();
        assert_eq!(added, 0);
        assert_eq!(c.markers().len(), 1);
    }

    #[test]
    fn test_overlapping_responses_dedupe() {
        let mut c = controller();

        let first = r#"[
            {"_id": "a1", "coords": {"lat": 38.0, "lon": -118.4}, "name": "Taqueria"},
            {"_id": "b2", "coords": {"lat": 38.1, "lon": -118.3}, "name": "Bakery"}
        ]"#;
        let second = r#"[
            {"_id": "b2", "coords": {"lat": 38.1, "lon": -118.3}, "name": "Bakery (renamed)"},
            {"_id": "c3", "coords": {"lat": 38.2, "lon": -118.2}, "name": "Grill", "phone": "555-0199"}
        ]"#;

        assert_eq!(c.place_entries(parse_entries(first).unwrap()).unwrap(), 2);
        assert_eq!(c.place_entries(parse_entries(second).unwrap()).unwrap(), 1);

        let titles: Vec<_> = c.markers().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Taqueria", "Bakery", "Grill"]);

        let pins = c.surface().pins();
        assert_eq!(pins.len(), 3);
        assert_eq!(pins[2].2, "555-0199");
    }
}
