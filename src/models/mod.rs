use serde::{Deserialize, Serialize};

mod entry;

pub use entry::{Coords, Entry, EntryId, Rating, parse_entries};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Position {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Visible area of the map, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Build the box spanned by two opposite corners, in any order.
    pub fn from_corners(a: Position, b: Position) -> Self {
        Self {
            west: a.lng.min(b.lng),
            east: a.lng.max(b.lng),
            south: a.lat.min(b.lat),
            north: a.lat.max(b.lat),
        }
    }

    /// Box from the corners a map reports for its viewport. Edges are kept as
    /// given, so a view crossing the antimeridian has `west > east`.
    pub fn from_south_west_north_east(south_west: Position, north_east: Position) -> Self {
        Self {
            west: south_west.lng,
            east: north_east.lng,
            south: south_west.lat,
            north: north_east.lat,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.west <= self.east && self.south <= self.north
    }

    #[cfg(test)]
    pub fn contains(&self, position: Position) -> bool {
        (self.south..=self.north).contains(&position.lat)
            && (self.west..=self.east).contains(&position.lng)
    }

    /// Form fields sent to the entries endpoint, in wire order.
    pub fn form_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("west", self.west.to_string()),
            ("east", self.east.to_string()),
            ("south", self.south.to_string()),
            ("north", self.north.to_string()),
        ]
    }
}

#[test]
fn test_bounds_from_corners_are_ordered() {
    let corners = [
        (Position::new(38.1, -118.3), Position::new(37.9, -118.5)),
        (Position::new(37.9, -118.5), Position::new(38.1, -118.3)),
        (Position::new(-10.0, 20.0), Position::new(10.0, -20.0)),
        (Position::new(5.0, 5.0), Position::new(5.0, 5.0)),
    ];

    for (a, b) in corners {
        let bounds = BoundingBox::from_corners(a, b);
        assert!(bounds.is_ordered(), "{bounds:?}");
        assert!(bounds.contains(a));
        assert!(bounds.contains(b));
    }
}

#[test]
fn test_bounds_from_viewport_corners() {
    let bounds = BoundingBox::from_south_west_north_east(
        Position::new(37.9, -118.5),
        Position::new(38.1, -118.3),
    );

    assert_eq!(
        bounds,
        BoundingBox {
            west: -118.5,
            east: -118.3,
            south: 37.9,
            north: 38.1,
        }
    );
    assert!(bounds.is_ordered());
    assert_eq!(
        bounds,
        BoundingBox::from_corners(Position::new(38.1, -118.5), Position::new(37.9, -118.3))
    );
}

#[test]
fn test_bounds_form_pairs() {
    let bounds = BoundingBox::from_corners(
        Position::new(38.1, -118.3),
        Position::new(37.9, -118.5),
    );

    let body = bounds
        .form_pairs()
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    insta::assert_snapshot!(body, @"west=-118.5&east=-118.3&south=37.9&north=38.1");
}

#[test]
fn test_bounds_serialize() {
    let bounds = BoundingBox {
        west: -1.5,
        east: 2.25,
        south: 40.0,
        north: 41.0,
    };

    insta::assert_json_snapshot!(bounds, @r#"
    {
      "west": -1.5,
      "east": 2.25,
      "south": 40.0,
      "north": 41.0
    }
    "#);
}
