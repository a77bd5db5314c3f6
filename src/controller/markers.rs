use crate::{
    Error,
    controller::MapSurface,
    models::{EntryId, Position},
};

#[derive(Debug)]
pub struct MarkerRecord<P> {
    pub id: EntryId,
    pub position: Position,
    pub title: String,
    pub content: String,
    pub pin: P,
}

/// Markers placed on the map, in creation order. Identifiers are unique.
#[derive(Debug)]
pub struct MarkerSet<P> {
    records: Vec<MarkerRecord<P>>,
}

impl<P> Default for MarkerSet<P> {
    fn default() -> Self {
        Self { records: vec![] }
    }
}

impl<P> MarkerSet<P> {
    pub fn contains(&self, id: &EntryId) -> bool {
        self.records.iter().any(|r| &r.id == id)
    }

    #[cfg(test)]
    pub fn get(&self, id: &EntryId) -> Option<&MarkerRecord<P>> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &MarkerRecord<P>> {
        self.records.iter()
    }

    /// Pin a new marker on `surface` unless `id` was already placed. Returns
    /// whether a marker was created; an existing record is left untouched.
    pub fn place<S>(
        &mut self,
        surface: &S,
        position: Position,
        id: EntryId,
        title: &str,
        content: &str,
    ) -> Result<bool, Error>
    where
        S: MapSurface<Pin = P>,
    {
        if self.contains(&id) {
            return Ok(false);
        }

        log::debug!("Creating new marker {id}");

        let pin = surface.place_pin(position, title, content)?;

        self.records.push(MarkerRecord {
            id,
            position,
            title: title.to_string(),
            content: content.to_string(),
            pin,
        });

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::FakeSurface;

    #[test]
    fn test_duplicate_keeps_original() {
        let surface = FakeSurface::default();
        let mut markers = MarkerSet::default();
        let here = Position::new(37.0, -122.0);

        assert!(markers.place(&surface, here, "a1".into(), "First", "").unwrap());
        assert!(!markers.place(&surface, here, "a1".into(), "Second", "other").unwrap());

        assert_eq!(markers.len(), 1);
        let record = markers.get(&"a1".into()).unwrap();
        assert_eq!(record.title, "First");
        assert_eq!(record.content, "");
        assert_eq!(surface.pins().len(), 1);
    }

    #[test]
    fn test_one_record_per_distinct_id() {
        let surface = FakeSurface::default();
        let mut markers = MarkerSet::default();

        let calls = ["a", "b", "a", "c", "b", "b", "d", "a", "c"];
        for (i, id) in calls.iter().enumerate() {
            markers
                .place(&surface, Position::new(i as f64, 0.0), (*id).into(), id, "")
                .unwrap();
        }

        let ids: Vec<_> = markers.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(surface.pins().len(), 4);

        // First sighting wins the position
        assert_eq!(markers.get(&"c".into()).unwrap().position.lat, 3.0);
    }

    #[test]
    fn test_pin_failure_records_nothing() {
        let surface = FakeSurface::failing_pins();
        let mut markers = MarkerSet::default();

        assert!(
            markers
                .place(&surface, Position::default(), "z".into(), "t", "")
                .is_err()
        );
        assert!(markers.is_empty());
    }
}
