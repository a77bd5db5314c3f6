use crate::{Error, models::Position};
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{self, Display, Formatter};

/// Identifier of an entry as sent by the server. Strings, integers and
/// extended-JSON object ids all collapse to their textual form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawId")]
pub struct EntryId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Object {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl From<RawId> for EntryId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) | RawId::Object { oid: s } => EntryId(s),
            RawId::Signed(i) => EntryId(i.to_string()),
            RawId::Unsigned(u) => EntryId(u.to_string()),
        }
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        EntryId(value.to_string())
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Rating {
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub price: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: EntryId,
    pub coords: Coords,
    pub name: String,
    pub phone: Option<String>,
    pub address1: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub yelp: Option<Rating>,
}

impl Entry {
    pub fn position(&self) -> Position {
        Position::new(self.coords.lat, self.coords.lon)
    }

    fn validate(&self) -> Result<(), Error> {
        let Coords { lat, lon } = self.coords;

        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::malformed(format!(
                "entry {} has latitude {lat} out of range",
                self.id
            )));
        }

        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(Error::malformed(format!(
                "entry {} has longitude {lon} out of range",
                self.id
            )));
        }

        Ok(())
    }

    /// Lines displayed under the name in the marker popup. Absent fields are
    /// skipped.
    pub fn details(&self) -> Vec<String> {
        let mut lines = vec![];

        let locality = [self.city.as_deref(), self.zip_code.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match (self.address1.as_deref().filter(|s| !s.is_empty()), locality.is_empty()) {
            (Some(street), false) => lines.push(format!("{street}, {locality}")),
            (Some(street), true) => lines.push(street.to_string()),
            (None, false) => lines.push(locality),
            (None, true) => (),
        }

        if let Some(phone) = self.phone.as_deref().filter(|s| !s.is_empty()) {
            lines.push(phone.to_string());
        }

        if let Some(yelp) = &self.yelp {
            let mut parts = vec![];

            match (yelp.rating, yelp.review_count) {
                (Some(rating), Some(count)) => parts.push(format!("★ {rating} ({count} reviews)")),
                (Some(rating), None) => parts.push(format!("★ {rating}")),
                (None, Some(count)) => parts.push(format!("{count} reviews")),
                (None, None) => (),
            }

            if let Some(price) = yelp.price.as_deref().filter(|s| !s.is_empty()) {
                parts.push(price.to_string());
            }

            if !parts.is_empty() {
                lines.push(parts.join(" · "));
            }
        }

        lines
    }
}

/// Parse the body of an entries response. The server may double-encode the
/// array as a JSON string; both forms are accepted. A single invalid entry
/// rejects the whole batch.
pub fn parse_entries(body: &str) -> Result<Vec<Entry>, Error> {
    let value: Value = serde_json::from_str(body).map_err(Error::malformed)?;

    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner).map_err(Error::malformed)?,
        other => other,
    };

    let entries: Vec<Entry> = serde_json::from_value(value).map_err(Error::malformed)?;

    entries.iter().try_for_each(Entry::validate)?;

    Ok(entries)
}
