use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Shown wherever neither a venue name nor an address line is known.
pub const LOCATION_UNAVAILABLE: &str = "Location unavailable";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Grouping key for venues. Two coordinates share a key only when their
    /// float formatting is identical.
    pub fn key(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Venue {
    pub name: Option<String>,
    pub address_line: Option<String>,
    pub coordinate: Option<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub url: String,
    pub start_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub venue: Option<Venue>,
}

impl Event {
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.venue.as_ref().and_then(|venue| venue.coordinate)
    }

    pub fn date_label(&self) -> String {
        self.start_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Venue name, then address line, then the placeholder. Blank strings are skipped.
    pub fn venue_label(&self) -> String {
        venue_label(None, self.venue.as_ref())
    }
}

/// Resolves the display name for a venue. `preferred` wins over anything on
/// the venue itself when present.
pub fn venue_label(preferred: Option<&str>, venue: Option<&Venue>) -> String {
    let non_blank = |s: &&str| !s.trim().is_empty();

    preferred
        .filter(non_blank)
        .or_else(|| venue.and_then(|v| v.name.as_deref()).filter(non_blank))
        .or_else(|| venue.and_then(|v| v.address_line.as_deref()).filter(non_blank))
        .unwrap_or(LOCATION_UNAVAILABLE)
        .to_string()
}

/// Query sent to the events API. Exactly one of the two modes per request.
#[derive(Debug, Clone, PartialEq)]
pub enum EventQuery {
    Near(Coordinate),
    City(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Events(Vec<Event>),
    NoResults,
}

/// Events sharing one venue coordinate, merged into a single marker.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueGroup {
    pub coordinate: Coordinate,
    pub venue_name: Option<String>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Smallest box containing every coordinate, or `None` for an empty input.
    pub fn covering<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = coordinates.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            south_west: first,
            north_east: first,
        };

        for c in iter {
            bounds.south_west.latitude = bounds.south_west.latitude.min(c.latitude);
            bounds.south_west.longitude = bounds.south_west.longitude.min(c.longitude);
            bounds.north_east.latitude = bounds.north_east.latitude.max(c.latitude);
            bounds.north_east.longitude = bounds.north_east.longitude.max(c.longitude);
        }

        Some(bounds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub title: String,
    pub link: String,
    pub open_in_new_context: bool,
    pub thumbnail: Option<String>,
    pub date_label: String,
    pub venue_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupEntry {
    pub name: String,
    pub link: String,
    pub date_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    pub title: String,
    pub entries: Vec<PopupEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub popup: MarkerPopup,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f64,
}

/// Pixel padding applied on each axis when fitting bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    NoResults,
    EmptySearch,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoResults => "No events found.",
            Notice::EmptySearch => "Please enter a city!",
        }
    }
}
