use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use super::Mode;

/// Typed, lossy view over a chat payload for presentation code.
///
/// Every field is optional on the wire; absent or unusable values collapse
/// to empty defaults rather than errors, so a sparse payload still renders.
#[derive(Debug, Clone, Default)]
pub struct ChatReply {
    response: String,
    session_id: Option<String>,
    mode: Option<Mode>,
    search_results: SearchResults,
}

impl ChatReply {
    /// Extract the reply view from a raw payload.
    pub fn from_value(value: &Value) -> Self {
        let response = value
            .get("response")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let session_id = value
            .get("session_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        let mode = value
            .get("mode")
            .and_then(Value::as_str)
            .and_then(Mode::parse);
        let search_results = SearchResults::from_value(value.get("search_results"));
        Self {
            response,
            session_id,
            mode,
            search_results,
        }
    }

    /// The assistant's message text, or an empty string when missing.
    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn search_results(&self) -> &SearchResults {
        &self.search_results
    }
}

/// Structured results grouped by vertical, as the backend returns them.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    flight: Vec<FlightResult>,
    hotel: Vec<HotelResult>,
    place: Vec<PlaceResult>,
}

impl SearchResults {
    fn from_value(value: Option<&Value>) -> Self {
        Self {
            flight: parse_list(value.and_then(|v| v.get("flight")), "flight"),
            hotel: parse_list(value.and_then(|v| v.get("hotel")), "hotel"),
            place: parse_list(value.and_then(|v| v.get("place")), "place"),
        }
    }

    pub fn flight(&self) -> &[FlightResult] {
        &self.flight
    }

    pub fn hotel(&self) -> &[HotelResult] {
        &self.hotel
    }

    pub fn place(&self) -> &[PlaceResult] {
        &self.place
    }

    pub fn is_empty(&self) -> bool {
        self.flight.is_empty() && self.hotel.is_empty() && self.place.is_empty()
    }
}

/// Decode each array entry independently so one malformed result does not
/// discard the rest of the list.
fn parse_list<T: DeserializeOwned>(value: Option<&Value>, kind: &str) -> Vec<T> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("SearchResults: skipping malformed {kind} entry: {e}");
                None
            }
        })
        .collect()
}

/// Decode one field, falling back to the type's default when the value has
/// the wrong shape. A bad field degrades on its own instead of discarding
/// the whole entry.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A single flight offer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FlightResult {
    #[serde(deserialize_with = "lenient")]
    airline: Option<String>,
    #[serde(deserialize_with = "lenient")]
    origin: Option<String>,
    #[serde(deserialize_with = "lenient")]
    destination: Option<String>,
    #[serde(deserialize_with = "lenient")]
    duration: Option<String>,
    #[serde(deserialize_with = "lenient")]
    departure_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    arrival_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    stops: Option<u32>,
    price: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    formatted_price: Option<String>,
    #[serde(deserialize_with = "lenient")]
    booking_link: Option<String>,
}

impl FlightResult {
    pub fn airline(&self) -> Option<&str> {
        self.airline.as_deref()
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    pub fn departure_time(&self) -> Option<&str> {
        self.departure_time.as_deref()
    }

    pub fn arrival_time(&self) -> Option<&str> {
        self.arrival_time.as_deref()
    }

    /// Number of stops, defaulting to a direct flight when unreported.
    pub fn stops(&self) -> u32 {
        self.stops.unwrap_or(0)
    }

    pub fn booking_link(&self) -> Option<&str> {
        self.booking_link.as_deref()
    }

    /// Price label, preferring the backend's preformatted variant.
    pub fn display_price(&self) -> String {
        display_price(self.formatted_price.as_deref(), self.price.as_ref())
    }
}

/// A single hotel offer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HotelResult {
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    rating_stars: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    address: Option<String>,
    #[serde(deserialize_with = "lenient")]
    location: Option<String>,
    #[serde(deserialize_with = "lenient")]
    amenities: Vec<String>,
    price: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    formatted_price: Option<String>,
    #[serde(deserialize_with = "lenient")]
    booking_link: Option<String>,
}

impl HotelResult {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn rating_stars(&self) -> f64 {
        self.rating_stars.unwrap_or(0.0)
    }

    pub fn amenities(&self) -> &[String] {
        &self.amenities
    }

    pub fn booking_link(&self) -> Option<&str> {
        self.booking_link.as_deref()
    }

    /// Where the hotel is, preferring the street address over the looser
    /// location label.
    pub fn display_location(&self) -> &str {
        self.address
            .as_deref()
            .or(self.location.as_deref())
            .unwrap_or("N/A")
    }

    pub fn display_price(&self) -> String {
        display_price(self.formatted_price.as_deref(), self.price.as_ref())
    }
}

/// A single place or attraction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaceResult {
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    rating_stars: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    rating_count: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    address: Option<String>,
    #[serde(deserialize_with = "lenient")]
    categories: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    phone: Option<String>,
    #[serde(deserialize_with = "lenient")]
    website: Option<String>,
    #[serde(deserialize_with = "lenient")]
    hours: Vec<OpeningHours>,
}

impl PlaceResult {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn rating_stars(&self) -> f64 {
        self.rating_stars.unwrap_or(0.0)
    }

    pub fn rating_count(&self) -> u64 {
        self.rating_count.unwrap_or(0)
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn hours(&self) -> &[OpeningHours] {
        &self.hours
    }
}

/// One day's opening window for a place.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    #[serde(deserialize_with = "lenient")]
    day: Option<String>,
    #[serde(deserialize_with = "lenient")]
    open: Option<String>,
    #[serde(deserialize_with = "lenient")]
    close: Option<String>,
}

impl OpeningHours {
    pub fn day(&self) -> Option<&str> {
        self.day.as_deref()
    }

    pub fn open(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn close(&self) -> Option<&str> {
        self.close.as_deref()
    }
}

/// Render a numeric rating as filled stars, with a half marker when the
/// fractional part reaches 0.5. Ratings outside the 0 to 5 scale are
/// clamped so an out-of-range value cannot inflate the string.
pub fn display_stars(rating: f64) -> String {
    let rating = rating.clamp(0.0, 5.0);
    let full = rating.floor();
    let mut stars = "★".repeat(full as usize);
    if rating - full >= 0.5 {
        stars.push('½');
    }
    stars
}

fn display_price(formatted: Option<&str>, raw: Option<&Value>) -> String {
    if let Some(label) = formatted.filter(|label| !label.is_empty()) {
        return label.to_string();
    }
    match raw {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "N/A".to_string(),
    }
}
