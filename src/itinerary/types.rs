use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Destination and date range sent to the model as the user message.
///
/// Dates are passed through verbatim; neither calendar correctness nor
/// ordering is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub location: String,
    pub start_date: String,
    pub end_date: String,
}

impl ItineraryRequest {
    pub fn new(
        location: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Compact JSON text of the user message, keys in declaration order.
    pub fn to_user_content(&self) -> String {
        json!({
            "location": self.location,
            "startDate": self.start_date,
            "endDate": self.end_date,
        })
        .to_string()
    }
}

/// Category of an itinerary event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Flight,
    Accommodation,
    Food,
    Entertainment,
    Transit,
    Activity,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        Self::Flight,
        Self::Accommodation,
        Self::Food,
        Self::Entertainment,
        Self::Transit,
        Self::Activity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Accommodation => "accommodation",
            Self::Food => "food",
            Self::Entertainment => "entertainment",
            Self::Transit => "transit",
            Self::Activity => "activity",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[latitude, longitude]`
pub type Coordinates = [f64; 2];

/// One scheduled activity within an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryEvent {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub time: String,
    pub location: String,
    pub description: String,
    pub duration: String,
    pub coordinates: Coordinates,
}

/// Trip plan produced by the model.
///
/// `events` keeps the order the model returned them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub events: Vec<ItineraryEvent>,
}

impl Itinerary {
    /// Decodes an already-parsed JSON value into the typed structure.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
