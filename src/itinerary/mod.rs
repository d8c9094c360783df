//! Itinerary generation over a chat-completions endpoint.
//!
//! One call to [`ItineraryClient::generate`] issues exactly one blocking POST,
//! pulls `choices[0].message.content` out of the response envelope and parses
//! that text as JSON. Nothing is retried, cached or validated.

/// Completion client and wire types.
pub mod client;
/// Error taxonomy for a single generation call.
pub mod error;
/// Fixed system instruction.
pub mod prompt;
/// Request and itinerary data model.
pub mod types;

use serde_json::Value;

use crate::config::{self, Overrides};

pub use client::{ChatMessage, ClientConfig, ItineraryClient};
pub use error::{ErrorKind, ItineraryError};
pub use types::{Coordinates, EventType, Itinerary, ItineraryEvent, ItineraryRequest};

/// Generates an itinerary using configuration read from the environment.
///
/// The credential is looked up at call time; when absent the call fails
/// before any network activity.
pub fn generate_itinerary(
    location: &str,
    start_date: &str,
    end_date: &str,
) -> Result<Value, ItineraryError> {
    let settings = config::resolve(&Overrides::default())?;
    ItineraryClient::new(settings)?.generate(location, start_date, end_date)
}
