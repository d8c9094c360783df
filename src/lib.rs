//! Travel itinerary generator backed by a chat-completions API.

pub mod commands;
pub mod config;
pub mod itinerary;
pub mod logging;

pub use itinerary::{
    ClientConfig, ErrorKind, Itinerary, ItineraryClient, ItineraryError, ItineraryEvent,
    ItineraryRequest, generate_itinerary,
};
