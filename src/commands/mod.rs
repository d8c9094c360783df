/// Itinerary generation command.
pub mod generate;
