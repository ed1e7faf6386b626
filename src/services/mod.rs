pub mod itineraries;
pub mod sessions;
