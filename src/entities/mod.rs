pub mod itineraries;
