pub mod itineraries_sea;
