//! Pure trip-planning types shared by the web layer and the services.

pub mod trip;

pub use trip::{Pace, TripRequest};
