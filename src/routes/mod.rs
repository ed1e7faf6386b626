use actix_web::web;

pub mod itineraries;
pub mod session;

/// Configure application routes for the server and for test harnesses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Liveness: /health
    cfg.configure(crate::health::configure);

    // Session commands and screen rendering: /api/session/**
    cfg.service(web::scope("/api/session").configure(session::configure_routes));

    // Itinerary generation and history: /api/itineraries/**
    cfg.service(web::scope("/api/itineraries").configure(itineraries::configure_routes));
}
