//! Itinerary surface: trip submission and history, planner-screen only.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::TripRequest;
use crate::error::AppError;
use crate::extractors::session_id::SessionId;
use crate::services::itineraries as itinerary_service;
use crate::services::sessions::{HistoryEntry, Screen};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct CreateResponse {
    itinerary: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u64>,
}

/// Generate an itinerary for the trip brief and archive it under the
/// signed-in user. The session lock is held for the whole submission, so a
/// session has at most one generation in flight.
async fn create(
    session_id: SessionId,
    req: web::Json<TripRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(session_id.0)?;
    let guard = session.lock().await;
    if guard.screen() != Screen::Planner {
        return Err(AppError::unauthorized());
    }
    let identity = guard.identity().cloned().ok_or_else(AppError::unauthorized)?;

    let trip = req.into_inner();
    let text = itinerary_service::create(
        app_state.db()?,
        app_state.inference.as_ref(),
        &identity.user_id,
        &trip,
    )
    .await?;

    Ok(HttpResponse::Ok().json(CreateResponse { itinerary: text }))
}

async fn list(
    session_id: SessionId,
    query: web::Query<HistoryQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(session_id.0)?;
    let guard = session.lock().await;
    if guard.screen() != Screen::Planner {
        return Err(AppError::unauthorized());
    }
    let identity = guard.identity().cloned().ok_or_else(AppError::unauthorized)?;

    let limit = query.limit.unwrap_or(itinerary_service::DEFAULT_HISTORY_LIMIT);
    let items = itinerary_service::history(app_state.db()?, &identity.user_id, limit).await?;
    let history: Vec<HistoryEntry> = items.into_iter().map(HistoryEntry::from).collect();

    Ok(HttpResponse::Ok().json(history))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create))
            .route(web::get().to(list)),
    );
}
