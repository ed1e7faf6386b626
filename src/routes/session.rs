//! Session surface: one command per request, each answered with the freshly
//! rendered screen so the frontend always displays the post-command state.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::session_id::SessionId;
use crate::services::sessions::{self, Screen, ScreenModel, Session};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct OpenSessionResponse {
    session_id: Uuid,
    screen: ScreenModel,
}

#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub screen: Screen,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

async fn rendered(
    app_state: &AppState,
    session: &Mutex<Session>,
) -> Result<HttpResponse, AppError> {
    let model = sessions::render(app_state.db()?, session).await?;
    Ok(HttpResponse::Ok().json(model))
}

/// Open a fresh session on the login screen.
async fn open(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (session_id, session) = app_state.sessions.open();
    let screen = session.lock().await.view();
    Ok(HttpResponse::Ok().json(OpenSessionResponse { session_id, screen }))
}

async fn screen(
    session_id: SessionId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(session_id.0)?;
    rendered(&app_state, &session).await
}

async fn mode(
    session_id: SessionId,
    req: web::Json<ModeRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(session_id.0)?;
    sessions::switch_mode(&session, req.screen).await?;
    rendered(&app_state, &session).await
}

/// Sign in. Auth failures come back as a 200 whose screen carries the inline
/// error; only malformed requests or storage problems are HTTP errors.
async fn signin(
    session_id: SessionId,
    req: web::Json<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(session_id.0)?;
    sessions::sign_in(&session, app_state.identity.as_ref(), &req.email, &req.password).await?;
    rendered(&app_state, &session).await
}

async fn signup(
    session_id: SessionId,
    req: web::Json<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(session_id.0)?;
    sessions::sign_up(&session, app_state.identity.as_ref(), &req.email, &req.password).await?;
    rendered(&app_state, &session).await
}

async fn signout(
    session_id: SessionId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(session_id.0)?;
    sessions::sign_out(&session).await?;
    rendered(&app_state, &session).await
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(open)))
        .service(web::resource("/screen").route(web::get().to(screen)))
        .service(web::resource("/mode").route(web::post().to(mode)))
        .service(web::resource("/signin").route(web::post().to(signin)))
        .service(web::resource("/signup").route(web::post().to(signup)))
        .service(web::resource("/signout").route(web::post().to(signout)));
}
