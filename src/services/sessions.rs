//! Session store and view-controller state machine.
//!
//! One `Session` per interactive user session, held in memory for the
//! session's lifetime. The screen machine loops between `Login`, `Signup`
//! and `Planner` (authenticated); there is no terminal state. A command
//! arriving in a state with no matching transition is rejected without
//! mutating the session. The session mutex is held for the whole command,
//! so at most one command is in flight per session.

use std::sync::Arc;

use dashmap::DashMap;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::{Identity, IdentityProvider};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::itineraries::Itinerary;
use crate::services::itineraries::{self, DEFAULT_HISTORY_LIMIT};

const SIGNUP_NOTICE: &str = "Account created. Please sign in.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Login,
    Signup,
    Planner,
}

/// One user's session: current screen plus the single identity slot.
#[derive(Debug)]
pub struct Session {
    screen: Screen,
    identity: Option<Identity>,
    error: Option<String>,
    notice: Option<String>,
}

impl Session {
    fn new() -> Self {
        Self {
            screen: Screen::Login,
            identity: None,
            error: None,
            notice: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Screen model without history; `render` attaches history for the
    /// planner screen.
    pub fn view(&self) -> ScreenModel {
        ScreenModel {
            screen: self.screen,
            email: self.identity.as_ref().map(|i| i.email.clone()),
            error: self.error.clone(),
            notice: self.notice.clone(),
            history: None,
        }
    }

    /// Inline messages are shown once, for the command that produced them.
    fn clear_messages(&mut self) {
        self.error = None;
        self.notice = None;
    }
}

/// What the frontend renders. History is present only on the planner screen.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenModel {
    pub screen: Screen,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub itinerary: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Itinerary> for HistoryEntry {
    fn from(item: Itinerary) -> Self {
        Self {
            itinerary: item.itinerary,
            created_at: item.created_at,
        }
    }
}

/// All live sessions, keyed by session id. Sessions are independent of each
/// other; the registry itself is shared across workers.
pub struct SessionRegistry {
    sessions: DashMap<Uuid, Arc<Mutex<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Open a fresh session on the login screen.
    pub fn open(&self) -> (Uuid, Arc<Mutex<Session>>) {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new()));
        self.sessions.insert(id, session.clone());
        debug!(session_id = %id, "session opened");
        (id, session)
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<Mutex<Session>>, DomainError> {
        self.sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Session, format!("unknown session {id}"))
            })
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// `Login <-> Signup` switch buttons. Switching to the planner screen is
/// never a direct command; only a successful sign-in gets there.
pub async fn switch_mode(session: &Mutex<Session>, target: Screen) -> Result<(), DomainError> {
    let mut s = session.lock().await;
    match (s.screen, target) {
        (Screen::Login, Screen::Signup) | (Screen::Signup, Screen::Login) => {
            s.clear_messages();
            s.screen = target;
            Ok(())
        }
        _ => Err(DomainError::validation(format!(
            "cannot switch from {:?} to {:?}",
            s.screen, target
        ))),
    }
}

/// Verify credentials and, on success, populate the identity slot and move
/// to the planner screen. Every failure (rejection or provider outage) is
/// rendered inline: the screen does not transition and the identity slot is
/// untouched.
pub async fn sign_in(
    session: &Mutex<Session>,
    provider: &dyn IdentityProvider,
    email: &str,
    password: &str,
) -> Result<(), DomainError> {
    let mut s = session.lock().await;
    if s.screen != Screen::Login {
        return Err(DomainError::validation("not on the login screen"));
    }
    s.clear_messages();

    match provider.sign_in(email, password).await {
        Ok(identity) => {
            info!(user_id = %identity.user_id, "sign-in succeeded");
            s.identity = Some(identity);
            s.screen = Screen::Planner;
        }
        Err(e) => {
            let message = match e {
                DomainError::Validation(msg) => msg,
                other => other.to_string(),
            };
            debug!("sign-in failed: {message}");
            s.error = Some(message);
        }
    }
    Ok(())
}

/// Create an account. Success moves back to the login screen with a notice;
/// no session is established until the user signs in.
pub async fn sign_up(
    session: &Mutex<Session>,
    provider: &dyn IdentityProvider,
    email: &str,
    password: &str,
) -> Result<(), DomainError> {
    let mut s = session.lock().await;
    if s.screen != Screen::Signup {
        return Err(DomainError::validation("not on the signup screen"));
    }
    s.clear_messages();

    match provider.sign_up(email, password).await {
        Ok(()) => {
            info!("sign-up succeeded");
            s.screen = Screen::Login;
            s.notice = Some(SIGNUP_NOTICE.to_string());
        }
        Err(e) => {
            let message = match e {
                DomainError::Validation(msg) => msg,
                other => other.to_string(),
            };
            debug!("sign-up failed: {message}");
            s.error = Some(message);
        }
    }
    Ok(())
}

/// Clear the identity slot and return to the login screen.
pub async fn sign_out(session: &Mutex<Session>) -> Result<(), DomainError> {
    let mut s = session.lock().await;
    if s.screen != Screen::Planner {
        return Err(DomainError::validation("not signed in"));
    }
    s.clear_messages();
    s.identity = None;
    s.screen = Screen::Login;
    Ok(())
}

/// Render the current screen. The planner screen embeds the owner's history,
/// fetched fresh on every render.
pub async fn render(
    db: &DatabaseConnection,
    session: &Mutex<Session>,
) -> Result<ScreenModel, DomainError> {
    let s = session.lock().await;
    let mut model = s.view();

    if s.screen == Screen::Planner {
        if let Some(identity) = s.identity() {
            let history =
                itineraries::history(db, &identity.user_id, DEFAULT_HISTORY_LIMIT).await?;
            model.history = Some(history.into_iter().map(HistoryEntry::from).collect());
        }
    }

    Ok(model)
}
