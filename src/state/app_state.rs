use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::IdentityProvider;
use crate::error::AppError;
use crate::inference::InferenceClient;
use crate::services::sessions::SessionRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for scenarios that never touch storage)
    pub db: Option<DatabaseConnection>,
    /// Credential gateway to the external identity provider
    pub identity: Arc<dyn IdentityProvider>,
    /// Chat-completion client for itinerary generation
    pub inference: Arc<dyn InferenceClient>,
    /// Per-session state, keyed by session id
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        identity: Arc<dyn IdentityProvider>,
        inference: Arc<dyn InferenceClient>,
    ) -> Self {
        Self {
            db: Some(db),
            identity,
            inference,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    pub fn without_db(
        identity: Arc<dyn IdentityProvider>,
        inference: Arc<dyn InferenceClient>,
    ) -> Self {
        Self {
            db: None,
            identity,
            inference,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    /// The database connection, or an internal error when state was built
    /// without one.
    pub fn db(&self) -> Result<&DatabaseConnection, AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| AppError::internal("Database connection not available".to_string()))
    }
}
