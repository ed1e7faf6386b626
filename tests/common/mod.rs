#![allow(dead_code)]

// tests/common/mod.rs
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use triplab::auth::{Identity, IdentityProvider};
use triplab::errors::domain::DomainError;
use triplab::inference::{InferenceClient, InferenceError};
use triplab::infra;
use triplab::state::app_state::AppState;

// Logging is auto-installed for test binaries
#[ctor::ctor]
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

/// In-memory identity provider mirroring the external contract: sign-up
/// registers an account, sign-in checks it and mints a deterministic
/// identity, failures carry provider-style messages.
pub struct MockIdentityProvider {
    accounts: Mutex<HashMap<String, String>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_account(email: &str, password: &str) -> Self {
        let provider = Self::new();
        provider
            .accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), password.to_string());
        provider
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some(stored) if stored == password => Ok(Identity {
                email: email.to_string(),
                user_id: format!("local-{email}"),
                access_token: "test-id-token".to_string(),
            }),
            Some(_) => Err(DomainError::validation("INVALID_PASSWORD")),
            None => Err(DomainError::validation("EMAIL_NOT_FOUND")),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(DomainError::validation("EMAIL_EXISTS"));
        }
        accounts.insert(email.to_string(), password.to_string());
        Ok(())
    }
}

/// Inference client that always answers with the same text.
pub struct FixedInference(pub &'static str);

#[async_trait::async_trait]
impl InferenceClient for FixedInference {
    async fn chat(&self, _prompt: &str) -> Result<String, InferenceError> {
        Ok(self.0.to_string())
    }
}

/// Inference client standing in for an unreachable service.
pub struct UnreachableInference;

#[async_trait::async_trait]
impl InferenceClient for UnreachableInference {
    async fn chat(&self, _prompt: &str) -> Result<String, InferenceError> {
        Err(InferenceError::Transport("connection refused".to_string()))
    }
}

/// A fresh in-memory sqlite connection with the schema applied.
///
/// One pooled connection, so every handle sees the same in-memory database.
pub async fn sqlite_conn() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);
    let db = Database::connect(options).await.expect("sqlite connect");
    infra::db::ensure_schema(&db).await.expect("schema bootstrap");
    db
}

pub async fn test_state(
    identity: Arc<dyn IdentityProvider>,
    inference: Arc<dyn InferenceClient>,
) -> AppState {
    AppState::new(sqlite_conn().await, identity, inference)
}

pub fn trip_json() -> serde_json::Value {
    serde_json::json!({
        "origin": "Hanoi",
        "destination": "Tokyo",
        "start_date": "2026-09-01",
        "end_date": "2026-09-08",
        "interests": ["food", "nature"],
        "pace": "normal"
    })
}
