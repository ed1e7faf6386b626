//! Credential gateway: sign-in and sign-up against the external identity
//! provider. Credential validation (email format, password strength) is
//! entirely the provider's job; this module only translates its responses.

pub mod identity_client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

pub use identity_client::HttpIdentityProvider;

/// The authenticated identity held in session memory. Never persisted; the
/// identity provider remains authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub user_id: String,
    pub access_token: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and return the provider-issued identity.
    ///
    /// Failures carry the provider's message verbatim (or a generic
    /// fallback) as a `DomainError::Validation`, since the text is shown
    /// to the user as-is.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, DomainError>;

    /// Create a new account. Does not establish a session; the caller is
    /// expected to sign in afterwards.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), DomainError>;
}
