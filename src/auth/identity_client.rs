//! HTTP client for the identity toolkit endpoints.
//!
//! Wire contract (both operations): POST `{email, password,
//! returnSecureToken: true}`; success returns `{email, localId, idToken}`;
//! any non-2xx status carries `{"error": {"message": "..."}}`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{Identity, IdentityProvider};
use crate::config::identity::IdentityConfig;
use crate::errors::domain::{DomainError, InfraErrorKind};

const FALLBACK_ERROR_MESSAGE: &str = "UNKNOWN_ERROR";

#[derive(Debug, Serialize)]
struct CredentialPayload<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    email: String,
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(rename = "idToken")]
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

/// Extract the provider-supplied message from an error body, falling back
/// to `UNKNOWN_ERROR` when the body is missing or malformed.
fn provider_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ProviderErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| FALLBACK_ERROR_MESSAGE.to_string())
}

pub struct HttpIdentityProvider {
    http: reqwest::Client,
    config: IdentityConfig,
}

impl HttpIdentityProvider {
    pub fn new(http: reqwest::Client, config: IdentityConfig) -> Self {
        Self { http, config }
    }

    async fn post_credentials(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<reqwest::Response, DomainError> {
        let url = format!(
            "{}/v1/accounts:{}?key={}",
            self.config.base_url, path, self.config.api_key
        );
        let payload = CredentialPayload {
            email,
            password,
            return_secure_token: true,
        };

        self.http.post(&url).json(&payload).send().await.map_err(|e| {
            warn!(endpoint = path, "identity provider unreachable: {e}");
            DomainError::infra(
                InfraErrorKind::Provider,
                format!("identity provider unreachable: {e}"),
            )
        })
    }
}

#[async_trait::async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, DomainError> {
        let resp = self
            .post_credentials("signInWithPassword", email, password)
            .await?;

        if !resp.status().is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            let message = provider_error_message(&body);
            debug!("sign-in rejected by provider: {message}");
            return Err(DomainError::validation(message));
        }

        let body: SignInResponse = resp.json().await.map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Provider,
                format!("malformed sign-in response: {e}"),
            )
        })?;

        Ok(Identity {
            email: body.email,
            user_id: body.local_id,
            access_token: body.id_token,
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), DomainError> {
        let resp = self.post_credentials("signUp", email, password).await?;

        if !resp.status().is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            let message = provider_error_message(&body);
            debug!("sign-up rejected by provider: {message}");
            return Err(DomainError::validation(message));
        }

        // Success body is not consumed; the caller signs in afterwards.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_provider_message() {
        let body = br#"{"error":{"message":"INVALID_PASSWORD","code":400}}"#;
        assert_eq!(provider_error_message(body), "INVALID_PASSWORD");
    }

    #[test]
    fn falls_back_on_malformed_body() {
        assert_eq!(provider_error_message(b"<html>oops</html>"), "UNKNOWN_ERROR");
        assert_eq!(provider_error_message(b""), "UNKNOWN_ERROR");
        assert_eq!(provider_error_message(br#"{"error":{}}"#), "UNKNOWN_ERROR");
    }

    #[test]
    fn sign_in_response_maps_provider_fields() {
        let body: SignInResponse = serde_json::from_str(
            r#"{"kind":"identitytoolkit#VerifyPasswordResponse","email":"a@x.com","localId":"u123","idToken":"tok","registered":true}"#,
        )
        .unwrap();
        assert_eq!(body.email, "a@x.com");
        assert_eq!(body.local_id, "u123");
        assert_eq!(body.id_token, "tok");
    }

    #[test]
    fn credential_payload_matches_wire_contract() {
        let payload = CredentialPayload {
            email: "a@x.com",
            password: "abcdef",
            return_secure_token: true,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "a@x.com",
                "password": "abcdef",
                "returnSecureToken": true
            })
        );
    }
}
