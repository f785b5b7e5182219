//! Google sign-in code exchange against `POST /auth/google/`.
//!
//! The consent screen happens elsewhere; this only trades the one-time
//! authorization code for the backend's JWT pair.

use std::time::Duration;

use advision_core::config::ApiConfig;
use advision_core::error::{AuthError, DashboardResult, LOGIN_FAILED};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::{api_url, http_client};

pub const GOOGLE_AUTH_PATH: &str = "auth/google/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Serialize)]
struct CodeExchange<'a> {
    code: &'a str,
}

/// Error body shapes the backend uses for rejected logins.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    non_field_errors: Option<Vec<String>>,
}

impl ErrorBody {
    fn message(self) -> String {
        self.error
            .filter(|e| !e.is_empty())
            .or_else(|| {
                self.non_field_errors
                    .and_then(|errors| errors.into_iter().next())
            })
            .unwrap_or_else(|| LOGIN_FAILED.to_string())
    }
}

/// Extracts the user-facing message from a rejected login response body.
pub fn rejection_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .unwrap_or_default()
        .message()
}

pub struct AuthClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl AuthClient {
    pub fn new(base_url: &str, timeout: Duration) -> DashboardResult<Self> {
        Ok(Self {
            http: http_client(timeout)?,
            endpoint: api_url(base_url, GOOGLE_AUTH_PATH)?,
        })
    }

    pub fn from_config(config: &ApiConfig) -> DashboardResult<Self> {
        Self::new(&config.base_url, Duration::from_millis(config.timeout_ms))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, AuthError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AuthError::MissingCode);
        }

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&CodeExchange { code })
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = rejection_message(&body);
            warn!(status = status.as_u16(), reason = %message, "Google login rejected");
            return Err(AuthError::Rejected(message));
        }

        let tokens: TokenPair =
            serde_json::from_slice(&body).map_err(|e| AuthError::Decode(e.to_string()))?;
        info!(
            email = tokens.user.as_ref().map(|u| u.email.as_str()).unwrap_or("unknown"),
            "Logged in successfully"
        );
        Ok(tokens)
    }
}
