use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::store::TokenStore;
use super::token::TokenPair;
use crate::config::ClientConfig;
use crate::error::{Result, TacksError};
use crate::gateway::http::{self, ErrorBody};

/// Client for the auth endpoints: login, register, refresh, logout.
///
/// Owns its own HTTP path: auth calls are never routed through the request
/// gateway, so a rejected refresh can never trigger another refresh.
/// Successful login/register/refresh all persist the new pair before
/// returning.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use tacks::auth::{AuthClient, FileTokenStore};
/// use tacks::config::ClientConfig;
///
/// # async fn example() -> tacks::error::Result<()> {
/// let store = Arc::new(FileTokenStore::new_default());
/// let auth = AuthClient::new(&ClientConfig::from_env(), store);
/// auth.login("a@x.com", "hunter2").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

#[derive(Serialize)]
struct CredentialsPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshPayload<'a> {
    refresh_token: &'a str,
}

impl AuthClient {
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        Self {
            client: http::build_client(config.timeout()),
            base_url: config.base_url().to_string(),
            store,
        }
    }

    /// Override the transport timeout (primarily for tests).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http::build_client(timeout);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Exchange credentials for a token pair and persist it.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        validate_credentials(email, password)?;
        let resp = self
            .client
            .post(self.endpoint("/api/login"))
            .json(&CredentialsPayload { email, password })
            .send()
            .await?;
        if resp.status().is_success() {
            let pair: TokenPair = resp.json().await?;
            self.store.save(&pair)?;
            tracing::debug!(email, "logged in");
            return Ok(pair);
        }
        let status = resp.status().as_u16();
        let body = http::read_error_body(resp).await;
        Err(map_login_failure(status, body))
    }

    /// Create an account, receiving and persisting the initial token pair.
    pub async fn register(&self, email: &str, password: &str) -> Result<TokenPair> {
        validate_credentials(email, password)?;
        let resp = self
            .client
            .post(self.endpoint("/api/register"))
            .json(&CredentialsPayload { email, password })
            .send()
            .await?;
        if resp.status().is_success() {
            let pair: TokenPair = resp.json().await?;
            self.store.save(&pair)?;
            tracing::debug!(email, "registered");
            return Ok(pair);
        }
        let status = resp.status().as_u16();
        let body = http::read_error_body(resp).await;
        Err(map_register_failure(status, body))
    }

    /// Trade a refresh token for a fresh pair and persist it.
    ///
    /// Any non-success response is `InvalidRefreshToken`: the service
    /// rejects malformed, wrong-type, and expired tokens alike, and every
    /// rejection is terminal for the session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let resp = self
            .client
            .post(self.endpoint("/api/refresh"))
            .json(&RefreshPayload { refresh_token })
            .send()
            .await?;
        if resp.status().is_success() {
            let pair: TokenPair = resp.json().await?;
            self.store.save(&pair)?;
            return Ok(pair);
        }
        let body = http::read_error_body(resp).await;
        Err(map_refresh_failure(body))
    }

    /// Drop the stored session, if any.
    pub fn logout(&self) -> Result<()> {
        tracing::debug!("clearing stored session");
        self.store.clear()
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(TacksError::Validation("email is required".to_string()));
    }
    if password.is_empty() {
        return Err(TacksError::Validation("password is required".to_string()));
    }
    Ok(())
}

pub(crate) fn map_login_failure(status: u16, body: ErrorBody) -> TacksError {
    match status {
        400 | 401 | 403 => TacksError::InvalidCredentials(body.error),
        _ => TacksError::RequestFailed {
            status,
            message: body.error,
        },
    }
}

pub(crate) fn map_register_failure(status: u16, body: ErrorBody) -> TacksError {
    match status {
        400 | 401 | 403 if body.error.to_ascii_lowercase().contains("exists") => {
            TacksError::UserExists
        }
        400 | 401 | 403 => TacksError::Validation(body.error),
        _ => TacksError::RequestFailed {
            status,
            message: body.error,
        },
    }
}

pub(crate) fn map_refresh_failure(body: ErrorBody) -> TacksError {
    // The service sends a machine code (TOKEN_EXPIRED / INVALID_TOKEN)
    // alongside the human message; prefer it when present.
    TacksError::InvalidRefreshToken(body.code.unwrap_or(body.error))
}
