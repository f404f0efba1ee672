//! Request gateway: bearer attach, dispatch, and silent token renewal.

pub mod http;

use std::sync::Arc;

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::auth::client::{map_login_failure, map_refresh_failure, map_register_failure};
use crate::auth::{TokenSource, TokenStore};
use crate::config::ClientConfig;
use crate::error::{Result, TacksError};

/// The sole entry point for authenticated API calls.
///
/// Attaches the stored access token as a bearer header, and on a 401/403
/// obtains a fresh token through the [`TokenSource`] (joining an in-flight
/// refresh if one exists) and replays the request exactly once. The retry's
/// outcome, success or failure, is surfaced as-is; there is never a second
/// refresh for the same request.
///
/// Auth endpoints (`/api/login`, `/api/register`, `/api/refresh`) never
/// enter the retry path, whatever their status.
pub struct Gateway {
    client: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    tokens: Arc<dyn TokenSource>,
}

impl Gateway {
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn TokenStore>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            client: http::build_client(config.timeout()),
            base_url: config.base_url().to_string(),
            store,
            tokens,
        }
    }

    /// Send a request, renewing the access token and retrying once on an
    /// authorization failure.
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Response> {
        let token = self.store.load().map(|pair| pair.access_token);
        let resp = self
            .dispatch(&method, path, body, token.as_deref())
            .await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if http::is_auth_path(path) {
            return Err(auth_failure(path, resp).await);
        }
        if matches!(status.as_u16(), 401 | 403) {
            tracing::debug!(%method, path, status = status.as_u16(), "access token rejected; renewing");
            let fresh = self.tokens.get_valid_token().await?;
            let retry = self.dispatch(&method, path, body, Some(&fresh)).await?;
            if retry.status().is_success() {
                return Ok(retry);
            }
            return Err(request_failure(retry).await);
        }
        Err(request_failure(resp).await)
    }

    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Response> {
        let mut request = self
            .client
            .request(method.clone(), format!("{}{path}", self.base_url));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(Method::GET, path, None).await?;
        Ok(resp.json().await?)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let resp = self.send(Method::POST, path, Some(&body)).await?;
        Ok(resp.json().await?)
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let resp = self.send(Method::PUT, path, Some(&body)).await?;
        Ok(resp.json().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }
}

async fn request_failure(resp: Response) -> TacksError {
    let status = resp.status().as_u16();
    let body = http::read_error_body(resp).await;
    TacksError::RequestFailed {
        status,
        message: body.error,
    }
}

/// Map a failed auth-endpoint response through the auth taxonomy instead of
/// the refresh-retry path.
async fn auth_failure(path: &str, resp: Response) -> TacksError {
    let status = resp.status().as_u16();
    let body = http::read_error_body(resp).await;
    match path.trim_end_matches('/') {
        "/api/login" => map_login_failure(status, body),
        "/api/register" => map_register_failure(status, body),
        _ => map_refresh_failure(body),
    }
}
