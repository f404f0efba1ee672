//! Shared HTTP plumbing for the gateway and auth client.

use std::time::Duration;

use serde::Deserialize;

/// Build a JSON API client with the given transport timeout.
pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
}

/// Error payload shape used by every service endpoint.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Read the `{error}` body off a failed response, falling back to the
/// status line when the body is not the expected shape.
pub async fn read_error_body(resp: reqwest::Response) -> ErrorBody {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
        Ok(body) => body,
        Err(_) => ErrorBody {
            error: status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            code: None,
        },
    }
}

/// Whether a path is one of the auth endpoints, which must never enter the
/// refresh-retry path.
pub fn is_auth_path(path: &str) -> bool {
    matches!(
        path.trim_end_matches('/'),
        "/api/login" | "/api/register" | "/api/refresh"
    )
}
