use serde::{Deserialize, Serialize};

/// An access/refresh token pair as issued by the service.
///
/// Both tokens are opaque to the client. They are issued together on
/// login/register and rotated together on every successful refresh; the
/// refresh token's validity window strictly exceeds the access token's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}
