//! Error types for Tacks.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TacksError>;

/// Primary error type for all Tacks operations.
///
/// Variants carry owned strings rather than source errors so the enum is
/// `Clone`: a single refresh outcome must be distributed to every request
/// queued behind it.
#[derive(Debug, Clone, Error)]
pub enum TacksError {
    /// Malformed login/register input, caught before or reported by the
    /// service. Recovered locally by the caller; never retried.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Wrong password or unknown user.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Registration attempted with an email that is already taken.
    #[error("User already exists")]
    UserExists,

    /// The refresh endpoint rejected the stored refresh token. Fatal to the
    /// current session.
    #[error("Invalid refresh token: {0}")]
    InvalidRefreshToken(String),

    /// A refresh was requested but no refresh token is stored. Fatal to the
    /// current session.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// Generic non-auth failure from the service.
    #[error("Request failed (status {status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TacksError {
    /// Whether this failure ends the current session: the token store is
    /// cleared and subsequent calls fail fast until the user logs in again.
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, Self::InvalidRefreshToken(_) | Self::NoRefreshToken)
    }
}

impl From<reqwest::Error> for TacksError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<std::io::Error> for TacksError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for TacksError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<toml::de::Error> for TacksError {
    fn from(error: toml::de::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<toml::ser::Error> for TacksError {
    fn from(error: toml::ser::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
