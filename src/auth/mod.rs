//! Session tokens: storage, auth endpoints, and coordinated refresh.

pub mod client;
pub mod refresh;
pub mod store;
pub mod token;

pub use client::AuthClient;
pub use refresh::{RefreshCoordinator, SessionEnd, TokenSource};
pub use store::{FileTokenStore, TokenStore};
pub use token::TokenPair;
