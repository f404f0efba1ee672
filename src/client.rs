//! Top-level facade wiring the store, auth client, refresh coordinator,
//! gateway, and task API together.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::auth::{AuthClient, FileTokenStore, RefreshCoordinator, SessionEnd, TokenPair, TokenStore};
use crate::board::TaskApi;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::gateway::Gateway;

/// Everything an application needs to drive the task board.
///
/// # Example
/// ```no_run
/// use tacks::prelude::*;
///
/// # async fn example() -> tacks::error::Result<()> {
/// let client = TacksClient::new(ClientConfig::from_env());
/// let mut sessions = client.session_events();
/// client.login("a@x.com", "hunter2").await?;
/// let tasks = client.tasks().list().await?;
/// # Ok(())
/// # }
/// ```
pub struct TacksClient {
    auth: AuthClient,
    coordinator: Arc<RefreshCoordinator>,
    gateway: Arc<Gateway>,
    tasks: TaskApi,
    store: Arc<dyn TokenStore>,
}

impl TacksClient {
    /// Build a client persisting the session under the user's home
    /// directory.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_store(config, Arc::new(FileTokenStore::new_default()))
    }

    /// Build a client over a caller-supplied token store.
    pub fn with_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        let auth = AuthClient::new(&config, store.clone());
        let coordinator = Arc::new(RefreshCoordinator::new(auth.clone(), store.clone()));
        let gateway = Arc::new(Gateway::new(&config, store.clone(), coordinator.clone()));
        let tasks = TaskApi::new(gateway.clone());
        Self {
            auth,
            coordinator,
            gateway,
            tasks,
            store,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        self.auth.login(email, password).await
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<TokenPair> {
        self.auth.register(email, password).await
    }

    pub fn logout(&self) -> Result<()> {
        self.auth.logout()
    }

    pub fn logged_in(&self) -> bool {
        self.store.load().is_some()
    }

    /// Typed task operations.
    pub fn tasks(&self) -> &TaskApi {
        &self.tasks
    }

    /// Raw gateway access for endpoints without a typed wrapper.
    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// Subscribe to involuntary session endings (failed refresh), so the
    /// application can present its logged-out view.
    pub fn session_events(&self) -> broadcast::Receiver<SessionEnd> {
        self.coordinator.subscribe()
    }
}
