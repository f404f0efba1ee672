use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{broadcast, oneshot};

use super::client::AuthClient;
use super::store::TokenStore;
use crate::error::{Result, TacksError};

/// Source of a currently-valid access token for request retry.
///
/// The gateway depends on this seam rather than on [`RefreshCoordinator`]
/// directly, so a host with different scheduling needs can swap in its own
/// implementation.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Obtain an access token that the service should accept, refreshing
    /// the stored pair if needed. Concurrent callers during one refresh
    /// episode all receive the same outcome.
    async fn get_valid_token(&self) -> Result<String>;
}

/// Broadcast payload emitted when the session ends involuntarily.
#[derive(Debug, Clone)]
pub struct SessionEnd {
    pub reason: TacksError,
}

/// Coordinates access-token refresh so that at most one refresh call is in
/// flight per expired-token episode.
///
/// The first caller to report an authorization failure opens an episode and
/// spawns the refresh; callers arriving while it is in flight are queued.
/// When the refresh settles, every queued waiter receives the outcome in
/// arrival order and the episode is destroyed. On failure the token store
/// is cleared and [`SessionEnd`] is broadcast so the application can drop
/// to its logged-out view.
pub struct RefreshCoordinator {
    auth: AuthClient,
    store: Arc<dyn TokenStore>,
    episode: Arc<Mutex<Option<Episode>>>,
    session_tx: broadcast::Sender<SessionEnd>,
}

struct Episode {
    waiters: Vec<oneshot::Sender<Result<String>>>,
}

impl RefreshCoordinator {
    pub fn new(auth: AuthClient, store: Arc<dyn TokenStore>) -> Self {
        let (session_tx, _) = broadcast::channel(16);
        Self {
            auth,
            store,
            episode: Arc::new(Mutex::new(None)),
            session_tx,
        }
    }

    /// Subscribe to involuntary session endings.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEnd> {
        self.session_tx.subscribe()
    }

    /// Join the active episode, or open one. Returns the receiver this
    /// caller must await; when a new episode was opened, also returns the
    /// task that will drive it.
    fn enqueue(&self) -> (oneshot::Receiver<Result<String>>, Option<RefreshTask>) {
        let (tx, rx) = oneshot::channel();
        let mut episode = self.episode.lock().expect("refresh episode lock poisoned");
        match episode.as_mut() {
            Some(active) => {
                active.waiters.push(tx);
                (rx, None)
            }
            None => {
                *episode = Some(Episode { waiters: vec![tx] });
                let task = RefreshTask {
                    auth: self.auth.clone(),
                    store: self.store.clone(),
                    episode: self.episode.clone(),
                    session_tx: self.session_tx.clone(),
                };
                (rx, Some(task))
            }
        }
    }
}

#[async_trait]
impl TokenSource for RefreshCoordinator {
    async fn get_valid_token(&self) -> Result<String> {
        let (rx, task) = self.enqueue();
        if let Some(task) = task {
            // Detached: the episode must settle and drain its waiters even
            // if every caller is dropped.
            tokio::spawn(task.run());
        }
        rx.await
            .unwrap_or_else(|_| Err(TacksError::Network("refresh task dropped".to_string())))
    }
}

/// One refresh episode in flight. Settles the episode and drains all
/// waiters exactly once.
struct RefreshTask {
    auth: AuthClient,
    store: Arc<dyn TokenStore>,
    episode: Arc<Mutex<Option<Episode>>>,
    session_tx: broadcast::Sender<SessionEnd>,
}

impl RefreshTask {
    async fn run(self) {
        let outcome = self.execute().await;
        if let Err(reason) = &outcome {
            let _ = self.session_tx.send(SessionEnd {
                reason: reason.clone(),
            });
        }
        let waiters = self
            .episode
            .lock()
            .expect("refresh episode lock poisoned")
            .take()
            .map(|episode| episode.waiters)
            .unwrap_or_default();
        for waiter in waiters {
            // A waiter that went away still gets its send attempted; the
            // dropped receiver is simply ignored.
            let _ = waiter.send(outcome.clone());
        }
    }

    async fn execute(&self) -> Result<String> {
        let Some(pair) = self.store.load() else {
            tracing::warn!("refresh requested with no stored refresh token");
            return Err(TacksError::NoRefreshToken);
        };
        match self.auth.refresh(&pair.refresh_token).await {
            Ok(fresh) => {
                tracing::debug!("access token renewed");
                Ok(fresh.access_token)
            }
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed; ending session");
                let _ = self.store.clear();
                Err(err)
            }
        }
    }
}
