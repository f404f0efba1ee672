#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tacks::auth::{TokenPair, TokenStore};
use tacks::client::TacksClient;
use tacks::config::ClientConfig;
use tacks::error::Result;
use wiremock::MockServer;

#[derive(Default)]
pub struct InMemoryTokenStore {
    pair: Mutex<Option<TokenPair>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, access: &str, refresh: &str) {
        *self.pair.lock().expect("store lock poisoned") = Some(TokenPair::new(access, refresh));
    }

    pub fn get(&self) -> Option<TokenPair> {
        self.pair.lock().expect("store lock poisoned").clone()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Option<TokenPair> {
        self.get()
    }

    fn save(&self, pair: &TokenPair) -> Result<()> {
        *self.pair.lock().expect("store lock poisoned") = Some(pair.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.pair.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}

/// A client wired against the mock service, with its in-memory store.
pub fn client_against(server: &MockServer) -> (Arc<InMemoryTokenStore>, TacksClient) {
    let store = Arc::new(InMemoryTokenStore::new());
    let config = ClientConfig::new().with_base_url(server.uri());
    let client = TacksClient::with_store(config, store.clone());
    (store, client)
}
