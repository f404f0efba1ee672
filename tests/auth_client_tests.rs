//! Tests for the auth endpoints: credential exchange, error mapping, and
//! token persistence.

mod support;

use std::sync::Arc;

use serde_json::json;
use tacks::auth::{AuthClient, TokenPair};
use tacks::config::ClientConfig;
use tacks::error::TacksError;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{client_against, InMemoryTokenStore};

fn token_response(access: &str, refresh: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "accessToken": access,
        "refreshToken": refresh
    }))
}

fn auth_against(server: &MockServer) -> (Arc<InMemoryTokenStore>, AuthClient) {
    let store = Arc::new(InMemoryTokenStore::new());
    let config = ClientConfig::new().with_base_url(server.uri());
    let auth = AuthClient::new(&config, store.clone());
    (store, auth)
}

#[tokio::test]
async fn login_persists_issued_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "email": "a@x.com", "password": "p" })))
        .respond_with(token_response("A1", "R1"))
        .expect(1)
        .mount(&server)
        .await;

    let (store, client) = client_against(&server);
    let pair = client.login("a@x.com", "p").await.expect("login");
    assert_eq!(pair, TokenPair::new("A1", "R1"));
    assert_eq!(store.get(), Some(TokenPair::new("A1", "R1")));
    assert!(client.logged_in());
}

#[tokio::test]
async fn login_maps_rejection_to_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "User not found" })))
        .mount(&server)
        .await;

    let (store, client) = client_against(&server);
    let err = client.login("ghost@x.com", "p").await.unwrap_err();
    match err {
        TacksError::InvalidCredentials(msg) => assert_eq!(msg, "User not found"),
        other => panic!("expected InvalidCredentials, got {other:?}"),
    }
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn register_persists_issued_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(body_json(json!({ "email": "new@x.com", "password": "p" })))
        .respond_with(token_response("A1", "R1"))
        .expect(1)
        .mount(&server)
        .await;

    let (store, client) = client_against(&server);
    client.register("new@x.com", "p").await.expect("register");
    assert_eq!(store.get(), Some(TokenPair::new("A1", "R1")));
}

#[tokio::test]
async fn register_maps_conflict_to_user_exists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "User already exists" })),
        )
        .mount(&server)
        .await;

    let (_store, client) = client_against(&server);
    let err = client.register("a@x.com", "p").await.unwrap_err();
    assert!(matches!(err, TacksError::UserExists));
}

#[tokio::test]
async fn refresh_rotates_stored_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .and(body_json(json!({ "refreshToken": "R1" })))
        .respond_with(token_response("A2", "R2"))
        .expect(1)
        .mount(&server)
        .await;

    let (store, auth) = auth_against(&server);
    store.seed("A1", "R1");
    let pair = auth.refresh("R1").await.expect("refresh");
    assert_eq!(pair, TokenPair::new("A2", "R2"));
    assert_eq!(store.get(), Some(TokenPair::new("A2", "R2")));
}

#[tokio::test]
async fn refresh_rejection_is_invalid_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": "Invalid refresh token", "code": "TOKEN_EXPIRED" })),
        )
        .mount(&server)
        .await;

    let (_store, auth) = auth_against(&server);
    let err = auth.refresh("stale").await.unwrap_err();
    match err {
        TacksError::InvalidRefreshToken(code) => assert_eq!(code, "TOKEN_EXPIRED"),
        other => panic!("expected InvalidRefreshToken, got {other:?}"),
    }
}

#[tokio::test]
async fn local_validation_skips_the_network() {
    // No mocks mounted: any dispatch would come back as an unmatched 404.
    let server = MockServer::start().await;
    let (_store, client) = client_against(&server);

    let err = client.login("", "p").await.unwrap_err();
    assert!(matches!(err, TacksError::Validation(_)));
    let err = client.register("a@x.com", "").await.unwrap_err();
    assert!(matches!(err, TacksError::Validation(_)));
}

#[tokio::test]
async fn logout_clears_stored_session() {
    let server = MockServer::start().await;
    let (store, client) = client_against(&server);
    store.seed("A1", "R1");
    assert!(client.logged_in());

    client.logout().expect("logout");
    assert_eq!(store.get(), None);
    assert!(!client.logged_in());
}
