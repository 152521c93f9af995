use clutch_api::auth::{AuthApi, AuthSession, AuthState, SESSION_KEY, StoredSession};
use clutch_api::client::{ApiError, ClutchApi};
use clutch_api::config::ApiConfig;
use clutch_api::session::{MemorySessionStore, SessionStore};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

fn session_for(server: &Server, store: Arc<MemorySessionStore>) -> AuthSession {
    let api = ClutchApi::with_config(ApiConfig::new(server.url()));
    AuthSession::new(AuthApi::new(api), store)
}

#[tokio::test]
async fn wrong_password_resolves_false() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Json(json!({"email": "a@b.com", "password": "wrongpass"})))
        .with_status(401)
        .with_body(r#"{"detail":"Invalid credentials"}"#)
        .create_async()
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let session = session_for(&server, store.clone());
    session.init();

    let ok = session.login("a@b.com", "wrongpass").await.unwrap();

    mock.assert_async().await;
    assert!(!ok);
    assert!(!session.is_authenticated());
    assert_eq!(store.get(SESSION_KEY).unwrap(), None);
}

#[tokio::test]
async fn login_populates_user_and_persists() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(r#"{"user":{"id":"7","name":"Ana","email":"ana@clutch.app"},"token":"abc"}"#)
        .create_async()
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let session = session_for(&server, store.clone());
    session.init();

    assert!(session.login(" ana@clutch.app ", "secret1").await.unwrap());
    assert_eq!(session.user().map(|u| u.name), Some("Ana".to_string()));

    let raw = store.get(SESSION_KEY).unwrap().expect("session persisted");
    let stored: StoredSession = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.token.as_deref(), Some("abc"));

    // A fresh manager over the same store restores the user.
    let restored = session_for(&server, store);
    assert!(matches!(restored.init(), AuthState::Authenticated(u) if u.id == "7"));
}

#[tokio::test]
async fn register_rejected_when_email_taken() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/register")
        .match_body(Matcher::PartialJson(json!({"name": "Ana", "email": "ana@clutch.app"})))
        .with_status(409)
        .create_async()
        .await;

    let session = session_for(&server, Arc::new(MemorySessionStore::new()));
    assert!(session.is_loading());
    assert!(!session.register("Ana", "ana@clutch.app", "secret1").await.unwrap());
    assert_eq!(session.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn register_then_logout() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/register")
        .with_status(201)
        .with_body(r#"{"user":{"id":"9","name":"Ana","email":"ana@clutch.app"}}"#)
        .create_async()
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let session = session_for(&server, store.clone());
    session.init();
    assert!(session.register("Ana", "ana@clutch.app", "secret1").await.unwrap());
    assert!(session.is_authenticated());

    session.logout();
    assert!(!session.is_authenticated());
    assert_eq!(store.get(SESSION_KEY).unwrap(), None);
}

#[tokio::test]
async fn server_error_is_raised() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(500)
        .create_async()
        .await;

    let session = session_for(&server, Arc::new(MemorySessionStore::new()));
    session.init();
    let err = session.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { .. }));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn unreachable_auth_endpoint_is_raised() {
    let api = ClutchApi::with_config(ApiConfig::new("http://127.0.0.1:1"));
    let session = AuthSession::new(AuthApi::new(api), Arc::new(MemorySessionStore::new()));
    session.init();
    let err = session.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(..)));
}
