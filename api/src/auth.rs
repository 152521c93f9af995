use crate::Validate;
use crate::client::{ApiError, ApiResult, ClutchApi, decode_body};
use crate::session::SessionStore;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

pub const SESSION_KEY: &str = "clutch.session";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// What the auth endpoint hands back on success.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthGrant {
    pub user: User,
    #[serde(default)]
    pub token: Option<String>,
}

impl Validate for AuthGrant {
    fn validate(&self) -> Result<(), String> {
        if self.user.id.trim().is_empty() {
            return Err("`user.id` is empty".into());
        }
        if self.user.email.trim().is_empty() {
            return Err("`user.email` is empty".into());
        }
        Ok(())
    }
}

/// The record persisted under [`SESSION_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: User,
    #[serde(default)]
    pub token: Option<String>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct LoginCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct NewAccount<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Client for the remote auth endpoint. Shares the analytics backend's
/// origin, headers and timeout.
#[derive(Debug, Clone)]
pub struct AuthApi {
    api: ClutchApi,
}

impl AuthApi {
    pub fn new(api: ClutchApi) -> Self {
        Self { api }
    }

    /// `Ok(None)` when the backend rejects the credentials (any 4xx).
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Option<AuthGrant>> {
        self.post(LOGIN_PATH, &LoginCredentials { email, password }).await
    }

    /// `Ok(None)` when the backend refuses the account (any 4xx, e.g. the
    /// email is taken).
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<Option<AuthGrant>> {
        self.post(REGISTER_PATH, &NewAccount { name, email, password }).await
    }

    async fn post(&self, endpoint: &str, body: &impl Serialize) -> ApiResult<Option<AuthGrant>> {
        let url = self.api.config().api_url(endpoint);
        let response = self
            .api
            .http()
            .post(&url)
            .timeout(self.api.config().timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        let status = response.status();
        if status.is_client_error() {
            debug!("{endpoint} rejected with {status}");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status { status, url });
        }
        decode_body(response, url).await.map(Some)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// A persisted session has not been probed yet.
    #[default]
    Initializing,
    Authenticated(User),
    Unauthenticated,
}

/// Who is signed in. Construct one per process and share it by `Arc`.
///
/// `Initializing -> {Authenticated, Unauthenticated}` via [`AuthSession::init`];
/// `Unauthenticated -> Authenticated` via login/register;
/// `Authenticated -> Unauthenticated` via logout.
pub struct AuthSession {
    api: AuthApi,
    store: Arc<dyn SessionStore>,
    state: RwLock<AuthState>,
}

impl AuthSession {
    pub fn new(api: AuthApi, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store, state: RwLock::new(AuthState::Initializing) }
    }

    /// Restore a persisted session if there is a readable one. A corrupt
    /// record is dropped and the session starts signed out.
    pub fn init(&self) -> AuthState {
        let restored = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<StoredSession>(&raw) {
                Ok(stored) => {
                    info!("restored session for {}", stored.user.email);
                    AuthState::Authenticated(stored.user)
                }
                Err(e) => {
                    warn!("discarding unreadable session record: {e}");
                    if let Err(e) = self.store.remove(SESSION_KEY) {
                        warn!("{e}");
                    }
                    AuthState::Unauthenticated
                }
            },
            Ok(None) => AuthState::Unauthenticated,
            Err(e) => {
                warn!("{e}");
                AuthState::Unauthenticated
            }
        };
        self.set_state(restored.clone());
        restored
    }

    pub fn state(&self) -> AuthState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn user(&self) -> Option<User> {
        match self.state() {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state(), AuthState::Authenticated(_))
    }

    /// True until [`AuthSession::init`] (or a login/register) resolves.
    pub fn is_loading(&self) -> bool {
        matches!(self.state(), AuthState::Initializing)
    }

    /// `Ok(false)` on rejected credentials, `Err` when the backend could not
    /// be reached.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<bool> {
        match self.api.login(email.trim(), password).await? {
            Some(grant) => {
                self.establish(grant);
                Ok(true)
            }
            None => {
                self.settle_if_initializing();
                Ok(false)
            }
        }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ApiResult<bool> {
        match self.api.register(name.trim(), email.trim(), password).await? {
            Some(grant) => {
                self.establish(grant);
                Ok(true)
            }
            None => {
                self.settle_if_initializing();
                Ok(false)
            }
        }
    }

    /// Forget the user and the persisted record. Never fails; storage
    /// problems are logged.
    pub fn logout(&self) {
        if let Err(e) = self.store.remove(SESSION_KEY) {
            warn!("{e}");
        }
        self.set_state(AuthState::Unauthenticated);
        info!("signed out");
    }

    fn establish(&self, grant: AuthGrant) {
        let stored = StoredSession {
            user: grant.user.clone(),
            token: grant.token,
            saved_at: Utc::now(),
        };
        match serde_json::to_string(&stored) {
            Ok(raw) => {
                if let Err(e) = self.store.set(SESSION_KEY, &raw) {
                    warn!("session will not survive a restart: {e}");
                }
            }
            Err(e) => warn!("could not serialize session: {e}"),
        }
        info!("signed in as {}", grant.user.email);
        self.set_state(AuthState::Authenticated(grant.user));
    }

    fn settle_if_initializing(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if *state == AuthState::Initializing {
            *state = AuthState::Unauthenticated;
        }
    }

    fn set_state(&self, next: AuthState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
