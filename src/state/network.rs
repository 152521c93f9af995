use crate::state::messages::{NetworkRequest, NetworkResponse, Operation};
use clutch_api::auth::AuthSession;
use clutch_api::client::{ApiError, ApiResult, ClutchApi};
use clutch_api::store::AnalyticsStore;
use log::{debug, error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Receives requests from the UI and runs each one on its own task, so
/// different operations proceed concurrently.
pub struct NetworkWorker {
    handler: RequestHandler,
    requests: mpsc::Receiver<NetworkRequest>,
}

#[derive(Clone)]
struct RequestHandler {
    api: Arc<ClutchApi>,
    analytics: Arc<AnalyticsStore>,
    session: Arc<AuthSession>,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
}

impl NetworkWorker {
    pub fn new(
        analytics: Arc<AnalyticsStore>,
        session: Arc<AuthSession>,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            handler: RequestHandler {
                api: analytics.api().clone(),
                analytics,
                session,
                responses,
                in_flight: Arc::new(AtomicUsize::new(0)),
            },
            requests,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            if self.handler.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
                self.handler.start_loading_animation().await;
            }

            let handler = self.handler.clone();
            tokio::spawn(async move {
                let response = handler.handle(request).await;
                let failed = response.is_failure();

                if handler.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
                    handler.stop_loading_animation(!failed).await;
                }
                if let Err(e) = handler.responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
            });
        }
    }
}

impl RequestHandler {
    async fn handle(&self, request: NetworkRequest) -> NetworkResponse {
        debug!("network request: {}", describe(&request));
        match request {
            NetworkRequest::CheckHealth => {
                let health = self.api.health_check().await.ok();
                NetworkResponse::HealthChecked { health }
            }
            NetworkRequest::CheckReachable => {
                let reachable = self.api.check_backend_reachable().await;
                NetworkResponse::ReachabilityChecked { reachable }
            }
            NetworkRequest::Login { email, password } => {
                let success = settle_auth("login", self.session.login(&email, &password).await);
                NetworkResponse::LoginFinished { success }
            }
            NetworkRequest::Register { name, email, password } => {
                let success =
                    settle_auth("register", self.session.register(&name, &email, &password).await);
                NetworkResponse::RegisterFinished { success }
            }
            NetworkRequest::LoadHighPotential { top_n } => {
                let result = self.analytics.find_high_potential_players(top_n).await;
                // Background load: a failure only hides the section.
                analytics_updated(Operation::HighPotential, result, true)
            }
            NetworkRequest::SearchPlayers { query, limit, silent } => {
                let result = self.analytics.search_players(&query, limit).await;
                analytics_updated(Operation::Search, result, silent)
            }
            NetworkRequest::PredictGoals { player } => {
                let result = self.analytics.predict_goals(&player).await;
                analytics_updated(Operation::Goals, result, false)
            }
            NetworkRequest::PredictSanctions { player } => {
                let result = self.analytics.predict_sanctions(&player).await;
                analytics_updated(Operation::Sanctions, result, false)
            }
            NetworkRequest::TacticalRole { player } => {
                let result = self.analytics.get_tactical_role(&player).await;
                analytics_updated(Operation::TacticalRole, result, false)
            }
            NetworkRequest::SimilarPlayers { player, n } => {
                let result = self.analytics.find_similar_players(&player, n).await;
                analytics_updated(Operation::SimilarPlayers, result, false)
            }
            NetworkRequest::ChartsSearch { query, limit } => {
                let results = self.api.search_players(&query, limit).await.ok();
                NetworkResponse::ChartsSearchFinished { results }
            }
            NetworkRequest::LoadPlayerProfile { player } => {
                let profile = self
                    .api
                    .player_profile(&player.name, clutch_api::client::DEFAULT_SIMILAR_N)
                    .await
                    .inspect_err(|e| error!("Error loading player data: {}", failure_reason(e)))
                    .ok();
                NetworkResponse::ProfileFinished { player: player.name, profile }
            }
        }
    }

    async fn start_loading_animation(&self) {
        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let in_flight = self.in_flight.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if in_flight.load(Ordering::SeqCst) == 0 {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

fn analytics_updated<T>(operation: Operation, result: ApiResult<T>, silent: bool) -> NetworkResponse {
    if let Err(e) = &result
        && silent
    {
        warn!("{operation:?} failed in the background: {}", failure_reason(e));
    }
    NetworkResponse::AnalyticsUpdated { operation, ok: result.is_ok(), silent }
}

fn settle_auth(action: &str, result: ApiResult<bool>) -> bool {
    match result {
        Ok(true) => true,
        Ok(false) => {
            warn!("{action} rejected by the backend");
            false
        }
        Err(e) => {
            error!("{action} failed: {}", failure_reason(&e));
            false
        }
    }
}

/// Short cause for the log pane.
fn failure_reason(e: &ApiError) -> String {
    if e.is_timeout() {
        return "timed out".to_owned();
    }
    match e.status() {
        Some(status) => format!("backend returned {}", status.as_u16()),
        None => e.to_string(),
    }
}

/// Request summary for logs; never includes passwords.
fn describe(request: &NetworkRequest) -> String {
    match request {
        NetworkRequest::Login { email, .. } => format!("Login {{ email: {email} }}"),
        NetworkRequest::Register { name, email, .. } => {
            format!("Register {{ name: {name}, email: {email} }}")
        }
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_hides_passwords() {
        let login = NetworkRequest::Login { email: "a@b.com".into(), password: "hunter2".into() };
        let register = NetworkRequest::Register {
            name: "Ana".into(),
            email: "a@b.com".into(),
            password: "hunter2".into(),
        };
        assert!(!describe(&login).contains("hunter2"));
        assert!(!describe(&register).contains("hunter2"));
        assert!(describe(&NetworkRequest::CheckHealth).contains("CheckHealth"));
    }

    #[test]
    fn failure_reason_names_the_status() {
        let err = ApiError::Status {
            status: clutch_api::client::StatusCode::SERVICE_UNAVAILABLE,
            url: "http://localhost/health".into(),
        };
        assert_eq!(failure_reason(&err), "backend returned 503");
        let err = ApiError::Storage("disk full".into());
        assert_eq!(failure_reason(&err), "Session storage error: disk full");
    }

    #[test]
    fn background_failures_are_marked_silent() {
        let failed: ApiResult<()> =
            Err(ApiError::Storage("x".into()));
        match analytics_updated(Operation::HighPotential, failed, true) {
            NetworkResponse::AnalyticsUpdated { ok, silent, .. } => {
                assert!(!ok);
                assert!(silent);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
