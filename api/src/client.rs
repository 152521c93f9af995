use crate::config::{ApiConfig, HEALTH_PATH};
use crate::{
    GoalPrediction, HealthCheck, HighPotentialPlayersResponse, PlayerProfile, SanctionPrediction,
    SearchPlayersResponse, SimilarPlayersResponse, TacticalRole, Validate,
};
use log::{debug, error, warn};
use reqwest::{Client, Response};
pub use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::fmt;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_TOP_N: u32 = 10;
pub const DEFAULT_SIMILAR_N: u32 = 5;

/// Client for the Clutch Score analytics backend. Every operation is a single
/// read-only GET; nothing is retried.
#[derive(Debug, Clone)]
pub struct ClutchApi {
    client: Client,
    config: ApiConfig,
}

impl Default for ClutchApi {
    fn default() -> Self {
        Self::with_config(ApiConfig::default())
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// No response reached us: DNS, refused connection, timeout.
    Network(reqwest::Error, String),
    /// The backend answered with a non-2xx status.
    Status { status: StatusCode, url: String },
    /// The body was not the JSON shape we expected.
    Parsing(serde_json::Error, String),
    /// The body decoded but broke a domain rule.
    Invalid { url: String, reason: String },
    Storage(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Status { status, .. } => write!(f, "HTTP error! status: {}", status.as_u16()),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Invalid { url, reason } => write!(f, "Invalid response from {url}: {reason}"),
            ApiError::Storage(msg) => write!(f, "Session storage error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) => Some(e),
            ApiError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e, _) => e.status(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Network(e, _) if e.is_timeout())
    }
}

impl ClutchApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ApiConfig) -> Self {
        let client = Client::builder()
            .user_agent(concat!("clutch-score/", env!("CARGO_PKG_VERSION")))
            .default_headers(config.default_headers.clone())
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Probe `/health`. True only on a 2xx; every failure is logged and
    /// reported as `false`, so "down", "timed out" and "no DNS" look the same.
    pub async fn check_backend_reachable(&self) -> bool {
        let url = self.config.api_url(HEALTH_PATH);
        match self.client.get(&url).timeout(self.config.timeout).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!("backend health probe at {url} returned {}", response.status());
                false
            }
            Err(e) => {
                warn!("Error connecting to backend: {e}");
                false
            }
        }
    }

    pub async fn health_check(&self) -> ApiResult<HealthCheck> {
        self.get(HEALTH_PATH)
            .await
            .inspect_err(|e| error!("Error checking health: {e}"))
    }

    pub async fn search_players(&self, query: &str, limit: u32) -> ApiResult<SearchPlayersResponse> {
        let endpoint = format!("/search_players/{}?limit={limit}", encode_segment(query));
        self.get(&endpoint)
            .await
            .inspect_err(|e| error!("Error searching players: {e}"))
    }

    pub async fn predict_goals(&self, player_name: &str) -> ApiResult<GoalPrediction> {
        let endpoint = format!("/predict_goals/{}", encode_segment(player_name));
        self.get(&endpoint)
            .await
            .inspect_err(|e| error!("Error predicting goals: {e}"))
    }

    pub async fn predict_sanction(&self, player_name: &str) -> ApiResult<SanctionPrediction> {
        let endpoint = format!("/predict_sanction/{}", encode_segment(player_name));
        self.get(&endpoint)
            .await
            .inspect_err(|e| error!("Error predicting sanctions: {e}"))
    }

    pub async fn find_high_potential_players(
        &self,
        top_n: u32,
    ) -> ApiResult<HighPotentialPlayersResponse> {
        let endpoint = format!("/find_high_potential_players/?top_n={top_n}");
        self.get(&endpoint)
            .await
            .inspect_err(|e| error!("Error finding high potential players: {e}"))
    }

    pub async fn player_tactical_role(&self, player_name: &str) -> ApiResult<TacticalRole> {
        let endpoint = format!("/player_tactical_role/{}", encode_segment(player_name));
        self.get(&endpoint)
            .await
            .inspect_err(|e| error!("Error getting tactical role: {e}"))
    }

    pub async fn find_similar_players(
        &self,
        player_name: &str,
        n: u32,
    ) -> ApiResult<SimilarPlayersResponse> {
        let endpoint = format!("/similar_players/{}?n={n}", encode_segment(player_name));
        self.get(&endpoint)
            .await
            .inspect_err(|e| error!("Error finding similar players: {e}"))
    }

    /// Load goals, sanction risk, tactical role and similar players at once.
    /// The four requests run concurrently; if any fails the whole profile
    /// fails, even when the others already succeeded.
    pub async fn player_profile(&self, player_name: &str, similar_n: u32) -> ApiResult<PlayerProfile> {
        let (goals, sanction, role, similar) = futures_util::try_join!(
            self.predict_goals(player_name),
            self.predict_sanction(player_name),
            self.player_tactical_role(player_name),
            self.find_similar_players(player_name, similar_n)
        )?;
        Ok(PlayerProfile { goals, sanction, role, similar })
    }

    async fn get<T: DeserializeOwned + Validate>(&self, endpoint: &str) -> ApiResult<T> {
        let url = self.config.api_url(endpoint);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status { status: response.status(), url });
        }
        decode_body(response, url).await
    }
}

/// Percent-encode a free-text path parameter (player name, search query).
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Read, decode and validate a successful response body.
pub(crate) async fn decode_body<T: DeserializeOwned + Validate>(
    response: Response,
    url: String,
) -> ApiResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Network(e, url.clone()))?;
    let value: T = serde_json::from_slice(&bytes).map_err(|e| ApiError::Parsing(e, url.clone()))?;
    value
        .validate()
        .map_err(|reason| ApiError::Invalid { url, reason })?;
    Ok(value)
}
