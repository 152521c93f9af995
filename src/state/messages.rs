use crate::state::network::LoadingState;
use clutch_api::{HealthCheck, Player, PlayerProfile, SearchPlayersResponse};
use crossterm::event::KeyEvent;

/// The six tracked analytics operations, used to route results and alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    Goals,
    Sanctions,
    TacticalRole,
    SimilarPlayers,
    HighPotential,
}

impl Operation {
    /// Alert text shown when the operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Search => "No se pudieron buscar jugadores",
            Operation::Goals => "No se pudo obtener la predicción de goles",
            Operation::Sanctions => "No se pudo obtener la predicción de sanciones",
            Operation::TacticalRole => "No se pudo obtener el rol táctico",
            Operation::SimilarPlayers => "No se pudieron encontrar jugadores similares",
            Operation::HighPotential => "No se pudieron cargar los jugadores destacados",
        }
    }
}

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    CheckHealth,
    CheckReachable,
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    LoadHighPotential { top_n: u32 },
    /// `silent` searches log failures instead of raising an alert.
    SearchPlayers { query: String, limit: u32, silent: bool },
    PredictGoals { player: String },
    PredictSanctions { player: String },
    TacticalRole { player: String },
    SimilarPlayers { player: String, n: u32 },
    ChartsSearch { query: String, limit: u32 },
    LoadPlayerProfile { player: Player },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    HealthChecked { health: Option<HealthCheck> },
    ReachabilityChecked { reachable: bool },
    /// `false` covers both rejected credentials and unreachable backends.
    LoginFinished { success: bool },
    RegisterFinished { success: bool },
    /// A tracker slot settled; the data itself lives in the store.
    AnalyticsUpdated { operation: Operation, ok: bool, silent: bool },
    ChartsSearchFinished { results: Option<SearchPlayersResponse> },
    ProfileFinished { player: String, profile: Option<PlayerProfile> },
}

impl NetworkResponse {
    pub fn is_failure(&self) -> bool {
        match self {
            NetworkResponse::LoadingStateChanged { .. } => false,
            NetworkResponse::HealthChecked { health } => health.is_none(),
            NetworkResponse::ReachabilityChecked { reachable } => !reachable,
            NetworkResponse::LoginFinished { success }
            | NetworkResponse::RegisterFinished { success } => !success,
            NetworkResponse::AnalyticsUpdated { ok, .. } => !ok,
            NetworkResponse::ChartsSearchFinished { results } => results.is_none(),
            NetworkResponse::ProfileFinished { profile, .. } => profile.is_none(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
