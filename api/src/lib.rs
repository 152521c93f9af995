pub mod auth;
pub mod client;
pub mod config;
pub mod session;
pub mod store;
pub mod tracker;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Catalogues published by the analytics backend
// ---------------------------------------------------------------------------

pub const TACTICAL_ROLES: [&str; 7] = [
    "Defensor Agresivo",
    "Mediocampista Creativo",
    "Delantero Finalizador",
    "Jugador de Relevo",
    "Mediocampista Defensivo",
    "Defensor Sólido",
    "Arquero Seguro",
];

pub const POSITIONS: [&str; 4] = ["Forward", "Midfielder", "Defender", "Goalkeeper"];

// ---------------------------------------------------------------------------
// Wire types, mirrored from the backend and checked at the boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub models_loaded: bool,
    pub players_count: u32,
    pub timestamp: String,
}

/// A player as listed by search, similarity and high-potential queries.
/// Identity is the name; the backend does not hand out ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "player")]
    pub name: String,
    pub position: String,
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clutch_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPlayersResponse {
    pub players: Vec<Player>,
    /// Reported by the backend; not checked against `players.len()`.
    pub count: u32,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPrediction {
    pub player: String,
    pub predicted_goals: f64,
    pub actual_goals: f64,
    pub position: String,
    pub team: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanctionPrediction {
    pub player: String,
    /// Probability in `[0, 1]`.
    pub sanction_risk: f64,
    /// Display form sent by the backend, e.g. `"42.5%"`.
    pub sanction_risk_percentage: String,
    pub position: String,
    pub team: String,
}

impl SanctionPrediction {
    /// Numeric value of `sanction_risk_percentage`, if it parses.
    pub fn risk_percent(&self) -> Option<f64> {
        self.sanction_risk_percentage
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    pub fn risk_level(&self) -> RiskLevel {
        let percent = self.risk_percent().unwrap_or(self.sanction_risk * 100.0);
        if percent > 70.0 {
            RiskLevel::High
        } else if percent > 30.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighPotentialPlayersResponse {
    pub players: Vec<Player>,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalRole {
    pub player: String,
    pub tactical_role: String,
    pub position: String,
    pub team: String,
}

impl TacticalRole {
    /// Whether the role is one of the backend's published catalogue entries.
    pub fn is_known_role(&self) -> bool {
        TACTICAL_ROLES.contains(&self.tactical_role.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPlayersResponse {
    pub target_player: String,
    pub similar_players: Vec<Player>,
    pub count: u32,
}

/// The four per-player analytics loaded together for the charts view.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub goals: GoalPrediction,
    pub sanction: SanctionPrediction,
    pub role: TacticalRole,
    pub similar: SimilarPlayersResponse,
}

// ---------------------------------------------------------------------------
// Boundary validation
// ---------------------------------------------------------------------------

/// Domain checks applied to every decoded response before it leaves the
/// client. A failure becomes `ApiError::Invalid`.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("`{field}` is empty"));
    }
    Ok(())
}

fn require_finite(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("`{field}` is not a finite number"));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> Result<(), String> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(format!("`{field}` is negative ({value})"));
    }
    Ok(())
}

fn validate_all(field: &str, players: &[Player]) -> Result<(), String> {
    players
        .iter()
        .enumerate()
        .try_for_each(|(i, p)| p.validate().map_err(|e| format!("{field}[{i}]: {e}")))
}

impl Validate for HealthCheck {
    fn validate(&self) -> Result<(), String> {
        require_text("status", &self.status)
    }
}

impl Validate for Player {
    fn validate(&self) -> Result<(), String> {
        require_text("player", &self.name)?;
        if let Some(score) = self.clutch_score {
            require_finite("clutch_score", score)?;
        }
        Ok(())
    }
}

impl Validate for SearchPlayersResponse {
    fn validate(&self) -> Result<(), String> {
        validate_all("players", &self.players)
    }
}

impl Validate for GoalPrediction {
    fn validate(&self) -> Result<(), String> {
        require_text("player", &self.player)?;
        // Model output; small negatives are valid and shown as-is.
        require_finite("predicted_goals", self.predicted_goals)?;
        require_non_negative("actual_goals", self.actual_goals)
    }
}

impl Validate for SanctionPrediction {
    fn validate(&self) -> Result<(), String> {
        require_text("player", &self.player)?;
        require_finite("sanction_risk", self.sanction_risk)?;
        if !(0.0..=1.0).contains(&self.sanction_risk) {
            return Err(format!(
                "`sanction_risk` out of range [0, 1] ({})",
                self.sanction_risk
            ));
        }
        Ok(())
    }
}

impl Validate for HighPotentialPlayersResponse {
    fn validate(&self) -> Result<(), String> {
        validate_all("players", &self.players)
    }
}

impl Validate for TacticalRole {
    fn validate(&self) -> Result<(), String> {
        require_text("player", &self.player)?;
        require_text("tactical_role", &self.tactical_role)
    }
}

impl Validate for SimilarPlayersResponse {
    fn validate(&self) -> Result<(), String> {
        require_text("target_player", &self.target_player)?;
        validate_all("similar_players", &self.similar_players)
    }
}
