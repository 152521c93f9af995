use crate::client::{ApiResult, ClutchApi};
use crate::tracker::OperationTracker;
use crate::{
    GoalPrediction, HighPotentialPlayersResponse, SanctionPrediction, SearchPlayersResponse,
    SimilarPlayersResponse, TacticalRole,
};
use std::sync::Arc;

/// Per-endpoint state for the six analytics operations.
///
/// Each slot is independent: different operations may run concurrently.
/// Re-invoking the same operation before it settles is unfenced (see
/// [`OperationTracker`]).
#[derive(Debug)]
pub struct AnalyticsStore {
    api: Arc<ClutchApi>,
    pub search_results: OperationTracker<SearchPlayersResponse>,
    pub goal_prediction: OperationTracker<GoalPrediction>,
    pub sanction_prediction: OperationTracker<SanctionPrediction>,
    pub tactical_role: OperationTracker<TacticalRole>,
    pub similar_players: OperationTracker<SimilarPlayersResponse>,
    pub high_potential_players: OperationTracker<HighPotentialPlayersResponse>,
}

impl AnalyticsStore {
    pub fn new(api: Arc<ClutchApi>) -> Self {
        Self {
            api,
            search_results: OperationTracker::new(),
            goal_prediction: OperationTracker::new(),
            sanction_prediction: OperationTracker::new(),
            tactical_role: OperationTracker::new(),
            similar_players: OperationTracker::new(),
            high_potential_players: OperationTracker::new(),
        }
    }

    pub fn api(&self) -> &Arc<ClutchApi> {
        &self.api
    }

    pub async fn search_players(&self, query: &str, limit: u32) -> ApiResult<SearchPlayersResponse> {
        self.search_results
            .run(self.api.search_players(query, limit))
            .await
    }

    pub async fn predict_goals(&self, player_name: &str) -> ApiResult<GoalPrediction> {
        self.goal_prediction
            .run(self.api.predict_goals(player_name))
            .await
    }

    pub async fn predict_sanctions(&self, player_name: &str) -> ApiResult<SanctionPrediction> {
        self.sanction_prediction
            .run(self.api.predict_sanction(player_name))
            .await
    }

    pub async fn get_tactical_role(&self, player_name: &str) -> ApiResult<TacticalRole> {
        self.tactical_role
            .run(self.api.player_tactical_role(player_name))
            .await
    }

    pub async fn find_similar_players(
        &self,
        player_name: &str,
        n: u32,
    ) -> ApiResult<SimilarPlayersResponse> {
        self.similar_players
            .run(self.api.find_similar_players(player_name, n))
            .await
    }

    pub async fn find_high_potential_players(
        &self,
        top_n: u32,
    ) -> ApiResult<HighPotentialPlayersResponse> {
        self.high_potential_players
            .run(self.api.find_high_potential_players(top_n))
            .await
    }

    pub fn clear_search_results(&self) {
        self.search_results.clear();
    }

    pub fn clear_goal_prediction(&self) {
        self.goal_prediction.clear();
    }

    pub fn clear_sanction_prediction(&self) {
        self.sanction_prediction.clear();
    }

    pub fn clear_tactical_role(&self) {
        self.tactical_role.clear();
    }

    pub fn clear_similar_players(&self) {
        self.similar_players.clear();
    }

    pub fn clear_high_potential_players(&self) {
        self.high_potential_players.clear();
    }

    /// Reset every slot, whatever its current state.
    pub fn clear_all(&self) {
        self.clear_goal_prediction();
        self.clear_sanction_prediction();
        self.clear_tactical_role();
        self.clear_similar_players();
        self.clear_high_potential_players();
        self.clear_search_results();
    }

    /// Drop every per-player result, keeping search results and the
    /// high-potential list. Used when a different player is selected.
    pub fn clear_player_results(&self) {
        self.clear_goal_prediction();
        self.clear_sanction_prediction();
        self.clear_tactical_role();
        self.clear_similar_players();
    }

    pub fn any_loading(&self) -> bool {
        self.search_results.is_loading()
            || self.goal_prediction.is_loading()
            || self.sanction_prediction.is_loading()
            || self.tactical_role.is_loading()
            || self.similar_players.is_loading()
            || self.high_potential_players.is_loading()
    }
}
