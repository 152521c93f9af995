use crate::state::app_settings::AppSettings;
use crate::state::app_state::{Alert, AppState, validate_login, validate_register};
use crate::state::messages::{NetworkRequest, Operation};
use clutch_api::auth::{AuthSession, AuthState};
use clutch_api::client::{DEFAULT_SEARCH_LIMIT, DEFAULT_SIMILAR_N, DEFAULT_TOP_N};
use clutch_api::store::AnalyticsStore;
use clutch_api::{HealthCheck, Player, PlayerProfile, SearchPlayersResponse};
use log::{info, warn};
use std::sync::Arc;

pub const SEARCH_LIMIT: u32 = 15;

pub const EMPTY_QUERY: &str = "Por favor ingresa un término de búsqueda";
pub const MISSING_PLAYER: &str = "Por favor ingresa el nombre del jugador";
pub const LOGIN_FAILED: &str = "Error al iniciar sesión";
pub const REGISTER_FAILED: &str = "Error al crear la cuenta";
pub const PROFILE_FAILED: &str = "No se pudieron cargar las estadísticas del jugador";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MenuItem {
    #[default]
    Login,
    Register,
    Dashboard,
    Search,
    Charts,
    Settings,
    About,
    Help,
}

impl MenuItem {
    /// Screens reachable without signing in.
    pub fn is_public(self) -> bool {
        matches!(self, MenuItem::Login | MenuItem::Register)
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub session: Arc<AuthSession>,
    pub analytics: Arc<AnalyticsStore>,
}

impl App {
    pub fn new(
        settings: AppSettings,
        session: Arc<AuthSession>,
        analytics: Arc<AnalyticsStore>,
    ) -> Self {
        if let Some(level) = settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        Self { settings, state: AppState::new(), session, analytics }
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    /// Called once the persisted session has been probed.
    pub fn on_session_ready(&mut self, state: AuthState) -> Vec<NetworkRequest> {
        match state {
            AuthState::Authenticated(user) => {
                info!("welcome back {}", user.name);
                self.enter_dashboard()
            }
            AuthState::Unauthenticated | AuthState::Initializing => {
                self.show_tab(MenuItem::Login);
                Vec::new()
            }
        }
    }

    pub fn submit_login(&mut self) -> Option<NetworkRequest> {
        if self.state.submitting {
            return None;
        }
        match validate_login(&self.state.login) {
            Ok(input) => {
                self.state.submitting = true;
                Some(NetworkRequest::Login { email: input.email, password: input.password })
            }
            Err(message) => {
                self.state.alert = Some(Alert::error(message));
                None
            }
        }
    }

    pub fn submit_register(&mut self) -> Option<NetworkRequest> {
        if self.state.submitting {
            return None;
        }
        match validate_register(&self.state.register) {
            Ok(input) => {
                self.state.submitting = true;
                Some(NetworkRequest::Register {
                    name: input.name,
                    email: input.email,
                    password: input.password,
                })
            }
            Err(message) => {
                self.state.alert = Some(Alert::error(message));
                None
            }
        }
    }

    pub fn on_login_finished(&mut self, success: bool) -> Vec<NetworkRequest> {
        self.state.submitting = false;
        if !success {
            self.state.alert = Some(Alert::error(LOGIN_FAILED));
            return Vec::new();
        }
        self.state.login.reset();
        self.state.alert = Some(Alert::info("Éxito", "Inicio de sesión exitoso"));
        self.enter_dashboard()
    }

    pub fn on_register_finished(&mut self, success: bool) -> Vec<NetworkRequest> {
        self.state.submitting = false;
        if !success {
            self.state.alert = Some(Alert::error(REGISTER_FAILED));
            return Vec::new();
        }
        self.state.register.reset();
        self.state.alert = Some(Alert::info("Éxito", "Cuenta creada exitosamente"));
        self.enter_dashboard()
    }

    pub fn request_logout(&mut self) {
        if self.session.is_authenticated() {
            self.state.confirm_logout = true;
        }
    }

    pub fn confirm_logout(&mut self) {
        self.state.confirm_logout = false;
        self.session.logout();
        self.analytics.clear_all();
        self.state.search = Default::default();
        self.state.charts = Default::default();
        self.state.connection = Default::default();
        self.state.dashboard_selected = 0;
        self.show_tab(MenuItem::Login);
    }

    pub fn cancel_logout(&mut self) {
        self.state.confirm_logout = false;
    }

    fn enter_dashboard(&mut self) -> Vec<NetworkRequest> {
        self.show_tab(MenuItem::Dashboard);
        self.state.connection.checking = true;
        vec![
            NetworkRequest::CheckHealth,
            NetworkRequest::LoadHighPotential { top_n: DEFAULT_TOP_N },
        ]
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_health_checked(&mut self, health: Option<HealthCheck>) {
        self.state.connection.checking = false;
        self.state.connection.connected = Some(health.is_some());
        self.state.connection.health = health;
    }

    pub fn on_reachability_checked(&mut self, reachable: bool) {
        self.state.connection.reachable = Some(reachable);
    }

    pub fn on_analytics_updated(&mut self, operation: Operation, ok: bool, silent: bool) {
        if ok {
            if operation == Operation::Search {
                self.state.search.selected = 0;
            }
            return;
        }
        if silent {
            return;
        }
        self.state.alert = Some(Alert::error(operation.failure_message()));
    }

    pub fn on_charts_search_finished(&mut self, results: Option<SearchPlayersResponse>) {
        self.state.charts.searching = false;
        match results {
            Some(results) => {
                self.state.charts.selected = 0;
                self.state.charts.results = Some(results);
            }
            None => {
                self.state.alert = Some(Alert::error(Operation::Search.failure_message()));
            }
        }
    }

    pub fn on_profile_finished(&mut self, player: String, profile: Option<PlayerProfile>) {
        let current = self.state.charts.selected_player.as_ref().map(|p| p.name.as_str());
        if current != Some(player.as_str()) {
            warn!("dropping profile for {player}; selection moved on");
            return;
        }
        self.state.charts.loading_profile = false;
        match profile {
            Some(profile) => self.state.charts.profile = Some(profile),
            None => self.state.alert = Some(Alert::error(PROFILE_FAILED)),
        }
    }

    // -----------------------------------------------------------------------
    // Dashboard
    // -----------------------------------------------------------------------

    pub fn high_potential_players(&self) -> Vec<Player> {
        self.analytics
            .high_potential_players
            .data()
            .map(|r| r.players)
            .unwrap_or_default()
    }

    pub fn refresh_connection(&mut self) -> NetworkRequest {
        self.state.connection.checking = true;
        NetworkRequest::CheckHealth
    }

    pub fn dashboard_next(&mut self) {
        let len = self.high_potential_players().len();
        if len > 0 && self.state.dashboard_selected + 1 < len {
            self.state.dashboard_selected += 1;
        }
    }

    pub fn dashboard_prev(&mut self) {
        self.state.dashboard_selected = self.state.dashboard_selected.saturating_sub(1);
    }

    /// Open the highlighted player on the search screen, pre-filled and
    /// already searched.
    pub fn open_dashboard_player(&mut self) -> Option<NetworkRequest> {
        let player = self.high_potential_players().into_iter().nth(self.state.dashboard_selected)?;
        self.state.search.query = player.name.clone();
        self.state.search.editing = false;
        self.show_tab(MenuItem::Search);
        Some(NetworkRequest::SearchPlayers {
            query: player.name,
            limit: DEFAULT_SEARCH_LIMIT,
            silent: true,
        })
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    pub fn search_results(&self) -> Vec<Player> {
        self.analytics.search_results.data().map(|r| r.players).unwrap_or_default()
    }

    pub fn submit_search(&mut self) -> Option<NetworkRequest> {
        self.state.search.editing = false;
        let query = self.state.search.query.trim();
        if query.is_empty() {
            self.state.alert = Some(Alert::error(EMPTY_QUERY));
            return None;
        }
        Some(NetworkRequest::SearchPlayers {
            query: query.to_owned(),
            limit: SEARCH_LIMIT,
            silent: false,
        })
    }

    pub fn search_next(&mut self) {
        let len = self.search_results().len();
        self.state.search.select_next(len);
    }

    pub fn search_prev(&mut self) {
        self.state.search.select_prev();
    }

    /// Build a per-player request for the highlighted search result. Results
    /// for a previous player are dropped when the target changes.
    pub fn player_operation(&mut self, operation: Operation) -> Option<NetworkRequest> {
        let Some(player) = self.search_results().into_iter().nth(self.state.search.selected) else {
            self.state.alert = Some(Alert::error(MISSING_PLAYER));
            return None;
        };
        let name = player.name;
        if self.state.search.active_player.as_deref() != Some(name.as_str()) {
            self.analytics.clear_player_results();
            self.state.search.active_player = Some(name.clone());
        }

        match operation {
            Operation::Goals => Some(NetworkRequest::PredictGoals { player: name }),
            Operation::Sanctions => Some(NetworkRequest::PredictSanctions { player: name }),
            Operation::TacticalRole => Some(NetworkRequest::TacticalRole { player: name }),
            Operation::SimilarPlayers => {
                Some(NetworkRequest::SimilarPlayers { player: name, n: DEFAULT_SIMILAR_N })
            }
            Operation::Search | Operation::HighPotential => None,
        }
    }

    pub fn clear_search(&mut self) {
        self.analytics.clear_search_results();
        self.analytics.clear_player_results();
        self.state.search = Default::default();
    }

    // -----------------------------------------------------------------------
    // Charts
    // -----------------------------------------------------------------------

    pub fn submit_charts_search(&mut self) -> Option<NetworkRequest> {
        self.state.charts.editing = false;
        let query = self.state.charts.query.trim();
        if query.is_empty() {
            self.state.alert = Some(Alert::error(EMPTY_QUERY));
            return None;
        }
        self.state.charts.searching = true;
        Some(NetworkRequest::ChartsSearch { query: query.to_owned(), limit: DEFAULT_SEARCH_LIMIT })
    }

    pub fn select_charts_player(&mut self) -> Option<NetworkRequest> {
        let player = self.state.charts.players().get(self.state.charts.selected)?.clone();
        self.state.charts.selected_player = Some(player.clone());
        self.state.charts.profile = None;
        self.state.charts.loading_profile = true;
        Some(NetworkRequest::LoadPlayerProfile { player })
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    /// Switch screens. Private screens are refused while signed out.
    pub fn update_tab(&mut self, next: MenuItem) {
        if !next.is_public() && !self.session.is_authenticated() {
            return;
        }
        self.show_tab(next);
    }

    fn show_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.state.alert = None;
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clutch_api::auth::{AuthApi, SESSION_KEY, StoredSession, User};
    use clutch_api::client::ClutchApi;
    use clutch_api::config::ApiConfig;
    use clutch_api::session::{MemorySessionStore, SessionStore};
    use clutch_api::HighPotentialPlayersResponse;

    fn app_with(store: Arc<MemorySessionStore>) -> App {
        let api = ClutchApi::with_config(ApiConfig::new("http://127.0.0.1:9"));
        let session = Arc::new(AuthSession::new(AuthApi::new(api.clone()), store));
        let analytics = Arc::new(AnalyticsStore::new(Arc::new(api)));
        App::new(AppSettings::default(), session, analytics)
    }

    fn signed_in_app() -> App {
        let store = Arc::new(MemorySessionStore::new());
        let stored = StoredSession {
            user: User { id: "1".into(), name: "Ana".into(), email: "ana@clutch.app".into() },
            token: None,
            saved_at: chrono::Utc::now(),
        };
        store
            .set(SESSION_KEY, &serde_json::to_string(&stored).unwrap())
            .unwrap();
        let mut app = app_with(store);
        let state = app.session.init();
        app.on_session_ready(state);
        app
    }

    #[test]
    fn restored_session_opens_dashboard() {
        let mut app = signed_in_app();
        assert_eq!(app.state.active_tab, MenuItem::Dashboard);
        assert!(app.state.connection.checking);
        app.update_tab(MenuItem::Charts);
        assert_eq!(app.state.active_tab, MenuItem::Charts);
    }

    #[test]
    fn missing_session_stays_on_login() {
        let mut app = app_with(Arc::new(MemorySessionStore::new()));
        let state = app.session.init();
        assert!(app.on_session_ready(state).is_empty());
        assert_eq!(app.state.active_tab, MenuItem::Login);
    }

    #[test]
    fn private_tabs_are_refused_when_signed_out() {
        let mut app = app_with(Arc::new(MemorySessionStore::new()));
        app.session.init();
        app.update_tab(MenuItem::Search);
        assert_eq!(app.state.active_tab, MenuItem::Login);
        app.update_tab(MenuItem::Register);
        assert_eq!(app.state.active_tab, MenuItem::Register);
    }

    #[test]
    fn invalid_login_raises_alert_without_request() {
        let mut app = app_with(Arc::new(MemorySessionStore::new()));
        assert!(app.submit_login().is_none());
        assert_eq!(app.state.alert, Some(Alert::error(crate::state::app_state::FIELDS_REQUIRED)));
    }

    #[test]
    fn login_submit_is_not_repeated_while_in_flight() {
        let mut app = app_with(Arc::new(MemorySessionStore::new()));
        app.state.login.fields[0].value = "ana@clutch.app".into();
        app.state.login.fields[1].value = "secret".into();
        assert!(matches!(app.submit_login(), Some(NetworkRequest::Login { .. })));
        assert!(app.submit_login().is_none());

        app.on_login_finished(false);
        assert!(!app.state.submitting);
        assert_eq!(app.state.alert, Some(Alert::error(LOGIN_FAILED)));
    }

    #[test]
    fn empty_search_query_alerts() {
        let mut app = signed_in_app();
        app.state.search.query = "   ".into();
        assert!(app.submit_search().is_none());
        assert_eq!(app.state.alert, Some(Alert::error(EMPTY_QUERY)));
    }

    #[test]
    fn player_operation_without_results_alerts() {
        let mut app = signed_in_app();
        assert!(app.player_operation(Operation::Goals).is_none());
        assert_eq!(app.state.alert, Some(Alert::error(MISSING_PLAYER)));
    }

    #[test]
    fn silent_failures_do_not_alert() {
        let mut app = signed_in_app();
        app.on_analytics_updated(Operation::HighPotential, false, true);
        assert_eq!(app.state.alert, None);
        app.on_analytics_updated(Operation::Goals, false, false);
        assert_eq!(
            app.state.alert,
            Some(Alert::error(Operation::Goals.failure_message()))
        );
    }

    #[tokio::test]
    async fn dashboard_handoff_runs_a_silent_search() {
        let mut app = signed_in_app();
        let vela = Player {
            name: "Carlos Vela".into(),
            position: "Forward".into(),
            team: "LAFC".into(),
            clutch_score: Some(8.1),
        };
        let seeded: Result<_, String> =
            Ok(HighPotentialPlayersResponse { players: vec![vela], count: 1 });
        app.analytics.high_potential_players.run(async { seeded }).await.unwrap();

        let request = app.open_dashboard_player();
        assert_eq!(app.state.active_tab, MenuItem::Search);
        assert_eq!(app.state.search.query, "Carlos Vela");
        match request {
            Some(NetworkRequest::SearchPlayers { query, limit, silent }) => {
                assert_eq!(query, "Carlos Vela");
                assert_eq!(limit, DEFAULT_SEARCH_LIMIT);
                assert!(silent);
            }
            other => panic!("expected a search, got {other:?}"),
        }
    }

    #[test]
    fn charts_search_uses_default_limit() {
        let mut app = signed_in_app();
        app.state.charts.query = "Vela".into();
        assert!(matches!(
            app.submit_charts_search(),
            Some(NetworkRequest::ChartsSearch { limit: DEFAULT_SEARCH_LIMIT, .. })
        ));
    }

    #[test]
    fn stale_profile_is_ignored() {
        let mut app = signed_in_app();
        app.state.charts.selected_player = Some(Player {
            name: "Lionel Messi".into(),
            position: "Forward".into(),
            team: "Inter Miami".into(),
            clutch_score: None,
        });
        app.state.charts.loading_profile = true;

        app.on_profile_finished("Carlos Vela".into(), None);
        assert!(app.state.charts.loading_profile);
        assert_eq!(app.state.alert, None);

        app.on_profile_finished("Lionel Messi".into(), None);
        assert!(!app.state.charts.loading_profile);
        assert_eq!(app.state.alert, Some(Alert::error(PROFILE_FAILED)));
    }

    #[test]
    fn logout_resets_everything() {
        let mut app = signed_in_app();
        app.state.search.query = "Messi".into();
        app.request_logout();
        assert!(app.state.confirm_logout);

        app.confirm_logout();
        assert!(!app.state.confirm_logout);
        assert!(!app.session.is_authenticated());
        assert_eq!(app.state.active_tab, MenuItem::Login);
        assert!(app.state.search.query.is_empty());
    }
}
