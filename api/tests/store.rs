use clutch_api::client::ClutchApi;
use clutch_api::config::ApiConfig;
use clutch_api::store::AnalyticsStore;
use clutch_api::tracker::EndpointState;
use mockito::Server;
use std::sync::Arc;

fn store_for(server: &Server) -> AnalyticsStore {
    AnalyticsStore::new(Arc::new(ClutchApi::with_config(ApiConfig::new(server.url()))))
}

#[tokio::test]
async fn search_results_slot_tracks_a_successful_search() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search_players/Carlos?limit=15")
        .with_status(200)
        .with_body(
            r#"{"players":[
                {"player":"Carlos Vela","position":"Forward","team":"LAFC"},
                {"player":"Carlos Salcedo","position":"Defender","team":"Tigres"},
                {"player":"Carlos Acevedo","position":"Goalkeeper","team":"Santos"}
            ],"count":3,"query":"Carlos"}"#,
        )
        .create_async()
        .await;

    let store = store_for(&server);
    assert!(store.search_results.snapshot().is_idle());

    let returned = store.search_players("Carlos", 15).await.unwrap();

    let state = store.search_results.snapshot();
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(state.data.as_ref().map(|d| d.count), Some(3));
    assert_eq!(state.data, Some(returned));
}

#[tokio::test]
async fn failure_keeps_previous_data_and_reports_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/predict_goals/Ana")
        .with_status(200)
        .with_body(r#"{"player":"Ana","predicted_goals":3,"actual_goals":2,"position":"Forward","team":"T"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/predict_goals/Nadie")
        .with_status(404)
        .create_async()
        .await;

    let store = store_for(&server);
    store.predict_goals("Ana").await.unwrap();
    let err = store.predict_goals("Nadie").await.unwrap_err();

    let state = store.goal_prediction.snapshot();
    assert!(!state.loading);
    assert_eq!(state.data.map(|d| d.player), Some("Ana".to_string()));
    assert_eq!(state.error, Some(err.to_string()));
    assert_eq!(state.error.as_deref(), Some("HTTP error! status: 404"));
}

#[tokio::test]
async fn slots_are_independent() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/player_tactical_role/Ana")
        .with_status(200)
        .with_body(r#"{"player":"Ana","tactical_role":"Jugador de Relevo","position":"Midfielder","team":"T"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/predict_sanction/Ana")
        .with_status(500)
        .create_async()
        .await;

    let store = store_for(&server);
    let (role, sanction) =
        tokio::join!(store.get_tactical_role("Ana"), store.predict_sanctions("Ana"));
    assert!(role.is_ok());
    assert!(sanction.is_err());

    assert!(store.tactical_role.data().is_some());
    assert_eq!(store.tactical_role.error(), None);
    assert!(store.sanction_prediction.data().is_none());
    assert!(store.sanction_prediction.error().is_some());
    assert!(store.goal_prediction.snapshot().is_idle());
    assert!(!store.any_loading());
}

#[tokio::test]
async fn clear_all_resets_every_slot() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/find_high_potential_players/?top_n=10")
        .with_status(200)
        .with_body(r#"{"players":[],"count":0}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/similar_players/Ana?n=5")
        .with_status(502)
        .create_async()
        .await;

    let store = store_for(&server);
    store.find_high_potential_players(10).await.unwrap();
    store.find_similar_players("Ana", 5).await.unwrap_err();

    store.clear_all();

    assert_eq!(store.high_potential_players.snapshot(), EndpointState::default());
    assert_eq!(store.similar_players.snapshot(), EndpointState::default());
    assert_eq!(store.search_results.snapshot(), EndpointState::default());
    assert_eq!(store.goal_prediction.snapshot(), EndpointState::default());
    assert_eq!(store.sanction_prediction.snapshot(), EndpointState::default());
    assert_eq!(store.tactical_role.snapshot(), EndpointState::default());
}

#[tokio::test]
async fn clear_player_results_keeps_lists() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/find_high_potential_players/?top_n=3")
        .with_status(200)
        .with_body(r#"{"players":[],"count":0}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/predict_goals/Ana")
        .with_status(200)
        .with_body(r#"{"player":"Ana","predicted_goals":3,"actual_goals":2,"position":"Forward","team":"T"}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    store.find_high_potential_players(3).await.unwrap();
    store.predict_goals("Ana").await.unwrap();

    store.clear_player_results();

    assert!(store.goal_prediction.snapshot().is_idle());
    assert!(store.high_potential_players.data().is_some());
}
