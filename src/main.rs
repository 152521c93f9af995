mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::HealthRefresher;
use clutch_api::auth::{AuthApi, AuthSession};
use clutch_api::client::ClutchApi;
use clutch_api::config::ApiConfig;
use clutch_api::session::{FileSessionStore, MemorySessionStore, SessionStore};
use clutch_api::store::AnalyticsStore;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

/// What the command line asked for.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    no_persist: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(options) = handle_cli_args(std::env::args().skip(1)) else {
        return Ok(());
    };

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let settings = AppSettings::load(!options.no_persist);
    let config = ApiConfig::from_env();
    info!("analytics backend at {}", config.base_url);

    let api = ClutchApi::with_config(config);
    let store: Arc<dyn SessionStore> = if settings.persist_session {
        let store = FileSessionStore::new(FileSessionStore::default_dir());
        info!("session stored in {}", store.dir().display());
        Arc::new(store)
    } else {
        Arc::new(MemorySessionStore::new())
    };
    let session = Arc::new(AuthSession::new(AuthApi::new(api.clone()), store));
    let analytics = Arc::new(AnalyticsStore::new(Arc::new(api)));

    let app = Arc::new(Mutex::new(App::new(settings, session.clone(), analytics.clone())));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(analytics, session, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic health check thread (every 30s)
    let health_refresher = HealthRefresher::new(network_req_tx.clone());
    let refresher_task = tokio::spawn(health_refresher.run());

    // Probe the stored session on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    refresher_task.abort();

    Ok(())
}

/// `None` when the arguments were fully handled (help, version).
fn handle_cli_args(args: impl Iterator<Item = String>) -> Option<CliOptions> {
    let mut options = CliOptions::default();
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage_text());
                return None;
            }
            "-V" | "--version" => {
                println!("clutch-score {}", env!("CARGO_PKG_VERSION"));
                return None;
            }
            "--no-persist" => options.no_persist = true,
            _ => {
                eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
                std::process::exit(2);
            }
        }
    }
    Some(options)
}

fn usage_text() -> &'static str {
    "clutch-score - terminal client for Clutch Score player analytics

Usage:
  clutch-score [--no-persist]
  clutch-score --help
  clutch-score --version

Options:
  --no-persist   Keep the session in memory only; nothing is written to disk

Environment:
  CLUTCH_API_URL          Analytics backend origin (default http://192.168.1.3:8000)
  CLUTCH_API_TIMEOUT_MS   Request timeout in milliseconds (default 10000)
  CLUTCH_LOG              Log pane level: error, warn, info, debug, trace
  CLUTCH_SESSION_DIR      Directory for the stored session"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    // Splash while the stored session is probed.
    draw::draw(&mut terminal, &mut *app.lock().await, loading);

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                handle_ui_event(ui_event, &app, &network_requests).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &network_requests, &mut loading).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    match ui_event {
        UiEvent::AppStarted => {
            let mut guard = app.lock().await;
            let session = guard.session.clone();
            // File IO only; cheap enough to run inline.
            let state = session.init();
            let requests = guard.on_session_ready(state);
            drop(guard);
            send_all(network_requests, requests).await;
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
        }
        UiEvent::Resize => {}
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    loading: &mut LoadingState,
) {
    let mut guard = app.lock().await;
    let follow_up = match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            Vec::new()
        }
        NetworkResponse::HealthChecked { health } => {
            guard.on_health_checked(health);
            Vec::new()
        }
        NetworkResponse::ReachabilityChecked { reachable } => {
            guard.on_reachability_checked(reachable);
            Vec::new()
        }
        NetworkResponse::LoginFinished { success } => guard.on_login_finished(success),
        NetworkResponse::RegisterFinished { success } => guard.on_register_finished(success),
        NetworkResponse::AnalyticsUpdated { operation, ok, silent } => {
            guard.on_analytics_updated(operation, ok, silent);
            Vec::new()
        }
        NetworkResponse::ChartsSearchFinished { results } => {
            guard.on_charts_search_finished(results);
            Vec::new()
        }
        NetworkResponse::ProfileFinished { player, profile } => {
            guard.on_profile_finished(player, profile);
            Vec::new()
        }
    };
    drop(guard);
    send_all(network_requests, follow_up).await;
}

async fn send_all(network_requests: &mpsc::Sender<NetworkRequest>, requests: Vec<NetworkRequest>) {
    for request in requests {
        if let Err(e) = network_requests.send(request).await {
            error!("network worker is gone: {e}");
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

/// Restore the terminal. Best effort: it runs on the way out, including from
/// the panic hook, so failures are ignored.
pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn no_args_runs_with_persistence() {
        assert_eq!(handle_cli_args(args(&[])), Some(CliOptions { no_persist: false }));
    }

    #[test]
    fn no_persist_flag() {
        assert_eq!(
            handle_cli_args(args(&["--no-persist"])),
            Some(CliOptions { no_persist: true })
        );
    }

    #[test]
    fn help_and_version_exit_early() {
        assert_eq!(handle_cli_args(args(&["--help"])), None);
        assert_eq!(handle_cli_args(args(&["-V"])), None);
    }
}
