use crate::app::{App, MenuItem};
use crate::state::messages::{NetworkRequest, Operation};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    if key_event.kind == KeyEventKind::Release {
        return;
    }

    let mut guard = app.lock().await;
    let requests = dispatch(&mut guard, key_event);
    drop(guard);

    for request in requests {
        let _ = network_requests.send(request).await;
    }
}

fn quit() -> ! {
    crate::cleanup_terminal();
    std::process::exit(0);
}

/// Apply a key to the app and collect the requests it triggers.
fn dispatch(app: &mut App, key_event: KeyEvent) -> Vec<NetworkRequest> {
    let (code, modifiers) = (key_event.code, key_event.modifiers);

    if let (Char('c'), KeyModifiers::CONTROL) = (code, modifiers) {
        quit();
    }

    // Modal overlays swallow the key.
    if app.state.alert.is_some() {
        app.dismiss_alert();
        return Vec::new();
    }
    if app.state.confirm_logout {
        match code {
            Char('y') | Char('Y') => app.confirm_logout(),
            Char('n') | Char('N') | KeyCode::Esc => app.cancel_logout(),
            _ => {}
        }
        return Vec::new();
    }

    // Nothing but quitting while the stored session is probed.
    if app.session.is_loading() {
        if code == Char('q') {
            quit();
        }
        return Vec::new();
    }

    match app.state.active_tab {
        MenuItem::Login | MenuItem::Register => return form_keys(app, code, modifiers),
        MenuItem::Search if app.state.search.editing => {
            let search = &mut app.state.search;
            if query_keys(&mut search.query, &mut search.editing, code) {
                return app.submit_search().into_iter().collect();
            }
            return Vec::new();
        }
        MenuItem::Charts if app.state.charts.editing => {
            let charts = &mut app.state.charts;
            if query_keys(&mut charts.query, &mut charts.editing, code) {
                return app.submit_charts_search().into_iter().collect();
            }
            return Vec::new();
        }
        _ => {}
    }

    let mut requests = Vec::new();
    match (app.state.active_tab, code) {
        (_, Char('q')) => quit(),

        // Tab switching
        (_, Char('1')) => app.update_tab(MenuItem::Dashboard),
        (_, Char('2')) => app.update_tab(MenuItem::Search),
        (_, Char('3')) => app.update_tab(MenuItem::Charts),
        (_, Char('4')) => app.update_tab(MenuItem::Settings),
        (_, Char('5')) => app.update_tab(MenuItem::About),
        (_, Char('6')) | (_, Char('?')) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc) => app.exit_help(),

        // Dashboard
        (MenuItem::Dashboard, Char('r')) => requests.push(app.refresh_connection()),
        (MenuItem::Dashboard, Char('j') | KeyCode::Down) => app.dashboard_next(),
        (MenuItem::Dashboard, Char('k') | KeyCode::Up) => app.dashboard_prev(),
        (MenuItem::Dashboard, KeyCode::Enter) => requests.extend(app.open_dashboard_player()),

        // Search
        (MenuItem::Search, Char('/')) => app.state.search.editing = true,
        (MenuItem::Search, Char('j') | KeyCode::Down) => app.search_next(),
        (MenuItem::Search, Char('k') | KeyCode::Up) => app.search_prev(),
        (MenuItem::Search, Char('g')) => requests.extend(app.player_operation(Operation::Goals)),
        (MenuItem::Search, Char('s')) => {
            requests.extend(app.player_operation(Operation::Sanctions))
        }
        (MenuItem::Search, Char('t')) => {
            requests.extend(app.player_operation(Operation::TacticalRole))
        }
        (MenuItem::Search, Char('m')) => {
            requests.extend(app.player_operation(Operation::SimilarPlayers))
        }
        (MenuItem::Search, Char('c')) => app.clear_search(),

        // Charts
        (MenuItem::Charts, Char('/')) => app.state.charts.editing = true,
        (MenuItem::Charts, Char('j') | KeyCode::Down) => app.state.charts.select_next(),
        (MenuItem::Charts, Char('k') | KeyCode::Up) => app.state.charts.select_prev(),
        (MenuItem::Charts, KeyCode::Enter) => requests.extend(app.select_charts_player()),

        // Settings
        (MenuItem::Settings, Char('t')) => requests.push(NetworkRequest::CheckReachable),

        // Global
        (_, Char('L')) => app.request_logout(),
        (_, Char('f')) => app.toggle_full_screen(),
        (_, Char('"')) => app.toggle_show_logs(),

        _ => {}
    }
    requests
}

/// Login and register forms capture every printable key.
fn form_keys(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Vec<NetworkRequest> {
    let on_login = app.state.active_tab == MenuItem::Login;

    match (code, modifiers) {
        (Char('n'), KeyModifiers::CONTROL) if on_login => {
            app.update_tab(MenuItem::Register);
            return Vec::new();
        }
        (KeyCode::Esc, _) if !on_login => {
            app.update_tab(MenuItem::Login);
            return Vec::new();
        }
        (KeyCode::Enter, _) => {
            let request = if on_login { app.submit_login() } else { app.submit_register() };
            return request.into_iter().collect();
        }
        _ => {}
    }

    let form = if on_login { &mut app.state.login } else { &mut app.state.register };
    match (code, modifiers) {
        (KeyCode::Tab | KeyCode::Down, _) => form.focus_next(),
        (KeyCode::BackTab | KeyCode::Up, _) => form.focus_prev(),
        (KeyCode::Backspace, _) => form.pop_char(),
        (Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => form.push_char(c),
        _ => {}
    }
    Vec::new()
}

/// Edit a query box. Returns true when the query should be submitted.
fn query_keys(query: &mut String, editing: &mut bool, code: KeyCode) -> bool {
    match code {
        KeyCode::Enter => return true,
        KeyCode::Esc => *editing = false,
        KeyCode::Backspace => {
            query.pop();
        }
        Char(c) => query.push(c),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_editing() {
        let mut query = String::from("Mess");
        let mut editing = true;
        assert!(!query_keys(&mut query, &mut editing, Char('i')));
        assert_eq!(query, "Messi");
        assert!(!query_keys(&mut query, &mut editing, KeyCode::Backspace));
        assert_eq!(query, "Mess");
        assert!(query_keys(&mut query, &mut editing, KeyCode::Enter));
        assert!(!query_keys(&mut query, &mut editing, KeyCode::Esc));
        assert!(!editing);
    }
}
