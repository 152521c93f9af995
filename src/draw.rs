use chrono::Local;
use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::connection_status::ConnectionStatus;
use crate::components::logo::Logo;
use crate::components::player_list::PlayerList;
use crate::components::prediction_card::{PredictionCard, risk_color};
use crate::state::app_state::{Alert, Form};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use clutch_api::auth::User;
use clutch_api::{POSITIONS, Player, PlayerProfile, TACTICAL_ROLES};

static TABS: &[&str; 6] = &["Inicio", "Buscar", "Gráficas", "Ajustes", "Acerca de", "Ayuda"];

const HELP_TEXT: &[(&str, &str)] = &[
    ("1-6", "cambiar de pantalla"),
    ("/", "escribir búsqueda (Enter busca, Esc cancela)"),
    ("j/k ↑/↓", "mover selección"),
    ("Enter", "abrir jugador / enviar formulario"),
    ("g s t m", "goles, sanciones, rol táctico, similares"),
    ("c", "limpiar búsqueda"),
    ("r", "revisar conexión (inicio)"),
    ("t", "probar backend (ajustes)"),
    ("Tab", "siguiente campo del formulario"),
    ("Ctrl+N", "crear cuenta (desde login)"),
    ("L", "cerrar sesión"),
    ("f", "pantalla completa"),
    ("\"", "mostrar registros"),
    ("q / Ctrl+C", "salir"),
];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        if app.session.is_loading() {
            draw_splash(f, f.area());
            return;
        }

        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        let public = app.state.active_tab.is_public();
        if !app.settings.full_screen && !public {
            draw_tabs(f, layout.tab_bar, app);
        }
        let main = if public {
            layout.tab_bar[0].union(layout.main)
        } else {
            layout.main
        };

        match app.state.active_tab {
            MenuItem::Login => draw_login(f, main, app),
            MenuItem::Register => draw_register(f, main, app),
            MenuItem::Dashboard => draw_dashboard(f, main, app),
            MenuItem::Search => draw_search(f, main, app),
            MenuItem::Charts => draw_charts(f, main, app),
            MenuItem::Settings => draw_settings(f, main, app),
            MenuItem::About => draw_about(f, main),
            MenuItem::Help => draw_help(f, main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        if app.state.confirm_logout {
            draw_logout_confirm(f, f.area());
        }
        if let Some(alert) = &app.state.alert {
            draw_alert(f, f.area(), alert);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

/// A `width` x `height` rect centred in `area`, clamped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_splash(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Clutch Score ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_top_pad, logo_area, prompt_area, _bottom_pad] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(Logo::HEIGHT),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(Logo { show_tagline: true }, logo_area);
    f.render_widget(
        Paragraph::new("Cargando sesión...")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        prompt_area,
    );
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Dashboard | MenuItem::Login | MenuItem::Register => 0,
        MenuItem::Search => 1,
        MenuItem::Charts => 2,
        MenuItem::Settings => 3,
        MenuItem::About => 4,
        MenuItem::Help => 5,
    };

    let titles: Vec<Line> = TABS
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {t}", i + 1)))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let user = app.session.user().map(|u| u.name).unwrap_or_default();
    let status = Paragraph::new(format!("{user} {} ", Local::now().format("%H:%M")))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(status, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Login / register
// ---------------------------------------------------------------------------

fn draw_login(f: &mut Frame, area: Rect, app: &App) {
    let footer = "Enter: iniciar sesión · Tab: siguiente campo · Ctrl+N: crear cuenta";
    draw_auth_screen(f, area, " Iniciar sesión ", &app.state.login, app.state.submitting, footer);
}

fn draw_register(f: &mut Frame, area: Rect, app: &App) {
    let footer = "Enter: crear cuenta · Tab: siguiente campo · Esc: volver";
    draw_auth_screen(f, area, " Crear cuenta ", &app.state.register, app.state.submitting, footer);
}

fn draw_auth_screen(
    f: &mut Frame,
    area: Rect,
    title: &str,
    form: &Form,
    submitting: bool,
    footer: &str,
) {
    let form_height = form.fields.len() as u16 * 3 + 4;
    let [_top, logo_area, form_area, _bottom] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(Logo::HEIGHT + 1),
        Constraint::Length(form_height),
        Constraint::Fill(1),
    ])
    .areas(area);
    f.render_widget(Logo { show_tagline: true }, logo_area);

    let box_area = centered(form_area, 60, form_height);
    let block = default_border(Color::White).title(title.to_owned());
    let inner = block.inner(box_area);
    f.render_widget(block, box_area);

    let mut constraints = vec![Constraint::Length(3); form.fields.len()];
    constraints.push(Constraint::Fill(1));
    constraints.push(Constraint::Length(1));
    let rows = Layout::vertical(constraints).split(inner);

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focused;
        let color = if focused { Color::Yellow } else { Color::DarkGray };
        let cursor = if focused { "█" } else { "" };
        f.render_widget(
            Paragraph::new(format!("{}{cursor}", field.display()))
                .block(default_border(color).title(format!(" {} ", field.label))),
            rows[i],
        );
    }

    let footer_text = if submitting { "Enviando..." } else { footer };
    if let Some(footer_area) = rows.last() {
        f.render_widget(
            Paragraph::new(footer_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            *footer_area,
        );
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Inicio ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [welcome, status, _gap, content, legend] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let name = app.session.user().map(|u| u.name).unwrap_or_default();
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("¡Bienvenido, "),
            Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("!"),
        ])),
        welcome,
    );
    f.render_widget(ConnectionStatus { state: &app.state.connection }, status);

    // A failed background load leaves the section out entirely.
    let slot = app.analytics.high_potential_players.snapshot();
    if slot.loading || slot.data.is_some() {
        let players = slot.data.map(|r| r.players).unwrap_or_default();
        f.render_widget(
            PlayerList::new(&players)
                .loading(slot.loading && players.is_empty())
                .selected(app.state.dashboard_selected)
                .block(default_border(Color::DarkGray).title(" Jugadores destacados ")),
            content,
        );
    }

    f.render_widget(
        Paragraph::new("j/k: mover · Enter: analizar jugador · r: revisar conexión")
            .style(Style::default().fg(Color::DarkGray)),
        legend,
    );
}

// ---------------------------------------------------------------------------
// Search / visualize
// ---------------------------------------------------------------------------

fn draw_query_box(f: &mut Frame, area: Rect, query: &str, editing: bool, placeholder: &str) {
    let (text, style) = if editing {
        (format!("{query}█"), Style::default().fg(Color::White))
    } else if query.is_empty() {
        (placeholder.to_owned(), Style::default().fg(Color::DarkGray))
    } else {
        (query.to_owned(), Style::default().fg(Color::Gray))
    };
    let color = if editing { Color::Yellow } else { Color::DarkGray };
    f.render_widget(
        Paragraph::new(text).style(style).block(default_border(color).title(" Buscar [/] ")),
        area,
    );
}

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
    let [query_area, body, legend] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1), Constraint::Length(1)])
            .areas(area);

    let search = &app.state.search;
    draw_query_box(f, query_area, &search.query, search.editing, "Nombre del jugador...");

    let [list_area, cards_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);

    let slot = app.analytics.search_results.snapshot();
    let players = slot.data.as_ref().map(|r| r.players.clone()).unwrap_or_default();
    let title = match &slot.data {
        Some(r) => format!(" Resultados ({}) ", r.count),
        None => " Resultados ".to_owned(),
    };
    f.render_widget(
        PlayerList::new(&players)
            .loading(slot.loading)
            .selected(search.selected)
            .block(default_border(Color::White).title(title)),
        list_area,
    );

    let [top, bottom] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(cards_area);
    let [goals, sanction] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);
    let [role, similar] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(bottom);

    let analytics = &app.analytics;
    f.render_widget(PredictionCard::goals(&analytics.goal_prediction.snapshot()), goals);
    f.render_widget(PredictionCard::sanction(&analytics.sanction_prediction.snapshot()), sanction);
    f.render_widget(PredictionCard::role(&analytics.tactical_role.snapshot()), role);
    f.render_widget(PredictionCard::similar(&analytics.similar_players.snapshot()), similar);

    let mut hints = vec![Span::styled(
        "/: buscar · j/k: mover · g/s/t/m: analizar · c: limpiar",
        Style::default().fg(Color::DarkGray),
    )];
    if analytics.any_loading() {
        hints.push(Span::styled("  cargando...", Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(Line::from(hints)), legend);
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

fn draw_charts(f: &mut Frame, area: Rect, app: &App) {
    let [query_area, body, legend] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1), Constraint::Length(1)])
            .areas(area);

    let charts = &app.state.charts;
    draw_query_box(f, query_area, &charts.query, charts.editing, "Busca un jugador para graficar...");

    let [list_area, chart_area] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(body);

    f.render_widget(
        PlayerList::new(charts.players())
            .loading(charts.searching)
            .selected(charts.selected)
            .block(default_border(Color::White).title(" Jugadores ")),
        list_area,
    );

    match (&charts.selected_player, &charts.profile) {
        (Some(player), Some(profile)) => draw_profile_charts(f, chart_area, player, profile),
        (Some(player), None) if charts.loading_profile => draw_placeholder(
            f,
            chart_area,
            &format!("Cargando estadísticas de {}...", player.name),
        ),
        _ => draw_placeholder(f, chart_area, "Selecciona un jugador con Enter"),
    }

    f.render_widget(
        Paragraph::new("/: buscar · j/k: mover · Enter: ver estadísticas")
            .style(Style::default().fg(Color::DarkGray)),
        legend,
    );
}

/// Bars carry integers, so fractional metrics are scaled by ten and the real
/// value is printed as the bar's text.
fn scaled(value: f64) -> u64 {
    (value.max(0.0) * 10.0).round() as u64
}

fn draw_profile_charts(f: &mut Frame, area: Rect, player: &Player, profile: &PlayerProfile) {
    let block = default_border(Color::White).title(format!(
        " {} · {} · {} ",
        player.name, profile.role.tactical_role, player.team
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [metrics_area, similar_area] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(inner);

    let risk_percent = profile
        .sanction
        .risk_percent()
        .unwrap_or(profile.sanction.sanction_risk * 100.0);
    let mut metrics = vec![
        Bar::default()
            .label(Line::from("Goles"))
            .value(scaled(profile.goals.predicted_goals))
            .text_value(format!("{:.1}", profile.goals.predicted_goals))
            .style(Style::default().fg(Color::Green)),
        Bar::default()
            .label(Line::from("Riesgo %"))
            .value(scaled(risk_percent))
            .text_value(format!("{risk_percent:.1}"))
            .style(Style::default().fg(risk_color(profile.sanction.risk_level()))),
    ];
    if let Some(clutch) = player.clutch_score {
        metrics.push(
            Bar::default()
                .label(Line::from("Clutch"))
                .value(scaled(clutch))
                .text_value(format!("{clutch:.2}"))
                .style(Style::default().fg(Color::Rgb(255, 103, 31))),
        );
    }
    f.render_widget(
        BarChart::default()
            .block(Block::default().title(" Métricas "))
            .bar_width(10)
            .bar_gap(3)
            .data(BarGroup::default().bars(&metrics)),
        metrics_area,
    );

    let similar: Vec<Bar> = profile
        .similar
        .similar_players
        .iter()
        .map(|p| {
            let score = p.clutch_score.unwrap_or_default();
            Bar::default()
                .label(Line::from(short_name(&p.name)))
                .value(scaled(score))
                .text_value(format!("{score:.2}"))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();
    if similar.is_empty() {
        draw_placeholder(f, similar_area, "Sin jugadores similares");
        return;
    }
    f.render_widget(
        BarChart::default()
            .block(Block::default().title(" Clutch score de jugadores similares "))
            .bar_width(8)
            .bar_gap(2)
            .data(BarGroup::default().bars(&similar)),
        similar_area,
    );
}

/// Surname, or the whole name when it has one word, cut to fit a bar.
fn short_name(name: &str) -> String {
    let last = name.split_whitespace().last().unwrap_or(name);
    last.chars().take(8).collect()
}

// ---------------------------------------------------------------------------
// Static screens
// ---------------------------------------------------------------------------

fn draw_settings(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Ajustes ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let config = app.analytics.api().config();
    let log_level = app
        .settings
        .log_level
        .map(|l| l.to_string())
        .unwrap_or_else(|| "ERROR".to_owned());
    let persist = if app.settings.persist_session { "sí" } else { "no" };
    let probe = match app.state.connection.reachable {
        None => Span::styled("sin probar (pulsa t)", Style::default().fg(Color::DarkGray)),
        Some(true) => Span::styled("accesible", Style::default().fg(Color::Green)),
        Some(false) => Span::styled("inaccesible", Style::default().fg(Color::Red)),
    };

    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<20}"), Style::default().fg(Color::Gray)),
            Span::raw(value),
        ])
    };
    let [(user_label, user_name), (email_label, email)] =
        account_rows(app.session.user().as_ref());
    let lines = vec![
        row(user_label, user_name),
        row(email_label, email),
        Line::from(""),
        row("Servidor", config.base_url.clone()),
        row("Tiempo de espera", format!("{} ms", config.timeout.as_millis())),
        row("Nivel de registro", log_level),
        row("Recordar sesión", persist.to_owned()),
        Line::from(vec![
            Span::styled(format!("{:<20}", "Backend"), Style::default().fg(Color::Gray)),
            probe,
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "L: cerrar sesión · t: probar backend",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn account_rows(user: Option<&User>) -> [(&'static str, String); 2] {
    match user {
        Some(user) => [("Usuario", user.name.clone()), ("Correo", user.email.clone())],
        None => [("Usuario", "-".to_owned()), ("Correo", "-".to_owned())],
    }
}

fn catalogue(items: &[&str]) -> String {
    items.join(" · ")
}

fn draw_about(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Acerca de ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [logo_area, text_area] =
        Layout::vertical([Constraint::Length(Logo::HEIGHT + 1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(Logo { show_tagline: true }, logo_area);
    let text = vec![
        Line::from(format!("Versión {}", env!("CARGO_PKG_VERSION"))),
        Line::from(""),
        Line::from(
            "Clutch Score reúne predicciones de goles, riesgo de sanción, rol táctico \
             y jugadores similares a partir de un servicio de analítica.",
        ),
        Line::from(""),
        Line::from(format!("Posiciones: {}", catalogue(&POSITIONS))),
        Line::from(format!("Roles tácticos: {}", catalogue(&TACTICAL_ROLES))),
        Line::from(""),
        Line::from(Span::styled(
            "Las predicciones son estimaciones del modelo, no resultados garantizados.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        text_area,
    );
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Ayuda ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = HELP_TEXT
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:>12}  "), Style::default().fg(Color::Yellow)),
                Span::raw(*what),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn draw_alert(f: &mut Frame, area: Rect, alert: &Alert) {
    let width = (alert.message.chars().count() as u16 + 6).clamp(30, 70);
    let popup = centered(area, width, 6);
    let color = if alert.title == "Error" { Color::Red } else { Color::Green };

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(alert.message.clone()),
            Line::from(""),
            Line::from(Span::styled("Pulsa cualquier tecla", Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(default_border(color).title(format!(" {} ", alert.title))),
        popup,
    );
}

fn draw_logout_confirm(f: &mut Frame, area: Rect) {
    let popup = centered(area, 40, 5);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(vec![
            Line::from("¿Seguro que quieres cerrar sesión?"),
            Line::from(Span::styled("y: sí · n: no", Style::default().fg(Color::Yellow))),
        ])
        .alignment(Alignment::Center)
        .block(default_border(Color::Yellow).title(" Cerrar sesión ")),
        popup,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    f.render_widget(
        TuiLoggerWidget::default()
            .block(default_border(Color::DarkGray).title(" Registros "))
            .style_error(Style::default().fg(Color::Red))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_info(Style::default().fg(Color::Gray))
            .output_target(false)
            .output_file(false)
            .output_line(false),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen || app.state.active_tab.is_public() {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(2), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_keeps_one_decimal() {
        assert_eq!(scaled(4.27), 43);
        assert_eq!(scaled(0.0), 0);
        assert_eq!(scaled(-1.0), 0);
    }

    #[test]
    fn short_names_fit_bars() {
        assert_eq!(short_name("Lionel Messi"), "Messi");
        assert_eq!(short_name("Ronaldinho"), "Ronaldin");
        assert_eq!(short_name(""), "");
    }

    #[test]
    fn settings_show_the_signed_in_account() {
        let user = User { id: "7".into(), name: "Ana".into(), email: "ana@clutch.app".into() };
        let [name, email] = account_rows(Some(&user));
        assert_eq!(name, ("Usuario", "Ana".to_owned()));
        assert_eq!(email, ("Correo", "ana@clutch.app".to_owned()));
        assert_eq!(account_rows(None)[1].1, "-");
    }

    #[test]
    fn catalogues_are_joined() {
        assert_eq!(catalogue(&POSITIONS), "Forward · Midfielder · Defender · Goalkeeper");
        assert_eq!(catalogue(&[]), "");
    }

    #[test]
    fn centered_is_clamped() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 50, 50), area);
    }
}
