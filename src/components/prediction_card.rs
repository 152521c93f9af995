use clutch_api::tracker::EndpointState;
use clutch_api::{GoalPrediction, RiskLevel, SanctionPrediction, SimilarPlayersResponse, TacticalRole};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget, Wrap};

use crate::draw::default_border;

/// One analytics result in a bordered box. The body reflects the slot's
/// state: loading text, the error, the result, or a hint when idle.
pub struct PredictionCard {
    title: &'static str,
    accent: Color,
    body: Vec<Line<'static>>,
}

impl PredictionCard {
    fn from_state<T>(
        title: &'static str,
        hint: &'static str,
        state: &EndpointState<T>,
        render: impl Fn(&T) -> Vec<Line<'static>>,
    ) -> Self {
        let dim = Style::default().fg(Color::DarkGray);
        let mut body = Vec::new();

        if state.loading {
            body.push(Line::from(Span::styled("Cargando...", dim)));
        } else if let Some(error) = &state.error {
            body.push(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))));
        }
        match &state.data {
            Some(data) => body.extend(render(data)),
            None if state.is_idle() => body.push(Line::from(Span::styled(hint, dim))),
            None => {}
        }

        let accent = if state.error.is_some() { Color::Red } else { Color::White };
        Self { title, accent, body }
    }

    pub fn goals(state: &EndpointState<GoalPrediction>) -> Self {
        Self::from_state(" Goles [g] ", "Pulsa g para predecir goles", state, goal_lines)
    }

    pub fn sanction(state: &EndpointState<SanctionPrediction>) -> Self {
        Self::from_state(" Sanciones [s] ", "Pulsa s para el riesgo de sanción", state, sanction_lines)
    }

    pub fn role(state: &EndpointState<TacticalRole>) -> Self {
        Self::from_state(" Rol táctico [t] ", "Pulsa t para el rol táctico", state, role_lines)
    }

    pub fn similar(state: &EndpointState<SimilarPlayersResponse>) -> Self {
        Self::from_state(" Similares [m] ", "Pulsa m para jugadores similares", state, similar_lines)
    }
}

impl Widget for PredictionCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.body)
            .wrap(Wrap { trim: true })
            .block(default_border(self.accent).title(self.title))
            .render(area, buf);
    }
}

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{text}: "), Style::default().fg(Color::Gray))
}

fn subtitle(position: &str, team: &str) -> Line<'static> {
    Line::from(Span::styled(format!("{position} · {team}"), Style::default().fg(Color::DarkGray)))
}

fn goal_lines(goals: &GoalPrediction) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(goals.player.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![
            label("Previstos"),
            Span::styled(format!("{:.1}", goals.predicted_goals), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![label("Reales"), Span::raw(format!("{:.0}", goals.actual_goals))]),
        subtitle(&goals.position, &goals.team),
    ]
}

pub fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

pub fn risk_label(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Bajo",
        RiskLevel::Medium => "Medio",
        RiskLevel::High => "Alto",
    }
}

fn sanction_lines(sanction: &SanctionPrediction) -> Vec<Line<'static>> {
    let level = sanction.risk_level();
    let style = Style::default().fg(risk_color(level)).add_modifier(Modifier::BOLD);
    vec![
        Line::from(Span::styled(sanction.player.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![
            label("Riesgo"),
            Span::styled(sanction.sanction_risk_percentage.clone(), style),
        ]),
        Line::from(vec![label("Nivel"), Span::styled(risk_label(level), style)]),
        subtitle(&sanction.position, &sanction.team),
    ]
}

fn role_lines(role: &TacticalRole) -> Vec<Line<'static>> {
    let mut role_spans = vec![
        label("Rol"),
        Span::styled(role.tactical_role.clone(), Style::default().fg(Color::Cyan)),
    ];
    if !role.is_known_role() {
        role_spans.push(Span::styled(" (no catalogado)", Style::default().fg(Color::DarkGray)));
    }
    vec![
        Line::from(Span::styled(role.player.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(role_spans),
        subtitle(&role.position, &role.team),
    ]
}

fn similar_lines(similar: &SimilarPlayersResponse) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        label("Similares a"),
        Span::styled(similar.target_player.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" ({})", similar.count), Style::default().fg(Color::DarkGray)),
    ])];
    lines.extend(similar.similar_players.iter().map(|p| {
        let score = p.clutch_score.map(|s| format!(" {s:.2}")).unwrap_or_default();
        Line::from(vec![
            Span::raw(format!("• {}", p.name)),
            Span::styled(format!(" {}{score}", p.team), Style::default().fg(Color::Gray)),
        ])
    }));
    lines
}
