use crate::state::app_state::ConnectionState;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget};

pub const CHECKING_TEXT: &str = "Verificando conexión...";
pub const CONNECTED_TEXT: &str = "Conectado";
pub const OFFLINE_TEXT: &str = "Sin conexión";

/// One line: a coloured dot and the backend status.
pub struct ConnectionStatus<'a> {
    pub state: &'a ConnectionState,
}

impl ConnectionStatus<'_> {
    fn line(&self) -> Line<'static> {
        let (dot, text) = match (self.state.checking, self.state.connected) {
            (true, _) | (false, None) => (Color::Yellow, CHECKING_TEXT.to_owned()),
            (false, Some(true)) => {
                let players = self
                    .state
                    .health
                    .as_ref()
                    .map(|h| format!(" · {} jugadores cargados", h.players_count))
                    .unwrap_or_default();
                (Color::Green, format!("{CONNECTED_TEXT}{players}"))
            }
            (false, Some(false)) => (Color::Red, OFFLINE_TEXT.to_owned()),
        };
        Line::from(vec![
            Span::styled("● ", Style::default().fg(dot)),
            Span::styled(text, Style::default().fg(Color::Gray)),
        ])
    }
}

impl Widget for ConnectionStatus<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clutch_api::HealthCheck;

    fn text(state: &ConnectionState) -> String {
        ConnectionStatus { state }
            .line()
            .spans
            .iter()
            .map(|s| s.content.to_string())
            .collect()
    }

    #[test]
    fn states() {
        let mut state = ConnectionState::default();
        assert!(text(&state).contains(CHECKING_TEXT));

        state.connected = Some(false);
        assert!(text(&state).contains(OFFLINE_TEXT));

        state.connected = Some(true);
        state.health = Some(HealthCheck {
            status: "healthy".into(),
            models_loaded: true,
            players_count: 512,
            timestamp: "2024-01-01T00:00:00".into(),
        });
        assert!(text(&state).contains("Conectado · 512 jugadores cargados"));

        state.checking = true;
        assert!(text(&state).contains(CHECKING_TEXT));
    }
}
