use clutch_api::Player;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, Paragraph, Widget};

pub const LOADING_TEXT: &str = "Cargando jugadores...";
pub const EMPTY_TEXT: &str = "No se encontraron jugadores";

/// Players one per line: name, position and team, plus the clutch score when
/// the backend sent one.
pub struct PlayerList<'a> {
    pub players: &'a [Player],
    pub selected: Option<usize>,
    pub loading: bool,
    pub block: Option<Block<'a>>,
}

impl<'a> PlayerList<'a> {
    pub fn new(players: &'a [Player]) -> Self {
        Self { players, selected: None, loading: false, block: None }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for PlayerList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.height == 0 {
            return;
        }

        if self.loading || self.players.is_empty() {
            let text = if self.loading { LOADING_TEXT } else { EMPTY_TEXT };
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)).render(inner, buf);
            return;
        }

        // Keep the selection on screen.
        let visible = inner.height as usize;
        let offset = self
            .selected
            .map(|s| s.saturating_sub(visible.saturating_sub(1)))
            .unwrap_or(0);

        let lines: Vec<Line> = self
            .players
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, player)| player_line(player, self.selected == Some(i)))
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

fn player_line(player: &Player, selected: bool) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };
    let name_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(player.name.clone(), name_style),
        Span::styled(
            format!("  {} · {}", player.position, player.team),
            Style::default().fg(Color::Gray),
        ),
    ];
    if let Some(score) = player.clutch_score {
        spans.push(Span::styled(
            format!("  {score:.2}"),
            Style::default().fg(Color::Rgb(255, 103, 31)),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(widget: PlayerList, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    fn player(name: &str, score: Option<f64>) -> Player {
        Player {
            name: name.into(),
            position: "Forward".into(),
            team: "Inter Miami".into(),
            clutch_score: score,
        }
    }

    #[test]
    fn empty_and_loading_texts() {
        assert!(rendered(PlayerList::new(&[]), 40, 1)[0].starts_with(EMPTY_TEXT));
        let players = [player("Lionel Messi", None)];
        let rows = rendered(PlayerList::new(&players).loading(true), 40, 1);
        assert!(rows[0].starts_with(LOADING_TEXT));
    }

    #[test]
    fn marks_selection_and_score() {
        let players = [player("Lionel Messi", Some(8.75)), player("Carlos Vela", None)];
        let rows = rendered(PlayerList::new(&players).selected(1), 60, 2);
        assert!(rows[0].starts_with("  Lionel Messi"));
        assert!(rows[0].contains("8.75"));
        assert!(rows[1].starts_with("▶ Carlos Vela"));
    }
}
