use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::Widget;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogoColor {
    Primary,
    Secondary,
    Accent,
    Dim,
}

pub fn resolve(color: LogoColor) -> Style {
    match color {
        LogoColor::Primary => Style::default().fg(Color::Rgb(255, 103, 31)),
        LogoColor::Secondary => Style::default().fg(Color::Rgb(0, 122, 195)),
        LogoColor::Accent => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        LogoColor::Dim => Style::default().fg(Color::Indexed(240)),
    }
}

const BALL: [&str; 4] = ["  .---.  ", " / \\|/ \\ ", "|---+---|", " '-----' "];

const TITLE: [&str; 4] = [
    "  ___ _   _   _ _____ ___ _  _    ___  ___ ___  ___ ___ ",
    " / __| | | | | |_   _/ __| || |  / __|/ __/ _ \\| _ \\ __|",
    "| (__| |_| |_| | | || (__| __ |  \\__ \\ (_| (_) |   / _| ",
    " \\___|____\\___/  |_| \\___|_||_|  |___/\\___\\___/|_|_\\___|",
];

const TAGLINE: &str = "Analítica de jugadores en momentos decisivos";

/// The app's wordmark. Falls back to a one-line title when the area is too
/// narrow for the block letters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Logo {
    pub show_tagline: bool,
}

impl Logo {
    /// Rows needed for the full rendering.
    pub const HEIGHT: u16 = 5;
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let full_width = (BALL[0].len() + 1 + TITLE[0].len()) as u16;
        if area.width < full_width || area.height < 4 {
            render_centered(
                Line::from(vec![
                    Span::styled("● ", resolve(LogoColor::Primary)),
                    Span::styled("CLUTCH SCORE", resolve(LogoColor::Accent)),
                ]),
                area,
                area.y,
                buf,
            );
            if self.show_tagline && area.height > 1 {
                render_centered(
                    Line::from(Span::styled(TAGLINE, resolve(LogoColor::Dim))),
                    area,
                    area.y + 1,
                    buf,
                );
            }
            return;
        }

        for (row, (ball, title)) in BALL.iter().zip(TITLE.iter()).enumerate() {
            let line = Line::from(vec![
                Span::styled(*ball, resolve(LogoColor::Primary)),
                Span::raw(" "),
                Span::styled(*title, resolve(LogoColor::Secondary)),
            ]);
            render_centered(line, area, area.y + row as u16, buf);
        }

        if self.show_tagline && area.height > 4 {
            render_centered(
                Line::from(Span::styled(TAGLINE, resolve(LogoColor::Accent))),
                area,
                area.y + 4,
                buf,
            );
        }
    }
}

fn render_centered(line: Line, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    buf.set_line(x, y, &line, area.right() - x);
}
