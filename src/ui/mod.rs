//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the application's
//! terminal-based user interface using ratatui.

mod calendar;
mod passage;

pub use calendar::draw_calendar;
pub use passage::{draw_passages, segments_to_text};

use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::constants::branding::{CARD_TITLE, COLOR_LABEL, COMMUNITY_NAME, COMMUNITY_SUBTITLE};
use crate::input::AppMode;
use crate::liturgy::LiturgicalColor;
use crate::services::dates;

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Community header
            Constraint::Length(3), // Liturgy name, color and date
            Constraint::Min(1),
            Constraint::Length(1), // Footer
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    draw_header(f, chunks[0]);
    draw_liturgy_info(f, app, chunks[1]);

    // The tabs are replaced by the indicator while a fetch is in flight
    if app.is_loading() {
        draw_loading_indicator(f, chunks[2]);
    } else if app.document().is_some() {
        draw_passages(f, app, chunks[2]);
    } else {
        draw_empty(f, chunks[2]);
    }

    draw_footer(f, app, chunks[3]);
    draw_command_bar(f, app, chunks[4]);

    if app.mode == AppMode::Calendar {
        draw_calendar(f, app);
    }

    if app.show_help {
        draw_help_modal(f);
    }
}

/// Display color for a liturgical color.
pub fn liturgical_color(color: &LiturgicalColor) -> Color {
    match color {
        LiturgicalColor::Green => Color::Green,
        LiturgicalColor::Purple => Color::Magenta,
        LiturgicalColor::White | LiturgicalColor::Other(_) => Color::White,
        LiturgicalColor::Red => Color::Red,
        LiturgicalColor::Rose => Color::LightMagenta,
        LiturgicalColor::Black => Color::DarkGray,
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("✝", Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(
            COMMUNITY_NAME,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(COMMUNITY_SUBTITLE, Style::default().fg(Color::Gray))),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_liturgy_info(f: &mut Frame, app: &App, area: Rect) {
    let date_line = Line::from(vec![
        Span::styled(
            format!("{CARD_TITLE} "),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("· "),
        Span::styled(
            format!("[{}]", dates::format_long_date(app.selected_date())),
            Style::default().fg(Color::LightYellow),
        ),
    ]);

    let mut lines = Vec::new();
    if let Some(doc) = app.document() {
        let color = liturgical_color(&doc.liturgical_color());
        lines.push(Line::from(vec![
            Span::styled(format!("{COLOR_LABEL}: "), Style::default().fg(Color::Gray)),
            Span::styled(
                doc.color.to_uppercase(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            doc.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::default());
        lines.push(Line::default());
    }
    lines.push(date_line);

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_empty(f: &mut Frame, area: Rect) {
    let text = Paragraph::new("Nenhuma liturgia carregada. Pressione r para tentar novamente.")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(text, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let text = format!(
        "© {} {COMMUNITY_NAME} - {COMMUNITY_SUBTITLE}",
        app.selected_date().year()
    );
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let (title, border_color) = if app.status_message.is_some() {
        ("Aviso", Color::Red)
    } else {
        ("Comandos", Color::Yellow)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));

    let line = if let Some(message) = &app.status_message {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(message.clone(), Style::default().fg(Color::White)),
            Span::styled("  (Esc fecha)", Style::default().fg(Color::Gray)),
        ])
    } else {
        let hints: &[(&str, &str)] = match app.mode {
            AppMode::Browse => &[
                ("←/→", "Leitura"),
                ("[/]", "Dia"),
                ("c", "Calendário"),
                ("t", "Hoje"),
                ("y", "Copiar"),
                ("?", "Ajuda"),
                ("q", "Sair"),
            ],
            AppMode::Calendar => &[
                ("Setas", "Mover"),
                ("PgUp/PgDn", "Mês"),
                ("Enter", "Escolher"),
                ("Esc", "Fechar"),
            ],
        };
        Line::from(create_help_text(hints))
    };

    f.render_widget(
        Paragraph::new(line)
            .style(Style::default().fg(Color::Gray))
            .block(block),
        area,
    );
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

// Draw a loading indicator in place of the passages
fn draw_loading_indicator(f: &mut Frame, area: Rect) {
    let width = 22.min(area.width);
    let height = 3.min(area.height);

    let inner = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let text = Paragraph::new("Carregando...")
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(Clear, inner);
    f.render_widget(text, inner);
}

// Draw the help modal with keybindings
#[allow(clippy::cast_possible_truncation)]
fn draw_help_modal(f: &mut Frame) {
    use unicode_width::UnicodeWidthStr;

    let lines = help_content();
    let size = f.size();

    let widest = lines
        .iter()
        .map(|(key, desc, _)| 14 + key.width().max(desc.width()))
        .max()
        .unwrap_or(40);
    let max_width = size.width.saturating_sub(4);
    let width = (widest as u16 + 4).max(40).min(max_width);
    let height = (lines.len() as u16 + 2).min(size.height.saturating_sub(2));

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(Span::styled(" Ajuda - Teclas ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let help_text: Vec<Line> = lines
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>12}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(help_text).block(block).wrap(Wrap { trim: true }), area);
}

fn help_content() -> Vec<(&'static str, &'static str, bool)> {
    vec![
        ("── Leituras ──", "", true),
        ("←/→ Tab", "Trocar de leitura", false),
        ("↑/↓ j/k", "Rolar o texto", false),
        ("PgUp/PgDn", "Rolar uma página", false),
        ("[ / ]", "Dia anterior / seguinte", false),
        ("t", "Voltar para hoje", false),
        ("c / Enter", "Abrir o calendário", false),
        ("r", "Recarregar", false),
        ("y", "Copiar a leitura", false),
        ("", "", false),
        ("── Calendário ──", "", true),
        ("Setas", "Mover um dia / semana", false),
        ("PgUp/PgDn", "Mês anterior / seguinte", false),
        ("Enter", "Escolher a data", false),
        ("Esc", "Fechar", false),
        ("", "", false),
        ("Esc, F1 ou ? para fechar", "", true),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::config::Config;
    use crate::liturgy::{fixtures, LiturgyDocument, LiturgySource};
    use crate::error::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Duration;

    struct Fixed(LiturgyDocument);

    #[async_trait]
    impl LiturgySource for Fixed {
        async fn fetch_liturgy(&self, _date: NaiveDate) -> Result<LiturgyDocument> {
            Ok(self.0.clone())
        }
    }

    async fn loaded_app(doc: LiturgyDocument) -> App {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        let mut app = App::with_source(Config::default(), Arc::new(Fixed(doc)), date);
        app.start();
        tokio::time::timeout(Duration::from_secs(5), async {
            while app.is_loading() {
                tokio::task::yield_now().await;
                app.handle_updates();
            }
        })
        .await
        .unwrap();
        app
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn renders_four_tabs_with_second_reading() {
        let screen = render(&loaded_app(fixtures::christmas()).await);
        assert!(screen.contains("2ª Leitura"));
        assert!(screen.contains("Evangelho"));
        assert!(screen.contains("BRANCO"));
    }

    #[tokio::test]
    async fn second_reading_tab_absent_without_text() {
        let screen = render(&loaded_app(fixtures::weekday()).await);
        assert!(screen.contains("1ª Leitura"));
        assert!(screen.contains("Salmo"));
        assert!(!screen.contains("2ª Leitura"));
    }

    #[test]
    fn shows_loading_indicator_while_fetching() {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        let mut app = App::with_source(Config::default(), Arc::new(Fixed(fixtures::christmas())), date);
        let _guard = runtime.enter();
        app.start();
        let screen = render(&app);
        assert!(screen.contains("Carregando..."));
        assert!(!screen.contains("Evangelho"));
    }

    #[test]
    fn colors_map_to_terminal_colors() {
        assert_eq!(liturgical_color(&LiturgicalColor::Green), Color::Green);
        assert_eq!(liturgical_color(&LiturgicalColor::Purple), Color::Magenta);
        assert_eq!(liturgical_color(&LiturgicalColor::Other("Azul".into())), Color::White);
    }
}
