//! Date picker popup.

use chrono::{Datelike, Local};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::constants::calendar::WEEKDAY_LABELS;
use crate::constants::ui::{CALENDAR_HEIGHT, CALENDAR_WIDTH};
use crate::services::dates;

/// Draw the date picker popup centered over the screen.
pub fn draw_calendar(f: &mut Frame, app: &App) {
    let size = f.size();
    let width = CALENDAR_WIDTH.min(size.width);
    let height = CALENDAR_HEIGHT.min(size.height);
    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let cursor = app.calendar_cursor;
    let selected = app.selected_date();
    let today = Local::now().date_naive();

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", dates::format_month_title(cursor)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let mut lines = vec![Line::from(
        WEEKDAY_LABELS
            .iter()
            .map(|d| Span::styled(format!("{d:>3} "), Style::default().fg(Color::Gray)))
            .collect::<Vec<_>>(),
    )];

    for week in dates::month_grid(cursor) {
        let spans: Vec<Span> = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let mut style = Style::default().fg(Color::White);
                    if *day == today {
                        style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                    }
                    if *day == selected {
                        style = style.add_modifier(Modifier::UNDERLINED);
                    }
                    if *day == cursor {
                        style = style.bg(Color::Yellow).fg(Color::Black);
                    }
                    Span::styled(format!("{:>3} ", day.day()), style)
                }
                None => Span::raw("    "),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter escolhe · PgUp/PgDn mês",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}
