//! Passage tabs and body.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::App;
use crate::services::formatter::Segment;

/// Turn formatter output into terminal text. Emphasized runs are bold and
/// every `\n` starts a new line.
pub fn segments_to_text(segments: &[Segment]) -> Text<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for segment in segments {
        let style = if segment.emphasized { bold } else { Style::default() };
        let mut pieces = segment.text.split('\n');
        if let Some(first) = pieces.next() {
            if !first.is_empty() {
                current.push(Span::styled(first.to_string(), style));
            }
        }
        for piece in pieces {
            lines.push(Line::from(std::mem::take(&mut current)));
            if !piece.is_empty() {
                current.push(Span::styled(piece.to_string(), style));
            }
        }
    }
    if !current.is_empty() || !lines.is_empty() {
        lines.push(Line::from(current));
    }
    Text::from(lines)
}

/// Draw the passage tabs and the body of the selected passage.
pub fn draw_passages(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let titles: Vec<Line> = app.tabs().iter().map(|k| Line::from(k.label())).collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.tab_index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .divider(Span::raw("|"));
    f.render_widget(tabs, chunks[0]);

    let Some((kind, passage)) = app.current_passage() else {
        return;
    };

    let mut lines = Vec::new();
    if !passage.title.is_empty() {
        lines.push(Line::from(Span::styled(
            passage.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
    }
    if !passage.reference.is_empty() {
        lines.push(Line::from(Span::styled(
            passage.reference.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(refrain) = passage.refrain.as_deref().filter(|r| !r.is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("R. {refrain}"),
            Style::default().fg(Color::LightRed).add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::default());
    lines.extend(segments_to_text(&app.passage_segments(kind, passage)).lines);

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(body, chunks[1]);
}
