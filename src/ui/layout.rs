//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use crate::state::Step;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the title and the step indicator
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.state.step();
    let steps = Step::sequence(app.state.wizard.draft().property_type);

    let mut spans = vec![Span::styled(
        " RentYard ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    for (i, step) in steps.iter().enumerate() {
        spans.push(Span::styled(
            if i == 0 { "  " } else { " › " },
            Style::default().fg(Color::DarkGray),
        ));
        let style = if *step == current {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{}. {}", i + 1, step.title()), style));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", get_hints(app)),
        Style::default().fg(Color::Gray),
    )];

    if app.state.submitting {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "Submitting...",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for whatever currently has focus
fn get_hints(app: &App) -> String {
    if app.state.has_errors() {
        return "Enter/Esc:dismiss".to_string();
    }
    if app.state.pending_delete.is_some() {
        return "←→:select  Enter:confirm  Esc:cancel".to_string();
    }
    if app.state.form.is_open() {
        return format!("Tab:next  ←→:choose  {SAVE_SHORTCUT}:save  Esc:cancel");
    }
    match app.state.step() {
        Step::RoleSelection => "↑↓:move  ←→/1-3:choose  Space:accept terms  Enter:next".to_string(),
        Step::CondominiumsInfo => "↑↓:move  Enter:add/edit  d:delete  Esc:back".to_string(),
        Step::Final => "←→:select  Enter:confirm  Esc:back".to_string(),
    }
}
