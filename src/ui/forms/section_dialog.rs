//! Add/edit dialog for a condominium section

use super::field_renderer::{draw_field, field_height};
use crate::platform::SAVE_SHORTCUT;
use crate::state::SectionForm;
use crate::ui::components::{centered_rect, render_button_pair, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the section dialog over the current view
pub fn draw_section_dialog(frame: &mut Frame, form: &SectionForm) {
    let area = centered_rect(frame.area(), 72, frame.area().height.saturating_sub(2));
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", form.title()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                // Fields
            Constraint::Length(1),             // Help text
            Constraint::Length(BUTTON_HEIGHT), // Cancel / Save
        ])
        .horizontal_margin(1)
        .split(inner);

    draw_fields(frame, chunks[0], form);
    draw_help_text(frame, chunks[1], form);

    let selected = form.is_buttons_row_active().then_some(form.selected_button);
    render_button_pair(
        frame,
        chunks[2],
        ["Cancel", "Save"],
        selected,
        [None, Some(Color::Green)],
    );
}

fn draw_fields(frame: &mut Frame, area: Rect, form: &SectionForm) {
    let fields = &form.fields.fields;
    let heights: Vec<u16> = fields.iter().map(field_height).collect();
    let first = first_visible(&heights, form.active_field_index, area.height);

    let mut y = area.y;
    for (index, field) in fields.iter().enumerate().skip(first) {
        let height = heights[index];
        if y + height > area.y + area.height {
            break;
        }
        let field_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        draw_field(
            frame,
            field_area,
            field,
            index == form.active_field_index,
            form.error_for(&field.name),
        );
        y += height;
    }
}

/// First field to draw so the active one stays on screen
pub fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    let active = active.min(heights.len().saturating_sub(1));
    let mut first = 0;
    while first < active {
        let used: u16 = heights[first..=active].iter().sum();
        if used <= available {
            break;
        }
        first += 1;
    }
    first
}

fn draw_help_text(frame: &mut Frame, area: Rect, form: &SectionForm) {
    let key = Style::default().fg(Color::Cyan);
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled("Tab", key),
        Span::styled(" next  ", dim),
        Span::styled("←→", key),
        Span::styled(" choose  ", dim),
        Span::styled(SAVE_SHORTCUT, key),
        Span::styled(" save  ", dim),
        Span::styled("Esc", key),
        Span::styled(" cancel", dim),
    ];
    if !form.errors.is_empty() {
        spans.push(Span::styled(
            format!("  {} to fix", form.errors.len()),
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_scrolls_to_active() {
        let heights = [3, 3, 3, 5, 3];
        assert_eq!(first_visible(&heights, 0, 9), 0);
        assert_eq!(first_visible(&heights, 2, 9), 0);
        assert_eq!(first_visible(&heights, 3, 9), 2);
        assert_eq!(first_visible(&heights, 4, 9), 3);
    }

    #[test]
    fn test_first_visible_buttons_row_keeps_last_field() {
        let heights = [3, 3, 3];
        assert_eq!(first_visible(&heights, 3, 6), 1);
    }
}
