//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered button; `accent` colors the label when selected
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Option<Color>,
) {
    let selected_color = accent.unwrap_or(Color::Cyan);
    let border_style = if is_selected {
        Style::default().fg(selected_color)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(selected_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(label.to_string())
        .alignment(Alignment::Center)
        .style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render a pair of buttons side by side, right-aligned in `area`
pub fn render_button_pair(
    frame: &mut Frame,
    area: Rect,
    labels: [&str; 2],
    selected: Option<usize>,
    accents: [Option<Color>; 2],
) {
    let width = 14u16;
    let right = area.x + area.width;
    for (i, label) in labels.iter().enumerate() {
        let offset = width * (2 - i as u16) + (1 - i as u16);
        let button_area = Rect {
            x: right.saturating_sub(offset).max(area.x),
            y: area.y,
            width: width.min(area.width),
            height: BUTTON_HEIGHT.min(area.height),
        };
        render_button(frame, button_area, label, selected == Some(i), true, accents[i]);
    }
}
