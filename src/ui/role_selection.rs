//! Property & role step

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::{draw_field, field_height, first_visible};
use crate::app::App;
use crate::state::listing::{PropertyType, Role};
use crate::state::RoleRow;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),             // Property type
            Constraint::Length(5),             // Role
            Constraint::Min(3),                // Role details
            Constraint::Length(3),             // Terms
            Constraint::Length(BUTTON_HEIGHT), // Next
        ])
        .margin(1)
        .split(area);

    let draft = app.state.wizard.draft();
    let row = app.state.role_form.row();

    draw_choice_group(
        frame,
        chunks[0],
        "Property type",
        &PropertyType::ALL.map(|p| (p.title(), p.description())),
        PropertyType::ALL
            .iter()
            .position(|p| Some(*p) == draft.property_type),
        row == RoleRow::PropertyType,
        app.state.wizard.error_for("property_type"),
    );
    draw_choice_group(
        frame,
        chunks[1],
        "Select your role",
        &Role::ALL.map(|r| (r.title(), r.description())),
        Role::ALL.iter().position(|r| Some(*r) == draft.role),
        row == RoleRow::Role,
        app.state.wizard.error_for("role"),
    );
    draw_role_details(frame, chunks[2], app);
    draw_terms(frame, chunks[3], app);

    let next_area = Rect {
        x: chunks[4].x + chunks[4].width.saturating_sub(14),
        width: chunks[4].width.min(14),
        ..chunks[4]
    };
    let next_label = if draft.is_condominium() {
        "Next"
    } else {
        "Review"
    };
    render_button(
        frame,
        next_area,
        next_label,
        row == RoleRow::Buttons,
        true,
        Some(Color::Green),
    );
}

/// A row of radio cards, one per option
fn draw_choice_group(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    options: &[(&str, &str)],
    selected: Option<usize>,
    is_active: bool,
    error: Option<&str>,
) {
    let border_color = match (error, is_active) {
        (Some(_), _) => Color::Red,
        (None, true) => Color::Cyan,
        (None, false) => Color::DarkGray,
    };
    let mut block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, options.len() as u32); options.len()])
        .split(inner);

    for (i, (label, description)) in options.iter().enumerate() {
        let is_selected = selected == Some(i);
        let marker = if is_selected { "◉" } else { "○" };
        let label_style = if is_selected {
            Style::default()
                .fg(if is_active { Color::Cyan } else { Color::White })
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let card = Paragraph::new(vec![
            Line::from(Span::styled(format!("{marker} {}. {label}", i + 1), label_style)),
            Line::from(Span::styled(
                format!("  {description}"),
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        frame.render_widget(card, cards[i]);
    }
}

fn draw_role_details(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.role_form;
    let title = match form.role {
        Some(role) => role.verification_heading(),
        None => "Verification",
    };
    let is_active = matches!(form.row(), RoleRow::Detail(_));
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if is_active {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = &form.details.fields;
    if fields.is_empty() {
        let hint = Paragraph::new("Select a role to see what we need to verify it.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, inner);
        return;
    }

    let active = match form.row() {
        RoleRow::Detail(i) => i,
        RoleRow::PropertyType | RoleRow::Role => 0,
        RoleRow::Terms | RoleRow::Buttons => fields.len() - 1,
    };
    let heights: Vec<u16> = fields.iter().map(field_height).collect();
    let first = first_visible(&heights, active, inner.height);

    let mut y = inner.y;
    for (index, field) in fields.iter().enumerate().skip(first) {
        let height = heights[index];
        if y + height > inner.y + inner.height {
            break;
        }
        draw_field(
            frame,
            Rect {
                y,
                height,
                ..inner
            },
            field,
            form.row() == RoleRow::Detail(index),
            app.state.wizard.error_for(&field.name),
        );
        y += height;
    }
}

fn draw_terms(frame: &mut Frame, area: Rect, app: &App) {
    let accepted = app.state.wizard.draft().terms_accepted;
    let is_active = app.state.role_form.row() == RoleRow::Terms;
    let error = app.state.wizard.error_for("terms_accepted");

    let border_color = match (error, is_active) {
        (Some(_), _) => Color::Red,
        (None, true) => Color::Cyan,
        (None, false) => Color::DarkGray,
    };
    let mut line = vec![
        Span::styled(
            if accepted { "[x] " } else { "[ ] " },
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("Accept RentYard property adding terms & condition"),
    ];
    if let Some(message) = error {
        line.push(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Red),
        ));
    }

    let terms = Paragraph::new(Line::from(line)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(terms, area);
}
