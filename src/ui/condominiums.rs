//! Condominiums information step

use crate::app::App;
use crate::state::listing::CondominiumsInfo;
use crate::state::{CondoItem, Requirement, Section};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let info = &app.state.wizard.draft().condominiums_info;
    let items = app.state.condo_items();
    let cursor = app.state.condo_cursor;

    let mut previous: Option<Section> = None;
    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut lines = Vec::new();
            if let CondoItem::Section { section, .. } = item {
                if previous != Some(*section) {
                    if previous.is_some() {
                        lines.push(Line::from(""));
                    }
                    let error = app.state.wizard.error_for(&section.error_key());
                    lines.push(section_heading(*section, error));
                    previous = Some(*section);
                }
            }
            lines.extend(item_lines(*item, info, i == cursor));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(" Condominiums information ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::Rgb(30, 40, 50)));

    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn section_heading(section: Section, error: Option<&str>) -> Line<'static> {
    let requirement_color = match section.requirement() {
        Requirement::Required => Color::Yellow,
        Requirement::Optional | Requirement::Recommended => Color::DarkGray,
    };
    let mut spans = vec![
        Span::styled(
            section.title(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            section.requirement().label(),
            Style::default().fg(requirement_color),
        ),
    ];
    if let Some(message) = error {
        spans.push(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

fn item_lines(item: CondoItem, info: &CondominiumsInfo, is_focused: bool) -> Vec<Line<'static>> {
    let marker = if is_focused { "▸ " } else { "  " };
    let focus = if is_focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let add_style = if is_focused {
        focus
    } else {
        Style::default().fg(Color::Green)
    };

    match item {
        CondoItem::Section {
            section,
            index: Some(index),
        } => {
            let summary = section
                .summaries(info)
                .into_iter()
                .nth(index)
                .unwrap_or_default();
            record_lines(marker, &summary, focus)
        }
        CondoItem::Section {
            section,
            index: None,
        } if section.is_list() => vec![Line::from(Span::styled(
            format!("{marker}+ Add {}", section.record_kind()),
            add_style,
        ))],
        CondoItem::Section {
            section,
            index: None,
        } => match section.summaries(info).into_iter().next() {
            Some(summary) => record_lines(marker, &summary, focus),
            None => vec![Line::from(Span::styled(format!("{marker}+ Add"), add_style))],
        },
        CondoItem::Back => vec![
            Line::from(""),
            Line::from(Span::styled(format!("{marker}◂ Back"), focus)),
        ],
        CondoItem::Next => vec![Line::from(Span::styled(
            format!("{marker}Next ▸"),
            if is_focused {
                focus
            } else {
                Style::default().fg(Color::Green)
            },
        ))],
    }
}

/// Summary text, one line per line of the record summary
fn record_lines(marker: &str, summary: &str, style: Style) -> Vec<Line<'static>> {
    summary
        .split('\n')
        .enumerate()
        .map(|(i, text)| {
            let prefix = if i == 0 { marker } else { "  " };
            Line::from(Span::styled(format!("{prefix}{text}"), style))
        })
        .collect()
}
