//! Review & submit step

use super::components::{render_button_pair, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::{FormField, Section};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(BUTTON_HEIGHT)])
        .margin(1)
        .split(area);

    let summary = Paragraph::new(summary_lines(app))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Review your listing ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(summary, chunks[0]);

    let submit_label = if app.state.submitting {
        "Submitting"
    } else {
        "Submit"
    };
    render_button_pair(
        frame,
        chunks[1],
        ["Back", submit_label],
        Some(app.state.review_button),
        [None, Some(Color::Green)],
    );
}

fn summary_lines(app: &App) -> Vec<Line<'static>> {
    let draft = app.state.wizard.draft();
    let mut lines = vec![
        entry(
            "Property type",
            draft.property_type.map_or("-", |p| p.title()),
        ),
        entry("Role", draft.role.map_or("-", |r| r.title())),
    ];

    for field in &app.state.role_form.details.fields {
        lines.push(field_entry(field));
    }
    lines.push(entry(
        "Terms accepted",
        if draft.terms_accepted { "yes" } else { "no" },
    ));

    if draft.is_condominium() {
        let info = &draft.condominiums_info;
        for section in Section::ALL {
            let summaries = section.summaries(info);
            if summaries.is_empty() {
                continue;
            }
            lines.push(Line::from(""));
            lines.push(heading(section.title()));
            for summary in summaries {
                for text in summary.split('\n') {
                    lines.push(Line::from(format!("  {text}")));
                }
            }
        }
    }

    lines
}

fn heading(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
}

fn entry(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value.to_string()),
    ])
}

fn field_entry(field: &FormField) -> Line<'static> {
    let label = field.label.trim_end_matches('*');
    let value = field.display_value();
    let value = value.trim_start_matches("◂ ").trim_end_matches(" ▸");
    entry(label, if value.is_empty() { "-" } else { value })
}
