//! UI module for rendering the TUI

mod components;
mod condominiums;
mod forms;
mod layout;
mod review;
mod role_selection;

use crate::app::App;
use crate::state::{FormState, Step};
use components::{render_confirm_dialog, render_error_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match app.state.step() {
        Step::RoleSelection => role_selection::draw(frame, main_area, app),
        Step::CondominiumsInfo => condominiums::draw(frame, main_area, app),
        Step::Final => review::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Modals, innermost last
    if let FormState::Section(form) = &app.state.form {
        forms::draw_section_dialog(frame, form);
    }

    if let Some(pending) = &app.state.pending_delete {
        let info = &app.state.wizard.draft().condominiums_info;
        let record = pending
            .section
            .summaries(info)
            .into_iter()
            .nth(pending.index.unwrap_or(0))
            .unwrap_or_default();
        render_confirm_dialog(frame, pending, &record);
    }

    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.error_queue.len() - 1);
    }
}
