//! Application state and core logic

use crate::api::{self, ListingClientTrait, SubmitError};
use crate::platform::is_save_shortcut;
use crate::state::forms::section_form;
use crate::state::listing::{PropertyType, Role};
use crate::state::{
    AppState, CondoItem, Form, FormState, IntakeError, PendingDelete, RoleRow, Section, Step,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Listing API client
    client: Box<dyn ListingClientTrait>,
    /// Whether the app should quit
    quit: bool,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub fn new(client: Box<dyn ListingClientTrait>) -> Self {
        let mut state = AppState::new();
        state.sync_role_form();
        Self {
            state,
            client,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return Ok(());
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Handle delete confirmation (modal)
        if self.state.pending_delete.is_some() {
            self.handle_delete_confirm_key(key);
            return Ok(());
        }

        // Handle section dialog (modal)
        if self.state.form.is_open() {
            self.handle_section_dialog_key(key);
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.step() {
            Step::RoleSelection => self.handle_role_selection_key(key),
            Step::CondominiumsInfo => self.handle_condominiums_key(key),
            Step::Final => self.handle_review_key(key).await,
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Step 1: property type, role and verification
    // ------------------------------------------------------------------

    fn handle_role_selection_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.role_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.role_form.prev_field(),
            KeyCode::Esc => self.quit = true,
            _ => match self.state.role_form.row() {
                RoleRow::PropertyType => self.handle_property_type_key(key),
                RoleRow::Role => self.handle_role_key(key),
                RoleRow::Detail(_) => self.handle_role_detail_key(key),
                RoleRow::Terms => {
                    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                        let accepted = !self.state.wizard.draft().terms_accepted;
                        self.state.wizard.set_terms_accepted(accepted);
                    }
                }
                RoleRow::Buttons => {
                    if key.code == KeyCode::Enter {
                        self.advance();
                    }
                }
            },
        }
    }

    fn handle_property_type_key(&mut self, key: KeyEvent) {
        let current = self.state.wizard.draft().property_type;
        let next = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => cycle(&PropertyType::ALL, current, 1),
            KeyCode::Left => cycle(&PropertyType::ALL, current, -1),
            KeyCode::Char(c @ '1'..='3') => PropertyType::ALL.get(digit(c)).copied(),
            KeyCode::Enter => {
                self.state.role_form.next_field();
                None
            }
            _ => None,
        };
        if let Some(property_type) = next {
            self.state.wizard.set_property_type(property_type);
        }
    }

    fn handle_role_key(&mut self, key: KeyEvent) {
        let current = self.state.wizard.draft().role;
        let next = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => cycle(&Role::ALL, current, 1),
            KeyCode::Left => cycle(&Role::ALL, current, -1),
            KeyCode::Char(c @ '1'..='3') => Role::ALL.get(digit(c)).copied(),
            KeyCode::Enter => {
                self.state.role_form.next_field();
                None
            }
            _ => None,
        };
        if let Some(role) = next {
            self.state.wizard.set_role(role);
            self.state.sync_role_form();
        }
    }

    fn handle_role_detail_key(&mut self, key: KeyEvent) {
        let Some(field) = self.state.role_form.get_active_field_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => field.push_char(c),
            KeyCode::Backspace => field.pop_char(),
            KeyCode::Right if field.is_selectable() => field.next_option(),
            KeyCode::Left if field.is_selectable() => field.prev_option(),
            KeyCode::Enter => {
                self.state.role_form.next_field();
                return;
            }
            _ => return,
        }
        if let Some(details) = self.state.role_form.role_details() {
            self.state.wizard.update_role_details(details);
        }
    }

    // ------------------------------------------------------------------
    // Step 2: condominium sections
    // ------------------------------------------------------------------

    fn handle_condominiums_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => self.state.next_condo_item(),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => self.state.prev_condo_item(),
            KeyCode::Esc => self.back(),
            KeyCode::Delete | KeyCode::Char('d') => self.request_delete(),
            KeyCode::Enter | KeyCode::Char('e') => match self.state.focused_condo_item() {
                Some(CondoItem::Section { section, index }) => self.open_section(section, index),
                Some(CondoItem::Back) => self.back(),
                Some(CondoItem::Next) => self.advance(),
                None => {}
            },
            _ => {}
        }
    }

    /// Open the dialog for a section; `index` selects a list record to edit
    fn open_section(&mut self, section: Section, index: Option<usize>) {
        // Add rows of list sections open blank
        let record = match (section.is_list(), index) {
            (true, None) => None,
            _ => self.state.wizard.section_record(section, index),
        };
        let editing = if section.is_list() {
            index
        } else {
            record.as_ref().map(|_| 0)
        };
        debug!(section = section.key(), ?index, "Opening section dialog");
        self.state.form =
            FormState::Section(section_form::open(section, editing, record.as_ref()));
    }

    fn request_delete(&mut self) {
        let Some(CondoItem::Section { section, index }) = self.state.focused_condo_item() else {
            return;
        };
        let info = &self.state.wizard.draft().condominiums_info;
        let has_record = match index {
            Some(_) => true,
            None => !section.is_list() && section.is_filled(info),
        };
        if has_record {
            self.state.pending_delete = Some(PendingDelete::new(section, index));
        }
    }

    fn handle_delete_confirm_key(&mut self, key: KeyEvent) {
        let Some(pending) = self.state.pending_delete.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                pending.toggle()
            }
            KeyCode::Esc => self.state.pending_delete = None,
            KeyCode::Enter => {
                let pending = *pending;
                self.state.pending_delete = None;
                if pending.is_confirmed() {
                    match self.state.wizard.delete_section(pending.section, pending.index) {
                        Ok(()) => {
                            self.state.clamp_condo_cursor();
                            self.status_message =
                                Some(format!("Removed {}", pending.section.record_kind()));
                        }
                        Err(e) => self.push_error(e.to_string()),
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_section_dialog_key(&mut self, key: KeyEvent) {
        if is_save_shortcut(&key) {
            self.save_section_dialog();
            return;
        }

        let FormState::Section(form) = &mut self.state.form else {
            return;
        };

        if form.is_buttons_row_active() {
            match key.code {
                KeyCode::Left => form.prev_button(),
                KeyCode::Right => form.next_button(),
                KeyCode::Tab | KeyCode::Down => form.next_field(),
                KeyCode::BackTab | KeyCode::Up => form.prev_field(),
                KeyCode::Esc => self.close_section_dialog(),
                KeyCode::Enter => {
                    if form.is_save_selected() {
                        self.save_section_dialog();
                    } else {
                        self.close_section_dialog();
                    }
                }
                _ => {}
            }
            return;
        }

        let multiline = self.state.form.is_active_field_multiline();
        let FormState::Section(form) = &mut self.state.form else {
            return;
        };
        let mut changed = false;
        match key.code {
            KeyCode::Esc => {
                self.close_section_dialog();
                return;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            KeyCode::Down if !multiline => form.next_field(),
            KeyCode::Up if !multiline => form.prev_field(),
            KeyCode::Enter if multiline => {
                if let Some(field) = form.get_active_field_mut() {
                    field.push_char('\n');
                    changed = true;
                }
            }
            KeyCode::Enter => form.next_field(),
            code => {
                if let Some(field) = form.get_active_field_mut() {
                    changed = true;
                    match code {
                        KeyCode::Char(c) => field.push_char(c),
                        KeyCode::Backspace => field.pop_char(),
                        KeyCode::Right if field.is_selectable() => field.next_option(),
                        KeyCode::Left if field.is_selectable() => field.prev_option(),
                        _ => changed = false,
                    }
                }
            }
        }

        // Once a save attempt has shown errors, keep them in step with the input
        if changed && !form.errors.is_empty() {
            form.errors = section_form::parse(form).err().unwrap_or_default();
        }
    }

    fn save_section_dialog(&mut self) {
        let FormState::Section(form) = &mut self.state.form else {
            return;
        };
        let record = match section_form::parse(form) {
            Ok(record) => record,
            Err(errors) => {
                debug!(section = form.section.key(), count = errors.len(), "Section dialog has errors");
                form.errors = errors;
                return;
            }
        };

        let section = form.section;
        let index = if section.is_list() { form.index } else { None };
        match self.state.wizard.save_section(record, index) {
            Ok(position) => {
                self.state.form = FormState::None;
                let verb = if index.is_some() { "Updated" } else { "Saved" };
                self.status_message = Some(format!("{verb} {}", section.title().to_lowercase()));
                self.state.focus_section(section);
                if section.is_list() {
                    self.state.condo_cursor += position;
                }
            }
            Err(IntakeError::Validation(errors)) => form.errors = errors,
            Err(e) => {
                self.state.form = FormState::None;
                self.push_error(e.to_string());
            }
        }
    }

    fn close_section_dialog(&mut self) {
        debug!("Closing section dialog");
        self.state.form = FormState::None;
    }

    // ------------------------------------------------------------------
    // Step 3: review and submit
    // ------------------------------------------------------------------

    async fn handle_review_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.state.review_button = (self.state.review_button + 1) % 2;
            }
            KeyCode::Esc => self.back(),
            KeyCode::Enter => {
                if self.state.review_button == 1 {
                    self.submit().await;
                } else {
                    self.back();
                }
            }
            _ => {}
        }
    }

    /// Send the draft to the listing API
    pub async fn submit(&mut self) {
        if self.state.submitting {
            return;
        }
        self.state.submitting = true;
        let result = api::submit(self.state.wizard.draft_mut(), self.client.as_ref()).await;
        self.state.submitting = false;

        match result {
            Ok(receipt) => {
                self.status_message = Some(receipt.summary());
                self.state.reset_after_submit(receipt);
                self.state.sync_role_form();
            }
            Err(SubmitError::Validation(errors)) => {
                self.push_error(format!("The listing is incomplete.\n{errors}"));
            }
            Err(e) => {
                warn!(error = %e, "Submission failed");
                self.push_error(format!("Failed to submit listing: {e}"));
            }
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    fn advance(&mut self) {
        match self.state.wizard.advance() {
            Ok(Step::CondominiumsInfo) => self.state.condo_cursor = 0,
            Ok(Step::Final) => self.state.review_button = 1,
            Ok(Step::RoleSelection) => {}
            Err(e) => match e.field_errors() {
                Some(errors) => {
                    self.status_message = Some(format!(
                        "Please fix {} field{} before continuing",
                        errors.len(),
                        if errors.len() == 1 { "" } else { "s" }
                    ));
                    self.focus_first_error();
                }
                None => self.push_error(e.to_string()),
            },
        }
    }

    fn back(&mut self) {
        match self.state.wizard.back() {
            Ok(Step::RoleSelection) => self.state.sync_role_form(),
            Ok(_) => {}
            Err(e) => self.push_error(e.to_string()),
        }
    }

    /// Move focus to the first field the current step complains about
    fn focus_first_error(&mut self) {
        let errors = self.state.wizard.errors();
        match self.state.step() {
            Step::RoleSelection => {
                let first_row = errors
                    .iter()
                    .filter_map(|(field, _)| self.state.role_form.row_of(field))
                    .min();
                if let Some(row) = first_row {
                    self.state.role_form.set_active_field(row);
                }
            }
            Step::CondominiumsInfo => {
                let first = Section::ALL
                    .into_iter()
                    .find(|section| errors.contains(&section.error_key()));
                if let Some(section) = first {
                    self.state.focus_section(section);
                }
            }
            Step::Final => {}
        }
    }
}

/// Step through `options` from `current`, wrapping at both ends
fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, step: isize) -> Option<T> {
    let len = options.len() as isize;
    if len == 0 {
        return None;
    }
    let next = match current.and_then(|c| options.iter().position(|o| *o == c)) {
        Some(i) => (i as isize + step).rem_euclid(len),
        None if step >= 0 => 0,
        None => len - 1,
    };
    options.get(next as usize).copied()
}

fn digit(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d.saturating_sub(1) as usize)
}
