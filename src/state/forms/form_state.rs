//! Form state management and form structs

use super::field::FormField;
use crate::state::schema::FieldErrors;
use crate::state::section::Section;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// An ordered group of fields with a focus cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl FieldSet {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            active_field_index: 0,
        }
    }

    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Trimmed text of a field (empty when the field does not exist)
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map_or("", |f| f.as_text().trim())
    }

    /// Trimmed text, `None` when blank
    pub fn optional_text(&self, name: &str) -> Option<String> {
        Some(self.text(name))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn toggle(&self, name: &str) -> bool {
        self.get(name).is_some_and(FormField::as_toggle)
    }
}

impl Form for FieldSet {
    fn field_count(&self) -> usize {
        self.fields.len().max(1)
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

/// Dialog editing one condominium sub-record.
///
/// The fields are followed by a buttons row (0=Cancel, 1=Save).
#[derive(Debug, Clone, PartialEq)]
pub struct SectionForm {
    pub section: Section,
    /// Position of the record being edited in a list section; `None` adds
    pub index: Option<usize>,
    pub fields: FieldSet,
    pub errors: FieldErrors,
    pub active_field_index: usize,
    pub selected_button: usize,
}

impl SectionForm {
    pub fn new(section: Section, index: Option<usize>, fields: FieldSet) -> Self {
        Self {
            section,
            index,
            fields,
            errors: FieldErrors::new(),
            active_field_index: 0,
            selected_button: 1,
        }
    }

    pub fn title(&self) -> String {
        let verb = if self.index.is_some() { "Edit" } else { "Add" };
        format!("{verb} {}", self.section.title().to_lowercase())
    }

    fn buttons_row(&self) -> usize {
        self.fields.fields.len()
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.buttons_row()
    }

    /// Toggle between Cancel and Save
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % 2;
    }

    pub fn prev_button(&mut self) {
        self.next_button();
    }

    pub fn is_save_selected(&self) -> bool {
        self.selected_button == 1
    }

    /// Error message for a field of this dialog
    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors.get(name)
    }
}

impl Form for SectionForm {
    fn field_count(&self) -> usize {
        self.fields.fields.len() + 1
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.buttons_row());
        self.fields.active_field_index = self.active_field_index;
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.fields.get(index)
    }
}

/// The dialog currently open over the step view
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormState {
    #[default]
    None,
    Section(SectionForm),
}

impl FormState {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::None)
    }

    pub fn next_field(&mut self) {
        if let FormState::Section(f) = self {
            f.next_field();
        }
    }

    pub fn prev_field(&mut self) {
        if let FormState::Section(f) = self {
            f.prev_field();
        }
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self {
            FormState::None => None,
            FormState::Section(f) => f.get_active_field_mut(),
        }
    }

    pub fn is_active_field_multiline(&self) -> bool {
        match self {
            FormState::None => false,
            FormState::Section(f) => f
                .get_field(f.active_field())
                .is_some_and(|f| f.is_multiline),
        }
    }
}
