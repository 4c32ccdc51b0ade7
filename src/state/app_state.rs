//! Application state definitions

use super::forms::{FormState, RoleSelectionForm};
use super::listing::CondominiumsInfo;
use super::section::Section;
use super::wizard::{IntakeWizard, Step};
use crate::api::ListingReceipt;
use std::collections::VecDeque;

/// A focusable row on the condominium information step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondoItem {
    /// A section card; `index` picks a record inside list sections,
    /// `None` is the card itself (single-record sections) or its Add row
    Section {
        section: Section,
        index: Option<usize>,
    },
    Back,
    Next,
}

impl CondoItem {
    /// Rows in display order for the current records
    pub fn all(info: &CondominiumsInfo) -> Vec<CondoItem> {
        let mut items = Vec::new();
        for section in Section::ALL {
            if section.is_list() {
                for index in 0..section.record_count(info) {
                    items.push(CondoItem::Section {
                        section,
                        index: Some(index),
                    });
                }
            }
            items.push(CondoItem::Section {
                section,
                index: None,
            });
        }
        items.push(CondoItem::Back);
        items.push(CondoItem::Next);
        items
    }
}

/// Delete confirmation waiting for an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDelete {
    pub section: Section,
    pub index: Option<usize>,
    /// 0 = Cancel, 1 = Delete
    pub selected: usize,
}

impl PendingDelete {
    pub fn new(section: Section, index: Option<usize>) -> Self {
        Self {
            section,
            index,
            selected: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.selected = (self.selected + 1) % 2;
    }

    pub fn is_confirmed(&self) -> bool {
        self.selected == 1
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    pub wizard: IntakeWizard,

    // Step views
    pub role_form: RoleSelectionForm,
    pub condo_cursor: usize,
    /// 0 = Back, 1 = Submit
    pub review_button: usize,

    // Modals
    pub form: FormState,
    pub pending_delete: Option<PendingDelete>,
    pub error_queue: VecDeque<String>,

    // Submission
    pub submitting: bool,
    pub last_receipt: Option<ListingReceipt>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            review_button: 1,
            ..Default::default()
        }
    }

    pub fn step(&self) -> Step {
        self.wizard.step()
    }

    /// Rebuild the role step form from the draft (after a role switch)
    pub fn sync_role_form(&mut self) {
        self.role_form.reload(self.wizard.draft());
    }

    pub fn condo_items(&self) -> Vec<CondoItem> {
        CondoItem::all(&self.wizard.draft().condominiums_info)
    }

    /// Row under the condominium step cursor
    pub fn focused_condo_item(&self) -> Option<CondoItem> {
        self.condo_items().get(self.condo_cursor).copied()
    }

    pub fn next_condo_item(&mut self) {
        let count = self.condo_items().len();
        self.condo_cursor = (self.condo_cursor + 1) % count;
    }

    pub fn prev_condo_item(&mut self) {
        let count = self.condo_items().len();
        self.condo_cursor = if self.condo_cursor == 0 {
            count - 1
        } else {
            self.condo_cursor - 1
        };
    }

    /// Keep the cursor in range after records were added or removed
    pub fn clamp_condo_cursor(&mut self) {
        let count = self.condo_items().len();
        self.condo_cursor = self.condo_cursor.min(count.saturating_sub(1));
    }

    /// Move the cursor to the first row of `section`
    pub fn focus_section(&mut self, section: Section) {
        if let Some(position) = self.condo_items().iter().position(|item| {
            matches!(item, CondoItem::Section { section: s, .. } if *s == section)
        }) {
            self.condo_cursor = position;
        }
    }

    /// Start over after a successful submission
    pub fn reset_after_submit(&mut self, receipt: ListingReceipt) {
        self.wizard.reset();
        self.role_form = RoleSelectionForm::from_draft(self.wizard.draft());
        self.condo_cursor = 0;
        self.review_button = 1;
        self.form = FormState::None;
        self.pending_delete = None;
        self.last_receipt = Some(receipt);
    }

    /// Push an error message to the error queue
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// The error currently shown in the error dialog
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::listing::{NearbyPlace, PetFee};

    #[test]
    fn test_condo_items_without_records() {
        let items = CondoItem::all(&CondominiumsInfo::default());
        assert_eq!(items.len(), Section::ALL.len() + 2);
        assert_eq!(
            items[0],
            CondoItem::Section {
                section: Section::PropertyAddress,
                index: None
            }
        );
        assert_eq!(items[items.len() - 1], CondoItem::Next);
    }

    #[test]
    fn test_list_records_precede_add_row() {
        let info = CondominiumsInfo {
            pet_fees: Some(vec![PetFee::default(), PetFee::default()]),
            landmarks: Some(vec![NearbyPlace::default()]),
            ..Default::default()
        };
        let items = CondoItem::all(&info);
        assert_eq!(items.len(), Section::ALL.len() + 2 + 3);
        let pet_rows: Vec<_> = items
            .iter()
            .filter(|item| {
                matches!(item, CondoItem::Section { section: Section::PetFees, .. })
            })
            .collect();
        assert_eq!(
            pet_rows,
            vec![
                &CondoItem::Section {
                    section: Section::PetFees,
                    index: Some(0)
                },
                &CondoItem::Section {
                    section: Section::PetFees,
                    index: Some(1)
                },
                &CondoItem::Section {
                    section: Section::PetFees,
                    index: None
                },
            ]
        );
    }

    #[test]
    fn test_condo_cursor_wraps() {
        let mut state = AppState::new();
        state.prev_condo_item();
        assert_eq!(state.focused_condo_item(), Some(CondoItem::Next));
        state.next_condo_item();
        assert_eq!(state.condo_cursor, 0);
    }

    #[test]
    fn test_focus_section() {
        let mut state = AppState::new();
        state.focus_section(Section::Charges);
        assert_eq!(
            state.focused_condo_item(),
            Some(CondoItem::Section {
                section: Section::Charges,
                index: None
            })
        );
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::new();
        assert!(!state.has_errors());
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_pending_delete_defaults_to_cancel() {
        let mut pending = PendingDelete::new(Section::PetFees, Some(0));
        assert!(!pending.is_confirmed());
        pending.toggle();
        assert!(pending.is_confirmed());
    }
}
