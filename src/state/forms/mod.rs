//! Form domain layer
//!
//! Terminal form fields for the role step and the section dialogs, plus the
//! conversions between those fields and the typed listing records.

mod field;
mod form_state;
mod role_form;
pub mod section_form;

pub use field::{FieldValue, FormField};
pub use form_state::{FieldSet, Form, FormState, SectionForm};
pub use role_form::{RoleRow, RoleSelectionForm};
