//! Errors raised by the intake wizard

use super::schema::FieldErrors;
use super::wizard::Step;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("please fix the highlighted fields: {0}")]
    Validation(FieldErrors),
    #[error("cannot {action} from the {step} step")]
    IllegalTransition { step: Step, action: &'static str },
    #[error("no {kind} record at position {index}")]
    RecordIndex { kind: &'static str, index: usize },
}

impl IntakeError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for IntakeError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}
