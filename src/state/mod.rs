//! Application state module

mod app_state;
mod error;
pub mod forms;
pub mod listing;
pub mod records;
pub mod schema;
pub mod section;
pub mod wizard;

pub use app_state::*;
pub use error::IntakeError;
pub use forms::*;
pub use schema::FieldErrors;
pub use section::{Requirement, Section};
pub use wizard::Step;
