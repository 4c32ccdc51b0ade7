//! Form rendering module
//!
//! - `field_renderer`: single field with label, value and error
//! - `section_dialog`: add/edit dialog for condominium sections

mod field_renderer;
mod section_dialog;

pub use field_renderer::{draw_field, field_height};
pub use section_dialog::{draw_section_dialog, first_visible};
