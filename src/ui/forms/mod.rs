//! Form rendering shared by the wizard and sign-in views

mod field_renderer;

pub use field_renderer::{draw_field, draw_field_with_value, field_height};
