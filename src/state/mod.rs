//! Application state module

mod app_state;
mod login;
mod splash_state;
mod wizard_screen;

pub use app_state::*;
pub use login::*;
pub use splash_state::*;
pub use wizard_screen::*;
