//! Application state module

mod app_state;
mod forms;
mod progress_animation;

pub use app_state::*;
pub use forms::*;
pub use progress_animation::*;
