//! Form rendering module
//!
//! - `field_renderer`: per-widget field drawing and scroll helpers
//! - `progress`: section progress bar
//! - `section`: the current section with its navigation buttons
//! - `submitted`: confirmation and submitted data

mod field_renderer;
mod progress;
mod section;
mod submitted;

pub use field_renderer::draw_text_input;
pub use section::draw_form;
pub use submitted::draw_submitted;
