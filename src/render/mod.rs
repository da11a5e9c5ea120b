//! Output backends.
//!
//! Three ways out of the model: a draw pass painting onto a [`Canvas`],
//! a JSON dump of the full model, and a plain-text dump for quick
//! inspection and diffing.
//!
//! [`Canvas`]: crate::canvas::Canvas

mod draw;
mod json;
mod text;

pub use draw::{draw_presentation, draw_slide};
pub use json::{to_json, JsonFormat};
pub use text::to_text;
