//! Presentation model types.
//!
//! This module defines the slide → line → chunk hierarchy the parser builds
//! and the word-wrap engine rewrites. The model is renderer-agnostic: the
//! same tree feeds the plain-text dump, the JSON renderer and the canvas
//! draw pass.

mod line;
mod presentation;
mod slide;

pub use line::{Alignment, Chunk, ImageChunk, Line, MarkId, TextChunk};
pub use presentation::Presentation;
pub use slide::Slide;
