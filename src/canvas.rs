//! Drawing-canvas abstraction.
//!
//! The layout engine only measures; the draw pass paints. Both go through
//! [`Canvas`] so the core never touches a font file or an image decoder.

use std::path::Path;

use crate::color::Color;
use crate::error::Result;

/// Page size matching a 1024x768 screen at 72 dpi, in points (landscape).
pub const PAGE_1024X768_72DPI: (f32, f32) = (1024.0, 768.0);

/// Page size matching a 1024x768 screen at 100 dpi, in points (landscape).
pub const PAGE_1024X768_100DPI: (f32, f32) = (1024.0 * 72.0 / 100.0, 768.0 * 72.0 / 100.0);

/// A drawing surface that can measure text and paint primitives.
///
/// `measure_text` is the only method the word-wrap engine needs; everything
/// else has a no-op default so measurement-only canvases stay small.
pub trait Canvas {
    /// Width of `text` rendered in `font` at `size`, in absolute units.
    fn measure_text(&self, text: &str, font: &str, size: f32) -> f32;

    /// Paint a text run with its baseline at (`x`, `y`).
    fn draw_text(&mut self, text: &str, font: &str, size: f32, color: Color, x: f32, y: f32) {
        let _ = (text, font, size, color, x, y);
    }

    /// Paint an image with its top-left corner at (`x`, `y`).
    ///
    /// Failing here is recoverable: the draw pass logs a warning and
    /// advances the cursor by the intended size.
    fn draw_image(&mut self, path: &Path, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
        let _ = (path, x, y, width, height);
        Ok(())
    }

    /// Start a new output page.
    fn begin_page(&mut self) {}

    /// Finish the current output page.
    fn end_page(&mut self) {}

    /// Record the document title on the output.
    fn set_document_title(&mut self, title: &str) {
        let _ = title;
    }
}
