//! # unmgp
//!
//! MagicPoint presentation parser and layout engine for Rust.
//!
//! This library parses MagicPoint (`.mgp`) presentation sources into a
//! structured slide model, word-wraps slides against a page size, and
//! renders the result as plain text, JSON, or onto a drawing canvas.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unmgp::{parse_file, render};
//!
//! fn main() -> unmgp::Result<()> {
//!     // Parse a MagicPoint file
//!     let presentation = parse_file("slides.mgp")?;
//!
//!     // Dump it as plain text
//!     println!("{}", render::to_text(&presentation));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Directive interpreter**: pages, fonts, sizes, colors, alignment,
//!   marks and overlays
//! - **Preprocessor**: `%include` expansion and opt-in `%filter` execution
//! - **Word wrap**: canvas-measured wrapping with alignment-preserving
//!   continuation lines
//! - **Multiple outputs**: plain text, JSON, or any [`Canvas`] backend
//! - **Pluggable collaborators**: font registry, filter runner and image
//!   reader are all trait objects

pub mod canvas;
pub mod color;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use canvas::{Canvas, PAGE_1024X768_100DPI, PAGE_1024X768_72DPI};
pub use color::{parse_color, Color};
pub use error::{Error, Result};
pub use fonts::{AcceptAllFonts, FontRegistry};
pub use model::{
    Alignment, Chunk, ImageChunk, Line, MarkId, Presentation, Slide, TextChunk,
};
pub use parser::{
    FilterRunner, ImageReader, MgpParser, NoImageReader, ParseOptions, ShellFilterRunner,
};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Parse a MagicPoint file and return the structured presentation.
///
/// # Example
///
/// ```no_run
/// use unmgp::parse_file;
///
/// let presentation = parse_file("slides.mgp").unwrap();
/// println!("Slides: {}", presentation.slide_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Presentation> {
    MgpParser::new().parse_file(path)
}

/// Parse a MagicPoint file with custom options.
///
/// # Example
///
/// ```no_run
/// use unmgp::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_unsafe_filters(true);
/// let presentation = parse_file_with_options("slides.mgp", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<Presentation> {
    MgpParser::with_options(options).parse_file(path)
}

/// Parse MagicPoint source from a string.
pub fn parse_str(source: &str) -> Result<Presentation> {
    MgpParser::new().parse_str(source)
}

/// Parse MagicPoint source from a string with custom options.
pub fn parse_str_with_options(source: &str, options: ParseOptions) -> Result<Presentation> {
    MgpParser::with_options(options).parse_str(source)
}

/// Parse MagicPoint source from a reader.
///
/// # Example
///
/// ```no_run
/// use unmgp::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("slides.mgp").unwrap();
/// let presentation = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Presentation> {
    MgpParser::new().parse_reader(reader)
}

/// Extract the plain text of a MagicPoint file.
///
/// # Example
///
/// ```no_run
/// use unmgp::to_text;
///
/// let text = to_text("slides.mgp").unwrap();
/// println!("{}", text);
/// ```
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let presentation = parse_file(path)?;
    Ok(render::to_text(&presentation))
}

/// Convert a MagicPoint file to JSON.
///
/// # Example
///
/// ```no_run
/// use unmgp::{to_json, JsonFormat};
///
/// let json = to_json("slides.mgp", JsonFormat::Pretty).unwrap();
/// std::fs::write("slides.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let presentation = parse_file(path)?;
    render::to_json(&presentation, format)
}

/// Builder for parsing and converting MagicPoint presentations.
///
/// # Example
///
/// ```no_run
/// use unmgp::Unmgp;
///
/// let text = Unmgp::new()
///     .with_title("My talk")
///     .parse("slides.mgp")?
///     .to_text();
/// # Ok::<(), unmgp::Error>(())
/// ```
pub struct Unmgp {
    options: ParseOptions,
}

impl Unmgp {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    /// Allow `%filter` regions to execute external commands.
    pub fn with_unsafe_filters(mut self, unsafe_filters: bool) -> Self {
        self.options = self.options.with_unsafe_filters(unsafe_filters);
        self
    }

    /// Set the base directory for `%include` and `%newimage` paths.
    pub fn with_base_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.options = self.options.with_base_dir(dir);
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Substitute the font registry collaborator.
    pub fn with_font_registry(mut self, registry: std::sync::Arc<dyn FontRegistry>) -> Self {
        self.options = self.options.with_font_registry(registry);
        self
    }

    /// Substitute the image reader collaborator.
    pub fn with_image_reader(mut self, reader: std::sync::Arc<dyn ImageReader>) -> Self {
        self.options = self.options.with_image_reader(reader);
        self
    }

    /// Parse a MagicPoint file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnmgpResult> {
        let presentation = MgpParser::with_options(self.options).parse_file(path)?;
        Ok(UnmgpResult { presentation })
    }

    /// Parse MagicPoint source from a string.
    pub fn parse_str(self, source: &str) -> Result<UnmgpResult> {
        let presentation = MgpParser::with_options(self.options).parse_str(source)?;
        Ok(UnmgpResult { presentation })
    }
}

impl Default for Unmgp {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a MagicPoint presentation.
pub struct UnmgpResult {
    /// The parsed presentation
    pub presentation: Presentation,
}

impl UnmgpResult {
    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.presentation)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.presentation, format)
    }

    /// Word-wrap every slide for the given page size, then paint the
    /// presentation onto the canvas.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, page: (f32, f32)) -> Result<()> {
        layout::wrap_presentation(canvas, &mut self.presentation, page);
        render::draw_presentation(canvas, &self.presentation, page)
    }

    /// Get the presentation model.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmgp_builder() {
        let unmgp = Unmgp::new()
            .with_unsafe_filters(true)
            .with_title("Talk")
            .with_base_dir("/tmp/deck");
        assert!(unmgp.options.unsafe_filters);
        assert_eq!(unmgp.options.title.as_deref(), Some("Talk"));
    }

    #[test]
    fn test_parse_str_to_text() {
        let result = Unmgp::new().parse_str("%page\nHello\n").unwrap();
        assert_eq!(result.to_text(), "--- Slide 1 ---\nHello\n");
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_parse_empty_source() {
        let presentation = parse_str("").unwrap();
        assert_eq!(presentation.slide_count(), 0);
    }

    #[test]
    fn test_parse_text_before_page_fails() {
        assert!(parse_str("orphan text").is_err());
    }

    #[test]
    fn test_parse_comments_only() {
        let presentation = parse_str("# a comment\n%% another\n").unwrap();
        assert_eq!(presentation.slide_count(), 0);
    }

    #[test]
    fn test_json_format_variants() {
        let presentation = parse_str("%page\nHello\n").unwrap();
        let pretty = render::to_json(&presentation, JsonFormat::Pretty).unwrap();
        let compact = render::to_json(&presentation, JsonFormat::Compact).unwrap();
        assert!(pretty.len() > compact.len());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_file("no/such/deck.mgp").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
