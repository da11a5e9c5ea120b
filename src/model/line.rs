//! Line and chunk types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Index into the owning slide's mark arena.
///
/// An `Again` chunk refers to a `Mark` by index rather than by reference so
/// the whole slide can be cloned and serialized without dangling links. The
/// slot is filled with a cursor position the first time the mark is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkId(pub usize);

/// One row of chunks sharing alignment and indentation.
///
/// A line is created on demand by the first addition after the previous line
/// was closed, closed automatically when a text chunk is appended, and
/// reopened by a `%cont` directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Drawable units on this line, in source order
    pub chunks: Vec<Chunk>,

    /// Horizontal alignment captured at creation time
    pub alignment: Alignment,

    /// Left indentation as a percent of the drawable width, if any
    pub prefix: Option<u32>,
}

impl Line {
    /// Create an empty line with the given alignment and indent.
    pub fn new(alignment: Alignment, prefix: Option<u32>) -> Self {
        Self {
            chunks: Vec::new(),
            alignment,
            prefix,
        }
    }

    /// Create an empty line sharing this line's alignment and indent.
    ///
    /// Used by the word-wrap engine to seed continuation lines.
    pub fn sibling(&self) -> Self {
        Self::new(self.alignment, self.prefix)
    }

    /// Left indent in absolute units for a drawable area of width `w`.
    pub fn indent(&self, w: f32) -> f32 {
        match self.prefix {
            Some(percent) => w * percent as f32 / 100.0,
            None => 0.0,
        }
    }

    /// Plain-text form of the line, used by the text renderer.
    pub fn plain_text(&self) -> String {
        self.chunks
            .iter()
            .map(|chunk| match chunk {
                Chunk::Text(text) => text.text.clone(),
                Chunk::Image(image) => format!("[{}]", image.path.display()),
                Chunk::Mark { .. } | Chunk::Again { .. } => String::new(),
            })
            .collect()
    }

    /// Check if the line has no chunks at all.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// A drawable unit within a line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Chunk {
    /// A run of literal text
    Text(TextChunk),

    /// An inline image
    Image(ImageChunk),

    /// Invisible chunk recording the drawing cursor when first drawn
    Mark {
        /// Arena slot the cursor position is stored into
        mark: MarkId,
    },

    /// Invisible chunk forcing the cursor back to a recorded mark
    Again {
        /// Arena slot of the previously drawn mark
        mark: MarkId,
    },
}

/// A run of text with the pen state it was added under.
///
/// Escape sequences in the source have already been resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChunk {
    /// The text content
    pub text: String,

    /// Logical font name
    pub font: String,

    /// Font size as a percent of the drawable height
    pub size: u32,

    /// Extra line gap as a percent of the font size
    pub vgap: u32,

    /// Text color
    pub color: Color,
}

impl TextChunk {
    /// Clone this chunk with different text, keeping the styling.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Check if this run holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// An inline image with its intrinsic size probed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageChunk {
    /// Image path, resolved against the document's base directory
    pub path: PathBuf,

    /// Zoom factor in percent (100 = natural size)
    pub zoom: u32,

    /// Amount the image baseline is raised by
    pub raised_by: u32,

    /// Intrinsic width in pixels
    pub width: u32,

    /// Intrinsic height in pixels
    pub height: u32,
}

impl ImageChunk {
    /// Display size in absolute units after applying the zoom factor.
    pub fn display_size(&self) -> (f32, f32) {
        (
            self.width as f32 * self.zoom as f32 / 100.0,
            self.height as f32 * self.zoom as f32 / 100.0,
        )
    }
}

/// Horizontal alignment of a line within the drawable area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
}

impl Alignment {
    /// Horizontal offset of content of width `content_w` inside a box of
    /// width `box_w`.
    pub fn offset(&self, content_w: f32, box_w: f32) -> f32 {
        match self {
            Alignment::Left => 0.0,
            Alignment::Center => (box_w - content_w) / 2.0,
            Alignment::Right => box_w - content_w,
        }
    }
}
