//! Slide-level types.

use serde::{Deserialize, Serialize};

use super::{Alignment, Chunk, ImageChunk, Line, MarkId, TextChunk};
use crate::color::Color;

/// One page of the presentation.
///
/// Created by a `%page` directive. Carries the mutable "pen" state that
/// style directives adjust; every chunk added captures the pen state current
/// at the time of the addition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    /// Logical lines on the slide, in source order
    pub lines: Vec<Line>,

    /// Number of mark arena slots allocated by `%mark` directives
    pub mark_slots: usize,

    /// Occupancy rectangle as (width%, height%) of the page, always centered
    pub area: (u32, u32),

    /// Current logical font name
    pub font: String,

    /// Current font size as a percent of the drawable height
    pub size: u32,

    /// Current extra line gap as a percent of the font size
    pub vgap: u32,

    /// Current text color
    pub color: Color,

    /// Current alignment for new lines
    pub alignment: Alignment,

    /// Current left indent as a percent of the drawable width
    pub prefix: Option<u32>,

    /// Whether the last line is still accepting chunks
    #[serde(skip)]
    line_open: bool,
}

impl Slide {
    /// Create a fresh slide with MagicPoint pen defaults.
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            mark_slots: 0,
            area: (100, 100),
            font: "Helvetica".to_string(),
            size: 5,
            vgap: 0,
            color: Color::BLACK,
            alignment: Alignment::Left,
            prefix: None,
            line_open: false,
        }
    }

    /// Set the occupancy rectangle (percent of page width and height).
    pub fn set_area(&mut self, width: u32, height: u32) {
        self.area = (width, height);
    }

    /// Set the current font name.
    pub fn set_font(&mut self, font: impl Into<String>) {
        self.font = font.into();
    }

    /// Set the current font size (percent of drawable height).
    pub fn set_size(&mut self, size: u32) {
        self.size = size;
    }

    /// Set the extra line gap (percent of font size).
    pub fn set_vgap(&mut self, vgap: u32) {
        self.vgap = vgap;
    }

    /// Set the current text color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Set the current alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Set the current indent (percent of drawable width).
    pub fn set_prefix(&mut self, prefix: Option<u32>) {
        self.prefix = prefix;
    }

    /// Append a chunk to the open line, creating one if necessary.
    pub fn add_chunk(&mut self, chunk: Chunk) {
        self.open_line().chunks.push(chunk);
    }

    /// Append a text chunk using the current pen state and close the line,
    /// so the next addition starts a fresh line by default.
    pub fn add_text(&mut self, text: impl Into<String>) {
        let chunk = TextChunk {
            text: text.into(),
            font: self.font.clone(),
            size: self.size,
            vgap: self.vgap,
            color: self.color,
        };
        self.add_chunk(Chunk::Text(chunk));
        self.line_open = false;
    }

    /// Append an image chunk to the open line.
    pub fn add_image(&mut self, image: ImageChunk) {
        self.add_chunk(Chunk::Image(image));
    }

    /// Allocate a mark slot and append the mark chunk to the open line.
    pub fn add_mark(&mut self) -> MarkId {
        let id = MarkId(self.mark_slots);
        self.mark_slots += 1;
        self.add_chunk(Chunk::Mark { mark: id });
        id
    }

    /// Append an again chunk referencing a previously allocated mark.
    pub fn add_again(&mut self, mark: MarkId) {
        self.add_chunk(Chunk::Again { mark });
    }

    /// Reopen the last line so the next addition appends to it instead of
    /// starting a new one. Used by the `%cont` directive.
    pub fn reopen_line(&mut self) {
        if !self.lines.is_empty() {
            self.line_open = true;
        }
    }

    /// Drawable area in absolute units for the given page size.
    pub fn drawable(&self, page_w: f32, page_h: f32) -> (f32, f32) {
        (
            page_w * self.area.0 as f32 / 100.0,
            page_h * self.area.1 as f32 / 100.0,
        )
    }

    /// Plain-text form of the slide, one line per logical line.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.plain_text());
            out.push('\n');
        }
        out
    }

    /// Check if the slide has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn open_line(&mut self) -> &mut Line {
        if !self.line_open {
            self.lines.push(Line::new(self.alignment, self.prefix));
            self.line_open = true;
        }
        self.lines.last_mut().expect("line was just opened")
    }
}

impl Default for Slide {
    fn default() -> Self {
        Self::new()
    }
}
