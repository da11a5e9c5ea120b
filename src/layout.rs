//! Measurement and word-wrap.
//!
//! Sizes are computed against a slide's drawable area: font sizes are a
//! percent of the drawable height, indents a percent of the drawable width.
//! Wrapping rewrites each slide's line list in place; lines that already fit
//! pass through unchanged, so wrapping is idempotent.

use std::collections::VecDeque;

use crate::canvas::Canvas;
use crate::model::{Chunk, Line, Presentation, Slide, TextChunk};

/// Width and height of a single chunk, in absolute units.
///
/// Text height includes the vertical gap; marks and agains are invisible
/// and take no room.
pub fn chunk_size(canvas: &dyn Canvas, chunk: &Chunk, drawable_h: f32) -> (f32, f32) {
    match chunk {
        Chunk::Text(text) => {
            let font_size = font_size(text, drawable_h);
            let width = canvas.measure_text(&text.text, &text.font, font_size);
            let height = font_size * (100.0 + text.vgap as f32) / 100.0;
            (width, height)
        }
        Chunk::Image(image) => image.display_size(),
        Chunk::Mark { .. } | Chunk::Again { .. } => (0.0, 0.0),
    }
}

/// Absolute font size of a text chunk for a drawable height.
pub fn font_size(text: &TextChunk, drawable_h: f32) -> f32 {
    drawable_h * text.size as f32 / 100.0
}

/// Width and height of a whole line: widths add up, heights take the
/// maximum, plus a one-unit gap between lines.
///
/// A trailing empty text chunk closes the line without contributing to its
/// height, so a line ending in an image is as tall as the image, not as
/// tall as the current font.
pub fn line_size(canvas: &dyn Canvas, line: &Line, drawable_h: f32) -> (f32, f32) {
    let mut width = 0.0;
    let mut height = 0.0f32;
    let last = line.chunks.len().wrapping_sub(1);
    for (n, chunk) in line.chunks.iter().enumerate() {
        let (cw, ch) = chunk_size(canvas, chunk, drawable_h);
        width += cw;
        let trailing_empty = n == last
            && n > 0
            && matches!(chunk, Chunk::Text(text) if text.is_empty());
        if !trailing_empty {
            height = height.max(ch);
        }
    }
    (width, height + 1.0)
}

/// Character positions where `text` may be broken, rightmost first.
///
/// The full length comes first (no break), followed by every position where
/// a whitespace run starts, scanning right to left. Positions count
/// characters, not bytes.
pub fn text_wrap_positions(text: &str) -> Vec<usize> {
    let chars: Vec<char> = text.chars().collect();
    let mut positions = vec![chars.len()];
    for n in (1..chars.len()).rev() {
        if chars[n].is_whitespace() && !chars[n - 1].is_whitespace() {
            positions.push(n);
        }
    }
    positions
}

/// Byte offset of the `n`th character of `text`.
fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Split a text chunk so the head fits within `max_width`.
///
/// Picks the rightmost break position whose head fits, or the leftmost one
/// when nothing fits, so overlong unbreakable prefixes still terminate the
/// wrap. Returns `None` for chunks with no break positions and for
/// non-text chunks. The tail's leading whitespace is dropped.
pub fn split_chunk(
    canvas: &dyn Canvas,
    chunk: &Chunk,
    drawable_h: f32,
    max_width: f32,
) -> Option<(Chunk, Chunk)> {
    let Chunk::Text(text) = chunk else {
        return None;
    };
    let positions = text_wrap_positions(&text.text);
    if positions.len() <= 1 {
        return None;
    }

    let size = font_size(text, drawable_h);
    let mut split_at = *positions.last().expect("positions is never empty");
    for &pos in &positions {
        let head = &text.text[..byte_offset(&text.text, pos)];
        if canvas.measure_text(head, &text.font, size) <= max_width {
            split_at = pos;
            break;
        }
    }
    if split_at == text.text.chars().count() {
        return None;
    }

    let offset = byte_offset(&text.text, split_at);
    let head = text.with_text(&text.text[..offset]);
    let tail = text.with_text(text.text[offset..].trim_start());
    Some((Chunk::Text(head), Chunk::Text(tail)))
}

/// Wrap one line into as many lines as it needs to fit `drawable_w`.
///
/// Continuation lines inherit the original's alignment and indent. A chunk
/// that cannot be broken is carried to a fresh line and drawn there even if
/// it overflows.
pub fn wrap_line(
    canvas: &dyn Canvas,
    line: &Line,
    drawable_w: f32,
    drawable_h: f32,
) -> Vec<Line> {
    let available = drawable_w - line.indent(drawable_w);
    let mut wrapped = Vec::new();
    let mut current = line.sibling();
    let mut used = 0.0;

    let mut pending: VecDeque<Chunk> = line.chunks.iter().cloned().collect();
    while let Some(chunk) = pending.pop_front() {
        let (chunk_w, _) = chunk_size(canvas, &chunk, drawable_h);
        if used + chunk_w <= available {
            current.chunks.push(chunk);
            used += chunk_w;
            continue;
        }

        let room = available - used;
        match split_chunk(canvas, &chunk, drawable_h, room) {
            Some((head, tail))
                if current.is_empty()
                    || chunk_size(canvas, &head, drawable_h).0 <= room =>
            {
                current.chunks.push(head);
                wrapped.push(std::mem::replace(&mut current, line.sibling()));
                used = 0.0;
                pending.push_front(tail);
            }
            _ if !current.is_empty() => {
                // retry the whole chunk on a fresh line
                wrapped.push(std::mem::replace(&mut current, line.sibling()));
                used = 0.0;
                pending.push_front(chunk);
            }
            _ => {
                // unbreakable and alone: overflow rather than loop
                current.chunks.push(chunk);
                used += chunk_w;
            }
        }
    }

    if !current.is_empty() || wrapped.is_empty() {
        wrapped.push(current);
    }
    wrapped
}

/// Re-wrap every line of a slide against its drawable area.
pub fn wrap_slide(canvas: &dyn Canvas, slide: &mut Slide, page: (f32, f32)) {
    let (w, h) = slide.drawable(page.0, page.1);
    let mut lines = Vec::with_capacity(slide.lines.len());
    for line in &slide.lines {
        lines.extend(wrap_line(canvas, line, w, h));
    }
    slide.lines = lines;
}

/// Re-wrap every slide of a presentation for the given page size.
pub fn wrap_presentation(
    canvas: &dyn Canvas,
    presentation: &mut Presentation,
    page: (f32, f32),
) {
    for slide in &mut presentation.slides {
        wrap_slide(canvas, slide, page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::model::{Alignment, ImageChunk, MarkId};
    use std::path::PathBuf;

    /// Canvas where every character is 7 units wide, regardless of font.
    struct MockCanvas;

    impl Canvas for MockCanvas {
        fn measure_text(&self, text: &str, _font: &str, _size: f32) -> f32 {
            text.chars().count() as f32 * 7.0
        }
    }

    fn text_chunk(text: &str) -> Chunk {
        Chunk::Text(TextChunk {
            text: text.to_string(),
            font: "Helvetica".to_string(),
            size: 5,
            vgap: 0,
            color: Color::BLACK,
        })
    }

    fn image_chunk(width: u32, height: u32) -> Chunk {
        Chunk::Image(ImageChunk {
            path: PathBuf::from("cat.png"),
            zoom: 100,
            raised_by: 0,
            width,
            height,
        })
    }

    fn line_of(chunks: Vec<Chunk>) -> Line {
        let mut line = Line::new(Alignment::Left, None);
        line.chunks = chunks;
        line
    }

    #[test]
    fn test_chunk_sizes() {
        let canvas = MockCanvas;
        // 5% of 400 = 20pt font
        assert_eq!(chunk_size(&canvas, &text_chunk("ab"), 400.0), (14.0, 20.0));
        assert_eq!(chunk_size(&canvas, &image_chunk(80, 60), 400.0), (80.0, 60.0));
        assert_eq!(
            chunk_size(&canvas, &Chunk::Mark { mark: MarkId(0) }, 400.0),
            (0.0, 0.0)
        );
    }

    #[test]
    fn test_vgap_stretches_text_height() {
        let canvas = MockCanvas;
        let chunk = Chunk::Text(TextChunk {
            text: "x".to_string(),
            font: "Helvetica".to_string(),
            size: 5,
            vgap: 50,
            color: Color::BLACK,
        });
        assert_eq!(chunk_size(&canvas, &chunk, 400.0), (7.0, 30.0));
    }

    #[test]
    fn test_huge_vgap_does_not_overflow() {
        let canvas = MockCanvas;
        let chunk = Chunk::Text(TextChunk {
            text: "x".to_string(),
            font: "Helvetica".to_string(),
            size: 5,
            vgap: u32::MAX,
            color: Color::BLACK,
        });
        let (_, height) = chunk_size(&canvas, &chunk, 400.0);
        assert!(height.is_finite());
        assert!(height > 0.0);
    }

    #[test]
    fn test_line_size_ignores_trailing_empty_text() {
        let canvas = MockCanvas;
        let line = line_of(vec![image_chunk(100, 50), text_chunk("")]);
        assert_eq!(line_size(&canvas, &line, 400.0), (100.0, 51.0));
    }

    #[test]
    fn test_line_size_of_blank_line_uses_font_height() {
        let canvas = MockCanvas;
        let line = line_of(vec![text_chunk("")]);
        assert_eq!(line_size(&canvas, &line, 400.0), (0.0, 21.0));
    }

    #[test]
    fn test_text_wrap_positions() {
        assert_eq!(text_wrap_positions("neangliškas tekstas"), vec![19, 11]);
        assert_eq!(text_wrap_positions("unbreakable"), vec![11]);
        assert_eq!(text_wrap_positions("a b  c"), vec![6, 3, 1]);
        assert_eq!(text_wrap_positions(""), vec![0]);
    }

    #[test]
    fn test_split_takes_shortest_prefix_when_nothing_fits() {
        let canvas = MockCanvas;
        let chunk = text_chunk("this-is-a-very-long, unsplittable, word");
        let (head, tail) = split_chunk(&canvas, &chunk, 400.0, 130.0).unwrap();
        match (head, tail) {
            (Chunk::Text(head), Chunk::Text(tail)) => {
                assert_eq!(head.text, "this-is-a-very-long,");
                assert_eq!(tail.text, "unsplittable, word");
            }
            _ => panic!("expected text chunks"),
        }
    }

    #[test]
    fn test_split_takes_rightmost_fitting_prefix() {
        let canvas = MockCanvas;
        let chunk = text_chunk("one two three");
        // "one two" is 49 wide, "one two three" is 91
        let (head, tail) = split_chunk(&canvas, &chunk, 400.0, 60.0).unwrap();
        match (head, tail) {
            (Chunk::Text(head), Chunk::Text(tail)) => {
                assert_eq!(head.text, "one two");
                assert_eq!(tail.text, "three");
            }
            _ => panic!("expected text chunks"),
        }
    }

    #[test]
    fn test_split_refuses_unbreakable_and_images() {
        let canvas = MockCanvas;
        assert!(split_chunk(&canvas, &text_chunk("unbreakable"), 400.0, 7.0).is_none());
        assert!(split_chunk(&canvas, &image_chunk(500, 10), 400.0, 7.0).is_none());
    }

    #[test]
    fn test_wrap_line_fitting_input_is_unchanged() {
        let canvas = MockCanvas;
        let line = line_of(vec![text_chunk("short")]);
        let wrapped = wrap_line(&canvas, &line, 400.0, 400.0);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].plain_text(), "short");
    }

    #[test]
    fn test_wrap_line_splits_and_keeps_alignment() {
        let canvas = MockCanvas;
        let mut line = Line::new(Alignment::Center, Some(10));
        line.chunks = vec![text_chunk("aaaa bbbb cccc dddd")];
        // drawable 100, indent 10, available 90: 12 chars fit per line
        let wrapped = wrap_line(&canvas, &line, 100.0, 400.0);
        let texts: Vec<String> = wrapped.iter().map(Line::plain_text).collect();
        assert_eq!(texts, vec!["aaaa bbbb", "cccc dddd"]);
        for part in &wrapped {
            assert_eq!(part.alignment, Alignment::Center);
            assert_eq!(part.prefix, Some(10));
        }
    }

    #[test]
    fn test_wrap_line_pushes_unbreakable_chunk_to_next_line() {
        let canvas = MockCanvas;
        let line = line_of(vec![text_chunk("ab "), text_chunk("unbreakable")]);
        let wrapped = wrap_line(&canvas, &line, 30.0, 400.0);
        let texts: Vec<String> = wrapped.iter().map(Line::plain_text).collect();
        assert_eq!(texts, vec!["ab ", "unbreakable"]);
    }

    #[test]
    fn test_wrap_line_overflows_lone_unbreakable_chunk() {
        let canvas = MockCanvas;
        let line = line_of(vec![text_chunk("unbreakable")]);
        let wrapped = wrap_line(&canvas, &line, 30.0, 400.0);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].plain_text(), "unbreakable");
    }

    #[test]
    fn test_wrap_line_keeps_empty_line() {
        let canvas = MockCanvas;
        let line = line_of(vec![text_chunk("")]);
        let wrapped = wrap_line(&canvas, &line, 100.0, 400.0);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].chunks.len(), 1);
    }

    #[test]
    fn test_wrap_slide_is_idempotent() {
        let canvas = MockCanvas;
        let mut slide = Slide::new();
        slide.add_text("aaaa bbbb cccc dddd eeee ffff");
        let page = (100.0, 400.0);
        wrap_slide(&canvas, &mut slide, page);
        let once: Vec<String> = slide.lines.iter().map(Line::plain_text).collect();
        wrap_slide(&canvas, &mut slide, page);
        let twice: Vec<String> = slide.lines.iter().map(Line::plain_text).collect();
        assert_eq!(once, twice);
        assert!(slide.lines.len() > 1);
    }

    #[test]
    fn test_wrap_presentation_touches_every_slide() {
        let canvas = MockCanvas;
        let mut presentation = Presentation::new();
        let mut slide = Slide::new();
        slide.add_text("aaaa bbbb cccc dddd");
        presentation.slides.push(slide);
        wrap_presentation(&canvas, &mut presentation, (100.0, 400.0));
        assert_eq!(presentation.slides[0].lines.len(), 2);
    }
}
