//! The draw pass.
//!
//! Walks an already-wrapped presentation and paints it onto a [`Canvas`].
//! Coordinates follow the classic page convention: the origin is at the
//! bottom-left and `y` decreases as lines go down the slide.

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::layout::{chunk_size, font_size, line_size};
use crate::model::{Chunk, Line, Presentation, Slide};

/// Paint every slide of the presentation, one page per slide.
pub fn draw_presentation(
    canvas: &mut dyn Canvas,
    presentation: &Presentation,
    page: (f32, f32),
) -> Result<()> {
    if let Some(title) = &presentation.title {
        canvas.set_document_title(title);
    }
    for slide in &presentation.slides {
        canvas.begin_page();
        draw_slide(canvas, slide, page)?;
        canvas.end_page();
    }
    Ok(())
}

/// Paint one slide onto the current page.
///
/// The drawable area is centered on the page. Fails with
/// [`Error::UndrawnMark`] when an again chunk runs before its mark.
pub fn draw_slide(canvas: &mut dyn Canvas, slide: &Slide, page: (f32, f32)) -> Result<()> {
    let (page_w, page_h) = page;
    let (w, h) = slide.drawable(page_w, page_h);
    let x = (page_w - w) / 2.0;
    let y = (page_h + h) / 2.0;

    let mut marks: Vec<Option<(f32, f32)>> = vec![None; slide.mark_slots];
    let mut cursor = (x, y);
    for line in &slide.lines {
        cursor = draw_line(canvas, line, cursor, w, h, &mut marks)?;
    }
    Ok(())
}

/// Paint one line; returns the cursor for the next line.
///
/// The horizontal start honors the line's indent and alignment. An again
/// chunk rewinds the in-line cursor, so the returned baseline descends from
/// wherever the last chunk left it.
fn draw_line(
    canvas: &mut dyn Canvas,
    line: &Line,
    cursor: (f32, f32),
    drawable_w: f32,
    drawable_h: f32,
    marks: &mut [Option<(f32, f32)>],
) -> Result<(f32, f32)> {
    let (x, y) = cursor;
    let (line_w, line_h) = line_size(canvas, line, drawable_h);
    let indent = line.indent(drawable_w);

    let mut cx = x + indent + line.alignment.offset(line_w, drawable_w - indent);
    let mut cy = y;
    for chunk in &line.chunks {
        (cx, cy) = draw_chunk(canvas, chunk, (cx, cy), drawable_h, marks)?;
    }
    Ok((x, cy - line_h))
}

fn draw_chunk(
    canvas: &mut dyn Canvas,
    chunk: &Chunk,
    cursor: (f32, f32),
    drawable_h: f32,
    marks: &mut [Option<(f32, f32)>],
) -> Result<(f32, f32)> {
    let (cx, cy) = cursor;
    match chunk {
        Chunk::Text(text) => {
            let size = font_size(text, drawable_h);
            canvas.draw_text(&text.text, &text.font, size, text.color, cx, cy - size);
            let (width, _) = chunk_size(canvas, chunk, drawable_h);
            Ok((cx + width, cy))
        }
        Chunk::Image(image) => {
            let (width, height) = image.display_size();
            let top = cy - height + image.raised_by as f32;
            if let Err(err) = canvas.draw_image(&image.path, cx, top, width, height) {
                log::warn!("cannot draw {}: {}", image.path.display(), err);
            }
            Ok((cx + width, cy))
        }
        Chunk::Mark { mark } => {
            marks[mark.0] = Some((cx, cy));
            Ok((cx, cy))
        }
        Chunk::Again { mark } => marks[mark.0].ok_or(Error::UndrawnMark),
    }
}
