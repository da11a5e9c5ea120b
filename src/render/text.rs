//! Plain-text rendering.

use crate::model::Presentation;

/// Render a presentation as plain text, one banner per slide.
pub fn to_text(presentation: &Presentation) -> String {
    presentation.plain_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Slide;

    #[test]
    fn test_to_text_banners() {
        let mut presentation = Presentation::new();
        let mut slide = Slide::new();
        slide.add_text("Hello");
        presentation.slides.push(slide);
        presentation.slides.push(Slide::new());
        assert_eq!(
            to_text(&presentation),
            "--- Slide 1 ---\nHello\n--- Slide 2 ---\n"
        );
    }
}
