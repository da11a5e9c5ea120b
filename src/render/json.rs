//! JSON rendering.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Presentation;

/// JSON output formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Human-readable, indented
    #[default]
    Pretty,
    /// Single line, no extra whitespace
    Compact,
}

/// Serialize the presentation model as JSON.
pub fn to_json(presentation: &Presentation, format: JsonFormat) -> Result<String> {
    serialize(presentation, format)
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Slide;

    fn sample() -> Presentation {
        let mut presentation = Presentation::new();
        presentation.title = Some("Sample".to_string());
        let mut slide = Slide::new();
        slide.add_text("Hello");
        presentation.slides.push(slide);
        presentation
    }

    #[test]
    fn test_compact_is_one_line() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"Hello\""));
    }

    #[test]
    fn test_pretty_round_trips() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["title"], "Sample");
        assert_eq!(parsed["slides"][0]["lines"][0]["chunks"][0]["type"], "text");
    }
}
