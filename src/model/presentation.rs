//! Top-level presentation model.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Slide;

/// The whole document: ordered slides plus document-level presets.
///
/// Built by the parser, rewritten in place by the word-wrap engine, then
/// consumed read-only by the renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    /// Document title, if one was supplied
    pub title: Option<String>,

    /// Slides in source order
    pub slides: Vec<Slide>,

    /// Sub-directives replayed before the Nth text line of every slide,
    /// keyed by 1-based text-line column
    pub default_directives: BTreeMap<u32, Vec<String>>,

    /// Indent presets keyed by tab index
    pub tab_directives: BTreeMap<u32, Vec<String>>,

    /// Directory against which `%include` and `%newimage` paths resolve
    pub base_dir: PathBuf,
}

impl Presentation {
    /// Create an empty presentation.
    pub fn new() -> Self {
        Self {
            title: None,
            slides: Vec::new(),
            default_directives: BTreeMap::new(),
            tab_directives: BTreeMap::new(),
            base_dir: PathBuf::new(),
        }
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Plain-text dump of the whole presentation, one banner per slide.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for (n, slide) in self.slides.iter().enumerate() {
            let _ = writeln!(out, "--- Slide {} ---", n + 1);
            out.push_str(&slide.plain_text());
        }
        out
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}
