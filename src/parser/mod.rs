//! MagicPoint source parser.
//!
//! The pipeline has two stages: the [`Preprocessor`] expands `%filter` and
//! `%include` into a flat numbered line stream, and the [`Interpreter`]
//! folds that stream into a [`Presentation`]. [`MgpParser`] wires the two
//! together behind file, string and reader entry points.

mod args;
mod interpreter;
mod options;
mod preprocess;
mod tokenize;

pub use args::{coerce, ArgValue};
pub use interpreter::Interpreter;
pub use options::{
    FilterRunner, ImageReader, NoImageReader, ParseOptions, ShellFilterRunner,
};
pub use preprocess::Preprocessor;
pub use tokenize::{split_args, split_directives};

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::Result;
use crate::model::Presentation;

/// Parser for MagicPoint presentation sources.
pub struct MgpParser {
    options: ParseOptions,
}

impl MgpParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    /// Create a parser with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse a `.mgp` file.
    ///
    /// The file's parent directory becomes the base for `%include` and
    /// `%newimage` paths.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Presentation> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        self.parse_lines(content.lines().map(str::to_string), base_dir)
    }

    /// Parse MagicPoint source from a string.
    pub fn parse_str(&self, source: &str) -> Result<Presentation> {
        let base_dir = self.options.base_dir.clone();
        self.parse_lines(source.lines().map(str::to_string), &base_dir)
    }

    /// Parse MagicPoint source from a reader.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Presentation> {
        let mut source = String::new();
        BufReader::new(reader).read_to_string(&mut source)?;
        self.parse_str(&source)
    }

    fn parse_lines<I>(&self, lines: I, base_dir: &Path) -> Result<Presentation>
    where
        I: Iterator<Item = String>,
    {
        let mut interpreter = Interpreter::new(&self.options, base_dir);
        for item in Preprocessor::new(lines, &self.options, base_dir) {
            let (line_no, line) = item?;
            interpreter.feed(line_no, &line)?;
        }
        Ok(interpreter.finish())
    }
}

impl Default for MgpParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_str_smoke() {
        let parser = MgpParser::new();
        let p = parser
            .parse_str("%page\n%center, size 7\nHello\n%page\nBye\n")
            .unwrap();
        assert_eq!(p.slide_count(), 2);
        assert_eq!(
            p.plain_text(),
            "--- Slide 1 ---\nHello\n--- Slide 2 ---\nBye\n"
        );
    }

    #[test]
    fn test_parse_reader() {
        let parser = MgpParser::new();
        let p = parser.parse_reader("%page\nvia reader\n".as_bytes()).unwrap();
        assert_eq!(p.plain_text(), "--- Slide 1 ---\nvia reader\n");
    }

    #[test]
    fn test_syntax_errors_carry_line_numbers() {
        let parser = MgpParser::new();
        let err = parser.parse_str("%page\nok\n%size\n").unwrap_err();
        match err {
            Error::Syntax { line, .. } => assert_eq!(line, 3),
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_title_from_options() {
        let parser =
            MgpParser::with_options(ParseOptions::new().with_title("My deck"));
        let p = parser.parse_str("%page\n").unwrap();
        assert_eq!(p.title.as_deref(), Some("My deck"));
    }
}
