//! Line-stream preprocessor.
//!
//! Expands `%filter` regions and `%include` directives into a flat sequence
//! of (line number, text) pairs before the interpreter sees them. Filter
//! output and included lines are attributed to the line number of the
//! directive that produced them, so downstream diagnostics point at the
//! inclusion site rather than into generated text.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::args::coerce;
use super::options::ParseOptions;
use super::tokenize::split_args;

/// Lazy iterator over preprocessed (line number, text) pairs.
///
/// Consumed exactly once; after yielding an error the iterator is fused.
pub struct Preprocessor<'a, I>
where
    I: Iterator<Item = String>,
{
    input: I,
    line_no: u32,
    options: &'a ParseOptions,
    base_dir: PathBuf,
    queued: VecDeque<(u32, String)>,
    failed: bool,
}

impl<'a, I> Preprocessor<'a, I>
where
    I: Iterator<Item = String>,
{
    /// Wrap an input line stream.
    pub fn new(input: I, options: &'a ParseOptions, base_dir: &Path) -> Self {
        Self {
            input,
            line_no: 0,
            options,
            base_dir: base_dir.to_path_buf(),
            queued: VecDeque::new(),
            failed: false,
        }
    }

    fn expand_filter(&mut self, line: &str) -> Result<()> {
        let start = self.line_no;
        let command = self.quoted_argument("filter", line)?;

        let mut buffered = String::new();
        loop {
            let Some(region_line) = self.input.next() else {
                return Err(Error::syntax(self.line_no, "%filter without %endfilter"));
            };
            self.line_no += 1;
            match meta_word(&region_line) {
                Some("filter") => {
                    return Err(Error::syntax(self.line_no, "%filter inside %filter"));
                }
                Some("endfilter") => break,
                _ => {
                    buffered.push_str(&region_line);
                    buffered.push('\n');
                }
            }
        }

        if self.options.unsafe_filters {
            let output = self.options.filter_runner.run(&command, &buffered)?;
            for out_line in output.lines() {
                self.queued.push_back((start, out_line.to_string()));
            }
        } else {
            log::warn!("line {}: filtering through {:?} disabled", start, command);
            self.queued.push_back((
                start,
                format!(
                    "Filtering through \"{}\" disabled, use --unsafe to enable",
                    command
                ),
            ));
        }
        Ok(())
    }

    fn expand_include(&mut self, line: &str) -> Result<()> {
        let start = self.line_no;
        let path = self.quoted_argument("include", line)?;
        let content = fs::read_to_string(self.base_dir.join(&path))?;

        // Included files go through the same preprocessing, so they may
        // carry filters and further includes of their own.
        let nested = Preprocessor::new(
            content.lines().map(str::to_string),
            self.options,
            &self.base_dir,
        );
        for item in nested {
            let (_, text) = item?;
            self.queued.push_back((start, text));
        }
        Ok(())
    }

    fn quoted_argument(&self, name: &str, line: &str) -> Result<String> {
        let rest = line.strip_prefix('%').unwrap_or(line);
        let tokens = split_args(rest);
        let values = coerce(self.line_no, name, &tokens[1..], "s")?;
        Ok(values[0].text().to_string())
    }
}

impl<I> Iterator for Preprocessor<'_, I>
where
    I: Iterator<Item = String>,
{
    type Item = Result<(u32, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }
            if let Some(pair) = self.queued.pop_front() {
                return Some(Ok(pair));
            }
            let line = self.input.next()?;
            self.line_no += 1;

            let outcome = match meta_word(&line) {
                Some("filter") => self.expand_filter(&line),
                Some("endfilter") => {
                    Err(Error::syntax(self.line_no, "%endfilter without %filter"))
                }
                Some("include") => self.expand_include(&line),
                _ => return Some(Ok((self.line_no, line))),
            };
            if let Err(err) = outcome {
                self.failed = true;
                return Some(Err(err));
            }
        }
    }
}

/// First word of a preprocessor meta-directive line, if it is one.
fn meta_word(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('%')?;
    if rest.starts_with('%') {
        // %% comment line
        return None;
    }
    let word = rest.split_whitespace().next()?;
    matches!(word, "filter" | "endfilter" | "include").then_some(word)
}
