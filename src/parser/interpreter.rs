//! Presentation interpreter.
//!
//! The stateful core of the parser: consumes preprocessed lines, dispatches
//! directives to handlers and builds the slide model. Dispatch is a closed
//! match over the directive name with a default arm, so unknown upstream
//! directives never abort a conversion.

use std::collections::HashSet;
use std::path::Path;

use crate::color::parse_color;
use crate::error::{Error, Result};
use crate::model::{Alignment, ImageChunk, MarkId, Presentation, Slide};

use super::args::{coerce, ArgValue};
use super::options::ParseOptions;
use super::tokenize::{split_args, split_directives};

/// Stateful interpreter turning preprocessed lines into a [`Presentation`].
///
/// Two phases: the preamble (no slide yet, only directives accepted) and
/// in-slide, entered by the first `%page`. Every `%page` resets the
/// per-slide bookkeeping.
pub struct Interpreter<'a> {
    options: &'a ParseOptions,
    presentation: Presentation,
    /// Current source line, for diagnostics
    line_no: u32,
    /// 1-based column of the next text line on the current slide
    column: u32,
    /// Set by %cont: the next text addition joins the current line
    continuing: bool,
    /// Cleared by %nodefault for the current slide
    use_defaults: bool,
    /// Directive names already applied on the current text line
    used_this_line: HashSet<String>,
    /// Mark that a subsequent %again will reference
    active_mark: Option<MarkId>,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter in the preamble phase.
    pub fn new(options: &'a ParseOptions, base_dir: &Path) -> Self {
        let mut presentation = Presentation::new();
        presentation.title = options.title.clone();
        presentation.base_dir = base_dir.to_path_buf();
        Self {
            options,
            presentation,
            line_no: 0,
            column: 0,
            continuing: false,
            use_defaults: true,
            used_this_line: HashSet::new(),
            active_mark: None,
        }
    }

    /// Feed one preprocessed source line.
    pub fn feed(&mut self, line_no: u32, line: &str) -> Result<()> {
        self.line_no = line_no;
        if line.starts_with("%%") || line.starts_with('#') {
            Ok(())
        } else if let Some(rest) = line.strip_prefix('%') {
            self.handle_directives(rest)
        } else {
            self.handle_text(line)
        }
    }

    /// Finish parsing and hand over the model.
    pub fn finish(self) -> Presentation {
        self.presentation
    }

    /// Source line currently being interpreted.
    pub fn line_no(&self) -> u32 {
        self.line_no
    }

    fn handle_directives(&mut self, rest: &str) -> Result<()> {
        let parts = split_directives(rest);
        if let Some(first) = parts.first() {
            let word = first.split_whitespace().next().unwrap_or("");
            if word == "default" || word == "tab" {
                return self.store_preset(word.to_string(), &parts);
            }
        }
        for part in &parts {
            self.handle_directive(part)?;
        }
        Ok(())
    }

    /// `%default N dir, dir, ...` and `%tab N dir, ...` consume the whole
    /// line: the tail of the first sub-directive plus all remaining
    /// sub-directives are stored verbatim for later replay.
    fn store_preset(&mut self, kind: String, parts: &[String]) -> Result<()> {
        if !self.presentation.slides.is_empty() {
            return Err(Error::syntax(
                self.line_no,
                format!("%{} is only allowed in the preamble", kind),
            ));
        }
        let tokens = split_args(&parts[0]);
        let index = coerce(self.line_no, &kind, &tokens[1..2.min(tokens.len())], "n")?[0].num();

        let mut directives = Vec::new();
        let tail = tokens[2..].join(" ");
        if !tail.is_empty() {
            directives.push(tail);
        }
        directives.extend(parts[1..].iter().cloned());

        let presets = if kind == "default" {
            &mut self.presentation.default_directives
        } else {
            &mut self.presentation.tab_directives
        };
        presets.insert(index, directives);
        Ok(())
    }

    fn handle_directive(&mut self, directive: &str) -> Result<()> {
        let tokens = split_args(directive);
        let Some(name) = tokens.first().cloned() else {
            return Ok(());
        };
        let args = &tokens[1..];
        self.used_this_line.insert(name.clone());

        match name.as_str() {
            "page" => {
                coerce(self.line_no, &name, args, "")?;
                self.new_page();
                Ok(())
            }
            "nodefault" => {
                coerce(self.line_no, &name, args, "")?;
                self.use_defaults = false;
                Ok(())
            }
            "area" => {
                let v = coerce(self.line_no, &name, args, "nn")?;
                self.current_slide(&name)?.set_area(v[0].num(), v[1].num());
                Ok(())
            }
            "deffont" => self.handle_deffont(&name, args),
            "font" => {
                let v = coerce(self.line_no, &name, args, "s")?;
                self.current_slide(&name)?.set_font(v[0].text());
                Ok(())
            }
            "size" => {
                let v = coerce(self.line_no, &name, args, "n")?;
                self.current_slide(&name)?.set_size(v[0].num());
                Ok(())
            }
            "vgap" => {
                let v = coerce(self.line_no, &name, args, "n")?;
                self.current_slide(&name)?.set_vgap(v[0].num());
                Ok(())
            }
            "fore" => {
                let v = coerce(self.line_no, &name, args, "s")?;
                let color = parse_color(v[0].text())?;
                self.current_slide(&name)?.set_color(color);
                Ok(())
            }
            "left" | "center" | "right" => self.handle_alignment(&name, args),
            "prefix" => self.handle_prefix(&name, args),
            "cont" => {
                coerce(self.line_no, &name, args, "")?;
                self.current_slide(&name)?.reopen_line();
                self.continuing = true;
                Ok(())
            }
            "mark" => {
                coerce(self.line_no, &name, args, "")?;
                let mark = self.current_slide(&name)?.add_mark();
                self.active_mark = Some(mark);
                Ok(())
            }
            "again" => self.handle_again(&name, args),
            "newimage" => self.handle_newimage(&name, args),
            // Deliberate no-ops: cache, color-cycling and system-command
            // hints that have no effect on layout.
            "noop" | "ccolor" | "pcache" | "system" => Ok(()),
            _ => {
                log::debug!(
                    "line {}: ignoring unknown directive {:?}",
                    self.line_no,
                    name
                );
                Ok(())
            }
        }
    }

    fn handle_deffont(&mut self, name: &str, args: &[String]) -> Result<()> {
        if !self.presentation.slides.is_empty() {
            return Err(Error::syntax(
                self.line_no,
                "%deffont is only allowed in the preamble",
            ));
        }
        let v = coerce(self.line_no, name, args, "sws")?;
        self.options
            .font_registry
            .define(v[0].text(), v[1].text(), v[2].text())
    }

    fn handle_alignment(&mut self, name: &str, args: &[String]) -> Result<()> {
        coerce(self.line_no, name, args, "")?;
        let alignment = match name {
            "left" => Alignment::Left,
            "center" => Alignment::Center,
            "right" => Alignment::Right,
            _ => unreachable!("dispatched on alignment names"),
        };
        // Selecting one alignment counts all three as used on this line, so
        // a default directive cannot re-align it afterwards.
        for other in ["left", "center", "right"] {
            self.used_this_line.insert(other.to_string());
        }
        self.current_slide(name)?.set_alignment(alignment);
        Ok(())
    }

    fn handle_prefix(&mut self, name: &str, args: &[String]) -> Result<()> {
        let v = coerce(self.line_no, name, args, "S")?;
        match &v[0] {
            ArgValue::Num(percent) => {
                let percent = *percent;
                self.current_slide(name)?.set_prefix(Some(percent));
            }
            _ => {
                // Only integer percent indents are supported; string
                // prefixes are accepted and ignored.
                log::warn!(
                    "line {}: string prefixes are not supported, ignoring",
                    self.line_no
                );
            }
        }
        Ok(())
    }

    fn handle_again(&mut self, name: &str, args: &[String]) -> Result<()> {
        coerce(self.line_no, name, args, "")?;
        let Some(mark) = self.active_mark else {
            return Err(Error::syntax(self.line_no, "%again without %mark"));
        };
        // An empty text addition keeps the line and column bookkeeping in
        // step before the again chunk opens the overlay line.
        self.emit_text("")?;
        self.current_slide(name)?.add_again(mark);
        Ok(())
    }

    fn handle_newimage(&mut self, name: &str, args: &[String]) -> Result<()> {
        // Variable-length flag list (`-zoom <n>`, `-raise <n>`) followed by
        // a mandatory quoted filename.
        let pairs = args.len().saturating_sub(1) / 2;
        let spec = "wn".repeat(pairs) + "s";
        let v = coerce(self.line_no, name, args, &spec)?;

        let mut zoom = 100;
        let mut raised_by = 0;
        for pair in v[..v.len() - 1].chunks(2) {
            match pair[0].text() {
                "-zoom" => zoom = pair[1].num(),
                "-raise" => raised_by = pair[1].num(),
                flag => {
                    return Err(Error::syntax(
                        self.line_no,
                        format!("newimage {} not handled yet", flag),
                    ));
                }
            }
        }

        let path = self.presentation.base_dir.join(v[v.len() - 1].text());
        let (width, height) = match self.options.image_reader.size(&path) {
            Ok(size) => size,
            Err(err) => {
                log::warn!(
                    "line {}: cannot read size of {}: {}",
                    self.line_no,
                    path.display(),
                    err
                );
                (0, 0)
            }
        };
        self.current_slide(name)?.add_image(ImageChunk {
            path,
            zoom,
            raised_by,
            width,
            height,
        });
        Ok(())
    }

    fn handle_text(&mut self, line: &str) -> Result<()> {
        let text = resolve_escapes(line);
        self.emit_text(&text)
    }

    fn emit_text(&mut self, text: &str) -> Result<()> {
        if self.presentation.slides.is_empty() {
            return Err(Error::syntax(self.line_no, "text before first %page"));
        }

        if self.continuing {
            // %cont suppresses the column advance and the default replay
            // for exactly one text addition.
            self.continuing = false;
        } else {
            self.column += 1;
            if self.use_defaults {
                let defaults = self
                    .presentation
                    .default_directives
                    .get(&self.column)
                    .cloned()
                    .unwrap_or_default();
                for directive in defaults {
                    let name = directive.split_whitespace().next().unwrap_or("");
                    if !self.used_this_line.contains(name) {
                        self.handle_directive(&directive)?;
                    }
                }
            }
        }

        let slide = self
            .presentation
            .slides
            .last_mut()
            .expect("slide presence checked above");
        slide.add_text(text);
        self.used_this_line.clear();
        Ok(())
    }

    fn current_slide(&mut self, name: &str) -> Result<&mut Slide> {
        let line = self.line_no;
        self.presentation
            .slides
            .last_mut()
            .ok_or_else(|| Error::syntax(line, format!("%{} before first %page", name)))
    }

    fn new_page(&mut self) {
        self.presentation.slides.push(Slide::new());
        self.column = 0;
        self.continuing = false;
        self.use_defaults = true;
        self.used_this_line.clear();
        self.active_mark = None;
    }
}

/// Resolve backslash escapes: `\#` becomes a literal comment character,
/// `\\` a literal backslash, and so on for any escaped character.
fn resolve_escapes(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
