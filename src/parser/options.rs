//! Parsing options and collaborator seams.
//!
//! The parser never runs a subprocess, resolves a font or decodes an image
//! itself; those jobs go through the traits below so callers can substitute
//! their own implementations (tests inject fakes the same way).

use std::fmt;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::fonts::{AcceptAllFonts, FontRegistry};

/// Runs a `%filter` region's text through an external command.
pub trait FilterRunner {
    /// Pipe `input` through `command` and capture its output.
    fn run(&self, command: &str, input: &str) -> Result<String>;
}

/// Default filter runner: `sh -c <command>`, blocking with no timeout.
///
/// Callers needing cancellation must wrap their own [`FilterRunner`].
#[derive(Debug, Default)]
pub struct ShellFilterRunner;

impl FilterRunner for ShellFilterRunner {
    fn run(&self, command: &str, input: &str) -> Result<String> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        if let Some(stdin) = child.stdin.take() {
            let mut stdin = stdin;
            stdin.write_all(input.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(Error::Filter(format!(
                "{:?} exited with {}",
                command, output.status
            )));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| Error::Filter(format!("{:?} produced invalid UTF-8: {}", command, e)))
    }
}

/// Probes the intrinsic pixel size of an image file.
pub trait ImageReader {
    /// Intrinsic (width, height) in pixels of the image at `path`.
    fn size(&self, path: &Path) -> Result<(u32, u32)>;
}

/// Reader used when no image decoder is wired in.
///
/// Always fails; the interpreter downgrades the failure to a warning and a
/// zero size, so presentations referencing images still convert.
#[derive(Debug, Default)]
pub struct NoImageReader;

impl ImageReader for NoImageReader {
    fn size(&self, path: &Path) -> Result<(u32, u32)> {
        Err(Error::Render(format!(
            "no image reader configured for {}",
            path.display()
        )))
    }
}

/// Options for parsing MagicPoint sources.
#[derive(Clone)]
pub struct ParseOptions {
    /// Whether `%filter` may execute external commands
    pub unsafe_filters: bool,

    /// Base directory for `%include` and `%newimage` paths
    pub base_dir: PathBuf,

    /// Document title recorded on the model
    pub title: Option<String>,

    /// Collaborator running `%filter` commands
    pub filter_runner: Arc<dyn FilterRunner>,

    /// Collaborator resolving `%deffont` definitions
    pub font_registry: Arc<dyn FontRegistry>,

    /// Collaborator probing image sizes for `%newimage`
    pub image_reader: Arc<dyn ImageReader>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow or forbid external `%filter` execution.
    pub fn with_unsafe_filters(mut self, unsafe_filters: bool) -> Self {
        self.unsafe_filters = unsafe_filters;
        self
    }

    /// Set the base directory for includes and images.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Substitute the filter runner.
    pub fn with_filter_runner(mut self, runner: Arc<dyn FilterRunner>) -> Self {
        self.filter_runner = runner;
        self
    }

    /// Substitute the font registry.
    pub fn with_font_registry(mut self, registry: Arc<dyn FontRegistry>) -> Self {
        self.font_registry = registry;
        self
    }

    /// Substitute the image reader.
    pub fn with_image_reader(mut self, reader: Arc<dyn ImageReader>) -> Self {
        self.image_reader = reader;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            unsafe_filters: false,
            base_dir: PathBuf::new(),
            title: None,
            filter_runner: Arc::new(ShellFilterRunner),
            font_registry: Arc::new(AcceptAllFonts),
            image_reader: Arc::new(NoImageReader),
        }
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("unsafe_filters", &self.unsafe_filters)
            .field("base_dir", &self.base_dir)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}
