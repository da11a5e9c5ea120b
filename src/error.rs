//! Error types for the unmgp library.

use std::io;
use thiserror::Error;

/// Result type alias for unmgp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while processing a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading source or included files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed directive or misplaced text in the source markup.
    #[error("syntax error on line {line}: {message}")]
    Syntax {
        /// Source line number as understood after preprocessing.
        line: u32,
        /// What went wrong.
        message: String,
    },

    /// A color value that is neither a known name nor a hex triplet.
    #[error("cannot parse color: {0}")]
    Color(String),

    /// A `%deffont` directive named a font engine the registry does not support.
    #[error("unsupported font engine: {0}")]
    FontEngine(String),

    /// The font registry could not resolve a requested font.
    #[error("cannot resolve font: {0}")]
    FontResolution(String),

    /// An external `%filter` command failed to run.
    #[error("filter command failed: {0}")]
    Filter(String),

    /// An `%again` chunk was drawn before the `%mark` it refers to.
    #[error("%again drawn before its %mark")]
    UndrawnMark,

    /// Error while rendering the finished model.
    #[error("rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Shorthand for a syntax error carrying the current source line.
    pub(crate) fn syntax(line: u32, message: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            message: message.into(),
        }
    }
}
