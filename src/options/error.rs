//! Error types for parsing, typing and persisting option lines.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the options core.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// A quote or parenthesis was opened but never closed.
    #[error("Unterminated {delimiter} opened at offset {offset}")]
    UnterminatedGroup {
        /// The opening delimiter character.
        delimiter: char,
        /// Byte offset of the opening delimiter in the options text.
        offset: usize,
    },

    /// A non-empty segment had no `=` separating key and value.
    #[error("Option segment '{segment}' has no key")]
    MissingKey { segment: String },

    /// The requested type tag is not one of the recognized kinds.
    #[error("Invalid value type '{0}' (expected bool, int, float, string, group or literal)")]
    InvalidType(String),

    /// The supplied text does not parse as the requested kind.
    #[error("Invalid {kind} value: '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    /// The key would not read back as itself (empty, or containing `=`, `,` or a line break).
    #[error("Invalid option key '{0}'")]
    InvalidKey(String),

    /// Reading or writing a settings file failed.
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OptionsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, OptionsError>;
