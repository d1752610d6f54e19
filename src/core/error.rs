//! Error handling for the docsmith assembly library.
//!
//! This module defines the main error type `AssemblyError` used throughout the
//! library, along with a convenient `Result` type alias. Every variant is fatal:
//! assembly never recovers locally, it aborts the whole run.
//!
//! # Examples
//!
//! ```
//! use docsmith::core::error::{AssemblyError, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(AssemblyError::unknown_file_type("notes.txt", "txt"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for assembly operations
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Main error type for assembly operations
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// A manifest, template or content file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// JSON parse failure or a required key is missing or has the wrong shape
    #[error("Malformed manifest {}: {message}", .path.display())]
    MalformedManifest { path: PathBuf, message: String },

    /// No handler is registered for the file's extension
    #[error("Unknown file type '{extension}' for {}", .path.display())]
    UnknownFileType { path: PathBuf, extension: String },

    /// Strict rendering hit a placeholder with no bound value
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// A `@file` reference in a content record points at a missing file
    #[error("Reference '{reference}' in {} not found: {}", .record.display(), .target.display())]
    ReferenceNotFound {
        record: PathBuf,
        reference: String,
        target: PathBuf,
    },

    /// A `$` that does not start a valid placeholder
    #[error("Invalid placeholder in template: line {line}, col {column}")]
    MalformedTemplate { line: usize, column: usize },

    /// A procedural fragment failed or returned something that is not a context
    #[error("Procedure '{name}' failed: {message}")]
    Procedure { name: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),
}

impl AssemblyError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn malformed_manifest<S: Into<String>>(path: &Path, message: S) -> Self {
        Self::MalformedManifest {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn unknown_file_type(path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self::UnknownFileType {
            path: path.into(),
            extension: extension.into(),
        }
    }

    pub fn procedure<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        Self::Procedure {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
