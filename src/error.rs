//! Error types for nxdl-doctools
//!
//! This module defines all error types used by the documentation build
//! tools. Every fatal condition propagates uncaught to the process
//! boundary; there is no retry or partial-recovery path.

use std::fmt;
use thiserror::Error;

/// Result type alias using the nxdl-doctools Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the documentation build tools
#[derive(Error, Debug)]
pub enum Error {
    /// Schema file missing, unreadable, or not well-formed XML
    #[error("parse error: {0}")]
    Parse(String),

    /// A curated query matched zero nodes in the schema
    #[error("lookup error: {0}")]
    Lookup(String),

    /// A documentation block has inconsistent internal indentation
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Resource replication error (bad source root, identical paths, ...)
    #[error("resource error: {0}")]
    Resource(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed embedded documentation, with the offending source line
///
/// Raised when a continuation line of a documentation block carries
/// non-whitespace inside the indentation region established by the
/// block's first line. The offending line is kept so the schema author
/// can find and fix it.
#[derive(Debug, Clone)]
pub struct FormatError {
    /// Error message
    pub message: String,
    /// The documentation line that failed indentation normalization
    pub line: Option<String>,
}

impl FormatError {
    /// Create a new format error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    /// Attach the offending documentation line
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref line) = self.line {
            write!(f, "\n\nLine:\n{}", line)?;
        }

        Ok(())
    }
}

impl std::error::Error for FormatError {}
