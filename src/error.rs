//! Error types for cap-features
//!
//! This module defines all error types used throughout the library.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the cap-features Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cap-features operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed XML: bad markup, encoding problems, truncated input
    #[error("XML error: {0}")]
    Xml(#[from] ParseError),

    /// I/O error while reading a document or writing the report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Malformed report text
    #[error("report error: {0}")]
    Report(String),

    /// Failure while processing a specific input file
    #[error("{}: {}", .path.display(), .source)]
    File {
        /// The input that failed
        path: PathBuf,
        /// What went wrong with it
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the path of the failing input to this error
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Error::File {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error (or the error it wraps) is an XML parse failure
    pub fn is_xml(&self) -> bool {
        match self {
            Error::Xml(_) => true,
            Error::File { source, .. } => source.is_xml(),
            _ => false,
        }
    }
}

/// XML parsing error
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Byte offset in the input where the error was detected
    pub position: Option<usize>,
    /// Element or markup context of the error
    pub location: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            location: None,
        }
    }

    /// Set the byte position
    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(pos) = self.position {
            write!(f, " at position {}", pos)?;
        }

        if let Some(ref loc) = self.location {
            write!(f, " (in <{}>)", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
