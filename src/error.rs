//! Error types for flatconf library

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for flatconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Configured base directory does not exist
    InvalidPath,
    /// An argument was out of range (e.g. a max depth below 1)
    InvalidArgument,
    /// Target configuration file could not be resolved to an existing file
    NotFound,
    /// No parser for the extension, or the parser rejected the content
    ParseFailure,
    /// Parsed data or a cache record has the wrong shape
    InvalidFormat,
    /// Nested structure exceeds the configured max depth
    DepthExceeded,
    /// Parser registration was rejected
    InvalidParser,
    /// Lower-level filesystem failure
    Io,
}

/// Main error type for flatconf library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Path & Argument Errors
    // -------------------------------------------------------------------------
    #[error("Invalid configuration directory: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration file not found: {0}")]
    NotFound(String),

    // -------------------------------------------------------------------------
    // Parsing Errors
    // -------------------------------------------------------------------------
    #[error("No suitable parser found for: {}", path.display())]
    NoParser { path: PathBuf },

    #[error("Failed to parse '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid parser registration: {0}")]
    InvalidParser(String),

    // -------------------------------------------------------------------------
    // Structure Errors
    // -------------------------------------------------------------------------
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Type mismatch for {key}: {reason}")]
    TypeMismatch { key: String, reason: String },

    #[error("Maximum depth of {max_depth} exceeded at '{key}'")]
    DepthExceeded { max_depth: usize, key: String },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{}': {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete file '{}': {source}", path.display())]
    FileDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Build a parse error for `path`
    pub fn parse(path: &Path, reason: impl std::fmt::Display) -> Self {
        Error::Parse {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidPath(_) => ErrorKind::InvalidPath,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::NoParser { .. } | Error::Parse { .. } => ErrorKind::ParseFailure,
            Error::InvalidParser(_) => ErrorKind::InvalidParser,
            Error::InvalidFormat(_) | Error::TypeMismatch { .. } | Error::Serialize(_) => {
                ErrorKind::InvalidFormat
            }
            Error::DepthExceeded { .. } => ErrorKind::DepthExceeded,
            Error::FileRead { .. }
            | Error::FileWrite { .. }
            | Error::DirectoryCreate { .. }
            | Error::FileDelete { .. } => ErrorKind::Io,
        }
    }

    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is a parse failure (no parser, or the parser rejected the file)
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        self.kind() == ErrorKind::ParseFailure
    }
}
