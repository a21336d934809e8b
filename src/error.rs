//! Error types for the carnet crate.
//!
//! This module defines custom error types using `thiserror` for precise error
//! handling. Domain value validation errors live in [`crate::domain::errors`].

use crate::domain::{FormatError, ValidationError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding a persisted contacts document.
///
/// Any of these aborts the whole decode; no partial directory is returned.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A required top-level or record node is absent
    #[error("missing `{0}` node")]
    MissingNode(&'static str),

    /// A node that must be an array is not one
    #[error("`{0}` node is not an array")]
    NotAnArray(&'static str),

    /// A required field is absent or not a string inside a sub-record
    #[error("missing `{field}` node in {record}")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    /// The document date cannot be parsed
    #[error("unable to parse date `{0}`")]
    InvalidDate(String),

    /// An address names a country outside the supported set
    #[error("unknown country `{0}`")]
    UnknownCountry(String),

    /// A phone number field does not match the phone pattern
    #[error(transparent)]
    Phone(#[from] FormatError),

    /// A value field fails domain validation (email, link, note, address)
    #[error(transparent)]
    Value(#[from] ValidationError),

    /// The document is not syntactically valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while loading or saving the contacts file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying read or write failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be decoded
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with ParseError
pub type ParseResult<T> = Result<T, ParseError>;

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
