//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided contact name is empty.
    EmptyName,

    /// The provided first name is empty.
    EmptyFirstName,

    /// The provided way (street) is empty.
    EmptyWay,

    /// The provided city is empty.
    EmptyCity,

    /// The provided zip code is empty.
    EmptyZipCode,

    /// The provided street number is not strictly positive.
    InvalidStreetNumber(i32),

    /// The provided note content is empty.
    EmptyContent,

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided link is invalid.
    InvalidLink(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::EmptyFirstName => write!(f, "first name cannot be empty"),
            Self::EmptyWay => write!(f, "way cannot be empty"),
            Self::EmptyCity => write!(f, "city cannot be empty"),
            Self::EmptyZipCode => write!(f, "zip code cannot be empty"),
            Self::InvalidStreetNumber(number) => {
                write!(f, "street number must be positive, got {}", number)
            }
            Self::EmptyContent => write!(f, "note content cannot be empty"),
            Self::InvalidEmail(email) => write!(f, "invalid email address: {}", email),
            Self::InvalidLink(link) => write!(f, "invalid link: {}", link),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Error raised when a string does not match the phone number pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    input: String,
}

impl FormatError {
    /// Wrap the offending input string.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The input that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a valid phone number", self.input)
    }
}

impl std::error::Error for FormatError {}
