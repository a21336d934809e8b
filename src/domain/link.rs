//! Link value object (URL-shaped strings).

use super::errors::ValidationError;
use super::Searchable;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Accepted schemes and body characters for a link.
static LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(file|ftp|http|https|sftp):///*[-a-zA-Z0-9@:%._+~#?&/=]*$")
        .expect("Failed to compile link regex")
});

/// A type-safe wrapper for links, validated at construction time.
///
/// # Example
///
/// ```
/// use carnet::domain::Link;
///
/// let link = Link::new("https://www.ensiie.fr").unwrap();
/// assert_eq!(link.as_str(), "https://www.ensiie.fr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link(String);

impl Link {
    /// Create a new Link, validating the URL shape.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidLink` if the shape is invalid.
    pub fn new(link: impl Into<String>) -> Result<Self, ValidationError> {
        let link = link.into();

        if !LINK_REGEX.is_match(&link) {
            return Err(ValidationError::InvalidLink(link));
        }

        Ok(Self(link))
    }

    /// Get the link as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Serde support - serialize as string
impl Serialize for Link {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for Link {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Link::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Searchable for Link {
    fn contains_text(&self, element: &str) -> bool {
        self.0.contains(element)
    }
}
