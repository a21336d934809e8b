//! Note model: a timestamped text fragment attached to a contact.

use crate::domain::{Searchable, ValidationError};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// A timestamped note.
///
/// The creation timestamp is assigned when the note is built and refreshed
/// whenever the content changes. Equality considers the content only, while
/// ordering considers the timestamp first: two notes with the same text
/// written at different times compare equal but do not sort together
/// (a natural ordering inconsistent with equals, kept on purpose).
#[derive(Debug, Clone)]
pub struct Note {
    content: String,
    created_at: DateTime<Utc>,
}

impl Note {
    /// Create a note, stamping it with the current time.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyContent` for an empty string.
    pub fn new(content: impl Into<String>) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        Ok(Self {
            content,
            created_at: Utc::now(),
        })
    }

    /// The note text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// When the current content was written.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the content and refresh the timestamp.
    ///
    /// Empty input is ignored, leaving both content and timestamp unchanged.
    pub fn set_content(&mut self, content: &str) {
        if !content.is_empty() {
            self.content = content.to_string();
            self.created_at = Utc::now();
        }
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl Eq for Note {}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.content.cmp(&other.content))
    }
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// "[YYYY-MM-DD] content"
impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.created_at.format("%Y-%m-%d"), self.content)
    }
}

impl Searchable for Note {
    fn contains_text(&self, element: &str) -> bool {
        self.content.contains(element)
    }
}
