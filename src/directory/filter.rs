//! Filter criteria for the directory's filtered view.

use crate::models::ContactType;
use std::fmt;

/// Selector over contact types, including the match-everything case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    /// Both individuals and organizations.
    #[default]
    All,
    /// Individuals only.
    Personal,
    /// Organizations only.
    Corporate,
}

impl TypeFilter {
    /// True if a contact of `contact_type` passes this selector.
    pub fn matches(self, contact_type: ContactType) -> bool {
        match self {
            Self::All => true,
            Self::Personal => contact_type == ContactType::Personal,
            Self::Corporate => contact_type == ContactType::Corporate,
        }
    }

    /// All selector values, in display order.
    pub fn all_values() -> [TypeFilter; 3] {
        [Self::All, Self::Personal, Self::Corporate]
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Personal => write!(f, "persons"),
            Self::Corporate => write!(f, "companies"),
        }
    }
}

/// The composable predicate applied to the directory: a type selector plus
/// a free-text fragment. An empty fragment matches every contact.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    type_filter: TypeFilter,
    text: String,
}

impl Filter {
    /// Build a filter from its two criteria.
    pub fn new(type_filter: TypeFilter, text: impl Into<String>) -> Self {
        Self {
            type_filter,
            text: text.into(),
        }
    }

    /// The type selector.
    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    /// The free-text fragment.
    pub fn text(&self) -> &str {
        &self.text
    }
}
