//! Free-text search seam shared by all directory values.

/// Types that can be probed for a free-text fragment.
///
/// Implementations match against the human-readable form of the value,
/// so whatever a user sees on screen can be found again by typing a
/// piece of it.
pub trait Searchable {
    /// Return true if `element` occurs somewhere in this value.
    fn contains_text(&self, element: &str) -> bool;
}
