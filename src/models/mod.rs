//! Data models for contacts and their notes.

mod contact;
mod note;

pub use contact::{Contact, ContactId, ContactKind, ContactType};
pub use note::Note;
