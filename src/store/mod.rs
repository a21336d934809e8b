//! Whole-document persistence.

mod json;

pub use json::{decode, encode, parse_records, resolve_links, JsonStore, PendingLinks};
