//! Domain value objects with validation.
//!
//! These types enforce invariants at construction time, making illegal
//! states unrepresentable throughout the rest of the crate.

mod address;
mod email;
pub mod errors;
mod link;
mod phone;
mod searchable;

pub use address::{Address, Country};
pub use email::EmailAddress;
pub use errors::{FormatError, ValidationError};
pub use link::Link;
pub use phone::{PhoneNumber, Prefix};
pub use searchable::Searchable;
