//! Carnet - An in-memory contacts directory with JSON persistence.
//!
//! This library manages a directory of personal and corporate contacts,
//! each carrying labeled phone numbers, postal addresses, email addresses,
//! links, and timestamped notes. People and companies are linked by a
//! symmetric employment relationship that the directory keeps consistent
//! on every mutation.
//!
//! # Architecture
//!
//! - **domain**: Validated value types (phone numbers, addresses, emails, links)
//! - **models**: Contact records and notes
//! - **directory**: The contact collection, relationship operations, and filtering
//! - **store**: Whole-document JSON persistence
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables

pub mod config;
pub mod directory;
pub mod domain;
pub mod error;
pub mod models;
pub mod store;

pub use config::Config;
pub use directory::{Directory, Filter, TypeFilter};
pub use domain::{
    Address, Country, EmailAddress, FormatError, Link, PhoneNumber, Prefix, Searchable,
    ValidationError,
};
pub use error::{ConfigError, ParseError, StoreError};
pub use models::{Contact, ContactId, ContactKind, ContactType, Note};
pub use store::JsonStore;
