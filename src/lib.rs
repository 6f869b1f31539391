//! Authors application library
//!
//! The `authors` module holds the record type, the validation rules shared with
//! the client, the in-memory store and its HTTP routes.

pub mod modules;

/// Re-export commonly used types
pub use modules::authors::{
    models::Author,
    store::{AuthorStore, StoreError},
    validation::{AuthorInput, ValidatedAuthor, ValidationError},
};
