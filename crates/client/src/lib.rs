//! Client-side controller for the authors API.
//!
//! [`AuthorsController`] mirrors the server list in an [`AuthorCache`], drives a
//! single [`AuthorForm`] in create or edit mode, and talks to the server through
//! an [`AuthorsBackend`]. The same validation the store applies runs before any
//! request is sent.

pub mod backend;
pub mod cache;
pub mod controller;
pub mod form;

pub use backend::{AuthorsBackend, ClientError, HttpBackend};
pub use cache::AuthorCache;
pub use controller::{AuthorsController, SubmitError};
pub use form::{AuthorForm, FormField, FormMode, UnknownField};

pub use authors_app::{Author, AuthorInput, ValidationError};
