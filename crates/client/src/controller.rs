use authors_app::{Author, ValidationError};
use thiserror::Error;

use crate::backend::{AuthorsBackend, ClientError};
use crate::cache::AuthorCache;
use crate::form::{AuthorForm, FormField, FormMode, UnknownField};

/// Why a form submit did not go through.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Refused locally; no request was sent
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Server(#[from] ClientError),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(error) => error.to_string(),
            SubmitError::Server(error) => error.user_message(),
        }
    }
}

/// Form/table state for the authors screen.
///
/// Every operation that talks to the server takes `&mut self`, so a controller
/// never has more than one request in flight.
pub struct AuthorsController<B> {
    backend: B,
    cache: AuthorCache,
    form: AuthorForm,
    message: Option<String>,
}

impl<B: AuthorsBackend> AuthorsController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: AuthorCache::new(),
            form: AuthorForm::default(),
            message: None,
        }
    }

    /// Fetch the full list and make it the local cache.
    ///
    /// On failure the cache is left as it was.
    pub async fn activate(&mut self) -> Result<(), ClientError> {
        match self.backend.list().await {
            Ok(authors) => {
                tracing::debug!(count = authors.len(), "author list loaded");
                self.cache.replace_all(authors);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "failed to load authors");
                Err(error)
            }
        }
    }

    /// Update one form field, addressed by its name.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let field: FormField = name.parse()?;
        self.form.set(field, value);
        Ok(())
    }

    /// Load a cached author into the form for editing.
    ///
    /// Returns `false` when the id is not in the cache.
    pub fn edit(&mut self, id: i64) -> bool {
        match self.cache.get(id) {
            Some(author) => {
                self.form.load(author);
                true
            }
            None => false,
        }
    }

    /// Validate the form and send it as a create or an update.
    ///
    /// On success the returned record is merged into the cache and the form is
    /// reset to create mode. On failure the form keeps its contents and
    /// [`message`](Self::message) holds the text to show.
    pub async fn submit(&mut self) -> Result<Author, SubmitError> {
        let result = self.send_form().await;

        match &result {
            Ok(author) => {
                self.cache.merge(author.clone());
                self.form.reset();
                self.message = None;
            }
            Err(error) => {
                tracing::debug!(%error, mode = ?self.form.mode(), "submit failed");
                self.message = Some(error.user_message());
            }
        }

        result
    }

    async fn send_form(&self) -> Result<Author, SubmitError> {
        let validated = self.form.to_input().validate()?;

        let author = match self.form.mode() {
            FormMode::Create => self.backend.create(&validated).await?,
            FormMode::Edit(id) => self.backend.update(id, &validated).await?,
        };

        Ok(author)
    }

    /// Ask the server to delete `id`; drop it locally only once acknowledged.
    ///
    /// Failures are logged but not surfaced to the user.
    pub async fn delete(&mut self, id: i64) -> bool {
        match self.backend.delete(id).await {
            Ok(()) => {
                self.cache.evict(id);
                true
            }
            Err(error) => {
                tracing::warn!(id, %error, "delete failed");
                false
            }
        }
    }

    pub fn authors(&self) -> &[Author] {
        self.cache.as_slice()
    }

    pub fn form(&self) -> &AuthorForm {
        &self.form
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
