//! Authoritative in-memory author list.
//!
//! All state sits behind one mutex, so every operation runs to completion
//! before the next one observes the list. Identifiers come from a counter
//! that only moves forward; deleted ids are never handed out again.

use thiserror::Error;
use tokio::sync::Mutex;

use super::models::Author;
use super::validation::{AuthorInput, ValidatedAuthor, ValidationError};

/// Failures reported by [`AuthorStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email already exists.")]
    Conflict { email: String },

    #[error("Author not found")]
    NotFound { id: i64 },
}

#[derive(Debug)]
struct Inner {
    authors: Vec<Author>,
    next_id: i64,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.authors
            .iter()
            .any(|author| author.email == email && Some(author.id) != except)
    }

    fn bump_counter(&mut self) {
        let max_id = self.authors.iter().map(|a| a.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
    }
}

#[derive(Debug)]
pub struct AuthorStore {
    inner: Mutex<Inner>,
}

impl AuthorStore {
    /// An empty store whose first id is 1.
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// A store holding `authors` in the given order.
    pub fn seeded(authors: Vec<Author>) -> Self {
        let mut inner = Inner {
            authors,
            next_id: 1,
        };
        inner.bump_counter();
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Append `authors`, skipping any whose id or email is already present.
    ///
    /// Returns how many were added.
    pub async fn seed(&self, authors: Vec<Author>) -> usize {
        let mut inner = self.inner.lock().await;
        let mut added = 0;

        for author in authors {
            let id_taken = inner.authors.iter().any(|a| a.id == author.id);
            if id_taken || inner.email_taken(&author.email, None) {
                tracing::debug!(id = author.id, "skipping seed author already present");
                continue;
            }
            inner.authors.push(author);
            added += 1;
        }

        inner.bump_counter();
        added
    }

    /// Snapshot of every author, in insertion order.
    pub async fn list(&self) -> Vec<Author> {
        self.inner.lock().await.authors.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.authors.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Validate `input` and append it as a new author.
    pub async fn create(&self, input: AuthorInput) -> Result<Author, StoreError> {
        let validated = input.validate().inspect_err(|error| {
            tracing::debug!(%error, "rejected author create");
        })?;
        self.insert(validated).await
    }

    /// Append an already validated author.
    pub async fn insert(&self, validated: ValidatedAuthor) -> Result<Author, StoreError> {
        let mut inner = self.inner.lock().await;

        if inner.email_taken(validated.email(), None) {
            tracing::debug!(email = validated.email(), "rejected duplicate email on create");
            return Err(StoreError::Conflict {
                email: validated.email().to_string(),
            });
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let author = validated.into_author(id);
        inner.authors.push(author.clone());

        tracing::info!(id, "author created");
        Ok(author)
    }

    /// Validate `input` and overwrite the fields of author `id`.
    ///
    /// Checks run in order: field rules, existence, email uniqueness among the
    /// other authors. The author keeps its position in the list.
    pub async fn update(&self, id: i64, input: AuthorInput) -> Result<Author, StoreError> {
        let validated = input.validate().inspect_err(|error| {
            tracing::debug!(id, %error, "rejected author update");
        })?;
        self.replace(id, validated).await
    }

    /// Overwrite author `id` with already validated fields.
    pub async fn replace(&self, id: i64, validated: ValidatedAuthor) -> Result<Author, StoreError> {
        let mut inner = self.inner.lock().await;

        let Some(index) = inner.authors.iter().position(|a| a.id == id) else {
            tracing::debug!(id, "update for unknown author");
            return Err(StoreError::NotFound { id });
        };

        if inner.email_taken(validated.email(), Some(id)) {
            tracing::debug!(id, email = validated.email(), "rejected duplicate email on update");
            return Err(StoreError::Conflict {
                email: validated.email().to_string(),
            });
        }

        let author = validated.into_author(id);
        inner.authors[index] = author.clone();

        tracing::info!(id, "author updated");
        Ok(author)
    }

    /// Remove author `id` if present. Deleting an unknown id is not an error.
    ///
    /// Returns whether a record was removed.
    pub async fn delete(&self, id: i64) -> bool {
        let mut inner = self.inner.lock().await;
        let before = inner.authors.len();
        inner.authors.retain(|a| a.id != id);
        let removed = inner.authors.len() != before;

        if removed {
            tracing::info!(id, "author deleted");
        } else {
            tracing::debug!(id, "delete for unknown author ignored");
        }
        removed
    }
}

impl Default for AuthorStore {
    fn default() -> Self {
        Self::new()
    }
}
