use async_trait::async_trait;
use authors_app::{Author, ValidatedAuthor};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Shown when the server rejects an email already in use.
pub const CONFLICT_MESSAGE: &str = "An author with that email already exists.";
/// Shown when the server fails without saying why.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";
/// Shown when no response arrives at all.
pub const CONNECT_MESSAGE: &str = "Failed to connect to server.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("email conflict")]
    Conflict(Option<String>),

    #[error("request rejected with status {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("failed to reach server: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("unreadable response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    /// Text to put in front of the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Conflict(_) => CONFLICT_MESSAGE.to_string(),
            ClientError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Rejected { message: None, .. } | ClientError::Decode(_) => {
                FALLBACK_MESSAGE.to_string()
            }
            ClientError::Connect(_) => CONNECT_MESSAGE.to_string(),
        }
    }
}

/// Request/response exchange with the author store.
#[async_trait]
pub trait AuthorsBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<Author>, ClientError>;

    async fn create(&self, author: &ValidatedAuthor) -> Result<Author, ClientError>;

    async fn update(&self, id: i64, author: &ValidatedAuthor) -> Result<Author, ClientError>;

    async fn delete(&self, id: i64) -> Result<(), ClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// [`AuthorsBackend`] speaking JSON over HTTP to `{base_url}/authors`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/authors", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/authors/{}", self.base_url, id)
    }
}

/// Turn a non-success status into the matching [`ClientError`].
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // Servers may answer with no body or a non-JSON one.
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .map(|body| body.error);

    tracing::debug!(status = status.as_u16(), ?message, "request rejected");

    if status == StatusCode::CONFLICT {
        Err(ClientError::Conflict(message))
    } else {
        Err(ClientError::Rejected { status, message })
    }
}

#[async_trait]
impl AuthorsBackend for HttpBackend {
    async fn list(&self) -> Result<Vec<Author>, ClientError> {
        let response = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(ClientError::Connect)?;
        check(response)
            .await?
            .json()
            .await
            .map_err(ClientError::Decode)
    }

    async fn create(&self, author: &ValidatedAuthor) -> Result<Author, ClientError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(author)
            .send()
            .await
            .map_err(ClientError::Connect)?;
        check(response)
            .await?
            .json()
            .await
            .map_err(ClientError::Decode)
    }

    async fn update(&self, id: i64, author: &ValidatedAuthor) -> Result<Author, ClientError> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(author)
            .send()
            .await
            .map_err(ClientError::Connect)?;
        check(response)
            .await?
            .json()
            .await
            .map_err(ClientError::Decode)
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(ClientError::Connect)?;
        check(response).await?;
        Ok(())
    }
}
