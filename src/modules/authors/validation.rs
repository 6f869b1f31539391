//! Field rules shared by the store and the client controller.
//!
//! Raw request bodies deserialize into [`AuthorInput`], where every field is
//! optional. [`AuthorInput::validate`] is the only way to obtain a
//! [`ValidatedAuthor`], which is what the store and the HTTP client accept.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `local@domain.tld`, where each part is one or more non-`@` characters.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email pattern compiles"));

/// Why an author payload was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("email must be a valid address")]
    InvalidEmail,
}

/// Unchecked author fields as they arrive from a request or a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInput {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Author fields that passed [`AuthorInput::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedAuthor {
    first: String,
    last: String,
    email: String,
}

impl AuthorInput {
    pub fn new(
        first: impl Into<String>,
        last: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first: Some(first.into()),
            last: Some(last.into()),
            email: Some(email.into()),
        }
    }

    /// Check presence of every field, then the email shape.
    pub fn validate(self) -> Result<ValidatedAuthor, ValidationError> {
        let first = required("first", self.first)?;
        let last = required("last", self.last)?;
        let email = required("email", self.email)?;

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(ValidatedAuthor { first, last, email })
    }
}

impl ValidatedAuthor {
    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn last(&self) -> &str {
        &self.last
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn into_author(self, id: i64) -> super::models::Author {
        super::models::Author {
            id,
            first: self.first,
            last: self.last,
            email: self.email,
        }
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::Missing(field)),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_input() {
        let validated = AuthorInput::new("Ann", "Lee", "ann@x.co").validate().unwrap();
        assert_eq!(validated.first(), "Ann");
        assert_eq!(validated.last(), "Lee");
        assert_eq!(validated.email(), "ann@x.co");
    }

    #[test]
    fn missing_and_empty_fields_are_reported_in_order() {
        assert_eq!(
            AuthorInput::default().validate(),
            Err(ValidationError::Missing("first"))
        );
        assert_eq!(
            AuthorInput::new("Ann", "", "ann@x.co").validate(),
            Err(ValidationError::Missing("last"))
        );
        assert_eq!(
            AuthorInput::new("Ann", "Lee", "").validate(),
            Err(ValidationError::Missing("email"))
        );
    }

    #[test]
    fn whitespace_counts_as_present() {
        assert!(AuthorInput::new(" ", " ", "a@b.co").validate().is_ok());
    }

    #[test]
    fn email_shape() {
        for good in ["a@b.co", "first.last@mail.example.org", "x y@d.t"] {
            assert!(is_valid_email(good), "{good} should pass");
        }
        for bad in ["ab.co", "a@bco", "@b.co", "a@.co", "a@b.", "a@@b.co", "a@b@c.co"] {
            assert!(!is_valid_email(bad), "{bad} should fail");
        }
    }

    #[test]
    fn malformed_email_is_a_validation_error() {
        assert_eq!(
            AuthorInput::new("Ann", "Lee", "ann.x.co").validate(),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ValidationError::Missing("first").to_string(),
            "first is required"
        );
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "email must be a valid address"
        );
    }

    #[test]
    fn missing_json_fields_deserialize_to_none() {
        let input: AuthorInput = serde_json::from_str(r#"{"first":"Ann"}"#).unwrap();
        assert_eq!(input.first.as_deref(), Some("Ann"));
        assert!(input.last.is_none());
        assert!(input.email.is_none());
    }
}
